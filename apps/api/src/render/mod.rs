// Document rendering: layout + PDF serialization as one indivisible blocking unit.
// Either the whole byte stream is produced or the caller gets a single error.

pub mod handlers;
pub mod pdf;

use chrono::Utc;
use tokio::sync::OwnedSemaphorePermit;
use tracing::info;

use crate::deck::models::Card;
use crate::errors::AppError;
use crate::layout::engine::layout;
use crate::layout::sheet::SheetConfig;
use crate::layout::title_fit::resolve_title;
use crate::render::pdf::{render_to_document, DocumentMeta};

/// A finished PDF plus what went into it.
#[derive(Debug, Clone)]
pub struct RenderedDocument {
    pub bytes: Vec<u8>,
    pub page_count: usize,
    pub card_count: usize,
}

/// Lays out `cards` and serializes them to PDF on the blocking pool.
///
/// Takes owned data to satisfy `spawn_blocking`'s `'static` bound. The render-gate
/// `permit` moves into the blocking task and is released only when serialization ends,
/// even if the caller stops awaiting first.
pub async fn render_cards(
    cards: Vec<Card>,
    title: String,
    sheet: SheetConfig,
    permit: OwnedSemaphorePermit,
) -> Result<RenderedDocument, AppError> {
    let rendered = tokio::task::spawn_blocking(move || {
        let _permit = permit;
        let pages = layout(&cards, &title, &sheet);
        let meta = DocumentMeta {
            title: resolve_title(&title, &sheet.fallback_title),
            creator: format!("{} v{}", env!("CARGO_PKG_NAME"), env!("CARGO_PKG_VERSION")),
            created_at: Utc::now(),
        };
        render_to_document(&pages, &meta).map(|bytes| RenderedDocument {
            bytes,
            page_count: pages.len(),
            card_count: cards.len(),
        })
    })
    .await
    .map_err(|e| AppError::Internal(anyhow::anyhow!("spawn_blocking failed in render: {e}")))??;

    info!(
        cards = rendered.card_count,
        pages = rendered.page_count,
        bytes = rendered.bytes.len(),
        "Rendered card sheet PDF"
    );
    Ok(rendered)
}
