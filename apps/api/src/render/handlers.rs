//! Axum route handlers for layout previews and PDF export.

use std::sync::Arc;

use axum::{
    extract::State,
    http::header,
    response::{IntoResponse, Response},
    Json,
};
use bytes::Bytes;
use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::deck::ingest::validate_title;
use crate::deck::models::Card;
use crate::errors::AppError;
use crate::layout::engine::layout;
use crate::layout::instructions::PagePlan;
use crate::render::render_cards;
use crate::state::AppState;

// ────────────────────────────────────────────────────────────────────────────
// Request / Response types
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Deserialize)]
pub struct RenderRequest {
    pub cards: Vec<Card>,
    #[serde(default)]
    pub title: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct LayoutResponse {
    pub page_count: usize,
    pub pages: Vec<PagePlan>,
}

// ────────────────────────────────────────────────────────────────────────────
// Handlers
// ────────────────────────────────────────────────────────────────────────────

/// POST /api/v1/decks/layout
///
/// Returns the drawing instructions for every page, for on-screen previews.
pub async fn handle_layout(
    State(state): State<AppState>,
    Json(request): Json<RenderRequest>,
) -> Result<Json<LayoutResponse>, AppError> {
    let title = request.title.unwrap_or_default();
    validate_title(&title)?;

    let sheet = state.sheet.clone();
    let pages = tokio::task::spawn_blocking(move || layout(&request.cards, &title, &sheet))
        .await
        .map_err(|e| AppError::Internal(anyhow::anyhow!("spawn_blocking failed in layout: {e}")))?;

    Ok(Json(LayoutResponse {
        page_count: pages.len(),
        pages,
    }))
}

/// POST /api/v1/decks/pdf
///
/// Renders the cards to an A4 PDF and returns it as a download.
/// Only one PDF is generated at a time; a concurrent request gets 409. The gate stays
/// held until the blocking render ends, even if this request is dropped.
pub async fn handle_pdf(
    State(state): State<AppState>,
    Json(request): Json<RenderRequest>,
) -> Result<Response, AppError> {
    if request.cards.is_empty() {
        return Err(AppError::Validation(
            "cards cannot be empty".to_string(),
        ));
    }
    let title = request.title.unwrap_or_default();
    validate_title(&title)?;

    let permit = Arc::clone(&state.render_gate).try_acquire_owned().map_err(|_| {
        warn!("Rejected PDF request: another generation is in progress");
        AppError::Conflict("A PDF is already being generated".to_string())
    })?;

    let rendered = render_cards(request.cards, title, state.sheet.clone(), permit).await?;

    let disposition = format!(
        "attachment; filename=\"{}\"",
        state.config.pdf_filename
    );
    Ok((
        [
            (header::CONTENT_TYPE, "application/pdf".to_string()),
            (header::CONTENT_DISPOSITION, disposition),
        ],
        Bytes::from(rendered.bytes),
    )
        .into_response())
}
