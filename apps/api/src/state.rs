use std::sync::Arc;

use tokio::sync::Semaphore;

use crate::config::Config;
use crate::layout::sheet::{default_sheet_config, SheetConfig};

/// Shared application state injected into all route handlers via Axum extractors.
#[derive(Clone)]
pub struct AppState {
    pub config: Config,
    /// Sheet geometry and typography used for every layout and PDF.
    pub sheet: SheetConfig,
    /// Single permit: at most one PDF is generated at a time.
    pub render_gate: Arc<Semaphore>,
}

impl AppState {
    pub fn new(config: Config) -> Self {
        let mut sheet = default_sheet_config();
        sheet.fallback_title = config.fallback_title.clone();
        Self {
            config,
            sheet,
            render_gate: Arc::new(Semaphore::new(1)),
        }
    }
}
