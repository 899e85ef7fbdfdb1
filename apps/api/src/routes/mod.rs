pub mod health;

use axum::{
    routing::{get, post},
    Router,
};

use crate::deck::handlers as deck;
use crate::render::handlers as render;
use crate::state::AppState;

pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health::health_handler))
        // Deck API
        .route("/api/v1/concepts/parse", post(deck::handle_parse_concepts))
        .route("/api/v1/decks", post(deck::handle_build_deck))
        // Render API
        .route("/api/v1/decks/layout", post(render::handle_layout))
        .route("/api/v1/decks/pdf", post(render::handle_pdf))
        .with_state(state)
}
