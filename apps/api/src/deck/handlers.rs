//! Axum route handlers for the Deck API.

use axum::Json;
use serde::{Deserialize, Serialize};
use tracing::{info, warn};

use crate::deck::builder::build_deck;
use crate::deck::ingest::{normalize_concepts, parse_concepts, validate_build_request};
use crate::deck::models::{Deck, DeckStats};
use crate::errors::AppError;

// ────────────────────────────────────────────────────────────────────────────
// Request / Response types
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Deserialize)]
pub struct ParseConceptsRequest {
    pub raw_text: String,
    #[serde(default)]
    pub card_count: Option<usize>,
}

#[derive(Debug, Serialize)]
pub struct ParseConceptsResponse {
    pub concepts: Vec<String>,
    pub stats: DeckStats,
}

/// Either a concept list or pasted text (one concept per line). The list wins if both
/// are present. A missing `card_count` uses the suggested count.
#[derive(Debug, Deserialize)]
pub struct BuildDeckRequest {
    #[serde(default)]
    pub concepts: Option<Vec<String>>,
    #[serde(default)]
    pub raw_text: Option<String>,
    #[serde(default)]
    pub card_count: Option<usize>,
}

#[derive(Debug, Serialize)]
pub struct BuildDeckResponse {
    pub deck: Deck,
    pub stats: DeckStats,
    pub warnings: Vec<String>,
}

// ────────────────────────────────────────────────────────────────────────────
// Handlers
// ────────────────────────────────────────────────────────────────────────────

/// POST /api/v1/concepts/parse
///
/// Cleans pasted text into a concept set and reports how many cards it supports.
pub async fn handle_parse_concepts(
    Json(request): Json<ParseConceptsRequest>,
) -> Result<Json<ParseConceptsResponse>, AppError> {
    let concepts = parse_concepts(&request.raw_text);
    let stats = stats_for(concepts.len(), request.card_count);
    Ok(Json(ParseConceptsResponse { concepts, stats }))
}

/// POST /api/v1/decks
///
/// Shuffles the concepts into a fresh deck. Every call yields new card ids.
pub async fn handle_build_deck(
    Json(request): Json<BuildDeckRequest>,
) -> Result<Json<BuildDeckResponse>, AppError> {
    let concepts = match (request.concepts, request.raw_text) {
        (Some(list), _) => normalize_concepts(list),
        (None, Some(raw)) => parse_concepts(&raw),
        (None, None) => {
            return Err(AppError::Validation(
                "either concepts or raw_text is required".to_string(),
            ))
        }
    };

    let stats = stats_for(concepts.len(), request.card_count);
    validate_build_request(&concepts, stats.card_count)?;

    let deck = build_deck(&concepts, stats.card_count);

    let mut warnings = Vec::new();
    if stats.will_repeat {
        warn!(
            concepts = stats.total_concepts,
            needed = stats.concepts_needed,
            "Deck build: not enough concepts, some will repeat"
        );
        warnings.push(format!(
            "{} concepts needed but only {} available; concepts will be repeated",
            stats.concepts_needed, stats.total_concepts
        ));
    }

    info!(
        generation_id = %deck.generation_id,
        cards = deck.cards.len(),
        concepts = stats.total_concepts,
        "Built deck"
    );

    Ok(Json(BuildDeckResponse {
        deck,
        stats,
        warnings,
    }))
}

fn stats_for(total_concepts: usize, card_count: Option<usize>) -> DeckStats {
    let suggested = DeckStats::compute(total_concepts, 0).suggested_card_count;
    DeckStats::compute(total_concepts, card_count.unwrap_or(suggested))
}
