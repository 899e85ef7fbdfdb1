//! Deck Builder: spreads concepts pseudo-randomly over cards.
//!
//! Algorithm:
//! 1. Shuffle a copy of the concepts (Fisher–Yates).
//! 2. Walk a cyclic index over the shuffled list; card `i` takes the next
//!    `CONCEPTS_PER_CARD` values, wrapping to the start when the list runs out.
//!
//! When supply is scarce the wrap can put the same concept on one card twice. That is
//! accepted; callers surface it as a warning via `DeckStats::will_repeat`.
//!
//! Preconditions (`concepts.len() >= CONCEPTS_PER_CARD`, `target_count >= 1`) are checked
//! by `ingest::validate_build_request` before this is called.

use chrono::Utc;
use rand::seq::SliceRandom;
use rand::Rng;
use uuid::Uuid;

use crate::deck::models::{Card, Deck, CONCEPTS_PER_CARD};

/// Builds a deck of `target_count` cards using the thread-local RNG.
pub fn build_deck(concepts: &[String], target_count: usize) -> Deck {
    build_deck_with_rng(concepts, target_count, &mut rand::thread_rng())
}

/// Builds a deck with an injected random source.
pub fn build_deck_with_rng<R: Rng + ?Sized>(
    concepts: &[String],
    target_count: usize,
    rng: &mut R,
) -> Deck {
    let generation_id = Uuid::new_v4();
    let nonce = generation_id.simple().to_string();

    let mut shuffled = concepts.to_vec();
    shuffled.shuffle(rng);

    let mut cursor = 0usize;
    let cards = (0..target_count)
        .map(|index| {
            let slots = (0..CONCEPTS_PER_CARD)
                .filter_map(|_| {
                    let concept = shuffled.get(cursor % shuffled.len().max(1)).cloned();
                    cursor += 1;
                    concept
                })
                .collect();
            Card::new(format!("card-{index}-{nonce}"), slots)
        })
        .collect();

    Deck {
        generation_id,
        generated_at: Utc::now(),
        cards,
    }
}
