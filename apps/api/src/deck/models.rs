use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Number of concept slots on every card.
pub const CONCEPTS_PER_CARD: usize = 5;

/// Glyph shown in a slot that has no concept.
pub const PLACEHOLDER: &str = "-";

/// A game card: an id plus exactly `CONCEPTS_PER_CARD` concepts in display order.
///
/// Cards arriving over the wire are normalized through `Card::new`, so a client cannot
/// produce a card with a different slot count.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "CardWire")]
pub struct Card {
    pub id: String,
    pub concepts: Vec<String>,
}

impl Card {
    /// Builds a card, truncating extra concepts and padding missing ones with `PLACEHOLDER`.
    pub fn new(id: String, mut concepts: Vec<String>) -> Self {
        concepts.truncate(CONCEPTS_PER_CARD);
        concepts.resize(CONCEPTS_PER_CARD, PLACEHOLDER.to_string());
        Self { id, concepts }
    }
}

#[derive(Deserialize)]
struct CardWire {
    id: String,
    #[serde(default)]
    concepts: Vec<String>,
}

impl From<CardWire> for Card {
    fn from(wire: CardWire) -> Self {
        Card::new(wire.id, wire.concepts)
    }
}

/// One generation run's worth of cards.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Deck {
    /// Fresh per run; embedded in every card id.
    pub generation_id: Uuid,
    pub generated_at: DateTime<Utc>,
    pub cards: Vec<Card>,
}

/// Supply/demand figures for a concept list and a target card count.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DeckStats {
    pub total_concepts: usize,
    /// Cards that can be filled without repeating a concept.
    pub max_full_cards: usize,
    pub suggested_card_count: usize,
    /// Upper bound accepted for `card_count`.
    pub max_card_count: usize,
    pub card_count: usize,
    pub concepts_needed: usize,
    /// True when some concept must appear more than once.
    pub will_repeat: bool,
}

impl DeckStats {
    pub fn compute(total_concepts: usize, card_count: usize) -> Self {
        let max_full_cards = total_concepts / CONCEPTS_PER_CARD;
        let concepts_needed = card_count * CONCEPTS_PER_CARD;
        Self {
            total_concepts,
            max_full_cards,
            suggested_card_count: max_full_cards.max(1),
            max_card_count: max_card_count(total_concepts),
            card_count,
            concepts_needed,
            will_repeat: total_concepts < concepts_needed,
        }
    }
}

/// Largest card count accepted for a concept list of this size.
pub fn max_card_count(total_concepts: usize) -> usize {
    50.max(total_concepts.div_ceil(CONCEPTS_PER_CARD) + 10)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn strings(items: &[&str]) -> Vec<String> {
        items.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_card_pads_missing_slots() {
        let card = Card::new("c".into(), strings(&["a", "b"]));
        assert_eq!(card.concepts, strings(&["a", "b", "-", "-", "-"]));
    }

    #[test]
    fn test_card_truncates_extra_slots() {
        let card = Card::new("c".into(), strings(&["a", "b", "c", "d", "e", "f"]));
        assert_eq!(card.concepts.len(), CONCEPTS_PER_CARD);
        assert_eq!(card.concepts[4], "e");
    }

    #[test]
    fn test_deserialized_card_is_normalized() {
        let card: Card =
            serde_json::from_str(r#"{"id":"card-0","concepts":["a"]}"#).unwrap();
        assert_eq!(card.concepts.len(), CONCEPTS_PER_CARD);
        assert_eq!(card.concepts[1], PLACEHOLDER);
    }

    #[test]
    fn test_stats_for_exact_supply() {
        let stats = DeckStats::compute(10, 2);
        assert_eq!(stats.max_full_cards, 2);
        assert_eq!(stats.concepts_needed, 10);
        assert!(!stats.will_repeat);
    }

    #[test]
    fn test_stats_flags_repeats_when_scarce() {
        let stats = DeckStats::compute(7, 2);
        assert!(stats.will_repeat);
        assert_eq!(stats.suggested_card_count, 1);
    }

    #[test]
    fn test_suggested_count_is_at_least_one() {
        assert_eq!(DeckStats::compute(3, 1).suggested_card_count, 1);
    }

    #[test]
    fn test_max_card_count_grows_with_supply() {
        assert_eq!(max_card_count(5), 50);
        assert_eq!(max_card_count(300), 70);
        assert_eq!(max_card_count(301), 71);
    }
}
