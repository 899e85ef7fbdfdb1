//! Concept ingestion: turns pasted text or a submitted list into a clean concept set.
//!
//! Rules: trim each entry, drop empty entries, drop exact duplicates (case-sensitive)
//! keeping the first occurrence. Order is preserved for display but carries no meaning,
//! since the builder shuffles anyway.

use std::collections::HashSet;

use crate::deck::models::{max_card_count, CONCEPTS_PER_CARD};
use crate::errors::AppError;

/// Longest title accepted for the accent strip.
pub const MAX_TITLE_CHARS: usize = 25;

/// Parses one concept per line.
pub fn parse_concepts(raw_text: &str) -> Vec<String> {
    normalize_concepts(raw_text.lines())
}

/// Applies the ingestion rules to an already-split list.
pub fn normalize_concepts<I, S>(items: I) -> Vec<String>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let mut seen = HashSet::new();
    let mut concepts = Vec::new();
    for item in items {
        let trimmed = item.as_ref().trim();
        if trimmed.is_empty() {
            continue;
        }
        if seen.insert(trimmed.to_string()) {
            concepts.push(trimmed.to_string());
        }
    }
    concepts
}

/// Checks the preconditions of deck building.
pub fn validate_build_request(concepts: &[String], card_count: usize) -> Result<(), AppError> {
    if concepts.len() < CONCEPTS_PER_CARD {
        return Err(AppError::Validation(format!(
            "At least {CONCEPTS_PER_CARD} unique concepts are required, got {}",
            concepts.len()
        )));
    }
    if card_count == 0 {
        return Err(AppError::Validation(
            "card_count must be at least 1".to_string(),
        ));
    }
    let max = max_card_count(concepts.len());
    if card_count > max {
        return Err(AppError::Validation(format!(
            "card_count must be at most {max} for {} concepts",
            concepts.len()
        )));
    }
    Ok(())
}

/// Checks the title length cap. Counted in characters, not bytes.
pub fn validate_title(title: &str) -> Result<(), AppError> {
    let len = title.chars().count();
    if len > MAX_TITLE_CHARS {
        return Err(AppError::Validation(format!(
            "title must be at most {MAX_TITLE_CHARS} characters, got {len}"
        )));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_concepts_trims_and_skips_blank_lines() {
        let concepts = parse_concepts("  breuk \n\n deler\r\n   \nkwadraat");
        assert_eq!(concepts, vec!["breuk", "deler", "kwadraat"]);
    }

    #[test]
    fn test_parse_concepts_drops_duplicates_keeping_first() {
        let concepts = parse_concepts("som\nverschil\nsom\n som ");
        assert_eq!(concepts, vec!["som", "verschil"]);
    }

    #[test]
    fn test_duplicates_are_case_sensitive() {
        let concepts = parse_concepts("Som\nsom");
        assert_eq!(concepts.len(), 2);
    }

    #[test]
    fn test_normalize_concepts_accepts_owned_strings() {
        let input = vec![" a ".to_string(), String::new(), "a".to_string()];
        assert_eq!(normalize_concepts(input), vec!["a"]);
    }

    #[test]
    fn test_validate_rejects_fewer_than_five_concepts() {
        let concepts = normalize_concepts(["a", "b", "c", "d"]);
        let err = validate_build_request(&concepts, 1).unwrap_err();
        assert!(matches!(err, AppError::Validation(_)));
    }

    #[test]
    fn test_validate_rejects_zero_cards() {
        let concepts = normalize_concepts(["a", "b", "c", "d", "e"]);
        assert!(validate_build_request(&concepts, 0).is_err());
    }

    #[test]
    fn test_validate_rejects_card_count_above_max() {
        let concepts = normalize_concepts(["a", "b", "c", "d", "e"]);
        assert!(validate_build_request(&concepts, 50).is_ok());
        assert!(validate_build_request(&concepts, 51).is_err());
    }

    #[test]
    fn test_validate_title_counts_characters() {
        assert!(validate_title(&"é".repeat(25)).is_ok());
        assert!(validate_title(&"a".repeat(26)).is_err());
    }
}
