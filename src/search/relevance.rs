//! Tiered relevance scoring.
//!
//! Each candidate lands in at most one tier, checked from strongest to
//! weakest. The tier's base score is final apart from a flat bonus for
//! short product names:
//!
//! | Tier        | Condition (lowercased)                         | Score |
//! |-------------|------------------------------------------------|-------|
//! | `Exact`     | name or brand equals the query                 | 100   |
//! | `Prefix`    | name or brand starts with the query            | 80    |
//! | `WordStart` | a space-preceded word in name/brand starts so  | 60    |
//! | `Substring` | query (> 2 chars) inside name or brand         | 40    |
//! | `Description` | query (> 3 chars) inside the description     | 10    |
//!
//! The gap between consecutive tiers (>= 20) is larger than the name bonus
//! (5), so the bonus can reorder candidates within a tier but never across.

use super::query::NormalizedQuery;
use super::SearchRecord;

pub const EXACT_SCORE: u32 = 100;
pub const PREFIX_SCORE: u32 = 80;
pub const WORD_START_SCORE: u32 = 60;
pub const SUBSTRING_SCORE: u32 = 40;
pub const DESCRIPTION_SCORE: u32 = 10;

/// Added to any scored candidate whose name is shorter than [`CONCISE_NAME_CHARS`].
pub const CONCISE_NAME_BONUS: u32 = 5;
pub const CONCISE_NAME_CHARS: usize = 20;

/// Substring matches on name/brand need a query longer than this.
const SUBSTRING_MIN_EXCLUSIVE: usize = 2;
/// Description matches need a query longer than this.
const DESCRIPTION_MIN_EXCLUSIVE: usize = 3;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum Tier {
    Description,
    Substring,
    WordStart,
    Prefix,
    Exact,
}

impl Tier {
    pub fn base_score(self) -> u32 {
        match self {
            Tier::Exact => EXACT_SCORE,
            Tier::Prefix => PREFIX_SCORE,
            Tier::WordStart => WORD_START_SCORE,
            Tier::Substring => SUBSTRING_SCORE,
            Tier::Description => DESCRIPTION_SCORE,
        }
    }
}

/// Find the strongest tier `record` qualifies for, if any.
pub fn classify<R: SearchRecord + ?Sized>(query: &NormalizedQuery, record: &R) -> Option<Tier> {
    let q = query.as_str();
    let name = record.name().to_lowercase();
    let brand = record.brand().to_lowercase();

    if name == q || brand == q {
        return Some(Tier::Exact);
    }
    if name.starts_with(q) || brand.starts_with(q) {
        return Some(Tier::Prefix);
    }
    if has_word_starting_with(&name, q) || has_word_starting_with(&brand, q) {
        return Some(Tier::WordStart);
    }
    if query.char_len() > SUBSTRING_MIN_EXCLUSIVE && (name.contains(q) || brand.contains(q)) {
        return Some(Tier::Substring);
    }
    if query.char_len() > DESCRIPTION_MIN_EXCLUSIVE {
        let in_description = record
            .description()
            .is_some_and(|d| d.to_lowercase().contains(q));
        if in_description {
            return Some(Tier::Description);
        }
    }
    None
}

/// Score `record` against `query`; `None` means the record must not be emitted.
pub fn score<R: SearchRecord + ?Sized>(query: &NormalizedQuery, record: &R) -> Option<u32> {
    let tier = classify(query, record)?;
    let mut score = tier.base_score();
    if record.name().chars().count() < CONCISE_NAME_CHARS {
        score += CONCISE_NAME_BONUS;
    }
    Some(score)
}

/// True when some space-preceded word of `haystack` starts with `needle`.
///
/// Both sides must already be lowercased. A match at offset 0 does not
/// count; that case is a prefix match.
pub(crate) fn has_word_starting_with(haystack: &str, needle: &str) -> bool {
    haystack
        .char_indices()
        .any(|(idx, c)| c == ' ' && haystack[idx + 1..].starts_with(needle))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::search::test_support::item;

    fn q(raw: &str) -> NormalizedQuery {
        NormalizedQuery::parse(raw).unwrap()
    }

    #[test]
    fn test_exact_match_on_name_or_brand() {
        assert_eq!(classify(&q("pixel"), &item(1, "Pixel", "Google")), Some(Tier::Exact));
        assert_eq!(classify(&q("APPLE"), &item(1, "iPad Air", "Apple")), Some(Tier::Exact));
    }

    #[test]
    fn test_prefix_match() {
        assert_eq!(
            classify(&q("pixel"), &item(1, "Pixel 8 Pro", "Google")),
            Some(Tier::Prefix)
        );
        assert_eq!(classify(&q("sam"), &item(1, "Galaxy S24", "Samsung")), Some(Tier::Prefix));
    }

    #[test]
    fn test_word_start_match() {
        assert_eq!(
            classify(&q("gal"), &item(1, "Samsung Galaxy S24", "Samsung")),
            Some(Tier::WordStart)
        );
        // short queries can still hit a word start
        assert_eq!(
            classify(&q("ga"), &item(1, "Samsung Galaxy S24", "Samsung")),
            Some(Tier::WordStart)
        );
    }

    #[test]
    fn test_substring_requires_more_than_two_chars() {
        assert_eq!(
            classify(&q("axy"), &item(1, "Samsung Galaxy S24", "Samsung")),
            Some(Tier::Substring)
        );
        assert_eq!(classify(&q("ax"), &item(1, "Samsung Galaxy S24", "Samsung")), None);
    }

    #[test]
    fn test_description_requires_more_than_three_chars() {
        let record = item(1, "Blade 16", "Razer").with_description("RTX 4080 gaming laptop");
        assert_eq!(classify(&q("gaming"), &record), Some(Tier::Description));
        assert_eq!(classify(&q("rtx"), &record), None);
        assert_eq!(classify(&q("ga"), &record), None);
    }

    #[test]
    fn test_strongest_tier_wins() {
        let record = item(1, "Apple Watch", "Apple").with_description("apple");
        assert_eq!(classify(&q("apple"), &record), Some(Tier::Exact));
    }

    #[test]
    fn test_concise_name_bonus() {
        assert_eq!(score(&q("pixel"), &item(1, "Pixel", "Google")), Some(105));
        let long = item(1, "Lenovo ThinkPad X1 Carbon Gen 11", "Lenovo");
        assert_eq!(score(&q("lenovo"), &long), Some(EXACT_SCORE));
        // exactly 20 characters gets no bonus
        let twenty = item(1, "Galaxy Tab S9 Ultra!", "Samsung");
        assert_eq!(twenty.name.chars().count(), 20);
        assert_eq!(score(&q("galaxy"), &twenty), Some(PREFIX_SCORE));
    }

    #[test]
    fn test_bonus_never_crosses_tiers() {
        let exact_long = item(1, "An Extremely Long Gadget Name", "Pixel");
        let prefix_short = item(2, "Pixel 8", "Google");
        assert!(score(&q("pixel"), &exact_long) > score(&q("pixel"), &prefix_short));
    }

    #[test]
    fn test_unrelated_record_has_no_score() {
        assert_eq!(score(&q("iphone"), &item(1, "Galaxy S24", "Samsung")), None);
    }

    #[test]
    fn test_word_start_helper() {
        assert!(has_word_starting_with("samsung galaxy", "gal"));
        assert!(!has_word_starting_with("galaxy", "gal"));
        assert!(!has_word_starting_with("megalith", "gal"));
        assert!(has_word_starting_with("x galaxy galore", "galo"));
    }

    #[test]
    fn test_word_start_found_behind_overlapping_inner_match() {
        // "xpro pro pro": the inner match at 1 overlaps the word start at 5
        assert!(has_word_starting_with("xpro pro pro", "pro pro"));
        assert_eq!(
            classify(&q("pro pro"), &item(1, "Xpro pro pro", "Acme")),
            Some(Tier::WordStart)
        );
    }
}
