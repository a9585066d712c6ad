/// Queries of at most this many characters use the restrictive short-query rules.
pub const SHORT_QUERY_MAX_CHARS: usize = 2;

/// A trimmed, lowercased search query that is known to be non-empty.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NormalizedQuery {
    text: String,
    char_len: usize,
}

impl NormalizedQuery {
    /// Normalize a raw query, returning `None` when nothing but whitespace remains.
    pub fn parse(raw: &str) -> Option<Self> {
        let text = raw.trim().to_lowercase();
        if text.is_empty() {
            return None;
        }
        let char_len = text.chars().count();
        Some(Self { text, char_len })
    }

    pub fn as_str(&self) -> &str {
        &self.text
    }

    /// Length in characters, not bytes.
    pub fn char_len(&self) -> usize {
        self.char_len
    }

    pub fn is_short(&self) -> bool {
        self.char_len <= SHORT_QUERY_MAX_CHARS
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_trims_and_lowercases() {
        let q = NormalizedQuery::parse("  Galaxy S24 ").unwrap();
        assert_eq!(q.as_str(), "galaxy s24");
        assert_eq!(q.char_len(), 10);
        assert!(!q.is_short());
    }

    #[test]
    fn test_blank_input_is_rejected() {
        assert!(NormalizedQuery::parse("").is_none());
        assert!(NormalizedQuery::parse(" \n\t ").is_none());
    }

    #[test]
    fn test_length_counts_characters() {
        // two characters, four bytes
        let q = NormalizedQuery::parse("éü").unwrap();
        assert_eq!(q.char_len(), 2);
        assert!(q.is_short());
    }
}
