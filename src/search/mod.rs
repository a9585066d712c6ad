//! Relevance-ranked free-text search over gadget records.
//!
//! The pipeline runs in three steps, all within one request:
//!
//! 1. [`retrieval`] narrows the catalogue to records that textually match
//!    the query (and the optional category filter).
//! 2. [`relevance`] assigns each retrieved record a tiered integer score and
//!    drops records that qualify for no tier.
//! 3. [`ranker`] sorts by score with a stable sort and cuts the page window.
//!
//! Nothing here performs I/O or reads configuration; callers pass in a
//! borrowed snapshot of the records.

pub mod query;
pub mod ranker;
pub mod relevance;
pub mod retrieval;

pub use query::NormalizedQuery;
pub use ranker::{PageWindow, ScoredCandidate};

/// Read-only view of a record the search pipeline can match against.
pub trait SearchRecord {
    fn name(&self) -> &str;
    fn brand(&self) -> &str;
    fn category(&self) -> &str;
    fn description(&self) -> Option<&str>;
}

/// Parameters of a single gadget search.
#[derive(Debug, Clone)]
pub struct GadgetSearch<'q> {
    pub query: &'q str,
    pub category: Option<&'q str>,
    pub window: PageWindow,
}

/// Retrieve, score and rank `records` for `params`.
///
/// Records are expected in retrieval order (primary-key order for the
/// store); ties in score keep that order. A blank query yields no results.
pub fn search_gadgets<'a, R, I>(records: I, params: &GadgetSearch<'_>) -> Vec<&'a R>
where
    R: SearchRecord + 'a,
    I: IntoIterator<Item = &'a R>,
{
    let Some(query) = NormalizedQuery::parse(params.query) else {
        return Vec::new();
    };

    let candidates = retrieval::retrieve(records, &query, params.category);
    let retrieved = candidates.len();
    let scored = score_candidates(&query, candidates);
    tracing::debug!(retrieved, scored = scored.len(), "scored search candidates");
    ranker::rank(scored, params.window)
}

/// Score already-retrieved candidates, dropping the ones no tier accepts.
pub fn score_candidates<'a, R: SearchRecord>(
    query: &NormalizedQuery,
    candidates: Vec<&'a R>,
) -> Vec<ScoredCandidate<'a, R>> {
    candidates
        .into_iter()
        .filter_map(|record| {
            relevance::score(query, record).map(|score| ScoredCandidate { score, record })
        })
        .collect()
}

#[cfg(test)]
pub(crate) mod test_support {
    use super::SearchRecord;

    #[derive(Debug, Clone, PartialEq)]
    pub struct Item {
        pub id: u64,
        pub name: String,
        pub brand: String,
        pub category: String,
        pub description: Option<String>,
    }

    pub fn item(id: u64, name: &str, brand: &str) -> Item {
        Item {
            id,
            name: name.to_string(),
            brand: brand.to_string(),
            category: "Smartphones".to_string(),
            description: None,
        }
    }

    impl Item {
        pub fn with_description(mut self, description: &str) -> Self {
            self.description = Some(description.to_string());
            self
        }

        pub fn in_category(mut self, category: &str) -> Self {
            self.category = category.to_string();
            self
        }
    }

    impl SearchRecord for Item {
        fn name(&self) -> &str {
            &self.name
        }
        fn brand(&self) -> &str {
            &self.brand
        }
        fn category(&self) -> &str {
            &self.category
        }
        fn description(&self) -> Option<&str> {
            self.description.as_deref()
        }
    }
}
