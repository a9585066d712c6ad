/// Default page size when the caller does not give one.
pub const DEFAULT_LIMIT: usize = 100;

/// A record paired with its relevance score for the lifetime of one search.
#[derive(Debug)]
pub struct ScoredCandidate<'a, R> {
    pub score: u32,
    pub record: &'a R,
}

/// An offset/limit window over an ordered result list.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageWindow {
    pub skip: usize,
    pub limit: usize,
}

impl Default for PageWindow {
    fn default() -> Self {
        Self {
            skip: 0,
            limit: DEFAULT_LIMIT,
        }
    }
}

impl PageWindow {
    pub fn new(skip: usize, limit: usize) -> Self {
        Self { skip, limit }
    }

    /// Build a window from raw query parameters, rejecting negative values.
    pub fn from_params(skip: Option<i64>, limit: Option<i64>) -> Result<Self, String> {
        let skip = match skip {
            None => 0,
            Some(s) => usize::try_from(s).map_err(|_| format!("skip must be >= 0, got {s}"))?,
        };
        let limit = match limit {
            None => DEFAULT_LIMIT,
            Some(l) => usize::try_from(l).map_err(|_| format!("limit must be >= 0, got {l}"))?,
        };
        Ok(Self { skip, limit })
    }

    /// Cut this window out of `items`. Past-the-end windows and `limit == 0`
    /// give an empty vector.
    pub fn apply<T>(&self, items: Vec<T>) -> Vec<T> {
        items.into_iter().skip(self.skip).take(self.limit).collect()
    }
}

/// Sort by descending score and return the records inside `window`.
///
/// `Vec::sort_by` is stable, so equal scores keep their retrieval order and
/// repeated identical calls page deterministically.
pub fn rank<'a, R>(mut scored: Vec<ScoredCandidate<'a, R>>, window: PageWindow) -> Vec<&'a R> {
    scored.sort_by(|a, b| b.score.cmp(&a.score));
    window
        .apply(scored)
        .into_iter()
        .map(|candidate| candidate.record)
        .collect()
}
