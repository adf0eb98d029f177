//! FAQ resolution policy.
//!
//! Resolution order:
//!
//! | Step | Condition | Result |
//! |------|-----------|--------|
//! | 1 | input is a catalog key | that key (distance 0) |
//! | 2 | input is a known typo of a catalog key | the corrected key |
//! | 3 | nearest key within `max_distance` edits | that key |
//! | 4 | otherwise | no match |
//!
//! Ties in step 3 go to the first key in catalog order, which is
//! lexicographic, so the smallest key wins.

use super::catalog::FaqCatalog;
use super::typo::TypoTable;
use crate::text::within;

/// Default fuzzy tolerance in edits.
pub const DEFAULT_MAX_DISTANCE: usize = 2;

/// How a FAQ key was reached.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MatchVia {
    Exact,
    Typo,
    Fuzzy,
}

/// A resolved FAQ question.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FaqMatch<'a> {
    /// Canonical catalog key.
    pub key: &'a str,
    /// Answer text, returned verbatim.
    pub answer: &'a str,
    /// Edit distance between the input and `key` (0 for exact/typo).
    pub distance: usize,
    pub via: MatchVia,
}

/// Catalog + typo table + tolerance.
#[derive(Debug, Clone)]
pub struct FaqMatcher {
    catalog: FaqCatalog,
    typos: TypoTable,
    max_distance: usize,
}

impl FaqMatcher {
    #[must_use]
    pub fn new(catalog: FaqCatalog, typos: TypoTable) -> Self {
        Self {
            catalog,
            typos,
            max_distance: DEFAULT_MAX_DISTANCE,
        }
    }

    #[must_use]
    pub fn with_max_distance(mut self, max_distance: usize) -> Self {
        self.max_distance = max_distance;
        self
    }

    #[must_use]
    pub fn catalog(&self) -> &FaqCatalog {
        &self.catalog
    }

    /// Resolve normalized input to a catalog key.
    ///
    /// Empty input never matches.
    #[must_use]
    pub fn resolve(&self, normalized: &str) -> Option<FaqMatch<'_>> {
        if normalized.is_empty() || self.catalog.is_empty() {
            return None;
        }

        if let Some((key, answer)) = self.catalog.entry(normalized) {
            return Some(FaqMatch {
                key,
                answer,
                distance: 0,
                via: MatchVia::Exact,
            });
        }

        // A correction pointing outside the catalog is ignored.
        if let Some(corrected) = self.typos.correct(normalized)
            && let Some((key, answer)) = self.catalog.entry(corrected)
        {
            return Some(FaqMatch {
                key,
                answer,
                distance: 0,
                via: MatchVia::Typo,
            });
        }

        let mut best: Option<(&str, usize)> = None;
        for key in self.catalog.keys() {
            let Some(d) = within(normalized, key, self.max_distance) else {
                continue;
            };
            // Strict `<` keeps the first (smallest) key on ties.
            if best.is_none_or(|(_, best_d)| d < best_d) {
                best = Some((key, d));
            }
        }

        let (key, distance) = best?;
        let answer = self.catalog.answer(key)?;
        Some(FaqMatch {
            key,
            answer,
            distance,
            via: MatchVia::Fuzzy,
        })
    }

    /// Answer text for normalized input, if any FAQ matches.
    #[must_use]
    pub fn answer(&self, normalized: &str) -> Option<&str> {
        self.resolve(normalized).map(|m| m.answer)
    }
}
