//! Known misspellings of FAQ questions.
//!
//! Checked before the fuzzy search so that a frequent typo resolves to the
//! intended question even when some other key happens to be closer by raw
//! edit distance.

use crate::text::normalize;
use std::collections::HashMap;

/// (misspelling, canonical FAQ key)
const BUILTIN_TYPOS: &[(&str, &str)] = &[
    ("pirce", "price"),
    ("prise", "price"),
    ("prize", "price"),
    ("pricing", "price"),
    ("prices", "price"),
    ("catlog", "catalog"),
    ("catalouge", "catalog"),
    ("catalogue", "catalog"),
    ("katalog", "catalog"),
    ("delivry", "delivery"),
    ("dilivery", "delivery"),
    ("delievery", "delivery"),
    ("shipping", "delivery"),
];

/// Misspelling → canonical key lookup.
#[derive(Debug, Clone, Default)]
pub struct TypoTable {
    corrections: HashMap<String, String>,
}

impl TypoTable {
    /// The built-in corrections.
    #[must_use]
    pub fn builtin() -> Self {
        let mut table = Self::default();
        table.extend(BUILTIN_TYPOS.iter().copied());
        table
    }

    /// Add corrections; both sides are normalized. Later entries override
    /// earlier ones for the same misspelling.
    pub fn extend<I, K, V>(&mut self, entries: I)
    where
        I: IntoIterator<Item = (K, V)>,
        K: AsRef<str>,
        V: AsRef<str>,
    {
        for (typo, canonical) in entries {
            let typo = normalize(typo.as_ref());
            let canonical = normalize(canonical.as_ref());
            if typo.is_empty() || canonical.is_empty() {
                continue;
            }
            self.corrections.insert(typo, canonical);
        }
    }

    /// The canonical key for a normalized input, if it is a known misspelling.
    #[must_use]
    pub fn correct(&self, normalized: &str) -> Option<&str> {
        self.corrections.get(normalized).map(String::as_str)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.corrections.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.corrections.is_empty()
    }
}
