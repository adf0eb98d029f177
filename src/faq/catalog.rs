//! FAQ catalog: normalized question keys mapped to fixed answers.
//!
//! Stored on disk as a flat JSON object (`{"price": "Our pricing ..."}`).
//! Keys are normalized on the way in so an exact lookup with normalized user
//! input always lines up, whatever casing the file author used.

use crate::error::{BotError, Result};
use crate::text::normalize;
use std::collections::BTreeMap;
use std::path::Path;

/// Starter entries written by `memobot init`.
const BUILTIN_ENTRIES: &[(&str, &str)] = &[
    (
        "price",
        "💲 Our pricing depends on the product type. Please contact sales for a quote.",
    ),
    (
        "catalog",
        "📘 Here is our product catalog: https://example.com/catalog",
    ),
    (
        "delivery",
        "🚚 Standard delivery time is 7–10 business days, depending on location.",
    ),
];

/// Read-only FAQ mapping.
///
/// Backed by a `BTreeMap`, so enumeration is in lexicographic key order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FaqCatalog {
    entries: BTreeMap<String, String>,
}

impl FaqCatalog {
    /// Build a catalog from `(question, answer)` pairs, normalizing each question.
    ///
    /// Questions that normalize to an empty string are dropped. When two
    /// questions collide after normalization the later one wins.
    pub fn from_entries<I, Q, A>(entries: I) -> Self
    where
        I: IntoIterator<Item = (Q, A)>,
        Q: AsRef<str>,
        A: Into<String>,
    {
        let mut map = BTreeMap::new();
        for (question, answer) in entries {
            let key = normalize(question.as_ref());
            if key.is_empty() {
                continue;
            }
            map.insert(key, answer.into());
        }
        Self { entries: map }
    }

    /// The starter catalog shipped with the bot.
    #[must_use]
    pub fn builtin() -> Self {
        Self::from_entries(BUILTIN_ENTRIES.iter().copied())
    }

    /// Load a catalog from a JSON file.
    ///
    /// Never fails: a missing or malformed file yields an empty catalog, which
    /// makes FAQ lookup inert rather than aborting startup.
    #[must_use]
    pub fn load(path: &Path) -> Self {
        match Self::read(path) {
            Ok(catalog) => {
                tracing::info!(
                    path = %path.display(),
                    entries = catalog.len(),
                    "loaded FAQ catalog"
                );
                catalog
            }
            Err(e) => {
                tracing::warn!(path = %path.display(), "FAQ catalog unavailable, FAQ lookup disabled: {e}");
                Self::default()
            }
        }
    }

    /// Strict variant of [`FaqCatalog::load`].
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or is not a JSON object of
    /// string values.
    pub fn read(path: &Path) -> Result<Self> {
        let bytes = std::fs::read(path)
            .map_err(|e| BotError::Faq(format!("cannot read {}: {e}", path.display())))?;
        let raw: BTreeMap<String, String> = serde_json::from_slice(&bytes)
            .map_err(|e| BotError::Faq(format!("invalid FAQ file {}: {e}", path.display())))?;
        Ok(Self::from_entries(raw))
    }

    /// Write the catalog as pretty JSON, creating parent directories.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be written.
    pub fn save(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let json = serde_json::to_string_pretty(&self.entries)
            .map_err(|e| BotError::Faq(format!("cannot serialize FAQ catalog: {e}")))?;
        std::fs::write(path, json)?;
        Ok(())
    }

    #[must_use]
    pub fn answer(&self, key: &str) -> Option<&str> {
        self.entries.get(key).map(String::as_str)
    }

    /// The stored key and its answer.
    #[must_use]
    pub fn entry(&self, key: &str) -> Option<(&str, &str)> {
        self.entries
            .get_key_value(key)
            .map(|(k, v)| (k.as_str(), v.as_str()))
    }

    #[must_use]
    pub fn contains(&self, key: &str) -> bool {
        self.entries.contains_key(key)
    }

    /// Keys in lexicographic order.
    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.entries.keys().map(String::as_str)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
