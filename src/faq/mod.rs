//! FAQ lookup with typo tolerance.
//!
//! Sub-modules:
//! - `catalog`: normalized question → answer mapping, JSON load/save.
//! - `typo`: static misspelling table consulted before fuzzy search.
//! - `matcher`: exact → typo → nearest-by-edit-distance resolution.

pub mod catalog;
pub mod matcher;
pub mod typo;

pub use catalog::FaqCatalog;
pub use matcher::{DEFAULT_MAX_DISTANCE, FaqMatch, FaqMatcher, MatchVia};
pub use typo::TypoTable;
