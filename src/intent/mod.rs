//! Intent detection: fact field descriptors and the ordered rule table.

pub mod fields;
pub mod rules;

pub use fields::{FIELDS, FactField, capture_value, field};
pub use rules::{Intent, Rule, classify, rules};
