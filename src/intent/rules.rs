//! Ordered intent rule table.
//!
//! Rules are evaluated top to bottom against normalized input and the first
//! match wins. The order is part of the contract: substring and prefix checks
//! overlap (`"i like"` vs `"what do i like"`), so moving a rule changes which
//! intent a message resolves to.
//!
//! | # | Intent | Match |
//! |---|--------|-------|
//! | 1–8 | declare / query, per field (name, company, city, preference) | prefix / contains |
//! | 9–12 | forget, per field | contains any forget phrase |
//! | 13 | help | contains `help` |
//! | 14 | memory | contains `memory` |

use super::fields::{FIELDS, FactField};
use crate::memory::FactKey;
use std::sync::LazyLock;

/// A recognized intent.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Intent {
    Declare(FactKey),
    Query(FactKey),
    Forget(FactKey),
    Help,
    Memory,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Pattern {
    Prefix(&'static str),
    Contains(&'static str),
    ContainsAny(&'static [&'static str]),
}

impl Pattern {
    fn matches(self, normalized: &str) -> bool {
        match self {
            Self::Prefix(p) => normalized.starts_with(p),
            Self::Contains(p) => normalized.contains(p),
            Self::ContainsAny(ps) => ps.iter().any(|p| normalized.contains(p)),
        }
    }
}

/// One (predicate, intent) pair.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Rule {
    pub intent: Intent,
    pattern: Pattern,
}

impl Rule {
    #[must_use]
    pub fn matches(&self, normalized: &str) -> bool {
        self.pattern.matches(normalized)
    }
}

static RULES: LazyLock<Vec<Rule>> = LazyLock::new(build_rules);

fn build_rules() -> Vec<Rule> {
    let mut rules = Vec::with_capacity(FIELDS.len() * 3 + 2);
    for FactField {
        key,
        declare_prefix,
        query_phrase,
        ..
    } in FIELDS
    {
        rules.push(Rule {
            intent: Intent::Declare(key),
            pattern: Pattern::Prefix(declare_prefix),
        });
        rules.push(Rule {
            intent: Intent::Query(key),
            pattern: Pattern::Contains(query_phrase),
        });
    }
    for field in FIELDS {
        rules.push(Rule {
            intent: Intent::Forget(field.key),
            pattern: Pattern::ContainsAny(field.forget_phrases),
        });
    }
    rules.push(Rule {
        intent: Intent::Help,
        pattern: Pattern::Contains("help"),
    });
    rules.push(Rule {
        intent: Intent::Memory,
        pattern: Pattern::Contains("memory"),
    });
    rules
}

/// The rule table in evaluation order.
#[must_use]
pub fn rules() -> &'static [Rule] {
    &RULES
}

/// First intent whose rule matches normalized input.
#[must_use]
pub fn classify(normalized: &str) -> Option<Intent> {
    rules()
        .iter()
        .find(|rule| rule.matches(normalized))
        .map(|rule| rule.intent)
}
