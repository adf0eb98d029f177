//! Fact field descriptors.
//!
//! One descriptor per [`FactKey`] carries every phrase and reply template the
//! declare / query / forget rules need, so the rule table and the responder
//! handle all four fields with the same code.

use crate::memory::FactKey;

/// Placeholder substituted with the stored or captured value.
const VALUE: &str = "{value}";

/// Phrases and replies for one fact field.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FactField {
    pub key: FactKey,
    /// Normalized message prefix that declares the fact.
    pub declare_prefix: &'static str,
    /// Normalized substring that asks for the fact.
    pub query_phrase: &'static str,
    /// Normalized substrings that erase the fact.
    pub forget_phrases: &'static [&'static str],
    /// Reply after storing; `{value}` is the captured text.
    pub stored: &'static str,
    /// Reply to a query when the fact is known.
    pub recalled: &'static str,
    /// Reply to a query when the fact is absent.
    pub unknown: &'static str,
    /// Reply after forgetting.
    pub forgotten: &'static str,
    /// Reply when the declare prefix carried no value.
    pub incomplete: &'static str,
}

impl FactField {
    #[must_use]
    pub fn stored_reply(&self, value: &str) -> String {
        self.stored.replace(VALUE, value)
    }

    #[must_use]
    pub fn query_reply(&self, value: Option<&str>) -> String {
        match value {
            Some(v) => self.recalled.replace(VALUE, v),
            None => self.unknown.to_owned(),
        }
    }
}

/// All fields, in rule-evaluation order.
pub const FIELDS: [FactField; 4] = [
    FactField {
        key: FactKey::Name,
        declare_prefix: "my name is",
        query_phrase: "what is my name",
        forget_phrases: &["forget my name", "forget name"],
        stored: "👌 Nice to meet you, {value}! I'll remember your name.",
        recalled: "🧠 Your name is {value}.",
        unknown: "❓ I don't know your name yet.",
        forgotten: "🧹 I've forgotten your name.",
        incomplete: "❓ Tell me your name after \"my name is\".",
    },
    FactField {
        key: FactKey::Company,
        declare_prefix: "i work at",
        query_phrase: "what company",
        forget_phrases: &["forget my company", "forget company"],
        stored: "💼 Got it, you work at {value}.",
        recalled: "🧠 You work at {value}.",
        unknown: "❓ I don't know your company yet.",
        forgotten: "🧹 I've forgotten your company.",
        incomplete: "❓ Tell me where you work after \"I work at\".",
    },
    FactField {
        key: FactKey::City,
        declare_prefix: "i live in",
        query_phrase: "where do i live",
        forget_phrases: &["forget my city", "forget city"],
        stored: "📍 Okay, you live in {value}.",
        recalled: "🧠 You live in {value}.",
        unknown: "❓ I don't know where you live yet.",
        forgotten: "🧹 I've forgotten your city.",
        incomplete: "❓ Tell me your city after \"I live in\".",
    },
    FactField {
        key: FactKey::Preference,
        declare_prefix: "i like",
        query_phrase: "what do i like",
        forget_phrases: &["forget my preference", "forget preference"],
        stored: "⭐ Nice! I'll remember that you like {value}.",
        recalled: "🧠 You like {value}.",
        unknown: "❓ I don't know your preference yet.",
        forgotten: "🧹 I've forgotten your preference.",
        incomplete: "❓ Tell me what you like after \"I like\".",
    },
];

/// Descriptor for `key`.
#[must_use]
pub fn field(key: FactKey) -> &'static FactField {
    match key {
        FactKey::Name => &FIELDS[0],
        FactKey::Company => &FIELDS[1],
        FactKey::City => &FIELDS[2],
        FactKey::Preference => &FIELDS[3],
    }
}

/// Capture the declared value from the raw message.
///
/// Detection runs on normalized text but the value keeps the user's casing
/// and punctuation, so it is sliced from the raw message after the prefix.
/// When the raw message does not literally start with the prefix (e.g.
/// punctuation inside it) the normalized remainder is used instead.
#[must_use]
pub fn capture_value(raw: &str, normalized: &str, prefix: &str) -> String {
    let raw = raw.trim_start();
    if let Some(head) = raw.get(..prefix.len())
        && head.eq_ignore_ascii_case(prefix)
        && let Some(rest) = raw.get(prefix.len()..)
    {
        return rest.trim().to_owned();
    }
    normalized
        .strip_prefix(prefix)
        .unwrap_or_default()
        .trim()
        .to_owned()
}
