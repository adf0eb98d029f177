//! Input normalization.
//!
//! Every inbound message is lowercased, stripped of a fixed punctuation class
//! (ASCII and the CJK / full-width forms users type on mobile keyboards) and
//! trimmed before intent detection or FAQ lookup. Value capture for declared
//! facts still reads the raw text, so normalization never loses what the user
//! actually typed.

/// Punctuation removed anywhere in the message.
const STRIPPED: &[char] = &[
    '?', '.', '!', ',', ':', ';', // ASCII
    '、', '。', '，', '！', '？', '：', '；', '．', // CJK / full-width
];

/// Normalize raw user text for matching.
///
/// Total and idempotent: `normalize(&normalize(s)) == normalize(s)`.
#[must_use]
pub fn normalize(raw: &str) -> String {
    let lowered = raw.to_lowercase();
    let stripped: String = lowered.chars().filter(|c| !STRIPPED.contains(c)).collect();
    stripped.trim().to_owned()
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used, clippy::expect_used)]

    use super::*;

    #[test]
    fn lowercases_strips_and_trims() {
        assert_eq!(normalize("  What is my NAME?  "), "what is my name");
        assert_eq!(normalize("Price!!!"), "price");
        assert_eq!(normalize("hello, world."), "hello world");
    }

    #[test]
    fn strips_cjk_punctuation() {
        assert_eq!(normalize("价格？"), "价格");
        assert_eq!(normalize("你好，世界！"), "你好世界");
        assert_eq!(normalize("目录：。、；"), "目录");
    }

    #[test]
    fn keeps_inner_whitespace_and_other_symbols() {
        assert_eq!(normalize("I like  rock & roll"), "i like  rock & roll");
        assert_eq!(normalize("email: a@b.com"), "email a@bcom");
    }

    #[test]
    fn empty_and_whitespace_only_normalize_to_empty() {
        assert_eq!(normalize(""), "");
        assert_eq!(normalize("   \t\n"), "");
        assert_eq!(normalize(" ?! "), "");
    }

    #[test]
    fn normalization_is_idempotent() {
        let samples = [
            "",
            "   ",
            "My name is Alice.",
            "  ¿Qué?  ",
            "WHERE do I live?!",
            "a . b",
            "。。hello。。",
            "Ünïcödé Straße",
            "İstanbul",
            "tabs\tand\nnewlines ",
            "forget my name!",
        ];
        for s in samples {
            let once = normalize(s);
            assert_eq!(normalize(&once), once, "not idempotent for {s:?}");
        }
    }
}
