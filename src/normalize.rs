//! Text canonicalization and repair for glossary fields.
//!
//! All record text is NFC-normalized once at ingestion. The combining-mark
//! repair is a data fix for malformed source entries (a vowel sign with no
//! base letter in front of it) and must be applied the same way everywhere
//! a field is sorted, matched or displayed.

use unicode_normalization::UnicodeNormalization;

use crate::unicode::{is_combining_mark, CARRIER_LETTER};

/// Placeholder shown when a record has no primary word. Presentation only;
/// never fed into sorting or matching.
pub const WORD_MISSING: &str = "Word Missing";

/// Canonical NFC normalization.
pub fn nfc(raw: &str) -> String {
    raw.nfc().collect()
}

/// Prepend the carrier letter before any combining mark that starts the
/// string or directly follows whitespace.
pub fn repair_leading_combining(word: &str) -> String {
    let mut out = String::with_capacity(word.len());
    let mut at_boundary = true;
    for c in word.chars() {
        if at_boundary && is_combining_mark(c) {
            out.push(CARRIER_LETTER);
        }
        out.push(c);
        at_boundary = c.is_whitespace();
    }
    out
}

/// Matching key: repaired then case-folded. Never stored back on a record.
pub fn search_key(text: &str) -> String {
    repair_leading_combining(text).to_lowercase()
}

/// Display form of the primary word: repaired text, or the placeholder
/// when the field is empty.
pub fn display_word(primary: &str) -> String {
    if primary.is_empty() {
        WORD_MISSING.to_string()
    } else {
        repair_leading_combining(primary)
    }
}

/// Clean a gloss for display: paragraph markup becomes newlines, literal
/// `\n` escapes become real newlines, and one piece of stray leading
/// punctuation from the legacy data is dropped.
pub fn clean_gloss(raw: &str) -> String {
    let cleaned = raw
        .replace("</p>", "\n")
        .replace("<p>", "")
        .replace("\\n", "\n");
    let cleaned = cleaned.trim();
    let cleaned = match cleaned.strip_prefix([',', '.', '/', '|']) {
        Some(rest) => rest,
        None => cleaned,
    };
    cleaned.trim().to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_repair_leading_combining() {
        // U+1920 vowel sign with no base letter
        assert_eq!(repair_leading_combining("\u{1920}la"), "ᤀ\u{1920}la");
        // repaired after whitespace too
        assert_eq!(
            repair_leading_combining("ᤁa \u{1921}b"),
            "ᤁa ᤀ\u{1921}b"
        );
        // well-formed text passes through
        assert_eq!(repair_leading_combining("ᤁ\u{1920}ma"), "ᤁ\u{1920}ma");
        assert_eq!(repair_leading_combining(""), "");
    }

    #[test]
    fn test_search_key_folds_case() {
        assert_eq!(search_key("Dog House"), "dog house");
        assert_eq!(search_key("\u{1920}La"), "ᤀ\u{1920}la");
    }

    #[test]
    fn test_display_word_placeholder() {
        assert_eq!(display_word(""), WORD_MISSING);
        assert_eq!(display_word("ᤀla"), "ᤀla");
    }

    #[test]
    fn test_clean_gloss() {
        assert_eq!(clean_gloss("<p>one</p><p>two</p>"), "one\ntwo");
        assert_eq!(clean_gloss("a\\nb"), "a\nb");
        assert_eq!(clean_gloss(", leading comma"), "leading comma");
        assert_eq!(clean_gloss("  plain  "), "plain");
        // only one leading punctuation char is stripped
        assert_eq!(clean_gloss("./x"), "/x");
    }

    #[test]
    fn test_nfc() {
        // decomposed e + combining acute collapses to é
        assert_eq!(nfc("e\u{0301}"), "é");
    }
}
