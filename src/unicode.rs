/// Character-level Unicode classification for Limbu text.

/// The 29 Limbu base letters in collation order (U+1900..=U+191C).
pub const LIMBU_ALPHABET: [char; 29] = [
    'ᤀ', 'ᤁ', 'ᤂ', 'ᤃ', 'ᤄ', 'ᤅ', 'ᤆ', 'ᤇ', 'ᤈ', 'ᤉ', 'ᤊ', 'ᤋ', 'ᤌ', 'ᤍ', 'ᤎ', 'ᤏ', 'ᤐ',
    'ᤑ', 'ᤒ', 'ᤓ', 'ᤔ', 'ᤕ', 'ᤖ', 'ᤗ', 'ᤘ', 'ᤙ', 'ᤚ', 'ᤛ', 'ᤜ',
];

/// The base glyph prepended when a word starts with a bare combining mark.
pub const CARRIER_LETTER: char = 'ᤀ';

/// Position of `c` in the fixed alphabet order, if it is a base letter.
///
/// The alphabet is the contiguous block U+1900..=U+191C, so membership
/// and rank reduce to one range check.
pub fn alphabet_index(c: char) -> Option<usize> {
    if ('\u{1900}'..='\u{191C}').contains(&c) {
        Some(c as usize - 0x1900)
    } else {
        None
    }
}

pub fn is_alphabet_letter(c: char) -> bool {
    alphabet_index(c).is_some()
}

/// Limbu vowel signs, subjoined letters and small letters (U+1920..=U+193F).
/// These modify a preceding base letter and must never begin a sorted or
/// displayed unit on their own.
pub fn is_combining_mark(c: char) -> bool {
    ('\u{1920}'..='\u{193F}').contains(&c)
}

pub fn is_latin(c: char) -> bool {
    c.is_ascii_alphabetic()
}

/// True if any character in `s` is a Latin letter. Drives case sensitivity
/// when locating highlight spans.
pub fn has_latin(s: &str) -> bool {
    s.chars().any(is_latin)
}
