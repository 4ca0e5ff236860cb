//! Two-pass highlighting.
//!
//! Pass one locates match spans against the plain field text; pass two
//! wraps the spans in markers. Because markup is only produced after all
//! spans are known, repeated highlighting of related fields can never
//! match inside markers it produced earlier, and no pattern escaping is
//! needed.

use std::ops::Range;

use crate::unicode::has_latin;

/// Byte spans of every occurrence of `term` in `text`, left to right,
/// non-overlapping. Terms containing Latin letters match
/// case-insensitively; purely non-Latin terms match exactly.
pub fn find_spans(text: &str, term: &str) -> Vec<Range<usize>> {
    if term.is_empty() || text.is_empty() {
        return Vec::new();
    }
    if has_latin(term) {
        find_spans_folded(text, term)
    } else {
        let mut spans = Vec::new();
        let mut from = 0;
        while let Some(pos) = text[from..].find(term) {
            let start = from + pos;
            spans.push(start..start + term.len());
            from = start + term.len();
        }
        spans
    }
}

/// Case-insensitive span scan. Works on char boundaries and compares one
/// char at a time through `to_lowercase`, so multi-byte case pairs keep
/// correct byte offsets in the original text.
fn find_spans_folded(text: &str, term: &str) -> Vec<Range<usize>> {
    let mut spans = Vec::new();
    let mut start = 0;
    while start < text.len() {
        match match_len_at(&text[start..], term) {
            Some(len) => {
                spans.push(start..start + len);
                start += len;
            }
            None => {
                start += text[start..].chars().next().map_or(1, char::len_utf8);
            }
        }
    }
    spans
}

/// Byte length of a case-insensitive match of `term` at the start of
/// `rest`, if there is one.
fn match_len_at(rest: &str, term: &str) -> Option<usize> {
    let mut rest_chars = rest.chars();
    let mut len = 0;
    for tc in term.chars() {
        let rc = rest_chars.next()?;
        if !rc.to_lowercase().eq(tc.to_lowercase()) {
            return None;
        }
        len += rc.len_utf8();
    }
    Some(len)
}

/// Wrap each span in `open`/`close` markers. Spans must be ascending and
/// non-overlapping, as produced by `find_spans`.
pub fn apply_spans(text: &str, spans: &[Range<usize>], open: &str, close: &str) -> String {
    let mut out = String::with_capacity(text.len() + spans.len() * (open.len() + close.len()));
    let mut cursor = 0;
    for span in spans {
        out.push_str(&text[cursor..span.start]);
        out.push_str(open);
        out.push_str(&text[span.clone()]);
        out.push_str(close);
        cursor = span.end;
    }
    out.push_str(&text[cursor..]);
    out
}
