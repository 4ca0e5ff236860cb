//! Substring search with a 3-tier relevance rank.
//!
//! Matching concatenates all four record fields (space-joined), repairs
//! combining marks and case-folds both sides, then does a plain substring
//! test. No tokenization. Ranking only looks at the primary field against
//! the original (unfolded) term: exact match, prefix match, everything
//! else — and the stable sort keeps natural order inside each tier.

use tracing::debug;

use crate::dataset::{Dataset, ResultSet};
use crate::normalize::{nfc, search_key};
use crate::record::Record;

/// A parsed, non-trivial search term: trimmed, NFC-normalized, with the
/// folded form used for matching held alongside the original used for
/// ranking and highlighting.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Query {
    pub original: String,
    pub folded: String,
}

impl Query {
    /// Canonicalize `raw`. Returns `None` when the trimmed term is empty
    /// or shorter than `min_len` characters — callers fall back to the
    /// natural-order view in that case.
    pub fn parse(raw: &str, min_len: usize) -> Option<Query> {
        let original = nfc(raw.trim());
        if original.is_empty() || original.chars().count() < min_len {
            return None;
        }
        let folded = search_key(&original);
        Some(Query { original, folded })
    }
}

fn matches(record: &Record, folded_term: &str) -> bool {
    let haystack = [
        record.primary.as_str(),
        record.secondary.as_str(),
        record.gloss.as_str(),
        record.group.as_str(),
    ]
    .map(search_key)
    .join(" ");
    haystack.contains(folded_term)
}

/// Relevance tier of a matching record: 1 exact, 2 prefix, 3 other.
fn tier(primary: &str, original_term: &str) -> u8 {
    if primary == original_term {
        1
    } else if primary.starts_with(original_term) {
        2
    } else {
        3
    }
}

/// Filter the dataset against `query` and rank the matches. The filter
/// pass walks natural order, so the stable tier sort preserves natural
/// order within each tier.
pub fn run_query(dataset: &Dataset, query: &Query) -> ResultSet {
    let mut hits: Vec<usize> = (0..dataset.len())
        .filter(|&i| matches(&dataset.records()[i], &query.folded))
        .collect();
    hits.sort_by_key(|&i| tier(&dataset.records()[i].primary, &query.original));
    debug!(term = %query.original, hits = hits.len(), "search");
    ResultSet::new(hits)
}
