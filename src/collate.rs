//! Custom-alphabet collation.
//!
//! Ordering is by the alphabet rank of the first Limbu base letter in the
//! repaired primary field. Records without any base letter sort after all
//! records that have one. The sort is stable, so the dataset's ingestion
//! order is the tie-break within a rank.

use std::cmp::Ordering;

use crate::normalize::repair_leading_combining;
use crate::record::Record;
use crate::unicode::{alphabet_index, is_alphabet_letter};

/// First character of the repaired text that belongs to the fixed alphabet.
pub fn first_alphabet_char(text: &str) -> Option<char> {
    repair_leading_combining(text)
        .chars()
        .find(|c| is_alphabet_letter(*c))
}

/// Alphabet rank used for ordering; `None` (no resolvable letter) ranks
/// after every resolvable letter.
fn rank(record: &Record) -> usize {
    first_alphabet_char(&record.primary)
        .and_then(alphabet_index)
        .unwrap_or(usize::MAX)
}

pub fn compare(a: &Record, b: &Record) -> Ordering {
    rank(a).cmp(&rank(b))
}

/// Stable in-place collation sort.
pub fn sort_records(records: &mut [Record]) {
    records.sort_by(compare);
}
