//! Browse-by-letter support: which base letters occur in the dataset, and
//! the natural-order view for one of them.

use crate::dataset::{Dataset, ResultSet};
use crate::normalize::repair_leading_combining;
use crate::unicode::{alphabet_index, is_alphabet_letter};

/// The letter a record is filed under: the first character of the
/// repaired primary field, and only if that character is a base letter.
/// Unlike the collator, which scans for the first base letter anywhere
/// in the word, a record whose primary starts with anything else belongs
/// to no bucket.
pub fn leading_letter(primary: &str) -> Option<char> {
    repair_leading_combining(primary)
        .chars()
        .next()
        .filter(|c| is_alphabet_letter(*c))
}

/// Distinct leading letters present in the dataset, in alphabet order.
///
/// The dataset is immutable, so callers may cache this for the process
/// lifetime; recomputing on each index-view entry is also fine.
pub fn available_letters(dataset: &Dataset) -> Vec<char> {
    let mut present = [false; crate::unicode::LIMBU_ALPHABET.len()];
    for record in dataset.records() {
        if let Some(i) = leading_letter(&record.primary).and_then(alphabet_index) {
            present[i] = true;
        }
    }
    crate::unicode::LIMBU_ALPHABET
        .iter()
        .enumerate()
        .filter(|&(i, _)| present[i])
        .map(|(_, c)| *c)
        .collect()
}

/// Records whose repaired primary field starts (alphabet-wise) with
/// `letter`, in natural order. A letter with no entries — including one
/// outside the alphabet entirely — yields an empty set, never an error.
pub fn filter_by_letter(dataset: &Dataset, letter: char) -> ResultSet {
    ResultSet::new(
        (0..dataset.len())
            .filter(|&i| leading_letter(&dataset.records()[i].primary) == Some(letter))
            .collect(),
    )
}
