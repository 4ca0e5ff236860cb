use std::collections::BTreeMap;

use crate::collate::sort_records;
use crate::error::Result;
use crate::record::{RawEntry, Record};

/// The loaded glossary: every record, collation-sorted once at ingestion.
/// Read-only for the rest of the process lifetime.
#[derive(Debug)]
pub struct Dataset {
    records: Vec<Record>,
}

impl Dataset {
    /// Parse the legacy JSON object (id -> entry). Pairs are taken in
    /// id order so the comparator's stable tie-break is deterministic
    /// regardless of the source object's key order, then sorted once by
    /// the collator.
    pub fn from_json_str(json: &str) -> Result<Self> {
        let raw: BTreeMap<String, RawEntry> = serde_json::from_str(json)?;
        let records = raw
            .into_iter()
            .map(|(id, entry)| Record::from_raw(id, entry))
            .collect();
        Ok(Self::from_records(records))
    }

    /// Build from already-constructed records, applying the collation sort.
    pub fn from_records(mut records: Vec<Record>) -> Self {
        sort_records(&mut records);
        Dataset { records }
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<&Record> {
        self.records.get(index)
    }

    pub fn records(&self) -> &[Record] {
        &self.records
    }

    /// The natural-order view: every record, in collation order.
    pub fn natural_order(&self) -> ResultSet {
        ResultSet::new((0..self.records.len()).collect())
    }
}

/// An ordered view over the dataset: indices into `Dataset::records`, in
/// presentation order. Always freshly allocated by the producing filter,
/// never an aliased slice of another set.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResultSet {
    indices: Vec<usize>,
}

impl ResultSet {
    pub fn new(indices: Vec<usize>) -> Self {
        ResultSet { indices }
    }

    pub fn empty() -> Self {
        ResultSet {
            indices: Vec::new(),
        }
    }

    pub fn len(&self) -> usize {
        self.indices.len()
    }

    pub fn is_empty(&self) -> bool {
        self.indices.is_empty()
    }

    pub fn indices(&self) -> &[usize] {
        &self.indices
    }

    pub fn iter(&self) -> impl Iterator<Item = usize> + '_ {
        self.indices.iter().copied()
    }

    /// Resolve a slice of the view to records, in view order.
    pub fn records<'a>(&self, dataset: &'a Dataset, range: std::ops::Range<usize>) -> Vec<&'a Record> {
        self.indices[range]
            .iter()
            .filter_map(|&i| dataset.get(i))
            .collect()
    }
}
