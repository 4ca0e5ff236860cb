use serde::Deserialize;

use crate::normalize::nfc;

/// One glossary entry. All four text fields are NFC-normalized at
/// construction and never change afterwards.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Record {
    /// Stable key from the source dataset.
    pub id: String,
    /// Word in the Limbu script. May be empty.
    pub primary: String,
    /// Transliteration / romanization.
    pub secondary: String,
    /// Free-text meaning, possibly with legacy paragraph markup.
    pub gloss: String,
    /// Semantic grouping label.
    pub group: String,
}

/// The legacy JSON value shape: `dId`/`desc`/`mean`/`group`, any of which
/// may be absent. Missing fields become empty strings, never errors.
#[derive(Debug, Default, Deserialize)]
pub struct RawEntry {
    #[serde(default, alias = "dId")]
    pub primary: String,
    #[serde(default, alias = "desc")]
    pub secondary: String,
    #[serde(default, alias = "mean")]
    pub gloss: String,
    #[serde(default)]
    pub group: String,
}

impl Record {
    pub fn from_raw(id: String, raw: RawEntry) -> Self {
        Record {
            id,
            primary: nfc(&raw.primary),
            secondary: nfc(&raw.secondary),
            gloss: nfc(&raw.gloss),
            group: nfc(&raw.group),
        }
    }

    /// The text the gloss pane is built from. Legacy entries sometimes
    /// carry the meaning in `secondary` or `group` instead of `gloss`.
    pub fn gloss_source(&self) -> &str {
        if !self.gloss.is_empty() {
            &self.gloss
        } else if !self.secondary.is_empty() {
            &self.secondary
        } else {
            &self.group
        }
    }
}
