//! Navigation state and its serialized forms.
//!
//! The three presentation modes map 1:1 onto tagged history payloads and
//! URL fragments. The browser (or whatever host) is only a serialization
//! target reached through [`HistoryAdapter`]; the engine's own
//! [`NavState`] is always the source of truth, and replaying any stored
//! entry — or garbage — deterministically lands on a valid state.

use serde::{Deserialize, Serialize};

/// Current presentation mode.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NavState {
    /// The full list, optionally narrowed by the live search term (which
    /// lives outside the state, in the search box).
    Full,
    /// The list filtered to one leading letter.
    Letter(char),
    /// The letter-index grid.
    Index,
}

/// Tagged payload stored alongside each history entry. The `view` tag and
/// field names match the legacy dataset's sibling web app, so shared URLs
/// keep working.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "view", rename_all = "lowercase")]
pub enum HistoryEntry {
    Main,
    Letter { letter: char },
    Index,
}

impl HistoryEntry {
    /// Parse a stored payload. Unrecognized shapes are `None`, which
    /// callers must treat as `Main`.
    pub fn from_json(json: &str) -> Option<HistoryEntry> {
        serde_json::from_str(json).ok()
    }

    pub fn to_json(&self) -> String {
        serde_json::to_string(self).unwrap_or_else(|_| r#"{"view":"main"}"#.to_string())
    }
}

impl NavState {
    /// State for a replayed history entry. Absent or unknown entries fold
    /// to `Full` — never an error.
    pub fn from_entry(entry: Option<HistoryEntry>) -> NavState {
        match entry {
            Some(HistoryEntry::Letter { letter }) => NavState::Letter(letter),
            Some(HistoryEntry::Index) => NavState::Index,
            Some(HistoryEntry::Main) | None => NavState::Full,
        }
    }

    pub fn to_entry(self) -> HistoryEntry {
        match self {
            NavState::Full => HistoryEntry::Main,
            NavState::Letter(letter) => HistoryEntry::Letter { letter },
            NavState::Index => HistoryEntry::Index,
        }
    }

    /// Fragment for the address bar: `#letter-<char>` / `#index`, nothing
    /// for the full list.
    pub fn fragment(self) -> Option<String> {
        match self {
            NavState::Full => None,
            NavState::Letter(letter) => Some(format!("#letter-{letter}")),
            NavState::Index => Some("#index".to_string()),
        }
    }
}

/// Parse a URL fragment (with or without the leading `#`). Anything
/// unrecognized is the full list.
pub fn parse_fragment(fragment: &str) -> NavState {
    let fragment = fragment.strip_prefix('#').unwrap_or(fragment);
    if let Some(raw) = fragment.strip_prefix("letter-") {
        match percent_decode(raw).chars().next() {
            Some(letter) => NavState::Letter(letter),
            None => NavState::Full,
        }
    } else if fragment == "index" {
        NavState::Index
    } else {
        NavState::Full
    }
}

/// Minimal percent-decoding for fragment letters. Malformed escapes pass
/// through untouched; invalid UTF-8 decodes lossily.
fn percent_decode(s: &str) -> String {
    let bytes = s.as_bytes();
    let mut out = Vec::with_capacity(bytes.len());
    let mut i = 0;
    while i < bytes.len() {
        if bytes[i] == b'%' && i + 2 < bytes.len() {
            let hi = (bytes[i + 1] as char).to_digit(16);
            let lo = (bytes[i + 2] as char).to_digit(16);
            if let (Some(hi), Some(lo)) = (hi, lo) {
                out.push((hi * 16 + lo) as u8);
                i += 3;
                continue;
            }
        }
        out.push(bytes[i]);
        i += 1;
    }
    String::from_utf8_lossy(&out).into_owned()
}

/// Narrow interface to the host's history mechanism. Push for forward
/// transitions, replace for initialization and cleanup; pops arrive as
/// `GlossaryEngine::replay_history` calls.
pub trait HistoryAdapter {
    fn push(&mut self, entry: &HistoryEntry, fragment: Option<&str>);
    fn replace(&mut self, entry: &HistoryEntry, fragment: Option<&str>);
}
