use std::io;

/// Unified error type for the glossary engine.
///
/// Only the dataset load path surfaces errors past the crate boundary;
/// everything after a successful load degrades locally (empty fields,
/// empty result sets) instead of failing.
#[derive(Debug, thiserror::Error)]
pub enum GlossaryError {
    #[error("HTTP error: {0}")]
    Http(String),

    #[error("IO error: {0}")]
    Io(#[from] io::Error),

    #[error("dataset parse error: {0}")]
    Parse(String),

    #[error("dataset not loaded")]
    NotLoaded,
}

impl From<serde_json::Error> for GlossaryError {
    fn from(e: serde_json::Error) -> Self {
        GlossaryError::Parse(e.to_string())
    }
}

pub type Result<T> = std::result::Result<T, GlossaryError>;
