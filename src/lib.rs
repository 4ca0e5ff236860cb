//! Incremental search, collation and pagination engine for a large static
//! glossary, plus the navigation state machine that keeps its three
//! presentation modes (full list, letter-filtered list, letter-index
//! grid) consistent with host history entries and URL fragments.
//!
//! The engine is headless: presentation, history and speech are traits
//! ([`PresentationSink`], [`HistoryAdapter`], [`SpeechSynth`]) the host
//! implements. All state lives in one owned [`GlossaryEngine`] context.

pub mod collate;
pub mod config;
pub mod dataset;
pub mod debounce;
pub mod engine;
pub mod error;
pub mod fetch;
pub mod highlight;
pub mod letters;
pub mod nav;
pub mod normalize;
pub mod record;
pub mod render;
pub mod search;
pub mod trace_init;
pub mod unicode;

pub use config::EngineConfig;
pub use dataset::{Dataset, ResultSet};
pub use engine::{
    EngineSlot, GlossaryEngine, IndexToggle, PresentationSink, RenderedEntry, SpeechSynth,
};
pub use error::GlossaryError;
pub use fetch::DatasetSource;
pub use nav::{HistoryAdapter, HistoryEntry, NavState};
pub use record::Record;
pub use render::{RenderCursor, RenderStatus, ScrollMetrics};
