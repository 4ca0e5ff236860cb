//! Engine configuration loaded from TOML.
//!
//! Defaults are embedded via `include_str!`; hosts override by handing a
//! custom TOML string to [`EngineConfig::from_toml_str`]. There is no
//! global singleton — the parsed config is owned by the engine context.

use serde::Deserialize;

pub const DEFAULT_SETTINGS_TOML: &str = include_str!("default_settings.toml");

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("TOML parse error: {0}")]
    Parse(String),
}

#[derive(Debug, Clone, Deserialize)]
pub struct EngineConfig {
    pub search: SearchSettings,
    pub render: RenderSettings,
    pub source: SourceSettings,
}

#[derive(Debug, Clone, Deserialize)]
pub struct SearchSettings {
    /// Terms with fewer characters than this return the full list.
    pub min_query_len: usize,
    /// Policy for clearing the search box while in letter mode.
    pub clear_in_letter_restores_all: bool,
    pub debounce_ms: u64,
}

#[derive(Debug, Clone, Deserialize)]
pub struct RenderSettings {
    pub batch_size: usize,
    pub scroll_threshold: f64,
}

#[derive(Debug, Clone, Deserialize)]
pub struct SourceSettings {
    /// GitHub `owner/name` of the dataset repository.
    pub repo: String,
    pub branch: String,
    pub data_file: String,
}

impl EngineConfig {
    pub fn from_toml_str(toml_str: &str) -> Result<Self, ConfigError> {
        toml::from_str(toml_str).map_err(|e| ConfigError::Parse(e.to_string()))
    }
}

impl Default for EngineConfig {
    fn default() -> Self {
        EngineConfig::from_toml_str(DEFAULT_SETTINGS_TOML)
            .expect("embedded default settings must be valid")
    }
}
