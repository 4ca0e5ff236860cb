//! Remote dataset retrieval.
//!
//! The dataset lives in a GitHub repository served through the jsDelivr
//! CDN. Fetching first pins the CDN URL to the repository's head commit
//! so the payload is immutable; if the GitHub API is unreachable it falls
//! back to the branch URL with a cache-busting timestamp. Any failure
//! from the final fetch propagates as a single error — no partial
//! dataset ever escapes this module.

use std::time::{SystemTime, UNIX_EPOCH};

use tracing::{debug, warn};

use crate::config::SourceSettings;
use crate::dataset::Dataset;
use crate::error::{GlossaryError, Result};

pub struct DatasetSource {
    settings: SourceSettings,
}

impl DatasetSource {
    pub fn new(settings: SourceSettings) -> Self {
        DatasetSource { settings }
    }

    fn pinned_url(&self, sha: &str) -> String {
        format!(
            "https://cdn.jsdelivr.net/gh/{}@{}/{}",
            self.settings.repo, sha, self.settings.data_file
        )
    }

    fn fallback_url_at(&self, timestamp_ms: u128) -> String {
        format!(
            "https://cdn.jsdelivr.net/gh/{}@{}/{}?t={}",
            self.settings.repo, self.settings.branch, self.settings.data_file, timestamp_ms
        )
    }

    fn latest_commit_sha(&self) -> Result<String> {
        let url = format!(
            "https://api.github.com/repos/{}/commits/{}",
            self.settings.repo, self.settings.branch
        );
        let body = ureq::get(&url)
            .call()
            .map_err(|e| GlossaryError::Http(format!("{url}: {e}")))?
            .into_body()
            .read_to_string()
            .map_err(|e| GlossaryError::Http(format!("{url}: {e}")))?;
        let commit: serde_json::Value = serde_json::from_str(&body)?;
        commit["sha"]
            .as_str()
            .map(str::to_string)
            .ok_or_else(|| GlossaryError::Parse("commit response missing sha".to_string()))
    }

    /// The URL to fetch: commit-pinned when the GitHub API answers,
    /// cache-busted branch URL otherwise.
    pub fn resolve_url(&self) -> String {
        match self.latest_commit_sha() {
            Ok(sha) => {
                debug!(%sha, "pinned dataset url");
                self.pinned_url(&sha)
            }
            Err(e) => {
                warn!(error = %e, "commit lookup failed, falling back to branch url");
                let now_ms = SystemTime::now()
                    .duration_since(UNIX_EPOCH)
                    .map(|d| d.as_millis())
                    .unwrap_or_default();
                self.fallback_url_at(now_ms)
            }
        }
    }

    pub fn fetch_json(&self) -> Result<String> {
        let url = self.resolve_url();
        ureq::get(&url)
            .call()
            .map_err(|e| GlossaryError::Http(format!("{url}: {e}")))?
            .into_body()
            .read_to_string()
            .map_err(|e| GlossaryError::Http(format!("{url}: {e}")))
    }

    /// Fetch and ingest in one step: the only asynchronous boundary in
    /// the system, run once at startup.
    pub fn fetch(&self) -> Result<Dataset> {
        Dataset::from_json_str(&self.fetch_json()?)
    }
}
