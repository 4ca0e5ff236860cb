//! Batched, append-only rendering over the active result set.
//!
//! The renderer never talks to a presentation surface itself; it hands out
//! ranges of the active view and the engine materializes them. The busy
//! flag guards against a scroll notification re-entering `advance` while
//! the previous batch is still being emitted — the host is cooperative,
//! not parallel, so a flag is all that is needed.

use crate::dataset::ResultSet;

pub const BATCH_SIZE: usize = 100;

/// Default scroll proximity (layout units from the bottom) at which the
/// next batch is requested. The effective value is configurable.
pub const SCROLL_THRESHOLD: f64 = 800.0;

/// Append-only pointer into the active result set.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RenderCursor {
    /// Records already materialized for the current result set.
    pub position: usize,
    pub total: usize,
}

/// Outcome of one `advance` call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Batch {
    /// Range of view indices to materialize, in result-set order.
    Entries(std::ops::Range<usize>),
    /// Cursor already at the end; nothing happened.
    EndOfSet,
    /// An advance is still emitting; this call was a no-op.
    Busy,
}

/// Human-readable load state, derivable purely from the cursor.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RenderStatus {
    NothingRendered,
    MoreAvailable { position: usize, total: usize },
    EndOfList { total: usize },
}

impl std::fmt::Display for RenderStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            RenderStatus::NothingRendered => write!(f, "No entries yet."),
            RenderStatus::MoreAvailable { position, total } => {
                write!(f, "Scroll down to load more... ({position}/{total})")
            }
            RenderStatus::EndOfList { total } => {
                write!(f, "End of list. Total entries: {total}")
            }
        }
    }
}

/// Viewport geometry reported by the host on scroll events.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScrollMetrics {
    pub content_height: f64,
    pub viewport_height: f64,
    pub scroll_top: f64,
}

impl ScrollMetrics {
    /// Distance from the bottom of the rendered content.
    pub fn remaining(&self) -> f64 {
        self.content_height - self.viewport_height - self.scroll_top
    }
}

#[derive(Debug)]
pub struct BatchRenderer {
    result_set: ResultSet,
    position: usize,
    batch_size: usize,
    scroll_threshold: f64,
    in_progress: bool,
    ever_advanced: bool,
}

impl BatchRenderer {
    pub fn new(batch_size: usize, scroll_threshold: f64) -> Self {
        BatchRenderer {
            result_set: ResultSet::empty(),
            position: 0,
            batch_size,
            scroll_threshold,
            in_progress: false,
            ever_advanced: false,
        }
    }

    pub fn result_set(&self) -> &ResultSet {
        &self.result_set
    }

    pub fn cursor(&self) -> RenderCursor {
        RenderCursor {
            position: self.position,
            total: self.result_set.len(),
        }
    }

    /// Replace the active view and rewind the cursor. Does not advance;
    /// the caller renders the first batch explicitly.
    pub fn result_set_changed(&mut self, new: ResultSet) {
        self.result_set = new;
        self.position = 0;
        self.in_progress = false;
        self.ever_advanced = false;
    }

    /// Claim the next batch. The caller must materialize the returned
    /// range and then call `complete_advance`; until it does, further
    /// calls return `Batch::Busy` and move nothing.
    pub fn advance(&mut self) -> Batch {
        if self.in_progress {
            return Batch::Busy;
        }
        self.ever_advanced = true;
        let total = self.result_set.len();
        if self.position >= total {
            return Batch::EndOfSet;
        }
        self.in_progress = true;
        let start = self.position;
        let end = (start + self.batch_size).min(total);
        self.position = end;
        Batch::Entries(start..end)
    }

    pub fn complete_advance(&mut self) {
        self.in_progress = false;
    }

    pub fn status(&self) -> RenderStatus {
        let total = self.result_set.len();
        if !self.ever_advanced {
            RenderStatus::NothingRendered
        } else if self.position < total {
            RenderStatus::MoreAvailable {
                position: self.position,
                total,
            }
        } else {
            RenderStatus::EndOfList { total }
        }
    }

    /// Scroll trigger policy: advance when within the configured
    /// threshold of the bottom of the rendered content.
    pub fn should_advance(&self, metrics: ScrollMetrics) -> bool {
        !self.in_progress && metrics.remaining() < self.scroll_threshold
    }
}
