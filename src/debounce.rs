//! Single-slot cancellable timer for search input.
//!
//! Rapid input events coalesce: each `schedule` replaces the pending term
//! and restarts the quiescence window. The host pumps `fire` from its own
//! clock (there are no threads here), so the engine stays cooperative.

#[derive(Debug)]
pub struct Debouncer {
    delay_ms: u64,
    pending: Option<Pending>,
}

#[derive(Debug)]
struct Pending {
    term: String,
    deadline_ms: u64,
}

impl Debouncer {
    pub fn new(delay_ms: u64) -> Self {
        Debouncer {
            delay_ms,
            pending: None,
        }
    }

    /// Schedule `term`, cancelling any previously pending one.
    pub fn schedule(&mut self, term: String, now_ms: u64) {
        self.pending = Some(Pending {
            term,
            deadline_ms: now_ms.saturating_add(self.delay_ms),
        });
    }

    /// Take the pending term if its quiescence window has elapsed.
    pub fn fire(&mut self, now_ms: u64) -> Option<String> {
        if self.pending.as_ref()?.deadline_ms <= now_ms {
            self.pending.take().map(|p| p.term)
        } else {
            None
        }
    }

    pub fn cancel(&mut self) {
        self.pending = None;
    }

    pub fn is_pending(&self) -> bool {
        self.pending.is_some()
    }
}
