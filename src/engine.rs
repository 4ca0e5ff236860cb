//! The owned engine context: dataset, active view, render cursor,
//! navigation state and the debounced search term, with every external
//! surface (presentation, history, speech) behind a trait.
//!
//! Every event entry point runs synchronously to completion; the only
//! asynchronous boundary in the system is the initial dataset fetch,
//! which happens before an engine can be constructed at all.

use std::ops::Range;

use tracing::{debug, debug_span};

use crate::config::EngineConfig;
use crate::dataset::{Dataset, ResultSet};
use crate::debounce::Debouncer;
use crate::error::{GlossaryError, Result};
use crate::highlight::find_spans;
use crate::letters::{available_letters, filter_by_letter};
use crate::nav::{parse_fragment, HistoryAdapter, HistoryEntry, NavState};
use crate::normalize::{clean_gloss, display_word};
use crate::record::Record;
use crate::render::{Batch, BatchRenderer, RenderCursor, RenderStatus, ScrollMetrics};
use crate::search::{run_query, Query};

/// One record prepared for display: placeholder-substituted word, cleaned
/// gloss, and highlight spans for the active term (empty when none).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderedEntry {
    pub id: String,
    pub word: String,
    pub word_spans: Vec<Range<usize>>,
    pub secondary: Option<String>,
    pub secondary_spans: Vec<Range<usize>>,
    pub gloss: String,
    pub gloss_spans: Vec<Range<usize>>,
}

/// Host-side presentation surface. Calls arrive in a fixed order per
/// transition: mode first, then cleared entries, then one batch.
pub trait PresentationSink {
    fn set_mode(&mut self, state: &NavState);
    fn clear_entries(&mut self);
    fn render_entry(&mut self, entry: &RenderedEntry);
    fn set_status(&mut self, status: &RenderStatus);
    fn show_letter_index(&mut self, letters: &[char]);
    /// Overwrite the search box. Only called on history replay into the
    /// full list, never while the user is typing.
    fn set_search_text(&mut self, text: &str);
}

/// Best-effort spoken playback of a transliteration. No return value;
/// hosts without speech support simply no-op.
pub trait SpeechSynth {
    fn speak(&mut self, text: &str);
}

/// Outcome of the index-view toggle.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IndexToggle {
    /// The grid was entered and a history entry pushed.
    Entered,
    /// Already in the grid; the host should navigate back and feed the
    /// popped entry to `replay_history`.
    RequestBack,
}

pub struct GlossaryEngine {
    config: EngineConfig,
    dataset: Dataset,
    renderer: BatchRenderer,
    nav: NavState,
    /// Active search term. Only meaningful in `Full` mode.
    query: Option<Query>,
    debouncer: Debouncer,
}

impl GlossaryEngine {
    /// Build the engine from a fully loaded, sorted dataset. There is no
    /// half-loaded state: constructing the dataset is the load boundary.
    pub fn new(dataset: Dataset, config: EngineConfig) -> Self {
        let renderer = BatchRenderer::new(config.render.batch_size, config.render.scroll_threshold);
        let debouncer = Debouncer::new(config.search.debounce_ms);
        GlossaryEngine {
            config,
            dataset,
            renderer,
            nav: NavState::Full,
            query: None,
            debouncer,
        }
    }

    pub fn dataset(&self) -> &Dataset {
        &self.dataset
    }

    pub fn nav(&self) -> NavState {
        self.nav
    }

    pub fn cursor(&self) -> RenderCursor {
        self.renderer.cursor()
    }

    pub fn status(&self) -> RenderStatus {
        self.renderer.status()
    }

    /// Initialize from the page URL. A recognized fragment reproduces the
    /// same state as reaching it through the UI; anything else is the
    /// full list. Establishes the corresponding history entry via
    /// `replace`, never `push`.
    pub fn start<S: PresentationSink, H: HistoryAdapter>(
        &mut self,
        fragment: &str,
        sink: &mut S,
        history: &mut H,
    ) {
        let _span = debug_span!("start", fragment).entered();
        let state = parse_fragment(fragment);
        self.nav = state;
        self.query = None;
        let entry = state.to_entry();
        history.replace(&entry, state.fragment().as_deref());
        self.apply_view(sink);
    }

    /// Raw input event from the search box. Coalesced: filtering runs
    /// from `tick` once the quiescence window elapses.
    pub fn search_input(&mut self, text: &str, now_ms: u64) {
        self.debouncer.schedule(text.to_string(), now_ms);
    }

    /// Pump the debounce timer. Returns true if a filter pass ran.
    pub fn tick<S: PresentationSink, H: HistoryAdapter>(
        &mut self,
        now_ms: u64,
        sink: &mut S,
        history: &mut H,
    ) -> bool {
        match self.debouncer.fire(now_ms) {
            Some(term) => {
                self.apply_search(&term, sink, history);
                true
            }
            None => false,
        }
    }

    fn apply_search<S: PresentationSink, H: HistoryAdapter>(
        &mut self,
        term: &str,
        sink: &mut S,
        history: &mut H,
    ) {
        let _span = debug_span!("apply_search", term).entered();
        let parsed = Query::parse(term, self.config.search.min_query_len);

        // Policy: a cleared (or too-short) box while browsing one letter
        // either restores the full list or keeps the letter filter.
        if parsed.is_none()
            && matches!(self.nav, NavState::Letter(_))
            && !self.config.search.clear_in_letter_restores_all
        {
            self.query = None;
            self.apply_view(sink);
            return;
        }

        if self.nav != NavState::Full {
            let entry = NavState::Full.to_entry();
            history.push(&entry, None);
            self.nav = NavState::Full;
        }
        self.query = parsed;
        self.apply_view(sink);
    }

    /// Scroll notification. Renders the next batch when the viewport is
    /// near the bottom; no-op in the index grid or mid-emission.
    pub fn scroll<S: PresentationSink>(&mut self, metrics: ScrollMetrics, sink: &mut S) {
        if self.nav == NavState::Index {
            return;
        }
        if self.renderer.should_advance(metrics) {
            self.render_next_batch(sink);
        }
    }

    /// User picked a letter from the index grid.
    pub fn pick_letter<S: PresentationSink, H: HistoryAdapter>(
        &mut self,
        letter: char,
        sink: &mut S,
        history: &mut H,
    ) {
        let _span = debug_span!("pick_letter", %letter).entered();
        self.nav = NavState::Letter(letter);
        self.query = None;
        self.debouncer.cancel();
        let entry = self.nav.to_entry();
        history.push(&entry, self.nav.fragment().as_deref());
        self.apply_view(sink);
    }

    /// User hit the index-view toggle.
    pub fn toggle_index_view<S: PresentationSink, H: HistoryAdapter>(
        &mut self,
        sink: &mut S,
        history: &mut H,
    ) -> IndexToggle {
        if self.nav == NavState::Index {
            return IndexToggle::RequestBack;
        }
        self.nav = NavState::Index;
        let entry = self.nav.to_entry();
        history.push(&entry, self.nav.fragment().as_deref());
        self.apply_view(sink);
        IndexToggle::Entered
    }

    /// Passive replay of a popped history entry (back/forward). Never
    /// pushes; landing on the full list resets the search box so stale
    /// query text can never caption a list it no longer matches.
    pub fn replay_history<S: PresentationSink, H: HistoryAdapter>(
        &mut self,
        entry: Option<HistoryEntry>,
        sink: &mut S,
        history: &mut H,
    ) {
        let state = NavState::from_entry(entry);
        debug!(?state, "replay_history");
        self.debouncer.cancel();
        self.nav = state;
        self.query = None;
        if state == NavState::Full {
            sink.set_search_text("");
            // scrub any leftover fragment from the address bar
            history.replace(&state.to_entry(), None);
        }
        self.apply_view(sink);
    }

    /// Speak the transliteration of a rendered entry, by its position in
    /// the active view. Silent when out of range or empty.
    pub fn speak_entry<T: SpeechSynth>(&self, view_index: usize, speech: &mut T) {
        let record = self
            .renderer
            .result_set()
            .indices()
            .get(view_index)
            .and_then(|&i| self.dataset.get(i));
        if let Some(record) = record {
            if !record.secondary.is_empty() {
                speech.speak(&record.secondary);
            }
        }
    }

    /// The active view is always derivable from navigation state plus the
    /// held query — nothing else survives a transition.
    fn compute_result_set(&self) -> ResultSet {
        match self.nav {
            NavState::Full => match &self.query {
                Some(q) => run_query(&self.dataset, q),
                None => self.dataset.natural_order(),
            },
            NavState::Letter(letter) => filter_by_letter(&self.dataset, letter),
            // the grid renders letters, not records
            NavState::Index => ResultSet::empty(),
        }
    }

    /// One transition, in the fixed order: chrome, new result set, reset
    /// cursor, first batch.
    fn apply_view<S: PresentationSink>(&mut self, sink: &mut S) {
        sink.set_mode(&self.nav);
        if self.nav == NavState::Index {
            sink.show_letter_index(&available_letters(&self.dataset));
            return;
        }
        let result_set = self.compute_result_set();
        sink.clear_entries();
        self.renderer.result_set_changed(result_set);
        self.render_next_batch(sink);
    }

    fn render_next_batch<S: PresentationSink>(&mut self, sink: &mut S) {
        if let Batch::Entries(range) = self.renderer.advance() {
            let term = self.query.as_ref().map(|q| q.original.clone());
            for record in self.renderer.result_set().records(&self.dataset, range) {
                sink.render_entry(&rendered_entry(record, term.as_deref()));
            }
            self.renderer.complete_advance();
        }
        sink.set_status(&self.renderer.status());
    }
}

fn highlight(text: &str, term: Option<&str>) -> Vec<Range<usize>> {
    match term {
        Some(term) => find_spans(text, term),
        None => Vec::new(),
    }
}

fn rendered_entry(record: &Record, term: Option<&str>) -> RenderedEntry {
    let word = display_word(&record.primary);
    let secondary = (!record.secondary.is_empty()).then(|| record.secondary.clone());
    let gloss = clean_gloss(record.gloss_source());
    RenderedEntry {
        id: record.id.clone(),
        word_spans: highlight(&word, term),
        secondary_spans: secondary
            .as_deref()
            .map(|s| highlight(s, term))
            .unwrap_or_default(),
        gloss_spans: highlight(&gloss, term),
        word,
        secondary,
        gloss,
    }
}

/// Holder for hosts that construct the engine after an async fetch. Every
/// interaction before the dataset arrives is rejected with one error.
#[derive(Default)]
pub struct EngineSlot {
    inner: Option<GlossaryEngine>,
}

impl EngineSlot {
    pub fn new() -> Self {
        EngineSlot { inner: None }
    }

    pub fn install(&mut self, engine: GlossaryEngine) {
        self.inner = Some(engine);
    }

    pub fn get(&self) -> Result<&GlossaryEngine> {
        self.inner.as_ref().ok_or(GlossaryError::NotLoaded)
    }

    pub fn get_mut(&mut self) -> Result<&mut GlossaryEngine> {
        self.inner.as_mut().ok_or(GlossaryError::NotLoaded)
    }
}

#[cfg(test)]
mod tests;
