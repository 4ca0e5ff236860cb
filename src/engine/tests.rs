use proptest::prelude::*;

use super::*;
use crate::config::EngineConfig;
use crate::dataset::Dataset;
use crate::nav::{parse_fragment, HistoryEntry, NavState};
use crate::render::{RenderStatus, ScrollMetrics};

#[derive(Default)]
struct TestSink {
    mode: Option<NavState>,
    entries: Vec<RenderedEntry>,
    status: Option<RenderStatus>,
    letters: Vec<char>,
    search_text: Option<String>,
    clear_count: usize,
}

impl PresentationSink for TestSink {
    fn set_mode(&mut self, state: &NavState) {
        self.mode = Some(*state);
    }
    fn clear_entries(&mut self) {
        self.entries.clear();
        self.clear_count += 1;
    }
    fn render_entry(&mut self, entry: &RenderedEntry) {
        self.entries.push(entry.clone());
    }
    fn set_status(&mut self, status: &RenderStatus) {
        self.status = Some(status.clone());
    }
    fn show_letter_index(&mut self, letters: &[char]) {
        self.letters = letters.to_vec();
    }
    fn set_search_text(&mut self, text: &str) {
        self.search_text = Some(text.to_string());
    }
}

impl TestSink {
    fn ids(&self) -> Vec<&str> {
        self.entries.iter().map(|e| e.id.as_str()).collect()
    }
}

#[derive(Debug, PartialEq, Clone)]
enum HistoryOp {
    Push(HistoryEntry, Option<String>),
    Replace(HistoryEntry, Option<String>),
}

#[derive(Default)]
struct TestHistory {
    ops: Vec<HistoryOp>,
}

impl HistoryAdapter for TestHistory {
    fn push(&mut self, entry: &HistoryEntry, fragment: Option<&str>) {
        self.ops
            .push(HistoryOp::Push(*entry, fragment.map(str::to_string)));
    }
    fn replace(&mut self, entry: &HistoryEntry, fragment: Option<&str>) {
        self.ops
            .push(HistoryOp::Replace(*entry, fragment.map(str::to_string)));
    }
}

#[derive(Default)]
struct TestSpeech {
    spoken: Vec<String>,
}

impl SpeechSynth for TestSpeech {
    fn speak(&mut self, text: &str) {
        self.spoken.push(text.to_string());
    }
}

fn small_dataset() -> Dataset {
    Dataset::from_json_str(
        r#"{
            "A": {"dId": "ᤀla", "desc": "la", "mean": "moon"},
            "B": {"dId": "ᤁma", "desc": "dog"}
        }"#,
    )
    .unwrap()
}

fn engine(dataset: Dataset) -> GlossaryEngine {
    GlossaryEngine::new(dataset, EngineConfig::default())
}

fn started(dataset: Dataset) -> (GlossaryEngine, TestSink, TestHistory) {
    let mut e = engine(dataset);
    let mut sink = TestSink::default();
    let mut history = TestHistory::default();
    e.start("", &mut sink, &mut history);
    (e, sink, history)
}

/// Run one debounced search to completion.
fn search(
    e: &mut GlossaryEngine,
    sink: &mut TestSink,
    history: &mut TestHistory,
    term: &str,
    now_ms: u64,
) {
    e.search_input(term, now_ms);
    assert!(e.tick(now_ms + 300, sink, history));
}

#[test]
fn test_worked_example() {
    let (mut e, mut sink, mut history) = started(small_dataset());
    assert_eq!(sink.ids(), ["A", "B"]);
    assert_eq!(
        sink.status.as_ref().unwrap().to_string(),
        "End of list. Total entries: 2"
    );

    search(&mut e, &mut sink, &mut history, "dog", 0);
    assert_eq!(sink.ids(), ["B"]);

    e.pick_letter('ᤁ', &mut sink, &mut history);
    assert_eq!(sink.ids(), ["B"]);
}

#[test]
fn test_debounce_coalesces_input() {
    let (mut e, mut sink, mut history) = started(small_dataset());
    e.search_input("d", 0);
    e.search_input("do", 100);
    e.search_input("dog", 200);
    // quiet period not over yet
    assert!(!e.tick(400, &mut sink, &mut history));
    assert_eq!(sink.ids(), ["A", "B"]);
    // fires once, with the latest term
    assert!(e.tick(500, &mut sink, &mut history));
    assert_eq!(sink.ids(), ["B"]);
    assert!(!e.tick(900, &mut sink, &mut history));
}

#[test]
fn test_letter_pick_pushes_history() {
    let (mut e, mut sink, mut history) = started(small_dataset());
    history.ops.clear();
    e.pick_letter('ᤀ', &mut sink, &mut history);
    assert_eq!(
        history.ops,
        vec![HistoryOp::Push(
            HistoryEntry::Letter { letter: 'ᤀ' },
            Some("#letter-ᤀ".to_string())
        )]
    );
    assert_eq!(e.nav(), NavState::Letter('ᤀ'));
    assert_eq!(sink.ids(), ["A"]);
}

#[test]
fn test_absent_letter_is_empty_view() {
    let (mut e, mut sink, mut history) = started(small_dataset());
    e.pick_letter('ᤜ', &mut sink, &mut history);
    assert!(sink.entries.is_empty());
    assert_eq!(
        sink.status.as_ref().unwrap(),
        &RenderStatus::EndOfList { total: 0 }
    );
}

#[test]
fn test_index_toggle_shows_letters() {
    let (mut e, mut sink, mut history) = started(small_dataset());
    assert_eq!(
        e.toggle_index_view(&mut sink, &mut history),
        IndexToggle::Entered
    );
    assert_eq!(e.nav(), NavState::Index);
    assert_eq!(sink.letters, vec!['ᤀ', 'ᤁ']);
    // toggling again asks the host to go back instead of pushing
    assert_eq!(
        e.toggle_index_view(&mut sink, &mut history),
        IndexToggle::RequestBack
    );
}

#[test]
fn test_replay_to_full_resets_search_box() {
    let (mut e, mut sink, mut history) = started(small_dataset());
    search(&mut e, &mut sink, &mut history, "dog", 0);
    e.toggle_index_view(&mut sink, &mut history);

    // browser back to the initial entry
    e.replay_history(Some(HistoryEntry::Main), &mut sink, &mut history);
    assert_eq!(e.nav(), NavState::Full);
    assert_eq!(sink.search_text.as_deref(), Some(""));
    // the stale term no longer filters anything
    assert_eq!(sink.ids(), ["A", "B"]);
}

#[test]
fn test_replay_unknown_entry_is_full() {
    let (mut e, mut sink, mut history) = started(small_dataset());
    e.pick_letter('ᤁ', &mut sink, &mut history);
    e.replay_history(None, &mut sink, &mut history);
    assert_eq!(e.nav(), NavState::Full);
    assert_eq!(sink.ids(), ["A", "B"]);
}

#[test]
fn test_search_from_index_pushes_full_entry() {
    let (mut e, mut sink, mut history) = started(small_dataset());
    e.toggle_index_view(&mut sink, &mut history);
    history.ops.clear();
    search(&mut e, &mut sink, &mut history, "dog", 0);
    assert_eq!(e.nav(), NavState::Full);
    assert_eq!(history.ops, vec![HistoryOp::Push(HistoryEntry::Main, None)]);
    assert_eq!(sink.ids(), ["B"]);
}

#[test]
fn test_clear_in_letter_restores_all_policy() {
    // default policy: clearing the box leaves letter mode
    let (mut e, mut sink, mut history) = started(small_dataset());
    e.pick_letter('ᤁ', &mut sink, &mut history);
    search(&mut e, &mut sink, &mut history, "", 0);
    assert_eq!(e.nav(), NavState::Full);
    assert_eq!(sink.ids(), ["A", "B"]);

    // strict policy: the letter filter stays
    let mut cfg = EngineConfig::default();
    cfg.search.clear_in_letter_restores_all = false;
    let mut e = GlossaryEngine::new(small_dataset(), cfg);
    let mut sink = TestSink::default();
    let mut history = TestHistory::default();
    e.start("", &mut sink, &mut history);
    e.pick_letter('ᤁ', &mut sink, &mut history);
    search(&mut e, &mut sink, &mut history, "", 0);
    assert_eq!(e.nav(), NavState::Letter('ᤁ'));
    assert_eq!(sink.ids(), ["B"]);
}

#[test]
fn test_min_query_len_policy() {
    let mut cfg = EngineConfig::default();
    cfg.search.min_query_len = 2;
    let mut e = GlossaryEngine::new(small_dataset(), cfg);
    let mut sink = TestSink::default();
    let mut history = TestHistory::default();
    e.start("", &mut sink, &mut history);
    // one char: below the minimum, full list unchanged
    search(&mut e, &mut sink, &mut history, "d", 0);
    assert_eq!(sink.ids(), ["A", "B"]);
    search(&mut e, &mut sink, &mut history, "do", 1000);
    assert_eq!(sink.ids(), ["B"]);
}

fn large_dataset(n: usize) -> Dataset {
    let mut entries = Vec::new();
    for i in 0..n {
        entries.push(format!(r#""r{i:04}": {{"dId": "ᤁw{i}"}}"#));
    }
    Dataset::from_json_str(&format!("{{{}}}", entries.join(","))).unwrap()
}

#[test]
fn test_scroll_driven_pagination_exhausts_once() {
    let (mut e, mut sink, _history) = started(large_dataset(250));
    assert_eq!(sink.entries.len(), 100);

    let near_bottom = ScrollMetrics {
        content_height: 10_000.0,
        viewport_height: 800.0,
        scroll_top: 8_500.0,
    };
    e.scroll(near_bottom, &mut sink);
    assert_eq!(sink.entries.len(), 200);
    e.scroll(near_bottom, &mut sink);
    assert_eq!(sink.entries.len(), 250);
    assert_eq!(
        sink.status.as_ref().unwrap(),
        &RenderStatus::EndOfList { total: 250 }
    );
    // exhausted: further scrolls change nothing
    e.scroll(near_bottom, &mut sink);
    assert_eq!(sink.entries.len(), 250);

    // each record appeared exactly once, in view order
    let mut seen = sink.ids();
    let deduped_len = {
        seen.dedup();
        seen.len()
    };
    assert_eq!(deduped_len, 250);
}

#[test]
fn test_scroll_threshold_comes_from_config() {
    let mut cfg = EngineConfig::default();
    cfg.render.scroll_threshold = 10.0;
    let mut e = GlossaryEngine::new(large_dataset(250), cfg);
    let mut sink = TestSink::default();
    let mut history = TestHistory::default();
    e.start("", &mut sink, &mut history);
    assert_eq!(sink.entries.len(), 100);

    // 400 units from the bottom: within the default threshold but not
    // the configured one, so no batch renders
    let outside = ScrollMetrics {
        content_height: 10_000.0,
        viewport_height: 800.0,
        scroll_top: 8_800.0,
    };
    e.scroll(outside, &mut sink);
    assert_eq!(sink.entries.len(), 100);

    let inside = ScrollMetrics {
        content_height: 10_000.0,
        viewport_height: 800.0,
        scroll_top: 9_195.0,
    };
    e.scroll(inside, &mut sink);
    assert_eq!(sink.entries.len(), 200);
}

#[test]
fn test_scroll_far_from_bottom_does_nothing() {
    let (mut e, mut sink, _history) = started(large_dataset(250));
    let far = ScrollMetrics {
        content_height: 10_000.0,
        viewport_height: 800.0,
        scroll_top: 0.0,
    };
    e.scroll(far, &mut sink);
    assert_eq!(sink.entries.len(), 100);
}

#[test]
fn test_rendered_entry_placeholder_and_gloss() {
    let ds = Dataset::from_json_str(
        r#"{"A": {"desc": "la", "mean": "<p>first</p><p>second</p>"}}"#,
    )
    .unwrap();
    let (_e, sink, _h) = started(ds);
    let entry = &sink.entries[0];
    assert_eq!(entry.word, "Word Missing");
    assert_eq!(entry.gloss, "first\nsecond");
    assert_eq!(entry.secondary.as_deref(), Some("la"));
}

#[test]
fn test_highlight_spans_only_with_active_term() {
    let (mut e, mut sink, mut history) = started(small_dataset());
    assert!(sink.entries.iter().all(|en| en.gloss_spans.is_empty()));
    search(&mut e, &mut sink, &mut history, "dog", 0);
    let entry = &sink.entries[0];
    assert_eq!(entry.secondary.as_deref(), Some("dog"));
    assert_eq!(entry.secondary_spans, vec![0..3]);
}

#[test]
fn test_speak_uses_secondary_field() {
    let (e, _sink, _h) = started(small_dataset());
    let mut speech = TestSpeech::default();
    e.speak_entry(0, &mut speech);
    assert_eq!(speech.spoken, vec!["la"]);
    // out of range is silent
    e.speak_entry(99, &mut speech);
    assert_eq!(speech.spoken.len(), 1);
}

#[test]
fn test_engine_slot_rejects_before_load() {
    let mut slot = EngineSlot::new();
    assert!(matches!(slot.get_mut(), Err(GlossaryError::NotLoaded)));
    slot.install(engine(small_dataset()));
    assert!(slot.get_mut().is_ok());
}

#[test]
fn test_fragment_entry_equals_ui_path() {
    // reach Letter(ᤁ) through the UI
    let (mut via_ui, mut ui_sink, mut ui_history) = started(small_dataset());
    via_ui.pick_letter('ᤁ', &mut ui_sink, &mut ui_history);

    // reach it from a shared URL
    let mut via_url = engine(small_dataset());
    let mut url_sink = TestSink::default();
    let mut url_history = TestHistory::default();
    via_url.start("#letter-ᤁ", &mut url_sink, &mut url_history);

    assert_eq!(via_ui.nav(), via_url.nav());
    assert_eq!(ui_sink.ids(), url_sink.ids());
    assert_eq!(via_ui.cursor(), via_url.cursor());
    // direct entry replaces instead of pushing
    assert_eq!(
        url_history.ops,
        vec![HistoryOp::Replace(
            HistoryEntry::Letter { letter: 'ᤁ' },
            Some("#letter-ᤁ".to_string())
        )]
    );
}

// ---------------------------------------------------------------------------
// Round-trip navigation property
// ---------------------------------------------------------------------------

fn nav_state_strategy() -> impl Strategy<Value = NavState> {
    prop_oneof![
        Just(NavState::Full),
        prop::sample::select(&crate::unicode::LIMBU_ALPHABET[..]).prop_map(NavState::Letter),
        Just(NavState::Index),
    ]
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(64))]

    /// Serializing any reachable state to a history entry or fragment and
    /// replaying it reconstructs the same view and a reset cursor.
    #[test]
    fn prop_round_trip_navigation(state in nav_state_strategy()) {
        // via history entry replay
        let (mut replayed, mut sink_a, mut history_a) = started(small_dataset());
        let json = state.to_entry().to_json();
        replayed.replay_history(HistoryEntry::from_json(&json), &mut sink_a, &mut history_a);
        prop_assert_eq!(replayed.nav(), state);

        // via URL fragment
        let mut from_url = engine(small_dataset());
        let mut sink_b = TestSink::default();
        let mut history_b = TestHistory::default();
        let fragment = state.fragment().unwrap_or_default();
        prop_assert_eq!(parse_fragment(&fragment), state);
        from_url.start(&fragment, &mut sink_b, &mut history_b);

        prop_assert_eq!(replayed.nav(), from_url.nav());
        prop_assert_eq!(sink_a.ids(), sink_b.ids());
        prop_assert_eq!(sink_a.letters, sink_b.letters);
        prop_assert_eq!(replayed.cursor(), from_url.cursor());
    }
}
