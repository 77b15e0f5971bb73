//! The theme editor's working state with bounded undo/redo history.
//!
//! Rapid successive edits are coalesced: a new history entry is only recorded
//! when the previous one is at least [`HISTORY_COALESCE_MS`] old. Mode
//! switches never enter the history.
//!
//! HSL adjustments are applied to the un-adjusted styles of whatever was last
//! loaded or edited, so repeated adjustments never compound.

use std::collections::VecDeque;
use std::sync::Arc;

use chrono::{DateTime, Utc};
use swatch_storage::{keys, load_json, save_json, KeyValueStore};
use swatch_theme::{
    canonical_json, resolve_preset_styles, HslAdjustments, Mode, StyleKey, ThemeEditorState,
    ThemeStyles,
};

use super::clock::Clock;
use super::events::{ChangeQueue, StoreEvent};

pub const MAX_HISTORY_COUNT: usize = 30;
pub const HISTORY_COALESCE_MS: i64 = 500;

#[derive(Debug, Clone, PartialEq)]
pub struct HistoryEntry {
    pub state: ThemeEditorState,
    pub timestamp: DateTime<Utc>,
    /// Styles the entry's HSL adjustments were computed from.
    hsl_base: Option<ThemeStyles>,
}

pub struct EditorStore {
    state: ThemeEditorState,
    checkpoint: Option<ThemeEditorState>,
    checkpoint_base: Option<ThemeStyles>,
    // Un-adjusted styles behind the current state; `None` when the current
    // styles are themselves the base.
    hsl_base: Option<ThemeStyles>,
    history: VecDeque<HistoryEntry>,
    future: VecDeque<HistoryEntry>,
    storage: Arc<dyn KeyValueStore>,
    clock: Arc<dyn Clock>,
    events: ChangeQueue,
}

fn same(a: &ThemeEditorState, b: &ThemeEditorState) -> bool {
    canonical_json(a) == canonical_json(b)
}

impl EditorStore {
    /// Loads the persisted editor state, or starts from `fallback`.
    pub fn load(
        storage: Arc<dyn KeyValueStore>,
        clock: Arc<dyn Clock>,
        fallback: ThemeEditorState,
    ) -> Self {
        let state = match load_json::<ThemeEditorState>(storage.as_ref(), keys::EDITOR_STATE) {
            Ok(Some(state)) => {
                tracing::debug!(preset = ?state.preset, mode = %state.current_mode, "Loaded editor state");
                state
            }
            Ok(None) => fallback,
            Err(e) => {
                tracing::error!(error = %e, "Failed to load editor state, using defaults");
                fallback
            }
        };

        Self {
            state,
            checkpoint: None,
            checkpoint_base: None,
            hsl_base: None,
            history: VecDeque::new(),
            future: VecDeque::new(),
            storage,
            clock,
            events: ChangeQueue::default(),
        }
    }

    pub fn state(&self) -> &ThemeEditorState {
        &self.state
    }

    pub fn current_mode(&self) -> Mode {
        self.state.current_mode
    }

    pub fn current_styles(&self) -> &ThemeStyles {
        &self.state.styles
    }

    pub fn current_preset(&self) -> Option<&str> {
        self.state.preset.as_deref()
    }

    pub fn checkpoint(&self) -> Option<&ThemeEditorState> {
        self.checkpoint.as_ref()
    }

    pub fn history(&self) -> impl Iterator<Item = &HistoryEntry> {
        self.history.iter()
    }

    pub fn history_len(&self) -> usize {
        self.history.len()
    }

    pub fn future_len(&self) -> usize {
        self.future.len()
    }

    pub fn can_undo(&self) -> bool {
        !self.history.is_empty()
    }

    pub fn can_redo(&self) -> bool {
        !self.future.is_empty()
    }

    /// Styles of `preset` merged over the defaults; unknown presets and
    /// `"default"` resolve to the defaults.
    pub fn preset_styles(&self, preset: Option<&str>) -> ThemeStyles {
        resolve_preset_styles(preset)
    }

    /// Replaces the working state, recording history unless the change is
    /// mode-only or coalesced with a recent edit.
    pub fn set_theme_state(&mut self, new_state: ThemeEditorState) {
        if self.state.differs_only_in_mode(&new_state) {
            self.state = new_state;
            self.events.push(StoreEvent::ModeChanged);
            self.persist();
            return;
        }

        if same(&self.state, &new_state) {
            return;
        }

        let now = self.clock.now();
        let record = self
            .history
            .back()
            .map_or(true, |last| {
                (now - last.timestamp).num_milliseconds() >= HISTORY_COALESCE_MS
            });

        if record {
            self.push_history(now);
        } else {
            tracing::trace!("Coalescing editor change into previous history entry");
        }
        self.future.clear();

        if self.state.current_mode != new_state.current_mode {
            self.events.push(StoreEvent::ModeChanged);
        }
        self.state = new_state;
        self.hsl_base = None;
        self.events.push(StoreEvent::EditorChanged);
        self.persist();
    }

    /// Styles the current HSL adjustments were computed from.
    pub fn unadjusted_styles(&self) -> &ThemeStyles {
        self.hsl_base.as_ref().unwrap_or(&self.state.styles)
    }

    /// Sets one style value for one mode.
    pub fn set_style(&mut self, mode: Mode, key: StyleKey, value: impl Into<String>) {
        let mut next = self.state.clone();
        next.styles.get_mut(mode).set(key, value);
        self.set_theme_state(next);
    }

    /// Recomputes the styles from the un-adjusted base with `adjustments`
    /// applied to every color.
    pub fn set_hsl_adjustments(&mut self, adjustments: HslAdjustments) {
        let base = self.unadjusted_styles().clone();
        let mut next = self.state.clone();
        next.styles = adjustments.apply(&base);
        next.hsl_adjustments = Some(adjustments);
        self.set_theme_state(next);
        self.hsl_base = Some(base);
    }

    /// Loads a preset. Always records history and sets the checkpoint.
    pub fn apply_preset(&mut self, preset: &str) {
        let now = self.clock.now();
        let next = ThemeEditorState {
            preset: Some(preset.to_string()),
            styles: self.preset_styles(Some(preset)),
            current_mode: self.state.current_mode,
            hsl_adjustments: Some(HslAdjustments::IDENTITY),
        };

        self.push_history(now);
        self.future.clear();
        self.checkpoint = Some(next.clone());
        self.checkpoint_base = None;
        self.state = next;
        self.hsl_base = None;
        self.events.push(StoreEvent::EditorChanged);
        self.persist();
        tracing::debug!(preset, "Applied preset to editor");
    }

    pub fn save_checkpoint(&mut self) {
        self.checkpoint = Some(self.state.clone());
        self.checkpoint_base = self.hsl_base.clone();
    }

    pub fn restore_checkpoint(&mut self) {
        let Some(checkpoint) = self.checkpoint.clone() else {
            tracing::warn!("No theme checkpoint available to restore to");
            return;
        };

        let now = self.clock.now();
        self.push_history(now);
        self.future.clear();
        self.state = checkpoint.with_mode(self.state.current_mode);
        self.hsl_base = self.checkpoint_base.clone();
        self.events.push(StoreEvent::EditorChanged);
        self.persist();
    }

    /// True when there is no checkpoint or the state differs from it.
    pub fn has_changed_from_checkpoint(&self) -> bool {
        self.checkpoint
            .as_ref()
            .map_or(true, |checkpoint| !same(&self.state, checkpoint))
    }

    /// Whether the styles or adjustments drifted from the current preset.
    pub fn has_unsaved_changes(&self) -> bool {
        let preset_styles = self.preset_styles(self.state.preset.as_deref());
        let styles_changed = canonical_json(&self.state.styles) != canonical_json(&preset_styles);
        let hsl_changed = !self
            .state
            .hsl_adjustments
            .unwrap_or(HslAdjustments::IDENTITY)
            .is_identity();
        styles_changed || hsl_changed
    }

    /// Drops all edits and history and returns to the current preset.
    pub fn reset_to_current_preset(&mut self) {
        let mut next = self.state.clone();
        next.styles = self.preset_styles(self.state.preset.as_deref());
        next.hsl_adjustments = Some(HslAdjustments::IDENTITY);

        self.checkpoint = Some(next.clone());
        self.checkpoint_base = None;
        self.history.clear();
        self.future.clear();
        self.state = next;
        self.hsl_base = None;
        self.events.push(StoreEvent::EditorChanged);
        self.persist();
    }

    pub fn undo(&mut self) {
        let Some(entry) = self.history.pop_back() else {
            return;
        };

        let now = self.clock.now();
        self.future.push_front(HistoryEntry {
            state: self.state.clone(),
            timestamp: now,
            hsl_base: self.hsl_base.take(),
        });
        self.restore_entry(entry);
        self.events.push(StoreEvent::EditorChanged);
        self.persist();
    }

    pub fn redo(&mut self) {
        let Some(entry) = self.future.pop_front() else {
            return;
        };

        let now = self.clock.now();
        self.push_history(now);
        self.restore_entry(entry);
        self.events.push(StoreEvent::EditorChanged);
        self.persist();
    }

    pub fn toggle_mode(&mut self) {
        self.set_mode(self.state.current_mode.toggled());
    }

    pub fn set_mode(&mut self, mode: Mode) {
        if self.state.current_mode == mode {
            return;
        }
        self.state.current_mode = mode;
        self.events.push(StoreEvent::ModeChanged);
        self.persist();
    }

    pub fn take_events(&mut self) -> Vec<StoreEvent> {
        self.events.drain()
    }

    /// Makes `entry` current, keeping the mode, and checkpoints it.
    fn restore_entry(&mut self, entry: HistoryEntry) {
        self.state = entry.state.clone().with_mode(self.state.current_mode);
        self.hsl_base = entry.hsl_base.clone();
        self.checkpoint = Some(entry.state);
        self.checkpoint_base = entry.hsl_base;
    }

    fn push_history(&mut self, timestamp: DateTime<Utc>) {
        self.history.push_back(HistoryEntry {
            state: self.state.clone(),
            timestamp,
            hsl_base: self.hsl_base.clone(),
        });
        while self.history.len() > MAX_HISTORY_COUNT {
            self.history.pop_front();
        }
    }

    fn persist(&self) {
        if let Err(e) = save_json(self.storage.as_ref(), keys::EDITOR_STATE, &self.state) {
            tracing::error!(error = %e, "Failed to persist editor state");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::clock::ManualClock;
    use crate::store::testing::FailingStore;
    use chrono::Duration;
    use pretty_assertions::assert_eq;
    use swatch_storage::MemoryStore;
    use swatch_theme::{default_editor_state, DEFAULT_PRESET};

    fn setup() -> (EditorStore, ManualClock, Arc<MemoryStore>) {
        let storage = Arc::new(MemoryStore::new());
        let clock = ManualClock::new(Utc::now());
        let store = EditorStore::load(
            storage.clone(),
            Arc::new(clock.clone()),
            default_editor_state(),
        );
        (store, clock, storage)
    }

    fn edited(store: &EditorStore, value: &str) -> ThemeEditorState {
        let mut next = store.state().clone();
        next.styles.light.set(StyleKey::Primary, value);
        next
    }

    #[test]
    fn test_rapid_edits_coalesce() {
        let (mut store, clock, _) = setup();
        store.set_theme_state(edited(&store, "#111111"));
        clock.advance(Duration::milliseconds(100));
        store.set_theme_state(edited(&store, "#222222"));
        clock.advance(Duration::milliseconds(100));
        store.set_theme_state(edited(&store, "#333333"));
        assert_eq!(store.history_len(), 1);
        assert_eq!(
            store.current_styles().light.get(StyleKey::Primary),
            Some("#333333")
        );
    }

    #[test]
    fn test_spaced_edits_record_separately() {
        let (mut store, clock, _) = setup();
        store.set_theme_state(edited(&store, "#111111"));
        clock.advance(Duration::milliseconds(500));
        store.set_theme_state(edited(&store, "#222222"));
        assert_eq!(store.history_len(), 2);
    }

    #[test]
    fn test_history_is_bounded() {
        let (mut store, clock, _) = setup();
        for i in 0..35 {
            clock.advance(Duration::seconds(1));
            store.set_theme_state(edited(&store, &format!("#0000{:02}", i)));
        }
        assert_eq!(store.history_len(), MAX_HISTORY_COUNT);
        // the five oldest entries were evicted
        let oldest = store.history().next().unwrap();
        assert_eq!(oldest.state.styles.light.get(StyleKey::Primary), Some("#000004"));
    }

    #[test]
    fn test_mode_only_change_skips_history() {
        let (mut store, _, _) = setup();
        let dark = store.state().clone().with_mode(Mode::Dark);
        store.set_theme_state(dark);
        assert_eq!(store.current_mode(), Mode::Dark);
        assert_eq!(store.history_len(), 0);
        assert_eq!(store.take_events(), vec![StoreEvent::ModeChanged]);
    }

    #[test]
    fn test_identical_state_is_noop() {
        let (mut store, _, _) = setup();
        store.set_theme_state(store.state().clone());
        assert_eq!(store.history_len(), 0);
        assert!(store.take_events().is_empty());
    }

    #[test]
    fn test_undo_redo_keep_current_mode() {
        let (mut store, clock, _) = setup();
        let original = store.state().clone();
        store.set_theme_state(edited(&store, "#abcdef"));
        let after_edit = store.state().clone();
        clock.advance(Duration::seconds(1));

        store.toggle_mode();
        store.undo();
        assert_eq!(store.state(), &original.clone().with_mode(Mode::Dark));
        assert_eq!(store.checkpoint(), Some(&original));
        assert!(store.can_redo());

        store.redo();
        assert_eq!(store.state(), &after_edit.with_mode(Mode::Dark));
        assert!(!store.can_redo());
        assert!(store.can_undo());
    }

    #[test]
    fn test_undo_on_empty_history_is_noop() {
        let (mut store, _, _) = setup();
        let before = store.state().clone();
        store.undo();
        store.redo();
        assert_eq!(store.state(), &before);
    }

    #[test]
    fn test_coalesced_edit_still_clears_future() {
        let (mut store, clock, _) = setup();
        store.set_theme_state(edited(&store, "#111111"));
        clock.advance(Duration::seconds(1));
        store.set_theme_state(edited(&store, "#222222"));
        store.undo();
        assert!(store.can_redo());

        store.set_theme_state(edited(&store, "#333333"));
        assert!(!store.can_redo());
    }

    #[test]
    fn test_apply_preset_records_and_checkpoints() {
        let (mut store, _, _) = setup();
        store.set_theme_state(edited(&store, "#111111"));
        store.apply_preset("ocean-breeze");
        // within the coalescing window, but presets always record
        assert_eq!(store.history_len(), 2);
        assert_eq!(store.current_preset(), Some("ocean-breeze"));
        assert!(!store.has_changed_from_checkpoint());
        assert!(!store.has_unsaved_changes());
    }

    #[test]
    fn test_checkpoint_restore() {
        let (mut store, clock, _) = setup();
        assert!(store.has_changed_from_checkpoint());
        store.restore_checkpoint();
        assert_eq!(store.history_len(), 0);

        store.save_checkpoint();
        let saved = store.state().clone();
        clock.advance(Duration::seconds(1));
        store.set_theme_state(edited(&store, "#123123"));
        assert!(store.has_changed_from_checkpoint());

        store.set_mode(Mode::Dark);
        store.restore_checkpoint();
        assert_eq!(store.state(), &saved.with_mode(Mode::Dark));
        assert_eq!(store.history_len(), 2);
    }

    #[test]
    fn test_unsaved_changes_and_reset() {
        let (mut store, _, _) = setup();
        store.apply_preset(DEFAULT_PRESET);
        assert!(!store.has_unsaved_changes());

        store.set_style(Mode::Dark, StyleKey::Radius, "0rem");
        assert!(store.has_unsaved_changes());

        store.reset_to_current_preset();
        assert!(!store.has_unsaved_changes());
        assert!(!store.can_undo());
        assert!(!store.can_redo());
    }

    #[test]
    fn test_hsl_adjustments_are_unsaved_changes() {
        let (mut store, _, _) = setup();
        store.apply_preset("toolkit");
        store.set_hsl_adjustments(HslAdjustments {
            hue_shift: 30.0,
            ..HslAdjustments::IDENTITY
        });
        assert!(store.has_unsaved_changes());
        assert_ne!(
            store.current_styles().light.get(StyleKey::Primary),
            Some("#2563eb")
        );
    }

    #[test]
    fn test_hsl_adjustments_start_from_loaded_styles() {
        let (mut store, clock, _) = setup();
        let mut loaded = store.state().clone();
        loaded.preset = Some("theme-custom".into());
        loaded.styles.light.set(StyleKey::Primary, "#00ff00");
        store.set_theme_state(loaded.clone());
        clock.advance(Duration::seconds(1));

        let shift = |hue_shift| HslAdjustments {
            hue_shift,
            ..HslAdjustments::IDENTITY
        };
        store.set_hsl_adjustments(shift(10.0));
        assert_eq!(
            store.current_styles().light.get(StyleKey::Primary),
            Some("hsl(130 100% 50%)")
        );

        // a second adjustment replaces the first rather than stacking on it
        clock.advance(Duration::seconds(1));
        store.set_hsl_adjustments(shift(20.0));
        assert_eq!(
            store.current_styles().light.get(StyleKey::Primary),
            Some("hsl(140 100% 50%)")
        );
        assert_eq!(store.unadjusted_styles(), &loaded.styles);

        store.set_hsl_adjustments(HslAdjustments::IDENTITY);
        assert_eq!(store.current_styles(), &loaded.styles);
    }

    #[test]
    fn test_undo_restores_hsl_base() {
        let (mut store, clock, _) = setup();
        store.set_style(Mode::Light, StyleKey::Primary, "#ff0000");
        let base = store.current_styles().clone();
        clock.advance(Duration::seconds(1));
        store.set_hsl_adjustments(HslAdjustments {
            hue_shift: 10.0,
            ..HslAdjustments::IDENTITY
        });
        clock.advance(Duration::seconds(1));
        store.set_style(Mode::Dark, StyleKey::Radius, "0rem");
        assert_eq!(store.unadjusted_styles(), store.current_styles());

        store.undo();
        assert_eq!(store.unadjusted_styles(), &base);
        store.redo();
        assert_eq!(store.unadjusted_styles(), store.current_styles());
    }

    #[test]
    fn test_state_persists_across_loads() {
        let (mut store, _, storage) = setup();
        store.apply_preset("amber-minimal");
        store.set_mode(Mode::Dark);

        let reloaded = EditorStore::load(
            storage,
            Arc::new(ManualClock::new(Utc::now())),
            default_editor_state(),
        );
        assert_eq!(reloaded.state(), store.state());
        assert!(!reloaded.can_undo());
    }

    #[test]
    fn test_storage_failure_keeps_memory_state() {
        let mut store = EditorStore::load(
            Arc::new(FailingStore),
            Arc::new(ManualClock::new(Utc::now())),
            default_editor_state(),
        );
        store.apply_preset("toolkit");
        assert_eq!(store.current_preset(), Some("toolkit"));
    }
}
