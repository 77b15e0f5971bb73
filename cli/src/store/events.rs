//! Change notifications recorded by the stores and drained by the studio.

use std::collections::VecDeque;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StoreEvent {
    /// The active brand profile was set or cleared.
    ActiveProfileChanged(Option<String>),
    ProfileUpdated(String),
    ProfileDeleted(String),
    ActiveThemeChanged(Option<String>),
    ThemeUpdated(String),
    ThemeDeleted(String),
    /// Editor styles, preset or adjustments changed.
    EditorChanged,
    ModeChanged,
}

#[derive(Debug, Default)]
pub struct ChangeQueue {
    events: VecDeque<StoreEvent>,
}

impl ChangeQueue {
    pub fn push(&mut self, event: StoreEvent) {
        self.events.push_back(event);
    }

    pub fn drain(&mut self) -> Vec<StoreEvent> {
        self.events.drain(..).collect()
    }
}
