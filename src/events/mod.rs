//! Transition event channel.
//!
//! Every top-level state type gets one channel. The pipeline publishes a
//! record per applied transition; independent readers each consume the
//! stream exactly once through their own cursor. Retention is double
//! buffered: a record stays readable for two maintenance calls, and the
//! most recent record survives indefinitely for on-demand inspection.

use crate::core::State;
use chrono::{DateTime, Utc};
use serde::Serialize;

/// One applied transition.
///
/// `exited` is `None` only for first initialization. For an identity
/// transition `exited` and `entered` carry equal values.
#[derive(Clone, Debug, Serialize)]
#[serde(bound(serialize = "S: Serialize"))]
pub struct TransitionRecord<S: State> {
    /// The value that was replaced, if any.
    pub exited: Option<S>,
    /// The value now live.
    pub entered: S,
    /// When the transition was applied.
    pub at: DateTime<Utc>,
}

/// Per-reader position in a channel's stream.
///
/// Cursors start at the beginning of time; a fresh cursor sees whatever
/// is still retained. Each cursor consumes each record exactly once.
#[derive(Clone, Copy, Debug, Default)]
pub struct EventCursor {
    next: usize,
}

impl EventCursor {
    /// A cursor positioned before all retained records.
    pub fn new() -> Self {
        Self::default()
    }
}

/// Double-buffered channel of [`TransitionRecord`]s for one state type.
///
/// [`update`](Self::update) is the maintenance call: records sent since
/// the previous maintenance survive exactly one more, then drop. Readers
/// that poll once per tick therefore never miss a record as long as
/// maintenance also runs once per tick.
#[derive(Debug)]
pub struct TransitionEvents<S: State> {
    back: Vec<TransitionRecord<S>>,
    front: Vec<TransitionRecord<S>>,
    /// Absolute index of `back[0]`.
    oldest: usize,
    last: Option<TransitionRecord<S>>,
}

impl<S: State> Default for TransitionEvents<S> {
    fn default() -> Self {
        Self {
            back: Vec::new(),
            front: Vec::new(),
            oldest: 0,
            last: None,
        }
    }
}

impl<S: State> TransitionEvents<S> {
    /// Create an empty channel.
    pub fn new() -> Self {
        Self::default()
    }

    /// Publish a record and remember it as the last transition.
    pub fn send(&mut self, record: TransitionRecord<S>) {
        self.last = Some(record.clone());
        self.front.push(record);
    }

    /// Drop records that have been retained for two maintenance calls and
    /// age the rest. Call once per tick.
    pub fn update(&mut self) {
        self.oldest += self.back.len();
        self.back = std::mem::take(&mut self.front);
    }

    /// The most recent record, surviving across maintenance calls.
    pub fn last(&self) -> Option<&TransitionRecord<S>> {
        self.last.as_ref()
    }

    /// Read every retained record the cursor has not yet consumed,
    /// advancing the cursor past them.
    pub fn read<'a>(
        &'a self,
        cursor: &mut EventCursor,
    ) -> impl Iterator<Item = &'a TransitionRecord<S>> + 'a {
        let total = self.oldest + self.back.len() + self.front.len();
        let start = cursor.next.clamp(self.oldest, total);
        cursor.next = total;
        self.back
            .iter()
            .chain(self.front.iter())
            .skip(start - self.oldest)
    }

    /// Number of currently retained records.
    pub fn len(&self) -> usize {
        self.back.len() + self.front.len()
    }

    /// Whether no records are retained.
    pub fn is_empty(&self) -> bool {
        self.back.is_empty() && self.front.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::StateId;
    use chrono::Utc;

    #[derive(Clone, PartialEq, Debug, Serialize)]
    enum TestState {
        Menu,
        InGame,
    }

    impl State for TestState {
        fn id(&self) -> StateId {
            match self {
                Self::Menu => StateId::name("Menu"),
                Self::InGame => StateId::name("InGame"),
            }
        }
    }

    fn record(exited: Option<TestState>, entered: TestState) -> TransitionRecord<TestState> {
        TransitionRecord {
            exited,
            entered,
            at: Utc::now(),
        }
    }

    #[test]
    fn cursor_consumes_each_record_once() {
        let mut events = TransitionEvents::new();
        let mut cursor = EventCursor::new();

        events.send(record(None, TestState::Menu));
        events.send(record(Some(TestState::Menu), TestState::InGame));

        let seen: Vec<_> = events.read(&mut cursor).map(|r| r.entered.clone()).collect();
        assert_eq!(seen, vec![TestState::Menu, TestState::InGame]);
        assert_eq!(events.read(&mut cursor).count(), 0);
    }

    #[test]
    fn independent_cursors_each_see_the_stream() {
        let mut events = TransitionEvents::new();
        let mut first = EventCursor::new();
        let mut second = EventCursor::new();

        events.send(record(None, TestState::Menu));
        assert_eq!(events.read(&mut first).count(), 1);
        assert_eq!(events.read(&mut second).count(), 1);
    }

    #[test]
    fn records_survive_one_maintenance_call() {
        let mut events = TransitionEvents::new();
        let mut cursor = EventCursor::new();

        events.send(record(None, TestState::Menu));
        events.update();

        let seen: Vec<_> = events.read(&mut cursor).map(|r| r.entered.clone()).collect();
        assert_eq!(seen, vec![TestState::Menu]);
    }

    #[test]
    fn records_drop_after_two_maintenance_calls() {
        let mut events = TransitionEvents::new();
        let mut cursor = EventCursor::new();

        events.send(record(None, TestState::Menu));
        events.update();
        events.update();

        assert_eq!(events.read(&mut cursor).count(), 0);
        assert!(events.is_empty());
    }

    #[test]
    fn late_cursor_skips_dropped_records() {
        let mut events = TransitionEvents::new();

        events.send(record(None, TestState::Menu));
        events.update();
        events.update();
        events.send(record(Some(TestState::Menu), TestState::InGame));

        let mut cursor = EventCursor::new();
        let seen: Vec<_> = events.read(&mut cursor).map(|r| r.entered.clone()).collect();
        assert_eq!(seen, vec![TestState::InGame]);
    }

    #[test]
    fn last_survives_maintenance() {
        let mut events = TransitionEvents::new();
        events.send(record(None, TestState::Menu));
        events.update();
        events.update();
        events.update();

        assert_eq!(events.last().unwrap().entered, TestState::Menu);
    }

    #[test]
    fn empty_channel_has_no_last() {
        let events: TransitionEvents<TestState> = TransitionEvents::new();
        assert!(events.last().is_none());
        assert_eq!(events.len(), 0);
    }

    #[test]
    fn record_serializes_for_export() {
        let rec = record(Some(TestState::Menu), TestState::InGame);
        let json = serde_json::to_string(&rec).unwrap();
        assert!(json.contains("Menu"));
        assert!(json.contains("InGame"));
    }
}
