//! Double-buffered state storage: the live cell and the pending slot.
//!
//! Decoupling "request" from "apply" lets many systems request a transition
//! within one tick while the pipeline guarantees a single, ordered
//! application between ticks.

use super::state::{MutableState, State};
use log::debug;

/// Holds the live value of one state type.
///
/// At most one cell exists per state type per world; the type-keyed
/// resource store guarantees this structurally. The cell is mutated only
/// by the transition pipeline (top-level states) or by the owning resolver
/// or gate (derived and nested states) -- its in-place mutator is
/// crate-private. Caller code replaces it only wholesale through the
/// administrative override on the world.
///
/// # Example
///
/// ```rust
/// use statecraft::core::{State, StateCell, StateId};
///
/// #[derive(Clone, PartialEq, Debug)]
/// struct Score(u32);
///
/// impl State for Score {
///     fn id(&self) -> StateId {
///         StateId::name("Score")
///     }
/// }
///
/// let cell = StateCell::new(Score(0));
/// assert_eq!(cell.current(), &Score(0));
/// ```
#[derive(Clone, Debug)]
pub struct StateCell<S: State> {
    current: S,
}

impl<S: State> StateCell<S> {
    /// Create a cell holding `value`.
    pub fn new(value: S) -> Self {
        Self { current: value }
    }

    /// The live value.
    ///
    /// Readers within a tick always see either the pre- or post-transition
    /// value, never a mix: all writes happen synchronously between reads.
    pub fn current(&self) -> &S {
        &self.current
    }

    /// Replace the live value, returning the previous one.
    pub(crate) fn replace(&mut self, value: S) -> S {
        std::mem::replace(&mut self.current, value)
    }

    /// Consume the cell, yielding its value.
    pub fn into_inner(self) -> S {
        self.current
    }
}

/// Deferred-request side of a state's double buffer.
///
/// Either `Unchanged` (no request queued) or `Pending(value)`. One slot
/// exists per top-level and per sub-state type. [`set`](Self::set) always
/// overwrites -- last write wins -- and [`take`](Self::take) consumes the
/// request, so a taken value is never re-observed without a fresh `set`.
///
/// # Example
///
/// ```rust
/// use statecraft::core::{MutableState, PendingSlot, RootState, State, StateId};
///
/// #[derive(Clone, PartialEq, Debug)]
/// enum Phase {
///     Day,
///     Night,
/// }
///
/// impl State for Phase {
///     fn id(&self) -> StateId {
///         match self {
///             Self::Day => StateId::name("Day"),
///             Self::Night => StateId::name("Night"),
///         }
///     }
/// }
/// impl MutableState for Phase {}
/// impl RootState for Phase {}
///
/// let mut slot = PendingSlot::default();
/// slot.set(Phase::Day);
/// slot.set(Phase::Night); // last write wins
/// assert_eq!(slot.take(), Some(Phase::Night));
/// assert_eq!(slot.take(), None); // consumed
/// ```
#[derive(Clone, Debug, PartialEq)]
pub enum PendingSlot<S: MutableState> {
    /// No transition queued.
    Unchanged,
    /// A transition to the carried value is queued.
    Pending(S),
}

impl<S: MutableState> Default for PendingSlot<S> {
    fn default() -> Self {
        Self::Unchanged
    }
}

impl<S: MutableState> PendingSlot<S> {
    /// Queue a transition to `next`, overwriting any queued value.
    ///
    /// Overwriting a *different* pending value is legal and logged as a
    /// diagnostic; last write wins.
    pub fn set(&mut self, next: S) {
        if let Self::Pending(old) = self {
            if *old != next {
                debug!(
                    "overwriting pending {} value {:?} with {:?} (last write wins)",
                    std::any::type_name::<S>(),
                    old,
                    next
                );
            }
        }
        *self = Self::Pending(next);
    }

    /// Consume the queued value, resetting the slot to `Unchanged`.
    ///
    /// A second `take` without an intervening [`set`](Self::set) returns
    /// `None`.
    pub fn take(&mut self) -> Option<S> {
        match std::mem::replace(self, Self::Unchanged) {
            Self::Pending(next) => Some(next),
            Self::Unchanged => None,
        }
    }

    /// The queued value, if any, without consuming it.
    pub fn pending(&self) -> Option<&S> {
        match self {
            Self::Pending(next) => Some(next),
            Self::Unchanged => None,
        }
    }

    /// Whether a transition is queued.
    pub fn is_pending(&self) -> bool {
        matches!(self, Self::Pending(_))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::{RootState, StateId};

    #[derive(Clone, PartialEq, Debug)]
    enum TestState {
        Menu,
        InGame,
        Credits,
    }

    impl State for TestState {
        fn id(&self) -> StateId {
            match self {
                Self::Menu => StateId::name("Menu"),
                Self::InGame => StateId::name("InGame"),
                Self::Credits => StateId::name("Credits"),
            }
        }
    }
    impl MutableState for TestState {}
    impl RootState for TestState {}

    #[test]
    fn cell_exposes_current_value() {
        let cell = StateCell::new(TestState::Menu);
        assert_eq!(cell.current(), &TestState::Menu);
    }

    #[test]
    fn cell_replace_returns_previous() {
        let mut cell = StateCell::new(TestState::Menu);
        let previous = cell.replace(TestState::InGame);
        assert_eq!(previous, TestState::Menu);
        assert_eq!(cell.current(), &TestState::InGame);
    }

    #[test]
    fn cell_into_inner_yields_value() {
        let cell = StateCell::new(TestState::Credits);
        assert_eq!(cell.into_inner(), TestState::Credits);
    }

    #[test]
    fn slot_defaults_to_unchanged() {
        let slot: PendingSlot<TestState> = PendingSlot::default();
        assert!(!slot.is_pending());
        assert_eq!(slot.pending(), None);
    }

    #[test]
    fn last_write_wins() {
        let mut slot = PendingSlot::default();
        slot.set(TestState::Menu);
        slot.set(TestState::InGame);
        slot.set(TestState::Credits);
        assert_eq!(slot.take(), Some(TestState::Credits));
    }

    #[test]
    fn take_consumes_exactly_once() {
        let mut slot = PendingSlot::default();
        slot.set(TestState::InGame);
        assert_eq!(slot.take(), Some(TestState::InGame));
        assert_eq!(slot.take(), None);
        assert_eq!(slot.take(), None);
    }

    #[test]
    fn take_on_unchanged_is_none() {
        let mut slot: PendingSlot<TestState> = PendingSlot::default();
        assert_eq!(slot.take(), None);
    }

    #[test]
    fn fresh_set_after_take_is_observed() {
        let mut slot = PendingSlot::default();
        slot.set(TestState::Menu);
        assert_eq!(slot.take(), Some(TestState::Menu));
        slot.set(TestState::InGame);
        assert_eq!(slot.take(), Some(TestState::InGame));
    }

    #[test]
    fn pending_peeks_without_consuming() {
        let mut slot = PendingSlot::default();
        slot.set(TestState::Menu);
        assert_eq!(slot.pending(), Some(&TestState::Menu));
        assert!(slot.is_pending());
        assert_eq!(slot.take(), Some(TestState::Menu));
    }
}
