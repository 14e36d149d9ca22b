//! Core state identity traits.
//!
//! Every facet of simulation status is modeled as a state type: a cheap,
//! comparable, cloneable value. The traits here form the identity contract
//! the rest of the crate builds on, and the capability markers that decide
//! which machinery may drive a given state type.

use serde::Serialize;
use std::fmt;
use std::fmt::Debug;

/// Stable identifier for a state value.
///
/// Identifiers are either a static name or an integer index. They are
/// `Copy`, hashable, and cheap to compare, which makes them suitable as
/// keys for hook schedules and scoped-entity tags.
///
/// Identity is whatever the implementor encodes into [`State::id`]; it may
/// ignore payload fields, so two values that are *not* equal can still share
/// an id (for example `InGame { paused: true }` and `InGame { paused: false }`
/// both naming themselves `InGame`).
///
/// # Example
///
/// ```rust
/// use statecraft::core::StateId;
///
/// const MENU: StateId = StateId::name("Menu");
/// const LEVEL_3: StateId = StateId::index(3);
///
/// assert_eq!(MENU, StateId::name("Menu"));
/// assert_ne!(MENU, LEVEL_3);
/// ```
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug, Serialize)]
pub enum StateId {
    /// A human-readable static name.
    Name(&'static str),
    /// A numeric index, for state spaces that are generated rather than named.
    Index(u64),
}

impl StateId {
    /// Identifier from a static name.
    pub const fn name(name: &'static str) -> Self {
        Self::Name(name)
    }

    /// Identifier from a numeric index.
    pub const fn index(index: u64) -> Self {
        Self::Index(index)
    }
}

impl fmt::Display for StateId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Name(name) => f.write_str(name),
            Self::Index(index) => write!(f, "#{index}"),
        }
    }
}

/// Trait for simulation states.
///
/// A state is a named, comparable, cloneable value representing one facet
/// of simulation status. Equality is purely structural (`PartialEq`);
/// reference semantics are never assumed.
///
/// # Required Traits
///
/// - `Clone`: states are cloned into transition records
/// - `PartialEq`: transition logic must detect identity transitions
/// - `Debug`: states appear in diagnostics
/// - `Send + Sync + 'static`: state cells live in a type-keyed resource store
///
/// # Dependency depth
///
/// `DEPENDENCY_DEPTH` is 1 for a bare state and `max(source depths) + 1`
/// for a derived or nested state. It orders derived-state recomputation;
/// see [`sort_by_depth`](crate::derived::sort_by_depth).
///
/// # Example
///
/// ```rust
/// use statecraft::core::{State, StateId};
///
/// #[derive(Clone, PartialEq, Debug)]
/// enum AppState {
///     Menu,
///     InGame { paused: bool },
/// }
///
/// impl State for AppState {
///     fn id(&self) -> StateId {
///         match self {
///             Self::Menu => StateId::name("Menu"),
///             Self::InGame { .. } => StateId::name("InGame"),
///         }
///     }
/// }
///
/// // Same id, different values: a transition between them is not an
/// // identity transition.
/// let running = AppState::InGame { paused: false };
/// let paused = AppState::InGame { paused: true };
/// assert_eq!(running.id(), paused.id());
/// assert_ne!(running, paused);
/// ```
pub trait State: Clone + PartialEq + Debug + Send + Sync + 'static {
    /// How many derivation levels sit below this state.
    ///
    /// 1 for a bare state. A derived or nested state declares its source's
    /// (or parent's) depth plus one; registration validates the declaration.
    const DEPENDENCY_DEPTH: usize = 1;

    /// The state's stable identifier.
    fn id(&self) -> StateId;
}

/// Marker for states that may be driven through a [`PendingSlot`].
///
/// Top-level states and sub-states are freely mutable: callers request
/// transitions by queueing a value. Computed states are *not* mutable --
/// their value is a function of their sources and nothing else.
///
/// [`PendingSlot`]: crate::core::PendingSlot
pub trait MutableState: State {}

/// Marker for top-level states, driven by the full
/// [`TransitionPipeline`](crate::pipeline::TransitionPipeline).
///
/// Sub-states and computed states do not implement this trait; their
/// updates use the lighter direct-replace protocol with no hook dispatch.
pub trait RootState: MutableState {}
