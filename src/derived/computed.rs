//! Computed states: values derived from other states each tick.

use crate::core::{SourceSet, State};
use crate::world::SimWorld;
use log::trace;
use std::marker::PhantomData;

/// A state whose value is a pure function of one or more source states.
///
/// `compute` receives `None` (rather than being skipped) when the sources
/// do not all resolve, and may still return `Some` -- a computed state can
/// exist while its sources are absent if its logic says so. Returning
/// `None` removes the state.
///
/// The implementing type's `State` impl must declare
/// `DEPENDENCY_DEPTH = Sources::DEPENDENCY_DEPTH + 1`; registration
/// validates the declaration and fails on a mismatch.
///
/// Computed states use the light "track the source" protocol: replacement
/// is a direct overwrite with no enter/exit hooks, no scoped cleanup, and
/// no transition events. Callers who need enter/exit semantics should wrap
/// the computed value in an explicit top-level state fed through a pending
/// slot by a forwarding system.
///
/// # Example
///
/// ```rust
/// use statecraft::core::{State, StateId};
/// use statecraft::derived::ComputedState;
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
/// /// Exists only while the game is paused.
/// #[derive(Clone, PartialEq, Debug)]
/// struct Paused;
///
/// impl State for Paused {
///     const DEPENDENCY_DEPTH: usize = 2;
///
///     fn id(&self) -> StateId {
///         StateId::name("Paused")
///     }
/// }
///
/// impl ComputedState for Paused {
///     type Sources = AppState;
///
///     fn compute(sources: Option<AppState>) -> Option<Self> {
///         match sources {
///             Some(AppState::InGame { paused: true }) => Some(Paused),
///             _ => None,
///         }
///     }
/// }
/// ```
pub trait ComputedState: State {
    /// The state type, or tuple of state types, this state derives from.
    type Sources: SourceSet;

    /// Derive the value from the current sources, or `None` to not exist.
    fn compute(sources: Option<<Self::Sources as SourceSet>::Values>) -> Option<Self>;
}

/// Per-tick update routine for one computed state type.
///
/// Reads the source set, calls [`ComputedState::compute`], and replaces
/// or removes the derived cell. Invoked by the caller (usually through a
/// [`DerivedDriver`](crate::derived::DerivedDriver)) after the top-level
/// pipeline flush, in depth-ascending order.
pub struct ComputedResolver<C: ComputedState> {
    _marker: PhantomData<C>,
}

impl<C: ComputedState> ComputedResolver<C> {
    /// Recompute `C` against the world's current source values.
    pub fn resolve(world: &mut SimWorld) {
        let sources = <C::Sources as SourceSet>::read(world.resources());
        match C::compute(sources) {
            Some(value) => {
                world.insert_state(value);
            }
            None => {
                if world.remove_state::<C>().is_some() {
                    trace!("computed state `{}` removed", std::any::type_name::<C>());
                }
            }
        }
    }
}
