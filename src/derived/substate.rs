//! Sub-states: nested states gated by a parent's current value.

use crate::core::{MutableState, State, StateId};
use crate::world::SimWorld;
use log::debug;
use std::marker::PhantomData;

/// A state that exists only while its parent's current id is in a
/// declared allowed set.
///
/// The gate removes the cell (and resets the pending slot) the moment the
/// parent leaves the set, and recreates the cell from `Default` when it
/// re-enters -- a re-created sub-state always starts from its default.
///
/// The implementing type's `State` impl must declare
/// `DEPENDENCY_DEPTH = Parent::DEPENDENCY_DEPTH + 1`; registration
/// validates the declaration and fails on a mismatch.
///
/// Sub-states are freely mutable through their pending slot while the
/// gate allows them, but the application is a direct replace with no hook
/// dispatch -- the same light protocol computed states use.
///
/// # Example
///
/// ```rust
/// use statecraft::core::{MutableState, State, StateId};
/// use statecraft::derived::SubState;
///
/// #[derive(Clone, PartialEq, Debug)]
/// enum AppState {
///     Menu,
///     InGame,
/// }
///
/// impl State for AppState {
///     fn id(&self) -> StateId {
///         match self {
///             Self::Menu => StateId::name("Menu"),
///             Self::InGame => StateId::name("InGame"),
///         }
///     }
/// }
///
/// /// Only meaningful while actually playing.
/// #[derive(Clone, PartialEq, Debug, Default)]
/// enum CameraMode {
///     #[default]
///     Follow,
///     Free,
/// }
///
/// impl State for CameraMode {
///     const DEPENDENCY_DEPTH: usize = 2;
///
///     fn id(&self) -> StateId {
///         match self {
///             Self::Follow => StateId::name("Follow"),
///             Self::Free => StateId::name("Free"),
///         }
///     }
/// }
/// impl MutableState for CameraMode {}
///
/// impl SubState for CameraMode {
///     type Parent = AppState;
///
///     fn allowed_parent_ids() -> &'static [StateId] {
///         const IDS: &[StateId] = &[StateId::name("InGame")];
///         IDS
///     }
/// }
/// ```
pub trait SubState: MutableState + Default {
    /// The parent state type gating this one.
    type Parent: State;

    /// Parent ids under which this state exists.
    fn allowed_parent_ids() -> &'static [StateId];
}

/// Per-tick update routine for one sub-state type.
///
/// Evaluates parent membership and manages the sub-state's cell and
/// pending slot accordingly. A parent whose cell has never been created
/// counts as "not allowed"; the gate never panics on startup ordering.
pub struct SubStateGate<S: SubState> {
    _marker: PhantomData<S>,
}

impl<S: SubState> SubStateGate<S> {
    /// Re-evaluate the gate against the parent's current value.
    pub fn update(world: &mut SimWorld) {
        let allowed = world
            .current::<S::Parent>()
            .map(|parent| S::allowed_parent_ids().contains(&parent.id()))
            .unwrap_or(false);
        let present = world.current::<S>().is_some();

        match (present, allowed) {
            // Parent entered the allowed set: create from default. A
            // request queued while gated out does not carry forward.
            (false, true) => {
                if world.take_pending::<S>().is_some() {
                    debug!(
                        "dropping pending transition for `{}` queued while gated out",
                        std::any::type_name::<S>()
                    );
                }
                world.insert_state(S::default());
            }
            // Parent left the allowed set: remove the cell and reset the
            // pending slot in the same call.
            (true, false) => {
                world.remove_state::<S>();
                if world.take_pending::<S>().is_some() {
                    debug!(
                        "dropping pending transition for `{}`; parent left the allowed set",
                        std::any::type_name::<S>()
                    );
                }
            }
            // Still allowed: preserve the value, then apply any queued
            // request by direct replace.
            (true, true) => {
                if let Some(next) = world.take_pending::<S>() {
                    world.insert_state(next);
                }
            }
            // Still gated out (or parent never created).
            (false, false) => {
                if world.take_pending::<S>().is_some() {
                    debug!(
                        "dropping pending transition for `{}`; state is gated out",
                        std::any::type_name::<S>()
                    );
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::RootState;

    #[derive(Clone, PartialEq, Debug)]
    enum AppState {
        Active,
        Paused,
        Inactive,
    }

    impl State for AppState {
        fn id(&self) -> StateId {
            match self {
                Self::Active => StateId::name("Active"),
                Self::Paused => StateId::name("Paused"),
                Self::Inactive => StateId::name("Inactive"),
            }
        }
    }
    impl MutableState for AppState {}
    impl RootState for AppState {}

    #[derive(Clone, PartialEq, Debug, Default)]
    enum HudMode {
        #[default]
        Minimal,
        Full,
    }

    impl State for HudMode {
        const DEPENDENCY_DEPTH: usize = 2;

        fn id(&self) -> StateId {
            match self {
                Self::Minimal => StateId::name("Minimal"),
                Self::Full => StateId::name("Full"),
            }
        }
    }
    impl MutableState for HudMode {}

    impl SubState for HudMode {
        type Parent = AppState;

        fn allowed_parent_ids() -> &'static [StateId] {
            const IDS: &[StateId] = &[StateId::name("Active"), StateId::name("Paused")];
            IDS
        }
    }

    fn world_with_sub(parent: AppState) -> SimWorld {
        let mut world = SimWorld::new();
        world.declare(parent).unwrap();
        world.register_sub::<HudMode>().unwrap();
        world
    }

    #[test]
    fn created_from_default_when_parent_enters_set() {
        let mut world = world_with_sub(AppState::Inactive);
        SubStateGate::<HudMode>::update(&mut world);
        assert_eq!(world.current::<HudMode>(), None);

        world.insert_state(AppState::Active);
        SubStateGate::<HudMode>::update(&mut world);
        assert_eq!(world.current::<HudMode>(), Some(&HudMode::Minimal));
    }

    #[test]
    fn removed_and_pending_reset_when_parent_leaves_set() {
        let mut world = world_with_sub(AppState::Active);
        SubStateGate::<HudMode>::update(&mut world);
        world.request_transition(HudMode::Full);

        world.insert_state(AppState::Inactive);
        SubStateGate::<HudMode>::update(&mut world);

        assert_eq!(world.current::<HudMode>(), None);
        assert_eq!(world.pending::<HudMode>(), None);
    }

    #[test]
    fn value_preserved_across_allowed_parent_changes() {
        let mut world = world_with_sub(AppState::Active);
        SubStateGate::<HudMode>::update(&mut world);
        world.request_transition(HudMode::Full);
        SubStateGate::<HudMode>::update(&mut world);
        assert_eq!(world.current::<HudMode>(), Some(&HudMode::Full));

        // Active -> Paused stays inside the allowed set.
        world.insert_state(AppState::Paused);
        SubStateGate::<HudMode>::update(&mut world);
        SubStateGate::<HudMode>::update(&mut world);
        assert_eq!(world.current::<HudMode>(), Some(&HudMode::Full));
    }

    #[test]
    fn recreated_from_default_not_last_value() {
        let mut world = world_with_sub(AppState::Active);
        SubStateGate::<HudMode>::update(&mut world);
        world.request_transition(HudMode::Full);
        SubStateGate::<HudMode>::update(&mut world);

        world.insert_state(AppState::Inactive);
        SubStateGate::<HudMode>::update(&mut world);
        world.insert_state(AppState::Active);
        SubStateGate::<HudMode>::update(&mut world);

        assert_eq!(world.current::<HudMode>(), Some(&HudMode::Minimal));
    }

    #[test]
    fn pending_queued_while_gated_out_is_dropped() {
        let mut world = world_with_sub(AppState::Inactive);
        world.request_transition(HudMode::Full);

        world.insert_state(AppState::Active);
        SubStateGate::<HudMode>::update(&mut world);

        // Created from default; the stale request did not carry forward.
        assert_eq!(world.current::<HudMode>(), Some(&HudMode::Minimal));
        assert_eq!(world.pending::<HudMode>(), None);
    }

    #[test]
    fn missing_parent_cell_counts_as_not_allowed() {
        let mut world = SimWorld::new();
        world.declare(AppState::Active).unwrap();
        world.register_sub::<HudMode>().unwrap();
        world.remove_state::<AppState>();

        SubStateGate::<HudMode>::update(&mut world);
        assert_eq!(world.current::<HudMode>(), None);
    }

    #[test]
    fn depth_mismatch_is_rejected_at_registration() {
        #[derive(Clone, PartialEq, Debug, Default)]
        struct BadDepth;

        impl State for BadDepth {
            // Should be 2 (parent depth + 1).
            const DEPENDENCY_DEPTH: usize = 1;

            fn id(&self) -> StateId {
                StateId::name("BadDepth")
            }
        }
        impl MutableState for BadDepth {}
        impl SubState for BadDepth {
            type Parent = AppState;

            fn allowed_parent_ids() -> &'static [StateId] {
                const IDS: &[StateId] = &[StateId::name("Active")];
                IDS
            }
        }

        let mut world = SimWorld::new();
        world.declare(AppState::Active).unwrap();
        let err = world.register_sub::<BadDepth>().unwrap_err();
        assert!(matches!(
            err,
            crate::world::ConfigError::SubStateDepth {
                declared: 1,
                expected: 2,
                ..
            }
        ));
    }
}
