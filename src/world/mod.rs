//! The simulation world: resources, entities, scoped tags, and the state
//! registration table, behind one facade.
//!
//! The world deliberately does not own the hook schedules -- those belong
//! to the caller's scheduler and are passed into the transition pipeline
//! by reference, which is also what makes nested pipeline flushes
//! unrepresentable.

pub mod error;
pub mod registry;

pub use error::ConfigError;
pub use registry::{RegisteredState, StateKey, StateKind, StateRegistry};

use crate::core::{MutableState, PendingSlot, RootState, SourceSet, State, StateCell, StateId};
use crate::derived::{ComputedState, SubState};
use crate::events::{TransitionEvents, TransitionRecord};
use crate::scoped::{CleanupStrategy, ScopedEntityRegistry, ScopedTag};
use crate::store::{Entity, EntityError, EntityStore, ResourceStore};
use log::debug;

fn update_channel<S: RootState>(resources: &mut ResourceStore) {
    if let Some(events) = resources.get_mut::<TransitionEvents<S>>() {
        events.update();
    }
}

/// Owner of all per-simulation state.
///
/// # Example
///
/// ```rust
/// use statecraft::state_enum;
/// use statecraft::world::SimWorld;
///
/// state_enum! {
///     enum AppState {
///         Menu,
///         InGame,
///     }
/// }
///
/// let mut world = SimWorld::new();
/// world.declare(AppState::Menu).unwrap();
///
/// assert_eq!(world.current::<AppState>(), Some(&AppState::Menu));
/// world.request_transition(AppState::InGame);
/// assert_eq!(world.pending::<AppState>(), Some(&AppState::InGame));
/// // The value changes only once the transition pipeline flushes.
/// assert_eq!(world.current::<AppState>(), Some(&AppState::Menu));
/// ```
#[derive(Default)]
pub struct SimWorld {
    resources: ResourceStore,
    entities: EntityStore,
    scoped: ScopedEntityRegistry,
    registry: StateRegistry,
}

impl SimWorld {
    /// Create an empty world.
    pub fn new() -> Self {
        Self::default()
    }

    // ---- registration -------------------------------------------------

    /// Declare a top-level state type with its initial value.
    ///
    /// Inserts the live cell, an empty pending slot, and the transition
    /// event channel. One-time, at startup; declaring a type twice is a
    /// configuration error.
    pub fn declare<S: RootState>(&mut self, initial: S) -> Result<StateKey, ConfigError> {
        let key = self.registry.register::<S>(
            StateKind::Root,
            S::DEPENDENCY_DEPTH,
            Some(update_channel::<S>),
        )?;
        self.resources.insert(StateCell::new(initial));
        self.resources.insert(PendingSlot::<S>::default());
        self.resources.insert(TransitionEvents::<S>::default());
        Ok(key)
    }

    /// Register a sub-state type.
    ///
    /// Inserts the pending slot only; the gate creates and removes the
    /// live cell as the parent enters and leaves the allowed set. The
    /// declared dependency depth must be the parent's depth + 1.
    pub fn register_sub<S: SubState>(&mut self) -> Result<StateKey, ConfigError> {
        let expected = <S::Parent as State>::DEPENDENCY_DEPTH + 1;
        if S::DEPENDENCY_DEPTH != expected {
            return Err(ConfigError::SubStateDepth {
                type_name: std::any::type_name::<S>(),
                declared: S::DEPENDENCY_DEPTH,
                expected,
            });
        }
        let key = self
            .registry
            .register::<S>(StateKind::Sub, S::DEPENDENCY_DEPTH, None)?;
        self.resources.insert(PendingSlot::<S>::default());
        Ok(key)
    }

    /// Register a computed state type.
    ///
    /// The resolver creates and removes the live cell; computed states
    /// have no pending slot and no event channel. The declared dependency
    /// depth must be the source set's depth + 1.
    pub fn register_computed<C: ComputedState>(&mut self) -> Result<StateKey, ConfigError> {
        let expected = <C::Sources as SourceSet>::DEPENDENCY_DEPTH + 1;
        if C::DEPENDENCY_DEPTH != expected {
            return Err(ConfigError::ComputedDepth {
                type_name: std::any::type_name::<C>(),
                declared: C::DEPENDENCY_DEPTH,
                expected,
            });
        }
        self.registry
            .register::<C>(StateKind::Computed, C::DEPENDENCY_DEPTH, None)
    }

    // ---- transition requests ------------------------------------------

    /// Queue a deferred transition for `S`.
    ///
    /// Applied at the next pipeline flush (top-level states) or gate
    /// update (sub-states), not immediately. Requesting a transition for
    /// an undeclared type is a logged no-op.
    pub fn request_transition<S: MutableState>(&mut self, next: S) {
        match self.resources.get_mut::<PendingSlot<S>>() {
            Some(slot) => slot.set(next),
            None => debug!(
                "transition requested for undeclared state type `{}`; ignoring",
                std::any::type_name::<S>()
            ),
        }
    }

    // ---- administrative overrides -------------------------------------

    /// Insert or overwrite `S`'s live value directly, bypassing the
    /// pipeline. No lifecycle hooks run and no event is emitted; intended
    /// for bootstrapping and tests. Returns the displaced value.
    pub fn insert_state<S: State>(&mut self, value: S) -> Option<S> {
        match self.resources.get_mut::<StateCell<S>>() {
            Some(cell) => Some(cell.replace(value)),
            None => {
                self.resources.insert(StateCell::new(value));
                None
            }
        }
    }

    /// Remove `S`'s live cell directly, bypassing the pipeline.
    pub fn remove_state<S: State>(&mut self) -> Option<S> {
        self.resources
            .remove::<StateCell<S>>()
            .map(StateCell::into_inner)
    }

    // ---- queries ------------------------------------------------------

    /// The current value of `S`, if its cell exists.
    pub fn current<S: State>(&self) -> Option<&S> {
        self.resources.get::<StateCell<S>>().map(StateCell::current)
    }

    /// The queued transition value for `S`, if any.
    pub fn pending<S: MutableState>(&self) -> Option<&S> {
        self.resources
            .get::<PendingSlot<S>>()
            .and_then(PendingSlot::pending)
    }

    /// `S`'s transition event channel, if declared.
    pub fn events<S: RootState>(&self) -> Option<&TransitionEvents<S>> {
        self.resources.get::<TransitionEvents<S>>()
    }

    /// The most recent transition record for `S`.
    pub fn last_transition<S: RootState>(&self) -> Option<&TransitionRecord<S>> {
        self.events::<S>().and_then(TransitionEvents::last)
    }

    /// Entities tagged against `state`, optionally filtered by strategy.
    pub fn scoped_entities(
        &self,
        state: StateId,
        strategy: Option<CleanupStrategy>,
    ) -> Vec<Entity> {
        self.scoped.query(state, strategy)
    }

    // ---- scoped entities ----------------------------------------------

    /// Tag `entity` for automatic removal at the given state boundary.
    pub fn mark_scoped(
        &mut self,
        entity: Entity,
        state: StateId,
        strategy: CleanupStrategy,
        recursive: bool,
    ) -> Result<(), EntityError> {
        self.scoped.mark(
            &self.entities,
            entity,
            ScopedTag::new(state, strategy, recursive),
        )
    }

    /// Remove `entity`'s scoped tag, leaving the entity alive.
    pub fn unmark_scoped(&mut self, entity: Entity) -> Option<ScopedTag> {
        self.scoped.unmark(entity)
    }

    // ---- maintenance --------------------------------------------------

    /// Run event-channel maintenance for every declared root state.
    /// Call once per tick, after the pipeline flush points.
    pub fn update_events(&mut self) {
        for entry in self.registry.entries() {
            if let Some(maintenance) = entry.maintenance {
                maintenance(&mut self.resources);
            }
        }
    }

    // ---- component access ---------------------------------------------

    /// The type-keyed resource store.
    pub fn resources(&self) -> &ResourceStore {
        &self.resources
    }

    /// Mutable access to the resource store.
    pub fn resources_mut(&mut self) -> &mut ResourceStore {
        &mut self.resources
    }

    /// The entity store.
    pub fn entities(&self) -> &EntityStore {
        &self.entities
    }

    /// Mutable access to the entity store.
    pub fn entities_mut(&mut self) -> &mut EntityStore {
        &mut self.entities
    }

    /// The scoped-entity registry.
    pub fn scoped(&self) -> &ScopedEntityRegistry {
        &self.scoped
    }

    /// The state registration table.
    pub fn registry(&self) -> &StateRegistry {
        &self.registry
    }

    // ---- crate-internal plumbing --------------------------------------

    /// Drain `S`'s pending slot. Used by the pipeline and by gates.
    pub(crate) fn take_pending<S: MutableState>(&mut self) -> Option<S> {
        self.resources
            .get_mut::<PendingSlot<S>>()
            .and_then(PendingSlot::take)
    }

    /// Despawn entities tagged `(state, strategy)`.
    pub(crate) fn cleanup_scoped(&mut self, state: StateId, strategy: CleanupStrategy) -> usize {
        self.scoped.cleanup(&mut self.entities, state, strategy)
    }

    /// Publish a transition record into `S`'s channel.
    pub(crate) fn record_transition<S: RootState>(&mut self, record: TransitionRecord<S>) {
        match self.resources.get_mut::<TransitionEvents<S>>() {
            Some(events) => events.send(record),
            None => debug!(
                "no transition channel for `{}`; dropping record",
                std::any::type_name::<S>()
            ),
        }
    }
}
