//! Statecraft: a hierarchical state machine core for entity simulations.
//!
//! A set of named states gates behavior in a tick-driven simulation.
//! States can be derived from other states, can nest under a parent
//! state, and their transitions drive lifecycle hooks and automatic
//! cleanup of tagged entities.
//!
//! # Core Concepts
//!
//! - **State**: a comparable, cloneable value with a stable id, stored in
//!   a [`StateCell`](core::StateCell) and transitioned through a
//!   [`PendingSlot`](core::PendingSlot) (deferred, last-write-wins)
//! - **Transition pipeline**: the fixed ordered sequence applied once per
//!   tick for top-level states (exit hooks, scoped cleanup, transition
//!   hooks, resource swap, enter hooks, scoped cleanup, event emission)
//! - **Computed states** and **sub-states**: derived values updated by
//!   the lighter direct-replace protocol, in dependency-depth order
//! - **Scoped entities**: entities despawned automatically when a state
//!   boundary is crossed
//!
//! # Example
//!
//! ```rust
//! use statecraft::builder::SimBuilder;
//! use statecraft::core::StateId;
//! use statecraft::pipeline::TransitionPipeline;
//! use statecraft::schedule::ScheduleRegistry;
//! use statecraft::scoped::CleanupStrategy;
//! use statecraft::state_enum;
//!
//! state_enum! {
//!     enum AppState {
//!         Menu,
//!         InGame,
//!     }
//! }
//!
//! let (mut world, mut driver) = SimBuilder::new()
//!     .root(AppState::Menu)
//!     .unwrap()
//!     .build();
//!
//! let mut schedules = ScheduleRegistry::new();
//! schedules.on_enter(StateId::name("InGame"), |_world| {
//!     // spawn the level here
//! });
//!
//! // A menu entity that should vanish when the menu is left.
//! let splash = world.entities_mut().spawn();
//! world
//!     .mark_scoped(splash, StateId::name("Menu"), CleanupStrategy::OnExit, false)
//!     .unwrap();
//!
//! // One simulation tick.
//! world.request_transition(AppState::InGame);
//! let record = TransitionPipeline::<AppState>::run(&mut world, &mut schedules);
//! assert!(record.is_some());
//! driver.run(&mut world);
//! world.update_events();
//!
//! assert_eq!(world.current::<AppState>(), Some(&AppState::InGame));
//! assert!(!world.entities().is_alive(splash));
//! ```

pub mod builder;
pub mod core;
pub mod derived;
pub mod events;
mod macros;
pub mod pipeline;
pub mod schedule;
pub mod scoped;
pub mod store;
pub mod world;

// Re-export commonly used types
pub use crate::core::{
    MutableState, PendingSlot, RootState, SourceSet, State, StateCell, StateId,
};
pub use builder::SimBuilder;
pub use derived::{ComputedResolver, ComputedState, DerivedDriver, SubState, SubStateGate};
pub use events::{EventCursor, TransitionEvents, TransitionRecord};
pub use pipeline::TransitionPipeline;
pub use schedule::{HookLabel, ScheduleRegistry};
pub use scoped::{CleanupStrategy, ScopedEntityRegistry, ScopedTag};
pub use store::{Entity, EntityError, EntityStore, ResourceStore};
pub use world::{ConfigError, SimWorld, StateKey, StateKind, StateRegistry};
