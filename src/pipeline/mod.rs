//! The transition pipeline for top-level states.
//!
//! One flush drains the pending slot and performs the ordered sequence:
//! exit hooks, exit-scoped cleanup, transition hooks, resource swap,
//! enter hooks, enter-scoped cleanup, event emission. The sequence is
//! total and non-interruptible within one invocation; hook panics are not
//! caught and propagate to the invoker.

use crate::core::RootState;
use crate::events::TransitionRecord;
use crate::schedule::{HookLabel, ScheduleRegistry};
use crate::scoped::CleanupStrategy;
use crate::world::SimWorld;
use chrono::Utc;
use log::debug;
use std::marker::PhantomData;

/// Orchestrates the ordered side effects of one top-level state change.
///
/// Conceptually the pipeline is `Idle` until the pending slot yields a
/// value and `Applying` for the duration of the sequence; the mid-flight
/// phase is never externally observable. Hooks receive the world but not
/// the schedule registry, so a nested flush cannot be expressed.
///
/// Identity transitions -- a requested value equal to the current one --
/// skip hooks entirely but still refresh the cell, run enter-scoped
/// cleanup, and emit an event with `exited == entered`. First
/// initialization (no previous cell) takes the same shortcut with
/// `exited == None`.
///
/// # Example
///
/// ```rust
/// use statecraft::pipeline::TransitionPipeline;
/// use statecraft::schedule::ScheduleRegistry;
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
/// let mut schedules = ScheduleRegistry::new();
/// world.declare(AppState::Menu).unwrap();
///
/// world.request_transition(AppState::InGame);
/// let record = TransitionPipeline::<AppState>::run(&mut world, &mut schedules).unwrap();
///
/// assert_eq!(record.exited, Some(AppState::Menu));
/// assert_eq!(world.current::<AppState>(), Some(&AppState::InGame));
/// ```
pub struct TransitionPipeline<S: RootState> {
    _marker: PhantomData<S>,
}

impl<S: RootState> TransitionPipeline<S> {
    /// Flush `S`'s pending slot, applying at most one transition.
    ///
    /// Returns the emitted record, or `None` if nothing was pending.
    pub fn run(
        world: &mut SimWorld,
        schedules: &mut ScheduleRegistry,
    ) -> Option<TransitionRecord<S>> {
        let next = world.take_pending::<S>()?;
        let previous = world.current::<S>().cloned();

        let record = match previous {
            Some(prev) if prev != next => {
                debug!("applying transition {} -> {}", prev.id(), next.id());
                schedules.run(HookLabel::Exit(prev.id()), world);
                world.cleanup_scoped(prev.id(), CleanupStrategy::OnExit);
                schedules.run(
                    HookLabel::Transit {
                        from: prev.id(),
                        to: next.id(),
                    },
                    world,
                );
                world.insert_state(next.clone());
                schedules.run(HookLabel::Enter(next.id()), world);
                world.cleanup_scoped(next.id(), CleanupStrategy::OnEnter);
                TransitionRecord {
                    exited: Some(prev),
                    entered: next,
                    at: Utc::now(),
                }
            }
            // Identity transition, or first initialization: no hooks.
            previous => {
                debug!(
                    "applying identity transition to {} (previous: {:?})",
                    next.id(),
                    previous.as_ref().map(|p| p.id())
                );
                world.insert_state(next.clone());
                world.cleanup_scoped(next.id(), CleanupStrategy::OnEnter);
                TransitionRecord {
                    exited: previous,
                    entered: next,
                    at: Utc::now(),
                }
            }
        };

        world.record_transition(record.clone());
        Some(record)
    }
}
