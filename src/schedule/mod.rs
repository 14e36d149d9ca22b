//! Explicit hook schedules for transition lifecycle points.
//!
//! Hook lists are owned by the caller's scheduler and handed to the
//! transition pipeline by reference. There is no discovery by naming
//! convention: a hook runs because it was registered under a label, in
//! registration order.

use crate::core::StateId;
use crate::world::SimWorld;
use serde::Serialize;
use std::collections::HashMap;

/// Label identifying one hook list.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug, Serialize)]
pub enum HookLabel {
    /// Runs after a state value with this id is applied.
    Enter(StateId),
    /// Runs before a state value with this id is replaced.
    Exit(StateId),
    /// Runs between exit and apply for one specific edge.
    Transit { from: StateId, to: StateId },
}

/// A registered hook. Hooks receive the world but never the registry
/// itself, so a hook cannot start a nested pipeline flush.
pub type Hook = Box<dyn FnMut(&mut SimWorld) + Send>;

/// Map from label to its ordered hook list.
///
/// # Example
///
/// ```rust
/// use statecraft::core::StateId;
/// use statecraft::schedule::{HookLabel, ScheduleRegistry};
/// use statecraft::world::SimWorld;
///
/// let mut schedules = ScheduleRegistry::new();
/// schedules.on_enter(StateId::name("Menu"), |_world| {
///     // spawn the menu UI here
/// });
///
/// let mut world = SimWorld::new();
/// schedules.run(HookLabel::Enter(StateId::name("Menu")), &mut world);
/// ```
#[derive(Default)]
pub struct ScheduleRegistry {
    hooks: HashMap<HookLabel, Vec<Hook>>,
}

impl ScheduleRegistry {
    /// Create an empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a hook under `label`, appended after any existing hooks.
    pub fn register(&mut self, label: HookLabel, hook: impl FnMut(&mut SimWorld) + Send + 'static) {
        self.hooks.entry(label).or_default().push(Box::new(hook));
    }

    /// Register a hook to run when `state` is entered.
    pub fn on_enter(&mut self, state: StateId, hook: impl FnMut(&mut SimWorld) + Send + 'static) {
        self.register(HookLabel::Enter(state), hook);
    }

    /// Register a hook to run when `state` is exited.
    pub fn on_exit(&mut self, state: StateId, hook: impl FnMut(&mut SimWorld) + Send + 'static) {
        self.register(HookLabel::Exit(state), hook);
    }

    /// Register a hook to run on the `from -> to` edge.
    pub fn on_transit(
        &mut self,
        from: StateId,
        to: StateId,
        hook: impl FnMut(&mut SimWorld) + Send + 'static,
    ) {
        self.register(HookLabel::Transit { from, to }, hook);
    }

    /// Run every hook registered under `label`, in registration order.
    /// A label with no hooks is a no-op. Hook panics are not caught.
    pub fn run(&mut self, label: HookLabel, world: &mut SimWorld) {
        if let Some(hooks) = self.hooks.get_mut(&label) {
            for hook in hooks.iter_mut() {
                hook(world);
            }
        }
    }

    /// Number of hooks registered under `label`.
    pub fn hook_count(&self, label: HookLabel) -> usize {
        self.hooks.get(&label).map_or(0, Vec::len)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const MENU: StateId = StateId::name("Menu");
    const GAME: StateId = StateId::name("Game");

    // Hooks record their firing order into a world resource.
    #[derive(Default)]
    struct Trace(Vec<&'static str>);

    fn trace(world: &mut SimWorld, entry: &'static str) {
        if world.resources().get::<Trace>().is_none() {
            world.resources_mut().insert(Trace::default());
        }
        world
            .resources_mut()
            .get_mut::<Trace>()
            .unwrap()
            .0
            .push(entry);
    }

    fn traced(world: &SimWorld) -> Vec<&'static str> {
        world
            .resources()
            .get::<Trace>()
            .map(|t| t.0.clone())
            .unwrap_or_default()
    }

    #[test]
    fn hooks_run_in_registration_order() {
        let mut schedules = ScheduleRegistry::new();
        schedules.on_enter(MENU, |world| trace(world, "first"));
        schedules.on_enter(MENU, |world| trace(world, "second"));
        schedules.on_enter(MENU, |world| trace(world, "third"));

        let mut world = SimWorld::new();
        schedules.run(HookLabel::Enter(MENU), &mut world);

        assert_eq!(traced(&world), vec!["first", "second", "third"]);
    }

    #[test]
    fn unregistered_label_is_a_no_op() {
        let mut schedules = ScheduleRegistry::new();
        schedules.on_exit(MENU, |world| trace(world, "exit"));

        let mut world = SimWorld::new();
        schedules.run(HookLabel::Enter(MENU), &mut world);
        assert!(traced(&world).is_empty());
    }

    #[test]
    fn labels_are_distinct_per_edge() {
        let mut schedules = ScheduleRegistry::new();
        schedules.on_transit(MENU, GAME, |world| trace(world, "menu->game"));
        schedules.on_transit(GAME, MENU, |world| trace(world, "game->menu"));

        let mut world = SimWorld::new();
        schedules.run(HookLabel::Transit { from: MENU, to: GAME }, &mut world);
        assert_eq!(traced(&world), vec!["menu->game"]);
    }

    #[test]
    fn hook_count_reports_per_label() {
        let mut schedules = ScheduleRegistry::new();
        schedules.on_enter(MENU, |_| {});
        schedules.on_enter(MENU, |_| {});
        schedules.on_exit(MENU, |_| {});

        assert_eq!(schedules.hook_count(HookLabel::Enter(MENU)), 2);
        assert_eq!(schedules.hook_count(HookLabel::Exit(MENU)), 1);
        assert_eq!(schedules.hook_count(HookLabel::Enter(GAME)), 0);
    }

    #[test]
    fn hooks_may_mutate_the_world_repeatedly() {
        let mut schedules = ScheduleRegistry::new();
        schedules.on_enter(GAME, |world| trace(world, "tick"));

        let mut world = SimWorld::new();
        schedules.run(HookLabel::Enter(GAME), &mut world);
        schedules.run(HookLabel::Enter(GAME), &mut world);
        assert_eq!(traced(&world), vec!["tick", "tick"]);
    }
}
