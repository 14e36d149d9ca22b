//! Walkthrough of a menu/game flow: deferred transitions, lifecycle
//! hooks, and scoped entity cleanup.
//!
//! Run with: cargo run --example menu_flow

use statecraft::builder::SimBuilder;
use statecraft::core::StateId;
use statecraft::pipeline::TransitionPipeline;
use statecraft::schedule::ScheduleRegistry;
use statecraft::scoped::CleanupStrategy;
use statecraft::state_enum;

state_enum! {
    enum AppState {
        Menu,
        InGame,
    }
}

const MENU: StateId = StateId::name("Menu");
const IN_GAME: StateId = StateId::name("InGame");

fn main() {
    let (mut world, _driver) = SimBuilder::new()
        .root(AppState::Menu)
        .expect("fresh world accepts the declaration")
        .build();

    let mut schedules = ScheduleRegistry::new();
    schedules.on_exit(MENU, |_| println!("  hook: tearing down the menu"));
    schedules.on_transit(MENU, IN_GAME, |_| println!("  hook: loading the level"));
    schedules.on_enter(IN_GAME, |_| println!("  hook: spawning the player"));

    // The menu splash screen only lives while the menu does.
    let splash = world.entities_mut().spawn();
    world
        .mark_scoped(splash, MENU, CleanupStrategy::OnExit, false)
        .expect("splash entity is alive");
    println!("spawned splash entity {:?}, scoped to Menu exit", splash);

    println!("\ntick 1: requesting InGame (deferred)");
    world.request_transition(AppState::InGame);
    println!("  current before flush: {:?}", world.current::<AppState>());

    if let Some(record) = TransitionPipeline::<AppState>::run(&mut world, &mut schedules) {
        println!("  applied: {:?} -> {:?}", record.exited, record.entered);
    }
    world.update_events();

    println!("  current after flush: {:?}", world.current::<AppState>());
    println!("  splash alive: {}", world.entities().is_alive(splash));

    println!("\ntick 2: identity transition (no hooks fire)");
    world.request_transition(AppState::InGame);
    if let Some(record) = TransitionPipeline::<AppState>::run(&mut world, &mut schedules) {
        println!("  applied: {:?} -> {:?}", record.exited, record.entered);
    }
    world.update_events();

    println!("\nlast transition on record: {:?}", world.last_transition::<AppState>());
}
