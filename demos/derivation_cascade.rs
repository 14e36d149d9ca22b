//! Walkthrough of a derivation cascade: a base state feeding a computed
//! state feeding another computed state, settling in one tick when the
//! driver runs them depth-ascending.
//!
//! Run with: cargo run --example derivation_cascade

use statecraft::builder::SimBuilder;
use statecraft::core::{State, StateId};
use statecraft::derived::ComputedState;
use statecraft::pipeline::TransitionPipeline;
use statecraft::schedule::ScheduleRegistry;
use statecraft::state_enum;

state_enum! {
    enum Connection {
        Offline,
        Connecting,
        Online,
    }
}

/// Depth 2: derived directly from the connection.
#[derive(Clone, PartialEq, Debug)]
struct Reachable;

impl State for Reachable {
    const DEPENDENCY_DEPTH: usize = 2;

    fn id(&self) -> StateId {
        StateId::name("Reachable")
    }
}

impl ComputedState for Reachable {
    type Sources = Connection;

    fn compute(sources: Option<Connection>) -> Option<Self> {
        matches!(sources, Some(Connection::Online)).then_some(Reachable)
    }
}

/// Depth 3: derived from the depth-2 state.
#[derive(Clone, PartialEq, Debug)]
struct SyncEnabled;

impl State for SyncEnabled {
    const DEPENDENCY_DEPTH: usize = 3;

    fn id(&self) -> StateId {
        StateId::name("SyncEnabled")
    }
}

impl ComputedState for SyncEnabled {
    type Sources = Reachable;

    fn compute(sources: Option<Reachable>) -> Option<Self> {
        sources.map(|_| SyncEnabled)
    }
}

fn main() {
    // Registration order is depth-descending on purpose; the driver
    // still runs depth-ascending.
    let (mut world, mut driver) = SimBuilder::new()
        .root(Connection::Offline)
        .expect("fresh world accepts the declaration")
        .computed::<SyncEnabled>()
        .expect("depth 3 declaration is consistent")
        .computed::<Reachable>()
        .expect("depth 2 declaration is consistent")
        .build();

    let mut schedules = ScheduleRegistry::new();

    println!("execution order: {:?}", driver.execution_order());

    for next in [Connection::Connecting, Connection::Online, Connection::Offline] {
        world.request_transition(next);
        let _ = TransitionPipeline::<Connection>::run(&mut world, &mut schedules);
        driver.run(&mut world);
        world.update_events();

        println!(
            "connection={:?} reachable={:?} sync={:?}",
            world.current::<Connection>(),
            world.current::<Reachable>(),
            world.current::<SyncEnabled>(),
        );
    }
}
