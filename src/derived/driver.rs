//! Depth ordering for derived-state update routines.
//!
//! Resolver and gate updates are invoked by an external driver once per
//! tick, not auto-scheduled. Running a depth-2 routine before its depth-1
//! source has settled yields a one-tick-stale read, so updates must run
//! depth-ascending. That ordering is a caller obligation; this module
//! makes honoring it trivial.

use super::computed::{ComputedResolver, ComputedState};
use super::substate::{SubState, SubStateGate};
use crate::world::SimWorld;

/// Stable ascending sort by dependency depth.
///
/// Ties preserve original relative order. Backed by the standard
/// library's stable sort, so equal-depth routines registered in a given
/// order always run in that order. Pure utility: it does not detect
/// cycles -- acyclicity holds by construction, since a derived state
/// cannot name itself as a source.
pub fn sort_by_depth<T>(items: &mut [T], depth_of: impl Fn(&T) -> usize) {
    items.sort_by_key(depth_of);
}

type Routine = Box<dyn FnMut(&mut SimWorld) + Send>;

struct Entry {
    depth: usize,
    type_name: &'static str,
    run: Routine,
}

/// Packages registered resolver and gate routines and runs them in
/// depth-ascending order once per tick.
///
/// The raw [`ComputedResolver`] and [`SubStateGate`] entry points stay
/// public, so a caller may drive ordering manually instead.
#[derive(Default)]
pub struct DerivedDriver {
    entries: Vec<Entry>,
    sorted: bool,
}

impl DerivedDriver {
    /// Create an empty driver.
    pub fn new() -> Self {
        Self::default()
    }

    /// Register the resolver for computed state `C`.
    pub fn add_computed<C: ComputedState>(&mut self) {
        self.entries.push(Entry {
            depth: C::DEPENDENCY_DEPTH,
            type_name: std::any::type_name::<C>(),
            run: Box::new(ComputedResolver::<C>::resolve),
        });
        self.sorted = false;
    }

    /// Register the gate for sub-state `S`.
    pub fn add_sub<S: SubState>(&mut self) {
        self.entries.push(Entry {
            depth: S::DEPENDENCY_DEPTH,
            type_name: std::any::type_name::<S>(),
            run: Box::new(SubStateGate::<S>::update),
        });
        self.sorted = false;
    }

    /// Run every registered routine once, depth-ascending. Call once per
    /// tick, after the top-level pipeline flush points.
    pub fn run(&mut self, world: &mut SimWorld) {
        if !self.sorted {
            sort_by_depth(&mut self.entries, |entry| entry.depth);
            self.sorted = true;
        }
        for entry in &mut self.entries {
            (entry.run)(world);
        }
    }

    /// `(type name, depth)` pairs in execution order, for diagnostics.
    pub fn execution_order(&mut self) -> Vec<(&'static str, usize)> {
        if !self.sorted {
            sort_by_depth(&mut self.entries, |entry| entry.depth);
            self.sorted = true;
        }
        self.entries
            .iter()
            .map(|entry| (entry.type_name, entry.depth))
            .collect()
    }

    /// Number of registered routines.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether no routines are registered.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
