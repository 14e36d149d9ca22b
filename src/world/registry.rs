//! Typed registration table for state types.
//!
//! Each state type receives a stable, sequentially assigned key at
//! registration time. Lookups go through `TypeId`, never through string
//! concatenation, and the table doubles as an introspection surface for
//! diagnostics.

use super::error::ConfigError;
use crate::store::ResourceStore;
use serde::Serialize;
use std::any::TypeId;
use std::collections::HashMap;

/// Stable key assigned to a state type in registration order.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug, Serialize)]
pub struct StateKey(u32);

impl StateKey {
    /// The key's sequential index.
    pub const fn index(self) -> u32 {
        self.0
    }
}

/// Which protocol drives a registered state type.
#[derive(Clone, Copy, PartialEq, Eq, Debug, Serialize)]
pub enum StateKind {
    /// Top-level; driven by the transition pipeline.
    Root,
    /// Parent-gated; driven by its gate.
    Sub,
    /// Derived; driven by its resolver.
    Computed,
}

/// Per-tick maintenance routine attached to a registration, run by
/// [`SimWorld::update_events`](crate::world::SimWorld::update_events).
pub type Maintenance = fn(&mut ResourceStore);

/// Registration-table entry for one state type.
#[derive(Clone, Debug)]
pub struct RegisteredState {
    /// Sequential key.
    pub key: StateKey,
    /// Rust type name, for diagnostics.
    pub type_name: &'static str,
    /// Declared dependency depth.
    pub depth: usize,
    /// Driving protocol.
    pub kind: StateKind,
    /// Event-channel maintenance, present for root states only.
    pub maintenance: Option<Maintenance>,
}

/// The registration table itself.
#[derive(Debug, Default)]
pub struct StateRegistry {
    by_type: HashMap<TypeId, StateKey>,
    entries: Vec<RegisteredState>,
}

impl StateRegistry {
    /// Create an empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Register type `S`, assigning the next sequential key. Registering
    /// the same type twice is a configuration error.
    pub(crate) fn register<S: 'static>(
        &mut self,
        kind: StateKind,
        depth: usize,
        maintenance: Option<Maintenance>,
    ) -> Result<StateKey, ConfigError> {
        let type_id = TypeId::of::<S>();
        let type_name = std::any::type_name::<S>();
        if self.by_type.contains_key(&type_id) {
            return Err(ConfigError::DuplicateState { type_name });
        }
        let key = StateKey(self.entries.len() as u32);
        self.by_type.insert(type_id, key);
        self.entries.push(RegisteredState {
            key,
            type_name,
            depth,
            kind,
            maintenance,
        });
        Ok(key)
    }

    /// The key assigned to type `S`, if registered.
    pub fn key_of<S: 'static>(&self) -> Option<StateKey> {
        self.by_type.get(&TypeId::of::<S>()).copied()
    }

    /// The entry behind a key.
    pub fn entry(&self, key: StateKey) -> Option<&RegisteredState> {
        self.entries.get(key.0 as usize)
    }

    /// Iterate entries in registration order.
    pub fn entries(&self) -> impl Iterator<Item = &RegisteredState> {
        self.entries.iter()
    }

    /// Number of registered state types.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether no state types are registered.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
