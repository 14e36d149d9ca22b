//! Type-keyed singleton resource store.
//!
//! Holds at most one value per Rust type, which is what structurally
//! guarantees the one-cell-one-slot-per-state-type invariant: a
//! `StateCell<S>` cannot exist twice because the store is keyed by
//! `TypeId`.

use std::any::{Any, TypeId};
use std::collections::HashMap;

/// A map from type to a single value of that type.
///
/// `insert` is last-write-wins and returns the displaced value, mirroring
/// the pending-slot contract one level up.
///
/// # Example
///
/// ```rust
/// use statecraft::store::ResourceStore;
///
/// let mut store = ResourceStore::new();
/// assert_eq!(store.insert(3u32), None);
/// assert_eq!(store.insert(7u32), Some(3));
/// assert_eq!(store.get::<u32>(), Some(&7));
/// assert_eq!(store.remove::<u32>(), Some(7));
/// assert!(store.get::<u32>().is_none());
/// ```
#[derive(Default)]
pub struct ResourceStore {
    entries: HashMap<TypeId, Box<dyn Any + Send + Sync>>,
}

impl ResourceStore {
    /// Create an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert a value, displacing and returning any previous value of the
    /// same type.
    pub fn insert<T: Any + Send + Sync>(&mut self, value: T) -> Option<T> {
        self.entries
            .insert(TypeId::of::<T>(), Box::new(value))
            .and_then(|old| old.downcast::<T>().ok())
            .map(|boxed| *boxed)
    }

    /// Shared access to the value of type `T`, if present.
    pub fn get<T: Any + Send + Sync>(&self) -> Option<&T> {
        self.entries
            .get(&TypeId::of::<T>())
            .and_then(|entry| entry.downcast_ref::<T>())
    }

    /// Exclusive access to the value of type `T`, if present.
    pub fn get_mut<T: Any + Send + Sync>(&mut self) -> Option<&mut T> {
        self.entries
            .get_mut(&TypeId::of::<T>())
            .and_then(|entry| entry.downcast_mut::<T>())
    }

    /// Remove and return the value of type `T`, if present.
    pub fn remove<T: Any + Send + Sync>(&mut self) -> Option<T> {
        self.entries
            .remove(&TypeId::of::<T>())
            .and_then(|entry| entry.downcast::<T>().ok())
            .map(|boxed| *boxed)
    }

    /// Whether a value of type `T` is present.
    pub fn contains<T: Any + Send + Sync>(&self) -> bool {
        self.entries.contains_key(&TypeId::of::<T>())
    }

    /// Number of stored values.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the store is empty.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
