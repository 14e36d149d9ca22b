//! Minimal entity store with an explicit parent/child adjacency table.
//!
//! The store tracks liveness and hierarchy only; component data is out of
//! scope. The adjacency table exists so scoped cleanup can remove a whole
//! descendant subtree when a tag asks for recursive removal.

use super::error::EntityError;
use serde::Serialize;
use std::collections::HashMap;

/// Opaque entity identifier. Ids are never reused within one store.
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Debug, Serialize)]
pub struct Entity(u64);

impl Entity {
    /// The raw id, for display and external bookkeeping.
    pub const fn index(self) -> u64 {
        self.0
    }
}

#[derive(Debug, Default)]
struct Links {
    parent: Option<Entity>,
    children: Vec<Entity>,
}

/// Spawns and despawns entities and maintains their adjacency.
///
/// # Example
///
/// ```rust
/// use statecraft::store::EntityStore;
///
/// let mut entities = EntityStore::new();
/// let parent = entities.spawn();
/// let child = entities.spawn_child(parent).unwrap();
///
/// assert_eq!(entities.parent(child), Some(parent));
/// assert_eq!(entities.children(parent), &[child]);
///
/// entities.despawn(parent).unwrap();
/// assert!(!entities.is_alive(parent));
/// assert!(entities.is_alive(child)); // orphaned, not removed
/// assert_eq!(entities.parent(child), None);
/// ```
#[derive(Debug, Default)]
pub struct EntityStore {
    next_id: u64,
    links: HashMap<Entity, Links>,
}

impl EntityStore {
    /// Create an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Spawn a new root entity.
    pub fn spawn(&mut self) -> Entity {
        let entity = Entity(self.next_id);
        self.next_id += 1;
        self.links.insert(entity, Links::default());
        entity
    }

    /// Spawn a new entity as a child of `parent`.
    pub fn spawn_child(&mut self, parent: Entity) -> Result<Entity, EntityError> {
        if !self.links.contains_key(&parent) {
            return Err(EntityError::NoSuchEntity(parent));
        }
        let entity = Entity(self.next_id);
        self.next_id += 1;
        self.links.insert(
            entity,
            Links {
                parent: Some(parent),
                children: Vec::new(),
            },
        );
        if let Some(links) = self.links.get_mut(&parent) {
            links.children.push(entity);
        }
        Ok(entity)
    }

    /// Despawn `entity`, detaching it from its parent and orphaning its
    /// children. Children stay alive; removing a subtree is the scoped
    /// registry's job.
    pub fn despawn(&mut self, entity: Entity) -> Result<(), EntityError> {
        let links = self
            .links
            .remove(&entity)
            .ok_or(EntityError::NoSuchEntity(entity))?;
        if let Some(parent) = links.parent {
            if let Some(parent_links) = self.links.get_mut(&parent) {
                parent_links.children.retain(|child| *child != entity);
            }
        }
        for child in links.children {
            if let Some(child_links) = self.links.get_mut(&child) {
                child_links.parent = None;
            }
        }
        Ok(())
    }

    /// Whether `entity` currently exists.
    pub fn is_alive(&self, entity: Entity) -> bool {
        self.links.contains_key(&entity)
    }

    /// The entity's parent, if it has one.
    pub fn parent(&self, entity: Entity) -> Option<Entity> {
        self.links.get(&entity).and_then(|links| links.parent)
    }

    /// The entity's direct children. Empty for dead or childless entities.
    pub fn children(&self, entity: Entity) -> &[Entity] {
        self.links
            .get(&entity)
            .map(|links| links.children.as_slice())
            .unwrap_or(&[])
    }

    /// Number of live entities.
    pub fn len(&self) -> usize {
        self.links.len()
    }

    /// Whether no entities are alive.
    pub fn is_empty(&self) -> bool {
        self.links.is_empty()
    }
}
