//! Scoped entities: automatic cleanup at state boundaries.
//!
//! Entities tagged against a state id are despawned when that state's
//! matching boundary is crossed -- either on entering it or on exiting
//! it. The transition pipeline invokes cleanup at the two fixed points of
//! its sequence; callers may also run it by hand.

use crate::core::StateId;
use crate::store::{Entity, EntityError, EntityStore};
use log::debug;
use serde::Serialize;
use std::collections::HashMap;

/// Which boundary crossing removes a tagged entity.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug, Serialize)]
pub enum CleanupStrategy {
    /// Remove the entity when the tagged state is entered.
    OnEnter,
    /// Remove the entity when the tagged state is exited.
    OnExit,
}

/// Tag carried by a scoped entity. An entity holds at most one tag;
/// marking again overwrites.
#[derive(Clone, Copy, PartialEq, Eq, Debug, Serialize)]
pub struct ScopedTag {
    /// Id of the state whose boundary triggers removal.
    pub state: StateId,
    /// Which boundary crossing triggers it.
    pub strategy: CleanupStrategy,
    /// Remove the entity's whole descendant subtree along with it.
    pub recursive: bool,
}

impl ScopedTag {
    /// Build a tag.
    pub const fn new(state: StateId, strategy: CleanupStrategy, recursive: bool) -> Self {
        Self {
            state,
            strategy,
            recursive,
        }
    }
}

/// Tracks scoped tags and removes matching entities at boundary crossings.
#[derive(Debug, Default)]
pub struct ScopedEntityRegistry {
    tags: HashMap<Entity, ScopedTag>,
}

impl ScopedEntityRegistry {
    /// Create an empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Tag `entity` for cleanup. Overwrites any existing tag; errors if
    /// the entity is not alive.
    pub fn mark(
        &mut self,
        entities: &EntityStore,
        entity: Entity,
        tag: ScopedTag,
    ) -> Result<(), EntityError> {
        if !entities.is_alive(entity) {
            return Err(EntityError::NoSuchEntity(entity));
        }
        if let Some(old) = self.tags.insert(entity, tag) {
            if old != tag {
                debug!("scoped tag on {entity:?} overwritten: {old:?} -> {tag:?}");
            }
        }
        Ok(())
    }

    /// Remove and return `entity`'s tag, if it had one.
    pub fn unmark(&mut self, entity: Entity) -> Option<ScopedTag> {
        self.tags.remove(&entity)
    }

    /// The tag held by `entity`, if any.
    pub fn tag(&self, entity: Entity) -> Option<&ScopedTag> {
        self.tags.get(&entity)
    }

    /// All entities tagged against `state`, optionally filtered by
    /// strategy, in id-sorted order.
    pub fn query(&self, state: StateId, strategy: Option<CleanupStrategy>) -> Vec<Entity> {
        let mut matches: Vec<Entity> = self
            .tags
            .iter()
            .filter(|(_, tag)| {
                tag.state == state && strategy.map_or(true, |wanted| tag.strategy == wanted)
            })
            .map(|(entity, _)| *entity)
            .collect();
        matches.sort();
        matches
    }

    /// Despawn every entity tagged `(state, strategy)`, returning how many
    /// entities were removed.
    ///
    /// For recursive tags the entity's whole descendant subtree is removed
    /// as well, gathered by an iterative explicit-stack traversal of the
    /// adjacency table. Tags of despawned or stale entities are dropped.
    pub fn cleanup(
        &mut self,
        entities: &mut EntityStore,
        state: StateId,
        strategy: CleanupStrategy,
    ) -> usize {
        let mut roots: Vec<(Entity, bool)> = self
            .tags
            .iter()
            .filter(|(_, tag)| tag.state == state && tag.strategy == strategy)
            .map(|(entity, tag)| (*entity, tag.recursive))
            .collect();
        roots.sort();

        let mut doomed: Vec<Entity> = Vec::new();
        for (root, recursive) in roots {
            if !entities.is_alive(root) {
                // Stale tag left behind by an external despawn.
                self.tags.remove(&root);
                continue;
            }
            doomed.push(root);
            if recursive {
                let mut stack: Vec<Entity> = entities.children(root).to_vec();
                while let Some(entity) = stack.pop() {
                    stack.extend_from_slice(entities.children(entity));
                    doomed.push(entity);
                }
            }
        }
        doomed.sort();
        doomed.dedup();

        let mut removed = 0;
        for entity in doomed {
            if entities.despawn(entity).is_ok() {
                removed += 1;
            }
            self.tags.remove(&entity);
        }
        if removed > 0 {
            debug!("scoped cleanup removed {removed} entities for {state} ({strategy:?})");
        }
        removed
    }

    /// Number of tagged entities.
    pub fn len(&self) -> usize {
        self.tags.len()
    }

    /// Whether no entities are tagged.
    pub fn is_empty(&self) -> bool {
        self.tags.is_empty()
    }
}
