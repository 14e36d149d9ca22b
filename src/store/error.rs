//! Entity store error types.

use super::entities::Entity;
use thiserror::Error;

/// Errors raised by the entity store and the scoped-entity registry.
#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
pub enum EntityError {
    #[error("entity {0:?} does not exist or has been despawned")]
    NoSuchEntity(Entity),
}
