//! Reference collaborator stores: type-keyed singletons and entities.

pub mod entities;
pub mod error;
pub mod resources;

pub use entities::{Entity, EntityStore};
pub use error::EntityError;
pub use resources::ResourceStore;
