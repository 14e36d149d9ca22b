//! Core state identity contract and double-buffered storage.
//!
//! This module contains the pure building blocks: the state traits, the
//! live/pending resource pair, and the source-set abstraction derived
//! states read through.

pub mod cell;
pub mod sources;
pub mod state;

pub use cell::{PendingSlot, StateCell};
pub use sources::SourceSet;
pub use state::{MutableState, RootState, State, StateId};
