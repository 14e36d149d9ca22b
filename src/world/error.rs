//! Configuration errors raised at registration time.
//!
//! These are programmer errors: startup callers should treat them as
//! fatal, since continuing would run the simulation against undefined
//! semantics.

use thiserror::Error;

/// Errors that can occur while declaring and registering state types.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ConfigError {
    #[error(
        "state type `{type_name}` is already registered. Declare each state type once; \
         use insert_state to overwrite its value"
    )]
    DuplicateState { type_name: &'static str },

    #[error(
        "sub-state `{type_name}` declares dependency depth {declared}, but its parent \
         requires {expected}. Set DEPENDENCY_DEPTH to the parent's depth + 1"
    )]
    SubStateDepth {
        type_name: &'static str,
        declared: usize,
        expected: usize,
    },

    #[error(
        "computed state `{type_name}` declares dependency depth {declared}, but its \
         sources require {expected}. Set DEPENDENCY_DEPTH to the source depth + 1"
    )]
    ComputedDepth {
        type_name: &'static str,
        declared: usize,
        expected: usize,
    },
}
