//! Derived states: computed states, sub-states, and the depth-ordered
//! driver that updates them once per tick.

pub mod computed;
pub mod driver;
pub mod substate;

pub use computed::{ComputedResolver, ComputedState};
pub use driver::{sort_by_depth, DerivedDriver};
pub use substate::{SubState, SubStateGate};
