//! Source sets for derived states.
//!
//! A computed state derives its value from one state type or from an
//! ordered tuple of state types. The `SourceSet` trait reads every member
//! all-or-nothing and reports the combined dependency depth used to order
//! recomputation.

use super::cell::StateCell;
use super::state::State;
use crate::store::ResourceStore;

/// One state type, or an ordered tuple of state types, read as a unit.
///
/// `read` is a strict AND-gate over presence: it yields `Some` only if
/// every referenced [`StateCell`] currently exists, so derived logic never
/// observes a partial tuple.
///
/// Depth: a bare state reports its own declared depth; a tuple reports
/// `1 + max(member depths)`.
pub trait SourceSet {
    /// The resolved value: the state itself, or a tuple of states.
    type Values: Clone;

    /// Combined dependency depth of the set.
    const DEPENDENCY_DEPTH: usize;

    /// Read every member, or `None` if any member's cell is absent.
    fn read(resources: &ResourceStore) -> Option<Self::Values>;
}

impl<S: State> SourceSet for S {
    type Values = S;

    const DEPENDENCY_DEPTH: usize = S::DEPENDENCY_DEPTH;

    fn read(resources: &ResourceStore) -> Option<S> {
        resources
            .get::<StateCell<S>>()
            .map(|cell| cell.current().clone())
    }
}

/// Maximum of a depth list, usable in associated-const position.
pub(crate) const fn max_depth(depths: &[usize]) -> usize {
    let mut max = 0;
    let mut i = 0;
    while i < depths.len() {
        if depths[i] > max {
            max = depths[i];
        }
        i += 1;
    }
    max
}

macro_rules! impl_source_set_tuple {
    ($($member:ident),+) => {
        impl<$($member: State),+> SourceSet for ($($member,)+) {
            type Values = ($($member,)+);

            const DEPENDENCY_DEPTH: usize =
                1 + max_depth(&[$($member::DEPENDENCY_DEPTH),+]);

            fn read(resources: &ResourceStore) -> Option<Self::Values> {
                Some(($(
                    resources.get::<StateCell<$member>>()?.current().clone(),
                )+))
            }
        }
    };
}

impl_source_set_tuple!(S1, S2);
impl_source_set_tuple!(S1, S2, S3);
impl_source_set_tuple!(S1, S2, S3, S4);
