//! Dense, interned identifiers for state and event names, and the raw,
//! not-yet-graph-shaped fact rows loaded from a fact directory.

macro_rules! index_type {
    ($t:ident) => {
        #[derive(Ord, PartialOrd, Eq, PartialEq, Clone, Copy, Debug, Hash)]
        pub(crate) struct $t {
            index: u32,
        }

        impl From<usize> for $t {
            fn from(index: usize) -> $t {
                $t { index: index as u32 }
            }
        }

        impl From<$t> for usize {
            fn from(id: $t) -> usize {
                id.index as usize
            }
        }
    };
}

index_type!(StateId);
index_type!(EventId);

/// The fact rows loaded from a fact directory, already interned to
/// [`StateId`]/[`EventId`] but not yet assembled into a graph.
#[derive(Clone, Default, Debug)]
pub(crate) struct RawFacts {
    /// `(from, event, to)` triples, one per line of `transitions.facts`.
    pub(crate) transitions: Vec<(StateId, EventId, StateId)>,
    /// One state per line of `initial.facts`.
    pub(crate) initial: Vec<StateId>,
}
