//! The concrete, petgraph-backed [`Lts`](sapn_engine::Lts) implementation
//! the CLI hands to the engine, built from a loaded [`RawFacts`].

use petgraph::graph::{DiGraph, NodeIndex};
use sapn_engine::Lts;

use crate::facts::{EventId, RawFacts, StateId};

/// A labeled transition system as a directed graph: states are nodes,
/// events label the edges.
pub(crate) struct GraphLts {
    graph: DiGraph<StateId, EventId>,
    node_for_state: Vec<NodeIndex>,
    initial: Vec<StateId>,
}

impl GraphLts {
    pub(crate) fn build(facts: &RawFacts, state_count: usize) -> Self {
        let mut graph = DiGraph::new();
        let node_for_state: Vec<NodeIndex> =
            (0..state_count).map(|i| graph.add_node(StateId::from(i))).collect();

        for &(from, event, to) in &facts.transitions {
            let from_node = node_for_state[usize::from(from)];
            let to_node = node_for_state[usize::from(to)];
            graph.add_edge(from_node, to_node, event);
        }

        GraphLts { graph, node_for_state, initial: facts.initial.clone() }
    }
}

impl Lts for GraphLts {
    type State = StateId;
    type Event = EventId;

    fn states(&self) -> Vec<StateId> {
        self.graph.node_indices().map(|n| self.graph[n]).collect()
    }

    fn events(&self) -> Vec<EventId> {
        let mut events: Vec<EventId> = self.graph.edge_indices().map(|e| self.graph[e]).collect();
        events.sort();
        events.dedup();
        events
    }

    fn transitions(&self) -> Vec<(StateId, EventId, StateId)> {
        self.graph
            .edge_indices()
            .map(|e| {
                let (from_node, to_node) = self.graph.edge_endpoints(e).expect("edge index from this graph");
                (self.graph[from_node], self.graph[e], self.graph[to_node])
            })
            .collect()
    }

    fn initial_states(&self) -> Vec<StateId> {
        self.initial.clone()
    }
}

impl std::fmt::Debug for GraphLts {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GraphLts")
            .field("states", &self.node_for_state.len())
            .field("transitions", &self.graph.edge_count())
            .finish()
    }
}
