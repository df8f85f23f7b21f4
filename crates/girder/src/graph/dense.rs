//! Dense integer view of the graph used by the depth-first analyses.
//!
//! Depth-first bookkeeping (discovery index, lowlink, timestamps) is kept in
//! `Vec`s indexed by node position instead of hash maps keyed by `NodeId`.

use super::DependencyGraph;
use crate::domain::NodeId;
use std::collections::HashMap;

pub(super) struct DenseView<'g> {
    /// Node identifiers in insertion order; position is the dense index.
    pub(super) ids: &'g [NodeId],
    pub(super) index: HashMap<&'g NodeId, usize>,
    /// Distinct successors per dense index, in adjacency order.
    pub(super) successors: Vec<Vec<usize>>,
}

impl<'g> DenseView<'g> {
    pub(super) fn new<N, E>(graph: &'g DependencyGraph<N, E>) -> Self {
        let ids = graph.node_ids();
        let index: HashMap<&NodeId, usize> = ids.iter().enumerate().map(|(i, id)| (id, i)).collect();

        // Successors that are not nodes can only come from corrupted state; skip them.
        let successors = ids
            .iter()
            .map(|id| {
                graph
                    .successors(id)
                    .iter()
                    .filter_map(|next| index.get(next).copied())
                    .collect()
            })
            .collect();

        Self {
            ids,
            index,
            successors,
        }
    }

    pub(super) fn len(&self) -> usize {
        self.ids.len()
    }
}

/// One level of an explicit depth-first stack.
pub(super) struct Frame {
    pub(super) node: usize,
    pub(super) cursor: usize,
}

impl Frame {
    pub(super) fn new(node: usize) -> Self {
        Self { node, cursor: 0 }
    }

    /// Next unexplored successor of this frame's node, if any.
    pub(super) fn next_successor(&mut self, view: &DenseView<'_>) -> Option<usize> {
        let next = view.successors[self.node].get(self.cursor).copied();
        self.cursor += 1;
        next
    }
}
