//! Topological ordering (Kahn's algorithm).

use super::DependencyGraph;
use crate::domain::NodeId;
use std::collections::{HashMap, VecDeque};
use tracing::debug;

impl<N, E> DependencyGraph<N, E> {
    /// Order the nodes so every edge's source precedes its target.
    ///
    /// Returns `None` when the graph has a cycle (including a self-loop).
    /// Ties are broken by node insertion order. A node whose adjacency bucket
    /// is missing counts as having degree zero.
    #[must_use]
    pub fn topological_sort(&self) -> Option<Vec<NodeId>> {
        let mut in_degree: HashMap<&NodeId, usize> = self
            .node_order
            .iter()
            .map(|id| (id, self.reverse.get(id).map_or(0, Vec::len)))
            .collect();

        let mut frontier: VecDeque<&NodeId> = self
            .node_order
            .iter()
            .filter(|id| in_degree.get(id).copied() == Some(0))
            .collect();

        let mut order = Vec::with_capacity(self.node_order.len());
        while let Some(id) = frontier.pop_front() {
            order.push(id.clone());
            for next in self.forward.get(id).map(Vec::as_slice).unwrap_or_default() {
                if let Some(degree) = in_degree.get_mut(next) {
                    if *degree > 0 {
                        *degree -= 1;
                        if *degree == 0 {
                            frontier.push_back(next);
                        }
                    }
                }
            }
        }

        if order.len() == self.node_order.len() {
            Some(order)
        } else {
            debug!(
                ordered = order.len(),
                nodes = self.node_order.len(),
                "topological sort blocked by a cycle"
            );
            None
        }
    }
}
