//! One-call analysis snapshot.

use super::classify::EdgeClassification;
use super::condensation::CondensationGraph;
use super::cycles::Cycle;
use super::scc::Scc;
use super::{DependencyGraph, Precomputed};
use crate::domain::NodeId;
use crate::error::Result;
use serde::Serialize;
use tracing::debug;

/// Every derived view of the graph, computed from one consistent snapshot.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct GraphAnalysis {
    /// Number of nodes.
    pub node_count: usize,
    /// Number of edges, parallel edges counted individually.
    pub edge_count: usize,
    /// `true` iff a topological order exists.
    pub is_acyclic: bool,
    /// Strongly connected components.
    pub sccs: Vec<Scc>,
    /// One entry per cyclic component.
    pub cycles: Vec<Cycle>,
    /// Node order, or `None` when the graph has a cycle.
    pub topological_order: Option<Vec<NodeId>>,
    /// The SCC-contracted graph.
    pub condensation: CondensationGraph,
    /// Depth-first kind of every edge.
    pub classification: EdgeClassification,
}

impl GraphAnalysis {
    /// Nodes that belong to some cycle.
    pub fn cyclic_nodes(&self) -> impl Iterator<Item = &NodeId> {
        self.cycles.iter().flat_map(|cycle| cycle.nodes.iter())
    }
}

impl<N, E> DependencyGraph<N, E> {
    /// Compute SCCs, edge classification, cycles, condensation, and
    /// topological order in one pass.
    ///
    /// SCCs and the classification are computed once and shared by cycle
    /// extraction and condensation.
    ///
    /// # Errors
    ///
    /// Only fails if the engine's own SCCs cannot be mapped back onto its
    /// edges, which indicates corrupted internal state.
    pub fn analyze(&self) -> Result<GraphAnalysis> {
        let sccs = self.find_sccs();
        let classification = self.classify_edges();
        let precomputed = Precomputed {
            sccs: Some(&sccs),
            classification: Some(&classification),
        };

        let cycles = self.find_cycles_with(&precomputed);
        let condensation = self.build_condensation_graph_with(&precomputed)?;
        let topological_order = self.topological_sort();
        let is_acyclic = topological_order.is_some();

        debug!(
            nodes = self.node_count(),
            edges = self.edge_count(),
            sccs = sccs.len(),
            cycles = cycles.len(),
            is_acyclic,
            "analyzed dependency graph"
        );

        Ok(GraphAnalysis {
            node_count: self.node_count(),
            edge_count: self.edge_count(),
            is_acyclic,
            sccs,
            cycles,
            topological_order,
            condensation,
            classification,
        })
    }
}
