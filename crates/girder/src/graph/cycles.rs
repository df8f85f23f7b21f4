//! Cycle extraction from cyclic strongly connected components.

use super::classify::{EdgeClassification, EdgeKind};
use super::scc::Scc;
use super::{DependencyGraph, Precomputed};
use crate::domain::{EdgeId, NodeId};
use serde::Serialize;
use std::collections::HashMap;
use tracing::debug;

/// The cyclic part of one strongly connected component.
///
/// `back_edges` are representative cycle-closing edges, not an enumeration
/// of every elementary cycle in the component.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Cycle {
    /// Identifier of the SCC this cycle was taken from.
    pub scc_id: usize,
    /// Member nodes of the component.
    pub nodes: Vec<NodeId>,
    /// Every edge with both endpoints in the component, in insertion order.
    pub edges: Vec<EdgeId>,
    /// The subset of `edges` classified as back edges.
    pub back_edges: Vec<EdgeId>,
}

impl<N, E> DependencyGraph<N, E> {
    /// One [`Cycle`] per SCC that is not acyclic.
    #[must_use]
    pub fn find_cycles(&self) -> Vec<Cycle> {
        self.find_cycles_with(&Precomputed::default())
    }

    /// Like [`find_cycles`](Self::find_cycles), reusing whatever `precomputed`
    /// provides and computing the rest.
    #[must_use]
    pub fn find_cycles_with(&self, precomputed: &Precomputed<'_>) -> Vec<Cycle> {
        let owned_sccs: Vec<Scc>;
        let sccs = match precomputed.sccs {
            Some(sccs) => sccs,
            None => {
                owned_sccs = self.find_sccs();
                &owned_sccs
            }
        };

        let owned_classification: EdgeClassification;
        let classification = match precomputed.classification {
            Some(classification) => classification,
            None => {
                owned_classification = self.classify_edges();
                &owned_classification
            }
        };

        let mut cycles: Vec<Cycle> = Vec::new();
        let mut cycle_of: HashMap<&NodeId, usize> = HashMap::new();
        for scc in sccs.iter().filter(|scc| !scc.acyclic) {
            for node in &scc.nodes {
                cycle_of.insert(node, cycles.len());
            }
            cycles.push(Cycle {
                scc_id: scc.id,
                nodes: scc.nodes.clone(),
                edges: Vec::new(),
                back_edges: Vec::new(),
            });
        }

        for edge in self.edges() {
            let (Some(&from), Some(&to)) = (cycle_of.get(&edge.from), cycle_of.get(&edge.to))
            else {
                continue;
            };
            if from != to {
                continue;
            }
            cycles[from].edges.push(edge.id.clone());
            if classification.kind(&edge.id) == Some(EdgeKind::Back) {
                cycles[from].back_edges.push(edge.id.clone());
            }
        }

        debug!(cycles = cycles.len(), "extracted cycles");
        cycles
    }
}
