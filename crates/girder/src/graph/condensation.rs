//! The condensation graph: every SCC contracted to a single component.
//!
//! One pass over the edges routes each edge into its components' buckets:
//!
//! - same component: `internal`, and also `feedback` when classified `Back`
//! - different components: `exit` of the source component and `entry` of the
//!   target component
//!
//! Inter-component arcs are deduplicated only for ordering the components;
//! every individual edge stays in its entry/exit lists.

use super::classify::{EdgeClassification, EdgeKind};
use super::scc::Scc;
use super::{DependencyGraph, Precomputed};
use crate::domain::{EdgeId, NodeId};
use crate::error::{ContractViolation, Result};
use serde::Serialize;
use std::collections::{HashMap, HashSet, VecDeque};
use tracing::{debug, warn};

/// One strongly connected component contracted to a point.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CondensationComponent {
    /// Identifier of the underlying SCC.
    pub id: usize,
    /// Member nodes.
    pub nodes: Vec<NodeId>,
    /// `true` if the component contains a cycle (or a self-loop).
    pub has_loop: bool,
    /// Edges arriving from other components.
    pub entry_edges: Vec<EdgeId>,
    /// Edges leaving to other components.
    pub exit_edges: Vec<EdgeId>,
    /// Edges with both endpoints inside the component.
    pub internal_edges: Vec<EdgeId>,
    /// Internal edges classified as back edges.
    pub feedback_edges: Vec<EdgeId>,
}

/// The acyclic graph of contracted components.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CondensationGraph {
    /// Components in SCC order.
    pub components: Vec<CondensationComponent>,
    /// Component id of every node.
    pub node_component: HashMap<NodeId, usize>,
    /// Every component id exactly once, sources before targets.
    pub topological_order: Vec<usize>,
}

impl CondensationGraph {
    /// Look up a component by id.
    #[must_use]
    pub fn component(&self, id: usize) -> Option<&CondensationComponent> {
        self.components.iter().find(|c| c.id == id)
    }

    /// Component id of a node.
    #[must_use]
    pub fn component_of(&self, node: impl AsRef<str>) -> Option<usize> {
        self.node_component.get(node.as_ref()).copied()
    }

    /// Number of components.
    #[must_use]
    pub fn len(&self) -> usize {
        self.components.len()
    }

    /// Returns `true` if there are no components.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.components.is_empty()
    }
}

impl<N, E> DependencyGraph<N, E> {
    /// Contract every SCC and order the resulting components.
    ///
    /// # Errors
    ///
    /// Cannot fail when SCCs are computed internally; see
    /// [`build_condensation_graph_with`](Self::build_condensation_graph_with).
    pub fn build_condensation_graph(&self) -> Result<CondensationGraph> {
        self.build_condensation_graph_with(&Precomputed::default())
    }

    /// Like [`build_condensation_graph`](Self::build_condensation_graph),
    /// reusing whatever `precomputed` provides and computing the rest.
    ///
    /// # Errors
    ///
    /// Returns a [`ContractViolation`] when the supplied SCCs do not partition
    /// the node set or do not contract to an acyclic graph:
    ///
    /// - [`UnknownComponentMember`](ContractViolation::UnknownComponentMember)
    ///   if an SCC lists a node the graph does not have
    /// - [`NodeInSeveralComponents`](ContractViolation::NodeInSeveralComponents)
    ///   if a node is listed more than once
    /// - [`UnresolvedComponent`](ContractViolation::UnresolvedComponent) if an
    ///   edge endpoint is in none of the SCCs
    /// - [`NodeNotCovered`](ContractViolation::NodeNotCovered) if a node without
    ///   edges is in none of the SCCs
    /// - [`CyclicCondensation`](ContractViolation::CyclicCondensation) if the
    ///   SCCs are not maximal, so the contracted graph still has a cycle
    pub fn build_condensation_graph_with(
        &self,
        precomputed: &Precomputed<'_>,
    ) -> Result<CondensationGraph> {
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

        let mut components: Vec<CondensationComponent> = sccs
            .iter()
            .map(|scc| CondensationComponent {
                id: scc.id,
                nodes: scc.nodes.clone(),
                has_loop: !scc.acyclic,
                entry_edges: Vec::new(),
                exit_edges: Vec::new(),
                internal_edges: Vec::new(),
                feedback_edges: Vec::new(),
            })
            .collect();

        let mut node_component: HashMap<NodeId, usize> = HashMap::new();
        let mut slot_of: HashMap<&NodeId, usize> = HashMap::new();
        for (slot, scc) in sccs.iter().enumerate() {
            for node in &scc.nodes {
                if !self.has_node(node) {
                    warn!(
                        %node,
                        component = scc.id,
                        "component lists a node the graph does not have"
                    );
                    return Err(ContractViolation::UnknownComponentMember {
                        node: node.clone(),
                        component: scc.id,
                    }
                    .into());
                }
                if let Some(&earlier) = slot_of.get(node) {
                    warn!(
                        %node,
                        first = sccs[earlier].id,
                        second = scc.id,
                        "node is listed in two components"
                    );
                    return Err(ContractViolation::NodeInSeveralComponents {
                        node: node.clone(),
                        first: sccs[earlier].id,
                        second: scc.id,
                    }
                    .into());
                }
                node_component.insert(node.clone(), scc.id);
                slot_of.insert(node, slot);
            }
        }

        let mut arcs: HashSet<(usize, usize)> = HashSet::new();
        let mut next_slots: Vec<Vec<usize>> = vec![Vec::new(); components.len()];
        let mut in_degree: Vec<usize> = vec![0; components.len()];

        for edge in self.edges() {
            let resolve = |node: &NodeId| {
                slot_of.get(node).copied().ok_or_else(|| {
                    warn!(edge = %edge.id, %node, "edge endpoint has no component");
                    ContractViolation::UnresolvedComponent {
                        edge: edge.id.clone(),
                        node: node.clone(),
                    }
                })
            };
            let from = resolve(&edge.from)?;
            let to = resolve(&edge.to)?;

            if from == to {
                components[from].internal_edges.push(edge.id.clone());
                if classification.kind(&edge.id) == Some(EdgeKind::Back) {
                    components[from].feedback_edges.push(edge.id.clone());
                }
                continue;
            }

            components[from].exit_edges.push(edge.id.clone());
            components[to].entry_edges.push(edge.id.clone());
            if arcs.insert((from, to)) {
                next_slots[from].push(to);
                in_degree[to] += 1;
            }
        }

        // Edge endpoints are resolved above; nodes without edges are checked here.
        if let Some(node) = self.node_ids().iter().find(|id| !slot_of.contains_key(id)) {
            warn!(%node, "node is in no supplied component");
            return Err(ContractViolation::NodeNotCovered { node: node.clone() }.into());
        }

        let mut frontier: VecDeque<usize> = (0..components.len())
            .filter(|&slot| in_degree[slot] == 0)
            .collect();
        let mut topological_order = Vec::with_capacity(components.len());
        while let Some(slot) = frontier.pop_front() {
            topological_order.push(components[slot].id);
            for &next in &next_slots[slot] {
                in_degree[next] -= 1;
                if in_degree[next] == 0 {
                    frontier.push_back(next);
                }
            }
        }

        if topological_order.len() != components.len() {
            warn!(
                covered = topological_order.len(),
                total = components.len(),
                "precomputed components do not contract to an acyclic graph"
            );
            return Err(ContractViolation::CyclicCondensation {
                covered: topological_order.len(),
                total: components.len(),
            }
            .into());
        }

        debug!(
            components = components.len(),
            arcs = arcs.len(),
            "built condensation graph"
        );
        Ok(CondensationGraph {
            components,
            node_component,
            topological_order,
        })
    }
}
