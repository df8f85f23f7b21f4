//! The mutable dependency graph engine.
//!
//! [`DependencyGraph`] owns its nodes, edges, and three derived indices:
//!
//! - `forward`: node -> distinct successors, in first-edge insertion order
//! - `reverse`: node -> distinct predecessors, in first-edge insertion order
//! - `edge_index`: encoded ordered pair -> every edge id of that pair
//!
//! An edge `u -> v` exists iff `v` is in `forward[u]` and `u` is in
//! `reverse[v]`. Parallel edges share one adjacency entry and are told apart
//! only through `edge_index`.
//!
//! ## Edge Direction Convention
//!
//! Edges point from **dependent -> dependency** when the graph models tasks:
//! if `deploy` needs `build`, the edge is `deploy -> build`. The engine itself
//! attaches no meaning to direction; the convention only matters when reading
//! a topological order (dependents come first).
//!
//! ## Lifecycle
//!
//! The graph is append-only. Nodes and edges can be added but never removed
//! or updated; [`DependencyGraph::clear`] resets everything. Every analysis
//! (SCCs, classification, cycles, condensation) is recomputed on each call.
//!
//! ## Thread Safety
//!
//! There is no internal locking. Analyses take `&self` and can run
//! concurrently with each other; mutation takes `&mut self`, so the borrow
//! checker already rules out querying during mutation.

mod analysis;
mod classify;
mod condensation;
mod cycles;
mod dense;
mod keys;
mod scc;
mod topo;

pub use analysis::GraphAnalysis;
pub use classify::{EdgeClassification, EdgeKind};
pub use condensation::{CondensationComponent, CondensationGraph};
pub use cycles::Cycle;
pub use scc::Scc;

use crate::config::GraphOptions;
use crate::domain::{Edge, EdgeId, Node, NodeId};
use crate::error::{Error, Result};
use girder_algo::Successors;
use std::collections::HashMap;
use tracing::{debug, error, trace};

/// Analysis results a caller already holds and wants reused.
///
/// Passing precomputed data skips recomputation; it must describe the
/// current graph or the consuming operation reports a contract violation.
#[derive(Debug, Clone, Copy, Default)]
pub struct Precomputed<'a> {
    /// Strongly connected components from [`DependencyGraph::find_sccs`].
    pub sccs: Option<&'a [Scc]>,
    /// Edge kinds from [`DependencyGraph::classify_edges`].
    pub classification: Option<&'a EdgeClassification>,
}

/// A directed graph of nodes with optional payloads `N` and edges with
/// optional payloads `E`.
///
/// # Examples
///
/// ```
/// use girder::{DependencyGraph, NodeId};
///
/// let mut graph: DependencyGraph = DependencyGraph::new();
/// graph.add_node("deploy", None)?;
/// graph.add_node("build", None)?;
/// graph.add_edge("deploy", "build", None)?;
///
/// assert_eq!(graph.successors("deploy"), [NodeId::from("build")]);
/// assert_eq!(
///     graph.topological_sort(),
///     Some(vec!["deploy".into(), "build".into()])
/// );
/// # Ok::<(), girder::Error>(())
/// ```
#[derive(Debug, Clone)]
pub struct DependencyGraph<N = (), E = ()> {
    options: GraphOptions,

    /// Nodes by identifier; `node_order` keeps insertion order.
    nodes: HashMap<NodeId, Node<N>>,
    node_order: Vec<NodeId>,

    /// Edges by identifier; `edge_order` keeps insertion order.
    edges: HashMap<EdgeId, Edge<E>>,
    edge_order: Vec<EdgeId>,

    forward: HashMap<NodeId, Vec<NodeId>>,
    reverse: HashMap<NodeId, Vec<NodeId>>,

    /// Encoded ordered pair -> edge ids of that pair (several in multi-edge mode).
    edge_index: HashMap<String, Vec<EdgeId>>,
}

impl<N, E> Default for DependencyGraph<N, E> {
    fn default() -> Self {
        Self::with_options(GraphOptions::default())
    }
}

impl<N, E> DependencyGraph<N, E> {
    /// Create an empty graph with default options.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Create an empty graph with the given options.
    #[must_use]
    pub fn with_options(options: GraphOptions) -> Self {
        Self {
            options,
            nodes: HashMap::new(),
            node_order: Vec::new(),
            edges: HashMap::new(),
            edge_order: Vec::new(),
            forward: HashMap::new(),
            reverse: HashMap::new(),
            edge_index: HashMap::new(),
        }
    }

    /// The options this graph was created with.
    #[must_use]
    pub fn options(&self) -> &GraphOptions {
        &self.options
    }

    /// Add a node.
    ///
    /// # Errors
    ///
    /// Returns [`Error::DuplicateNode`] if `id` is already present.
    pub fn add_node(&mut self, id: impl Into<NodeId>, metadata: Option<N>) -> Result<()> {
        let id = id.into();
        if self.nodes.contains_key(&id) {
            return Err(Error::DuplicateNode(id));
        }

        self.forward.insert(id.clone(), Vec::new());
        self.reverse.insert(id.clone(), Vec::new());
        self.node_order.push(id.clone());
        trace!(node = %id, "added node");
        self.nodes.insert(id.clone(), Node { id, metadata });
        Ok(())
    }

    /// Add an edge `from -> to` and return its derived identifier.
    ///
    /// All preconditions are checked before anything is stored.
    ///
    /// # Errors
    ///
    /// - [`Error::UnknownEdgeEndpoint`] if either node is missing
    /// - [`Error::SelfLoopNotAllowed`] if `from == to` and self-loops are disabled
    /// - [`Error::DuplicateEdge`] if the pair already has an edge and parallel
    ///   edges are disabled
    /// - [`Error::InvariantViolation`] if construction-time validation is on
    ///   and the new edge is not visible in both adjacency indices; the edge is
    ///   removed again before returning
    pub fn add_edge(
        &mut self,
        from: impl Into<NodeId>,
        to: impl Into<NodeId>,
        metadata: Option<E>,
    ) -> Result<EdgeId> {
        let from = from.into();
        let to = to.into();

        for endpoint in [&from, &to] {
            if !self.nodes.contains_key(endpoint) {
                return Err(Error::UnknownEdgeEndpoint {
                    missing: endpoint.clone(),
                    from: from.clone(),
                    to: to.clone(),
                });
            }
        }

        if from == to && !self.options.allow_self_loops {
            return Err(Error::SelfLoopNotAllowed(from));
        }

        let key = keys::pair_key(&from, &to);
        let ordinal = self.edge_index.get(&key).map_or(0, Vec::len);
        if ordinal > 0 && !self.options.allow_multi_edges {
            return Err(Error::DuplicateEdge { from, to });
        }

        let id = keys::edge_id(&key, ordinal);

        // Parallel edges share the adjacency entry created by the first one.
        if ordinal == 0 {
            self.forward
                .entry(from.clone())
                .or_default()
                .push(to.clone());
            self.reverse
                .entry(to.clone())
                .or_default()
                .push(from.clone());
        }
        self.edge_index.entry(key.clone()).or_default().push(id.clone());
        self.edge_order.push(id.clone());
        self.edges.insert(
            id.clone(),
            Edge {
                id: id.clone(),
                from: from.clone(),
                to: to.clone(),
                metadata,
            },
        );

        if self.options.validate_on_construction {
            if let Err(err) = self.check_edge_indexed(&id, &from, &to) {
                self.unlink_edge(&id, &key, &from, &to, ordinal == 0);
                return Err(err);
            }
        }

        trace!(edge = %id, %from, %to, "added edge");
        Ok(id)
    }

    /// Undo the stores `add_edge` made for `id`, so a rejected edge is not counted.
    fn unlink_edge(
        &mut self,
        id: &EdgeId,
        key: &str,
        from: &NodeId,
        to: &NodeId,
        owns_adjacency: bool,
    ) {
        self.edges.remove(id);
        if self.edge_order.last() == Some(id) {
            self.edge_order.pop();
        }
        if let Some(ids) = self.edge_index.get_mut(key) {
            ids.retain(|existing| existing != id);
            if ids.is_empty() {
                self.edge_index.remove(key);
            }
        }
        if owns_adjacency {
            if let Some(successors) = self.forward.get_mut(from) {
                successors.retain(|next| next != to);
            }
            if let Some(predecessors) = self.reverse.get_mut(to) {
                predecessors.retain(|prev| prev != from);
            }
        }
    }

    /// Verify that a freshly inserted edge is mirrored by every index.
    fn check_edge_indexed(&self, id: &EdgeId, from: &NodeId, to: &NodeId) -> Result<()> {
        let detail = if !self.successors(from).contains(to) {
            Some(format!("{to} missing from forward index of {from}"))
        } else if !self.predecessors(to).contains(from) {
            Some(format!("{from} missing from reverse index of {to}"))
        } else if !self
            .edge_index
            .get(&keys::pair_key(from, to))
            .is_some_and(|ids| ids.contains(id))
        {
            Some("edge id missing from edge index".to_string())
        } else {
            None
        };

        match detail {
            Some(detail) => {
                error!(edge = %id, %detail, "adjacency indices are inconsistent");
                Err(Error::InvariantViolation {
                    edge: id.clone(),
                    detail,
                })
            }
            None => Ok(()),
        }
    }

    /// Distinct successors of `id`, or an empty slice for an unknown node.
    #[must_use]
    pub fn successors(&self, id: impl AsRef<str>) -> &[NodeId] {
        self.forward.get(id.as_ref()).map(Vec::as_slice).unwrap_or_default()
    }

    /// Distinct predecessors of `id`, or an empty slice for an unknown node.
    #[must_use]
    pub fn predecessors(&self, id: impl AsRef<str>) -> &[NodeId] {
        self.reverse.get(id.as_ref()).map(Vec::as_slice).unwrap_or_default()
    }

    /// Distinct successors of `id`.
    ///
    /// # Errors
    ///
    /// Returns [`Error::UnknownNode`] if `id` is not in the graph.
    pub fn successors_strict(&self, id: impl AsRef<str>) -> Result<&[NodeId]> {
        let id = id.as_ref();
        if !self.has_node(id) {
            return Err(Error::UnknownNode(NodeId::from(id)));
        }
        Ok(self.successors(id))
    }

    /// Distinct predecessors of `id`.
    ///
    /// # Errors
    ///
    /// Returns [`Error::UnknownNode`] if `id` is not in the graph.
    pub fn predecessors_strict(&self, id: impl AsRef<str>) -> Result<&[NodeId]> {
        let id = id.as_ref();
        if !self.has_node(id) {
            return Err(Error::UnknownNode(NodeId::from(id)));
        }
        Ok(self.predecessors(id))
    }

    /// Returns `true` if the node exists.
    #[must_use]
    pub fn has_node(&self, id: impl AsRef<str>) -> bool {
        self.nodes.contains_key(id.as_ref())
    }

    /// Returns `true` if at least one edge `from -> to` exists.
    #[must_use]
    pub fn has_edge(&self, from: impl AsRef<str>, to: impl AsRef<str>) -> bool {
        let key = keys::pair_key(&NodeId::from(from.as_ref()), &NodeId::from(to.as_ref()));
        self.edge_index.get(&key).is_some_and(|ids| !ids.is_empty())
    }

    /// Look up a node.
    #[must_use]
    pub fn node(&self, id: impl AsRef<str>) -> Option<&Node<N>> {
        self.nodes.get(id.as_ref())
    }

    /// Look up an edge by its identifier.
    #[must_use]
    pub fn edge(&self, id: impl AsRef<str>) -> Option<&Edge<E>> {
        self.edges.get(id.as_ref())
    }

    /// Every edge `from -> to`, parallel edges included, in insertion order.
    #[must_use]
    pub fn edges_between(&self, from: impl AsRef<str>, to: impl AsRef<str>) -> Vec<&Edge<E>> {
        let key = keys::pair_key(&NodeId::from(from.as_ref()), &NodeId::from(to.as_ref()));
        self.edge_index
            .get(&key)
            .map(|ids| ids.iter().filter_map(|id| self.edges.get(id)).collect())
            .unwrap_or_default()
    }

    /// Node identifiers in insertion order.
    #[must_use]
    pub fn node_ids(&self) -> &[NodeId] {
        &self.node_order
    }

    /// Nodes in insertion order.
    pub fn nodes(&self) -> impl Iterator<Item = &Node<N>> {
        self.node_order.iter().filter_map(|id| self.nodes.get(id))
    }

    /// Edges in insertion order.
    pub fn edges(&self) -> impl Iterator<Item = &Edge<E>> {
        self.edge_order.iter().filter_map(|id| self.edges.get(id))
    }

    /// Number of nodes.
    #[must_use]
    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    /// Number of edges, parallel edges counted individually.
    #[must_use]
    pub fn edge_count(&self) -> usize {
        self.edges.len()
    }

    /// Returns `true` if the graph has no nodes.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Number of distinct successors.
    #[must_use]
    pub fn out_degree(&self, id: impl AsRef<str>) -> usize {
        self.successors(id).len()
    }

    /// Number of distinct predecessors.
    #[must_use]
    pub fn in_degree(&self, id: impl AsRef<str>) -> usize {
        self.predecessors(id).len()
    }

    /// Remove every node and edge. Options are kept.
    pub fn clear(&mut self) {
        debug!(
            nodes = self.nodes.len(),
            edges = self.edges.len(),
            "clearing dependency graph"
        );
        self.nodes.clear();
        self.node_order.clear();
        self.edges.clear();
        self.edge_order.clear();
        self.forward.clear();
        self.reverse.clear();
        self.edge_index.clear();
    }

    /// Returns `true` if a self-loop edge exists on `id`.
    pub(crate) fn has_self_loop(&self, id: &NodeId) -> bool {
        self.has_edge(id, id)
    }
}

impl<N, E> Successors<NodeId> for DependencyGraph<N, E> {
    fn successors(&self, node: &NodeId) -> Vec<NodeId> {
        DependencyGraph::successors(self, node).to_vec()
    }
}
