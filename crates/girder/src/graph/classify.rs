//! Depth-first edge classification.
//!
//! One traversal records a discovery and a finish timestamp per node and the
//! node pair each node was discovered through. Every edge is then labelled
//! from those timestamps:
//!
//! - `Tree`: the first edge of the pair that discovered its target
//! - `Back`: the target is an ancestor of the source (or the source itself),
//!   i.e. it was on the traversal stack when the edge was explored
//! - `Forward`: the target's interval nests inside the source's
//! - `Cross`: anything else
//!
//! Parallel edges after the first are labelled by the same interval rule, so a
//! second edge along a tree pair is `Forward`.

use super::dense::{DenseView, Frame};
use super::DependencyGraph;
use crate::domain::EdgeId;
use serde::Serialize;
use std::collections::{HashMap, HashSet};
use tracing::debug;

/// Depth-first classification of an edge.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum EdgeKind {
    /// Discovered an unvisited node.
    Tree,
    /// Points to an ancestor; closes a cycle.
    Back,
    /// Points to a non-child descendant.
    Forward,
    /// Points into an already finished, unrelated subtree.
    Cross,
}

/// Edge kinds in edge insertion order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct EdgeClassification {
    kinds: Vec<(EdgeId, EdgeKind)>,
    #[serde(skip)]
    position: HashMap<EdgeId, usize>,
}

impl EdgeClassification {
    /// Build a classification from explicit `(edge, kind)` pairs.
    ///
    /// Later duplicates of an edge id replace earlier ones.
    pub fn from_pairs(pairs: impl IntoIterator<Item = (EdgeId, EdgeKind)>) -> Self {
        let mut classification = Self::default();
        for (id, kind) in pairs {
            classification.insert(id, kind);
        }
        classification
    }

    fn insert(&mut self, id: EdgeId, kind: EdgeKind) {
        if let Some(&at) = self.position.get(&id) {
            self.kinds[at].1 = kind;
        } else {
            self.position.insert(id.clone(), self.kinds.len());
            self.kinds.push((id, kind));
        }
    }

    /// Kind of one edge, if it was classified.
    #[must_use]
    pub fn kind(&self, id: impl AsRef<str>) -> Option<EdgeKind> {
        self.position.get(id.as_ref()).map(|&at| self.kinds[at].1)
    }

    /// Edges classified `Back`, in insertion order.
    pub fn back_edges(&self) -> impl Iterator<Item = &EdgeId> {
        self.kinds
            .iter()
            .filter(|(_, kind)| *kind == EdgeKind::Back)
            .map(|(id, _)| id)
    }

    /// Number of edges with the given kind.
    #[must_use]
    pub fn count(&self, kind: EdgeKind) -> usize {
        self.kinds.iter().filter(|(_, k)| *k == kind).count()
    }

    /// All `(edge, kind)` pairs in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = (&EdgeId, EdgeKind)> {
        self.kinds.iter().map(|(id, kind)| (id, *kind))
    }

    /// Number of classified edges.
    #[must_use]
    pub fn len(&self) -> usize {
        self.kinds.len()
    }

    /// Returns `true` if no edge was classified.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.kinds.is_empty()
    }
}

impl<N, E> DependencyGraph<N, E> {
    /// Classify every edge as tree, back, forward, or cross.
    ///
    /// Traversal roots and successor order follow insertion order, so the
    /// result is deterministic for a given construction sequence.
    #[must_use]
    pub fn classify_edges(&self) -> EdgeClassification {
        let view = DenseView::new(self);
        let n = view.len();
        let mut discovered: Vec<Option<usize>> = vec![None; n];
        let mut finished: Vec<usize> = vec![0; n];
        let mut clock = 0;
        let mut tree_pairs: HashSet<(usize, usize)> = HashSet::new();

        for root in 0..n {
            if discovered[root].is_some() {
                continue;
            }
            discovered[root] = Some(clock);
            clock += 1;
            let mut frames = vec![Frame::new(root)];

            while let Some(frame) = frames.last_mut() {
                let u = frame.node;
                if let Some(v) = frame.next_successor(&view) {
                    if discovered[v].is_none() {
                        discovered[v] = Some(clock);
                        clock += 1;
                        tree_pairs.insert((u, v));
                        frames.push(Frame::new(v));
                    }
                    continue;
                }
                finished[u] = clock;
                clock += 1;
                frames.pop();
            }
        }

        let mut classification = EdgeClassification::default();
        for edge in self.edges() {
            let (Some(&u), Some(&v)) = (view.index.get(&edge.from), view.index.get(&edge.to))
            else {
                continue;
            };
            let (Some(du), Some(dv)) = (discovered[u], discovered[v]) else {
                continue;
            };
            let (fu, fv) = (finished[u], finished[v]);

            // `remove` hands the tree label to the first parallel edge only.
            let kind = if tree_pairs.remove(&(u, v)) {
                EdgeKind::Tree
            } else if dv <= du && fu <= fv {
                EdgeKind::Back
            } else if du < dv && fv < fu {
                EdgeKind::Forward
            } else {
                EdgeKind::Cross
            };
            classification.insert(edge.id.clone(), kind);
        }

        debug!(
            tree = classification.count(EdgeKind::Tree),
            back = classification.count(EdgeKind::Back),
            forward = classification.count(EdgeKind::Forward),
            cross = classification.count(EdgeKind::Cross),
            "classified edges"
        );
        classification
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::GraphOptions;

    fn build(nodes: &[&str], edges: &[(&str, &str)]) -> DependencyGraph {
        let mut graph = DependencyGraph::with_options(GraphOptions {
            allow_multi_edges: true,
            ..GraphOptions::default()
        });
        for n in nodes {
            graph.add_node(*n, None).unwrap();
        }
        for (from, to) in edges {
            graph.add_edge(*from, *to, None).unwrap();
        }
        graph
    }

    #[test]
    fn labels_all_four_kinds() {
        // a -> b -> c, a -> c (forward), c -> a (back), d -> b (cross)
        let graph = build(
            &["a", "b", "c", "d"],
            &[("a", "b"), ("b", "c"), ("a", "c"), ("c", "a"), ("d", "b")],
        );
        let classes = graph.classify_edges();

        assert_eq!(classes.kind("1:a|1:b"), Some(EdgeKind::Tree));
        assert_eq!(classes.kind("1:b|1:c"), Some(EdgeKind::Tree));
        assert_eq!(classes.kind("1:a|1:c"), Some(EdgeKind::Forward));
        assert_eq!(classes.kind("1:c|1:a"), Some(EdgeKind::Back));
        assert_eq!(classes.kind("1:d|1:b"), Some(EdgeKind::Cross));
        assert_eq!(classes.len(), 5);
    }

    #[test]
    fn self_loop_is_back() {
        let graph = build(&["a"], &[("a", "a")]);
        assert_eq!(graph.classify_edges().kind("1:a|1:a"), Some(EdgeKind::Back));
    }

    #[test]
    fn parallel_tree_edge_is_forward() {
        let graph = build(&["a", "b"], &[("a", "b"), ("a", "b")]);
        let classes = graph.classify_edges();

        assert_eq!(classes.kind("1:a|1:b"), Some(EdgeKind::Tree));
        assert_eq!(classes.kind("1:a|1:b#1"), Some(EdgeKind::Forward));
    }

    #[test]
    fn parallel_back_edges_are_all_back() {
        let graph = build(&["a", "b"], &[("a", "b"), ("b", "a"), ("b", "a")]);
        let classes = graph.classify_edges();

        let back: Vec<_> = classes.back_edges().map(EdgeId::as_str).collect();
        assert_eq!(back, vec!["1:b|1:a", "1:b|1:a#1"]);
    }

    #[test]
    fn acyclic_graph_has_no_back_edges() {
        let graph = build(&["a", "b", "c"], &[("a", "b"), ("b", "c"), ("a", "c")]);
        assert_eq!(graph.classify_edges().count(EdgeKind::Back), 0);
    }

    #[test]
    fn deep_ring_does_not_overflow_the_stack() {
        let mut graph: DependencyGraph = DependencyGraph::new();
        let n = 200_000;
        for i in 0..n {
            graph.add_node(i.to_string(), None).unwrap();
        }
        for i in 1..n {
            graph
                .add_edge((i - 1).to_string(), i.to_string(), None)
                .unwrap();
        }
        let closing = graph.add_edge((n - 1).to_string(), "0", None).unwrap();

        let classes = graph.classify_edges();

        assert_eq!(classes.len(), n);
        assert_eq!(classes.count(EdgeKind::Tree), n - 1);
        assert_eq!(classes.count(EdgeKind::Back), 1);
        assert_eq!(classes.kind(&closing), Some(EdgeKind::Back));
    }

    #[test]
    fn from_pairs_keeps_the_last_kind() {
        let classes = EdgeClassification::from_pairs([
            (EdgeId::from("x"), EdgeKind::Tree),
            (EdgeId::from("x"), EdgeKind::Back),
        ]);
        assert_eq!(classes.len(), 1);
        assert_eq!(classes.kind("x"), Some(EdgeKind::Back));
    }
}
