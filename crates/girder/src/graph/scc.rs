//! Strongly connected components via an iterative Tarjan traversal.

use super::dense::{DenseView, Frame};
use super::DependencyGraph;
use crate::domain::NodeId;
use serde::Serialize;
use tracing::debug;

/// A strongly connected component.
///
/// Identifiers partition the node set once per call and carry no ordering
/// meaning.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Scc {
    /// Component identifier, unique within one analysis.
    pub id: usize,
    /// Member nodes.
    pub nodes: Vec<NodeId>,
    /// `true` iff the component is a single node without a self-loop.
    pub acyclic: bool,
}

impl Scc {
    /// Number of member nodes.
    #[must_use]
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    /// Returns `true` if the component has no members.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Returns `true` if `id` is a member.
    #[must_use]
    pub fn contains(&self, id: &NodeId) -> bool {
        self.nodes.contains(id)
    }
}

/// Per-node Tarjan bookkeeping.
#[derive(Clone, Copy)]
struct Visit {
    index: usize,
    lowlink: usize,
    on_stack: bool,
}

impl<N, E> DependencyGraph<N, E> {
    /// Partition the nodes into strongly connected components.
    ///
    /// Tarjan's algorithm with an explicit work stack, so stack usage does not
    /// grow with path length. Roots are tried in node insertion order.
    #[must_use]
    pub fn find_sccs(&self) -> Vec<Scc> {
        let view = DenseView::new(self);
        let mut visits: Vec<Option<Visit>> = vec![None; view.len()];
        let mut counter = 0;
        let mut stack: Vec<usize> = Vec::new();
        let mut sccs: Vec<Scc> = Vec::new();

        for root in 0..view.len() {
            if visits[root].is_some() {
                continue;
            }

            visits[root] = Some(Visit {
                index: counter,
                lowlink: counter,
                on_stack: true,
            });
            counter += 1;
            stack.push(root);
            let mut frames = vec![Frame::new(root)];

            while let Some(frame) = frames.last_mut() {
                let v = frame.node;

                if let Some(w) = frame.next_successor(&view) {
                    match visits[w] {
                        None => {
                            visits[w] = Some(Visit {
                                index: counter,
                                lowlink: counter,
                                on_stack: true,
                            });
                            counter += 1;
                            stack.push(w);
                            frames.push(Frame::new(w));
                        }
                        Some(seen) if seen.on_stack => {
                            if let Some(visit) = visits[v].as_mut() {
                                visit.lowlink = visit.lowlink.min(seen.index);
                            }
                        }
                        Some(_) => {}
                    }
                    continue;
                }

                frames.pop();
                let Some(done) = visits[v] else { continue };

                if let Some(parent) = frames.last() {
                    if let Some(visit) = visits[parent.node].as_mut() {
                        visit.lowlink = visit.lowlink.min(done.lowlink);
                    }
                }

                if done.lowlink == done.index {
                    let mut members = Vec::new();
                    while let Some(w) = stack.pop() {
                        if let Some(visit) = visits[w].as_mut() {
                            visit.on_stack = false;
                        }
                        members.push(view.ids[w].clone());
                        if w == v {
                            break;
                        }
                    }
                    members.reverse();
                    let acyclic = members.len() == 1 && !self.has_self_loop(&members[0]);
                    sccs.push(Scc {
                        id: sccs.len(),
                        nodes: members,
                        acyclic,
                    });
                }
            }
        }

        debug!(
            components = sccs.len(),
            cyclic = sccs.iter().filter(|s| !s.acyclic).count(),
            "computed strongly connected components"
        );
        sccs
    }
}

#[cfg(test)]
mod tests {
    use crate::DependencyGraph;
    use std::collections::BTreeSet;

    fn build(nodes: &[&str], edges: &[(&str, &str)]) -> DependencyGraph {
        let mut graph = DependencyGraph::new();
        for n in nodes {
            graph.add_node(*n, None).unwrap();
        }
        for (from, to) in edges {
            graph.add_edge(*from, *to, None).unwrap();
        }
        graph
    }

    fn member_sets(graph: &DependencyGraph) -> BTreeSet<BTreeSet<String>> {
        graph
            .find_sccs()
            .into_iter()
            .map(|scc| scc.nodes.into_iter().map(|n| n.0).collect())
            .collect()
    }

    #[test]
    fn acyclic_chain_has_singleton_components() {
        let graph = build(&["a", "b", "c"], &[("a", "b"), ("b", "c")]);
        let sccs = graph.find_sccs();

        assert_eq!(sccs.len(), 3);
        assert!(sccs.iter().all(|s| s.acyclic && s.len() == 1));
    }

    #[test]
    fn cycle_members_share_a_component() {
        let graph = build(
            &["a", "b", "c", "d"],
            &[("a", "b"), ("b", "c"), ("c", "a"), ("c", "d")],
        );

        let expected: BTreeSet<BTreeSet<String>> = [
            ["a", "b", "c"].iter().map(ToString::to_string).collect(),
            ["d"].iter().map(ToString::to_string).collect(),
        ]
        .into_iter()
        .collect();
        assert_eq!(member_sets(&graph), expected);

        let cyclic: Vec<_> = graph.find_sccs().into_iter().filter(|s| !s.acyclic).collect();
        assert_eq!(cyclic.len(), 1);
        assert_eq!(cyclic[0].len(), 3);
    }

    #[test]
    fn self_loop_singleton_is_cyclic() {
        let graph = build(&["a", "b"], &[("a", "a"), ("a", "b")]);
        let sccs = graph.find_sccs();

        let a = sccs.iter().find(|s| s.nodes[0].as_str() == "a").unwrap();
        let b = sccs.iter().find(|s| s.nodes[0].as_str() == "b").unwrap();
        assert!(!a.acyclic);
        assert!(b.acyclic);
    }

    #[test]
    fn ids_partition_the_node_set() {
        let graph = build(
            &["a", "b", "c", "d", "e"],
            &[("a", "b"), ("b", "a"), ("c", "d"), ("d", "e"), ("e", "c")],
        );
        let sccs = graph.find_sccs();

        let ids: Vec<_> = sccs.iter().map(|s| s.id).collect();
        assert_eq!(ids, (0..sccs.len()).collect::<Vec<_>>());
        assert_eq!(sccs.iter().map(|s| s.len()).sum::<usize>(), 5);
    }

    #[test]
    fn deep_chain_does_not_overflow_the_stack() {
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
        graph.add_edge((n - 1).to_string(), "0", None).unwrap();

        let sccs = graph.find_sccs();
        assert_eq!(sccs.len(), 1);
        assert_eq!(sccs[0].len(), n);
    }
}
