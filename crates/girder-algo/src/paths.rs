//! Path enumeration and longest paths in acyclic graphs.

use crate::error::{AlgoError, Result};
use crate::successors::Successors;
use std::collections::{HashMap, HashSet};
use std::fmt::Debug;
use std::hash::Hash;
use tracing::trace;

/// Default edge-count ceiling for [`find_all_paths`].
///
/// Simple-path enumeration is exponential in the worst case; the ceiling
/// keeps a query on a densely connected graph from running away.
pub const DEFAULT_MAX_DEPTH: i64 = 100;

/// One level of the explicit depth-first stack: a node's successors and how
/// many of them have been tried.
struct Frame<T> {
    successors: Vec<T>,
    cursor: usize,
}

impl<T: Clone> Frame<T> {
    fn new(successors: Vec<T>) -> Self {
        Self {
            successors,
            cursor: 0,
        }
    }

    fn next(&mut self) -> Option<T> {
        let next = self.successors.get(self.cursor).cloned();
        self.cursor += 1;
        next
    }
}

/// Enumerates every simple path from `from` to `to` with at most `max_depth`
/// edges.
///
/// No node repeats within a path. Paths are returned in depth-first discovery
/// order. A query from a node to itself yields the single one-node path.
///
/// # Errors
///
/// Returns [`AlgoError::NegativeDepth`] when `max_depth < 0`.
pub fn find_all_paths<T, S>(from: &T, to: &T, succ: &S, max_depth: i64) -> Result<Vec<Vec<T>>>
where
    T: Clone + Eq + Hash,
    S: Successors<T> + ?Sized,
{
    let Ok(limit) = usize::try_from(max_depth) else {
        return Err(AlgoError::NegativeDepth { max_depth });
    };

    if from == to {
        return Ok(vec![vec![from.clone()]]);
    }

    let mut paths = Vec::new();
    let mut path = vec![from.clone()];
    let mut on_path: HashSet<T> = HashSet::from([from.clone()]);
    let mut frames = vec![Frame::new(succ.successors(from))];

    while let Some(frame) = frames.last_mut() {
        let Some(next) = frame.next() else {
            frames.pop();
            if let Some(done) = path.pop() {
                on_path.remove(&done);
            }
            continue;
        };

        // Taking this edge would make the path `path.len()` edges long.
        if path.len() > limit || on_path.contains(&next) {
            continue;
        }

        if next == *to {
            let mut found = path.clone();
            found.push(next);
            paths.push(found);
            continue;
        }

        let successors = if path.len() < limit {
            succ.successors(&next)
        } else {
            Vec::new()
        };
        on_path.insert(next.clone());
        path.push(next);
        frames.push(Frame::new(successors));
    }

    trace!(found = paths.len(), max_depth, "enumerated simple paths");
    Ok(paths)
}

/// The result of a longest-path query on an acyclic graph.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LongestPath<T> {
    /// Number of edges on the path.
    pub length: usize,
    /// Nodes from the start of the path to its end.
    pub path: Vec<T>,
}

/// Finds a longest path (by edge count) using a caller-supplied topological
/// order of `nodes`.
///
/// Among equally long candidates the one ending earliest in `topo_order` wins.
/// A graph without edges yields length 0 and a single-node path (or an empty
/// path when `nodes` is empty).
///
/// # Errors
///
/// See [`longest_path_dag_slots`]; a dense order can only fail on size,
/// coverage, or edge direction.
pub fn longest_path_dag<T, S>(nodes: &[T], succ: &S, topo_order: &[T]) -> Result<LongestPath<T>>
where
    T: Clone + Eq + Hash + Debug,
    S: Successors<T> + ?Sized,
{
    longest_path_in_order(nodes, succ, topo_order.iter().map(Some))
}

/// Like [`longest_path_dag`], for an order whose slots may be empty.
///
/// # Errors
///
/// Validation runs in this order and stops at the first failure:
///
/// 1. [`AlgoError::MissingOrderEntry`] if a slot is `None`.
/// 2. [`AlgoError::OrderSizeMismatch`] if the order length differs from
///    `nodes.len()`, then [`AlgoError::OrderOmitsNode`] if some node has no
///    position.
/// 3. [`AlgoError::OrderOmitsNode`] if an edge leads to a node outside the
///    order, or [`AlgoError::BackwardEdge`] if an edge's source is not strictly
///    before its target.
pub fn longest_path_dag_slots<T, S>(
    nodes: &[T],
    succ: &S,
    topo_order: &[Option<T>],
) -> Result<LongestPath<T>>
where
    T: Clone + Eq + Hash + Debug,
    S: Successors<T> + ?Sized,
{
    longest_path_in_order(nodes, succ, topo_order.iter().map(Option::as_ref))
}

fn longest_path_in_order<'a, T, S, I>(nodes: &[T], succ: &S, slots: I) -> Result<LongestPath<T>>
where
    T: Clone + Eq + Hash + Debug + 'a,
    S: Successors<T> + ?Sized,
    I: Iterator<Item = Option<&'a T>>,
{
    let mut order: Vec<&T> = Vec::new();
    for (position, slot) in slots.enumerate() {
        let Some(node) = slot else {
            return Err(AlgoError::MissingOrderEntry { position });
        };
        order.push(node);
    }

    if order.len() != nodes.len() {
        return Err(AlgoError::OrderSizeMismatch {
            expected: nodes.len(),
            actual: order.len(),
        });
    }

    let position: HashMap<&T, usize> = order.iter().enumerate().map(|(i, n)| (*n, i)).collect();
    if let Some(omitted) = nodes.iter().find(|n| !position.contains_key(n)) {
        return Err(AlgoError::OrderOmitsNode {
            node: format!("{omitted:?}"),
        });
    }

    // Successor positions per order slot, validated once and reused below.
    let mut forward: Vec<Vec<usize>> = Vec::with_capacity(order.len());
    for (i, node) in order.iter().enumerate() {
        let mut targets = Vec::new();
        for next in succ.successors(node) {
            let Some(&j) = position.get(&next) else {
                return Err(AlgoError::OrderOmitsNode {
                    node: format!("{next:?}"),
                });
            };
            if j <= i {
                return Err(AlgoError::BackwardEdge {
                    from: format!("{node:?}"),
                    to: format!("{next:?}"),
                });
            }
            targets.push(j);
        }
        forward.push(targets);
    }

    let mut distance = vec![0_usize; order.len()];
    let mut predecessor: Vec<Option<usize>> = vec![None; order.len()];
    for (i, targets) in forward.iter().enumerate() {
        for &j in targets {
            if distance[i] + 1 > distance[j] {
                distance[j] = distance[i] + 1;
                predecessor[j] = Some(i);
            }
        }
    }

    let mut best: Option<usize> = None;
    for (i, &d) in distance.iter().enumerate() {
        if best.is_none_or(|b| d > distance[b]) {
            best = Some(i);
        }
    }

    let Some(end) = best else {
        return Ok(LongestPath {
            length: 0,
            path: Vec::new(),
        });
    };

    let mut path = vec![order[end].clone()];
    let mut cursor = end;
    while let Some(prev) = predecessor[cursor] {
        path.push(order[prev].clone());
        cursor = prev;
    }
    path.reverse();

    Ok(LongestPath {
        length: distance[end],
        path,
    })
}
