//! Two-coloring of the undirected view of a directed graph.

use crate::successors::Successors;
use std::collections::{HashMap, VecDeque};
use std::hash::Hash;

/// The two color classes of a bipartite graph.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Bipartition<T> {
    /// Nodes given the first color (each component's start node lands here).
    pub left: Vec<T>,
    /// Nodes given the second color.
    pub right: Vec<T>,
}

#[derive(Clone, Copy, PartialEq, Eq)]
enum Side {
    Left,
    Right,
}

impl Side {
    fn opposite(self) -> Self {
        match self {
            Self::Left => Self::Right,
            Self::Right => Self::Left,
        }
    }
}

/// Checks whether the graph, with edge direction ignored, is two-colorable.
///
/// Returns the two partitions on success and `None` otherwise. Any self-loop
/// makes the graph non-bipartite. Nodes reached only as successors of
/// `nodes` are colored too.
#[must_use]
pub fn is_bipartite<T, S>(nodes: &[T], succ: &S) -> Option<Bipartition<T>>
where
    T: Clone + Eq + Hash,
    S: Successors<T> + ?Sized,
{
    let mut undirected: HashMap<T, Vec<T>> = HashMap::new();
    for node in nodes {
        undirected.entry(node.clone()).or_default();
        for next in succ.successors(node) {
            if next == *node {
                return None;
            }
            undirected
                .entry(node.clone())
                .or_default()
                .push(next.clone());
            undirected.entry(next).or_default().push(node.clone());
        }
    }

    let mut color: HashMap<T, Side> = HashMap::with_capacity(undirected.len());
    let mut partition = Bipartition {
        left: Vec::new(),
        right: Vec::new(),
    };

    // Start from the caller's nodes in order so the output is deterministic.
    for start in nodes {
        if color.contains_key(start) {
            continue;
        }
        color.insert(start.clone(), Side::Left);
        partition.left.push(start.clone());
        let mut queue = VecDeque::from([start.clone()]);

        while let Some(current) = queue.pop_front() {
            let side = color[&current];
            let Some(neighbors) = undirected.get(&current) else {
                continue;
            };
            for neighbor in neighbors {
                match color.get(neighbor) {
                    Some(&existing) if existing == side => return None,
                    Some(_) => {}
                    None => {
                        let other = side.opposite();
                        color.insert(neighbor.clone(), other);
                        match other {
                            Side::Left => partition.left.push(neighbor.clone()),
                            Side::Right => partition.right.push(neighbor.clone()),
                        }
                        queue.push_back(neighbor.clone());
                    }
                }
            }
        }
    }

    Some(partition)
}
