//! Breadth-first reachability queries.
//!
//! All traversals mark a node as visited when it is enqueued, so each node is
//! expanded at most once per query and cost stays linear in the explored part
//! of the graph.

use crate::successors::Successors;
use std::collections::{HashMap, HashSet, VecDeque};
use std::hash::Hash;
use tracing::trace;

/// Returns `true` if `to` can be reached from `from`.
///
/// A node always reaches itself, even when the successor function reports no
/// neighbors for it. The search stops as soon as `to` is discovered.
#[must_use]
pub fn is_reachable<T, S>(from: &T, to: &T, succ: &S) -> bool
where
    T: Clone + Eq + Hash,
    S: Successors<T> + ?Sized,
{
    if from == to {
        return true;
    }

    let mut visited: HashSet<T> = HashSet::from([from.clone()]);
    let mut queue: VecDeque<T> = VecDeque::from([from.clone()]);

    while let Some(current) = queue.pop_front() {
        for next in succ.successors(&current) {
            if next == *to {
                return true;
            }
            if visited.insert(next.clone()) {
                queue.push_back(next);
            }
        }
    }

    false
}

/// Finds a path with the fewest edges from `from` to `to`.
///
/// Returns `Some(vec![from])` when both ends are the same node and `None` when
/// `to` is unreachable. When several shortest paths exist, the one discovered
/// first by the breadth-first traversal is returned.
#[must_use]
pub fn shortest_path<T, S>(from: &T, to: &T, succ: &S) -> Option<Vec<T>>
where
    T: Clone + Eq + Hash,
    S: Successors<T> + ?Sized,
{
    if from == to {
        return Some(vec![from.clone()]);
    }

    let mut parent: HashMap<T, T> = HashMap::new();
    let mut visited: HashSet<T> = HashSet::from([from.clone()]);
    let mut queue: VecDeque<T> = VecDeque::from([from.clone()]);

    while let Some(current) = queue.pop_front() {
        for next in succ.successors(&current) {
            if !visited.insert(next.clone()) {
                continue;
            }
            parent.insert(next.clone(), current.clone());
            if next == *to {
                let path = walk_parents(&parent, to);
                trace!(
                    edges = path.len() - 1,
                    explored = visited.len(),
                    "found shortest path"
                );
                return Some(path);
            }
            queue.push_back(next);
        }
    }

    trace!(explored = visited.len(), "target unreachable");
    None
}

/// Rebuilds the path ending at `to` from parent pointers.
fn walk_parents<T>(parent: &HashMap<T, T>, to: &T) -> Vec<T>
where
    T: Clone + Eq + Hash,
{
    let mut path = vec![to.clone()];
    let mut cursor = to;
    while let Some(prev) = parent.get(cursor) {
        path.push(prev.clone());
        cursor = prev;
    }
    path.reverse();
    path
}

/// Returns every node reachable from `from` through at least one edge.
///
/// `from` itself is only included when a cycle leads back to it.
#[must_use]
pub fn reachable_set<T, S>(from: &T, succ: &S) -> HashSet<T>
where
    T: Clone + Eq + Hash,
    S: Successors<T> + ?Sized,
{
    let mut reached: HashSet<T> = HashSet::new();
    let mut queue: VecDeque<T> = succ
        .successors(from)
        .into_iter()
        .filter(|next| reached.insert(next.clone()))
        .collect();

    while let Some(current) = queue.pop_front() {
        for next in succ.successors(&current) {
            if reached.insert(next.clone()) {
                queue.push_back(next);
            }
        }
    }

    reached
}

/// Computes the transitive closure of the successor relation over `nodes`.
///
/// Each node maps to the set returned by [`reachable_set`]. Cost is
/// `O(V * (V + E))`, which is acceptable for sparse dependency graphs.
#[must_use]
pub fn transitive_closure<T, S>(nodes: &[T], succ: &S) -> HashMap<T, HashSet<T>>
where
    T: Clone + Eq + Hash,
    S: Successors<T> + ?Sized,
{
    let closure: HashMap<T, HashSet<T>> = nodes
        .iter()
        .map(|node| (node.clone(), reachable_set(node, succ)))
        .collect();
    trace!(
        nodes = closure.len(),
        pairs = closure.values().map(HashSet::len).sum::<usize>(),
        "computed transitive closure"
    );
    closure
}

#[cfg(test)]
mod tests {
    use super::*;

    fn adjacency(edges: &[(u32, u32)]) -> HashMap<u32, Vec<u32>> {
        let mut map: HashMap<u32, Vec<u32>> = HashMap::new();
        for &(from, to) in edges {
            map.entry(from).or_default().push(to);
        }
        map
    }

    #[test]
    fn node_reaches_itself_without_successors() {
        let none = |_: &u32| Vec::new();
        assert!(is_reachable(&5, &5, &none));
    }

    #[test]
    fn reachability_follows_direction() {
        let map = adjacency(&[(1, 2), (2, 3)]);
        let succ = |n: &u32| map.get(n).cloned().unwrap_or_default();

        assert!(is_reachable(&1, &3, &succ));
        assert!(!is_reachable(&3, &1, &succ));
    }

    #[test]
    fn reachability_terminates_on_cycles() {
        let map = adjacency(&[(1, 2), (2, 1)]);
        let succ = |n: &u32| map.get(n).cloned().unwrap_or_default();

        assert!(!is_reachable(&1, &9, &succ));
    }

    #[test]
    fn shortest_path_prefers_fewer_edges() {
        let map = adjacency(&[(1, 2), (2, 3), (3, 4), (1, 4)]);
        let succ = |n: &u32| map.get(n).cloned().unwrap_or_default();

        assert_eq!(shortest_path(&1, &4, &succ), Some(vec![1, 4]));
        assert_eq!(shortest_path(&2, &4, &succ), Some(vec![2, 3, 4]));
    }

    #[test]
    fn shortest_path_trivial_and_missing() {
        let map = adjacency(&[(1, 2)]);
        let succ = |n: &u32| map.get(n).cloned().unwrap_or_default();

        assert_eq!(shortest_path(&1, &1, &succ), Some(vec![1]));
        assert_eq!(shortest_path(&2, &1, &succ), None);
    }

    #[test]
    fn closure_is_reflexive_only_through_cycles() {
        let map = adjacency(&[(1, 2), (2, 3), (3, 2)]);
        let succ = |n: &u32| map.get(n).cloned().unwrap_or_default();

        let closure = transitive_closure(&[1, 2, 3], &succ);

        assert_eq!(closure[&1], HashSet::from([2, 3]));
        assert_eq!(closure[&2], HashSet::from([2, 3]));
        assert_eq!(closure[&3], HashSet::from([2, 3]));
    }

    #[test]
    fn self_loop_makes_node_reach_itself() {
        let map = adjacency(&[(7, 7)]);
        let succ = |n: &u32| map.get(n).cloned().unwrap_or_default();

        assert_eq!(reachable_set(&7, &succ), HashSet::from([7]));
    }
}
