//! The successor capability every algorithm in this crate is written against.
//!
//! Algorithms never see a concrete graph type. They ask a [`Successors`]
//! implementation for the outgoing neighbors of one node at a time, which
//! keeps them usable with adjacency maps, closures, and graph engines alike.

/// Lookup of the outgoing neighbors of a node.
///
/// Unknown nodes are expected to have no successors rather than to fail.
///
/// # Examples
///
/// ```
/// use girder_algo::Successors;
/// use std::collections::HashMap;
///
/// let adjacency: HashMap<&str, Vec<&str>> = HashMap::from([("a", vec!["b"])]);
/// let succ = |n: &&str| adjacency.get(n).cloned().unwrap_or_default();
///
/// assert_eq!(succ.successors(&"a"), vec!["b"]);
/// assert!(succ.successors(&"zzz").is_empty());
/// ```
pub trait Successors<T> {
    /// Returns the outgoing neighbors of `node`.
    fn successors(&self, node: &T) -> Vec<T>;
}

impl<T, F, I> Successors<T> for F
where
    F: Fn(&T) -> I,
    I: IntoIterator<Item = T>,
{
    fn successors(&self, node: &T) -> Vec<T> {
        self(node).into_iter().collect()
    }
}
