//! Graph traversal algorithms over a caller-supplied successor function.
//!
//! Every algorithm here is written against the [`Successors`] capability
//! ("given a node, list its outgoing neighbors") instead of a concrete graph
//! type. Closures, adjacency maps, and the `girder` dependency graph can all
//! be queried the same way:
//!
//! ```
//! use girder_algo::{is_reachable, shortest_path};
//! use std::collections::HashMap;
//!
//! let deps: HashMap<&str, Vec<&str>> =
//!     HashMap::from([("build", vec!["compile"]), ("compile", vec!["fetch"])]);
//! let succ = |n: &&str| deps.get(n).cloned().unwrap_or_default();
//!
//! assert!(is_reachable(&"build", &"fetch", &succ));
//! assert_eq!(
//!     shortest_path(&"build", &"fetch", &succ),
//!     Some(vec!["build", "compile", "fetch"])
//! );
//! ```
//!
//! All functions are synchronous and read-only over the successor source.

#![forbid(unsafe_code)]

pub mod bipartite;
pub mod error;
pub mod paths;
pub mod reach;
pub mod successors;

pub use bipartite::{is_bipartite, Bipartition};
pub use error::{AlgoError, AlgoErrorKind, Result};
pub use paths::{
    find_all_paths, longest_path_dag, longest_path_dag_slots, LongestPath, DEFAULT_MAX_DEPTH,
};
pub use reach::{is_reachable, reachable_set, shortest_path, transitive_closure};
pub use successors::Successors;
