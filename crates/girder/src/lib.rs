//! Girder - a directed dependency graph engine.
//!
//! Nodes are tasks, edges are dependencies. The engine keeps forward and
//! reverse adjacency for an append-only graph and derives:
//!
//! - strongly connected components (iterative Tarjan)
//! - a topological order (Kahn), or `None` when a cycle exists
//! - depth-first edge classification (tree / back / forward / cross)
//! - cycles, one per cyclic component
//! - the condensation graph of contracted components
//!
//! Reachability and path queries live in [`algo`] and take any successor
//! source; a [`DependencyGraph`] is one:
//!
//! ```
//! use girder::{algo, DependencyGraph, NodeId};
//!
//! let mut graph: DependencyGraph = DependencyGraph::new();
//! for task in ["deploy", "test", "build"] {
//!     graph.add_node(task, None)?;
//! }
//! graph.add_edge("deploy", "test", None)?;
//! graph.add_edge("test", "build", None)?;
//!
//! let path = algo::shortest_path(&NodeId::from("deploy"), &NodeId::from("build"), &graph);
//! assert_eq!(path.map(|p| p.len()), Some(3));
//!
//! let analysis = graph.analyze()?;
//! assert!(analysis.is_acyclic);
//! # Ok::<(), girder::Error>(())
//! ```

#![forbid(unsafe_code)]

pub mod config;
pub mod domain;
pub mod error;
pub mod graph;

pub use config::GraphOptions;
pub use domain::{Edge, EdgeId, Node, NodeId};
pub use error::{ContractViolation, Error, ErrorKind, Result};
pub use graph::{
    CondensationComponent, CondensationGraph, Cycle, DependencyGraph, EdgeClassification,
    EdgeKind, GraphAnalysis, Precomputed, Scc,
};

/// Traversal algorithms over any successor source.
pub use girder_algo as algo;
