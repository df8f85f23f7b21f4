//! Error types for girder operations.
//!
//! Errors fall into separately identifiable categories (see [`ErrorKind`]):
//!
//! - **Usage errors**: the caller asked for something the graph forbids
//!   (duplicate node, unknown endpoint, disallowed self-loop or parallel edge).
//!   Nothing is mutated when one of these is returned.
//! - **Invariant violations**: the adjacency indices stopped mirroring the
//!   edge set. Only raised when construction-time validation is enabled and
//!   always points at corrupted engine state, never at the caller.
//! - **Contract violations**: caller-supplied precomputed data (SCC lists,
//!   edge classifications) does not describe the current graph.
//! - **Configuration errors**: options could not be read or parsed.

use crate::domain::{EdgeId, NodeId};
use std::io;
use thiserror::Error;

/// Result type for girder operations.
pub type Result<T> = std::result::Result<T, Error>;

/// The error type for girder operations.
#[derive(Debug, Error)]
pub enum Error {
    /// A node with this identifier already exists.
    #[error("Node already exists: {0}")]
    DuplicateNode(NodeId),

    /// A strict accessor was asked about a node that does not exist.
    #[error("Node not found: {0}")]
    UnknownNode(NodeId),

    /// An edge endpoint does not exist.
    #[error("Cannot add edge {from} -> {to}: node {missing} does not exist")]
    UnknownEdgeEndpoint {
        /// Requested source node.
        from: NodeId,
        /// Requested target node.
        to: NodeId,
        /// The endpoint that is missing.
        missing: NodeId,
    },

    /// The graph was built with self-loops disabled.
    #[error("Self-loops are not allowed: {0} -> {0}")]
    SelfLoopNotAllowed(NodeId),

    /// The graph was built with parallel edges disabled and the pair already has an edge.
    #[error("Edge already exists: {from} -> {to}")]
    DuplicateEdge {
        /// Source node.
        from: NodeId,
        /// Target node.
        to: NodeId,
    },

    /// Adjacency indices no longer mirror the edge set.
    #[error("Graph invariant violated after inserting {edge}: {detail}")]
    InvariantViolation {
        /// The edge whose insertion exposed the inconsistency.
        edge: EdgeId,
        /// What failed to match.
        detail: String,
    },

    /// Precomputed analysis input is inconsistent with the graph.
    #[error(transparent)]
    ContractViolation(#[from] ContractViolation),

    /// Configuration could not be parsed.
    #[error("Configuration error: {0}")]
    Config(String),

    /// IO error while reading configuration.
    #[error("IO error: {0}")]
    Io(#[from] io::Error),
}

/// A precondition on caller-supplied precomputed data that did not hold.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ContractViolation {
    /// An edge endpoint is not a member of any supplied SCC.
    #[error(
        "edge {edge} cannot be mapped to a component: node {node} is in no supplied SCC; \
         precomputed SCCs do not match the graph"
    )]
    UnresolvedComponent {
        /// The edge being routed.
        edge: EdgeId,
        /// The endpoint without a component.
        node: NodeId,
    },

    /// A node of the graph is in none of the supplied SCCs.
    #[error("node {node} is in no supplied SCC; precomputed SCCs do not cover the graph")]
    NodeNotCovered {
        /// The uncovered node.
        node: NodeId,
    },

    /// A node is listed in more than one supplied SCC.
    #[error("node {node} is listed in components {first} and {second}")]
    NodeInSeveralComponents {
        /// The node listed twice.
        node: NodeId,
        /// Component that listed it first.
        first: usize,
        /// Component that listed it again.
        second: usize,
    },

    /// A supplied SCC lists a node the graph does not have.
    #[error("component {component} lists unknown node {node}")]
    UnknownComponentMember {
        /// The unknown node.
        node: NodeId,
        /// Component that lists it.
        component: usize,
    },

    /// The supplied SCCs contract to a graph that still has a cycle.
    #[error(
        "component order covers {covered} of {total} components; \
         precomputed SCCs are not maximal"
    )]
    CyclicCondensation {
        /// Components placed in the order before no zero in-degree component remained.
        covered: usize,
        /// Total number of components.
        total: usize,
    },
}

/// Categorization of [`Error`] values.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// Caller misuse; fix the call.
    Usage,
    /// Internal state corruption.
    Invariant,
    /// Precomputed input does not match the graph.
    Contract,
    /// Options could not be loaded.
    Config,
}

impl Error {
    /// Returns the category this error belongs to.
    #[must_use]
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::DuplicateNode(_)
            | Self::UnknownNode(_)
            | Self::UnknownEdgeEndpoint { .. }
            | Self::SelfLoopNotAllowed(_)
            | Self::DuplicateEdge { .. } => ErrorKind::Usage,
            Self::InvariantViolation { .. } => ErrorKind::Invariant,
            Self::ContractViolation(_) => ErrorKind::Contract,
            Self::Config(_) | Self::Io(_) => ErrorKind::Config,
        }
    }

    /// Returns `true` if the caller can fix this by changing the call.
    #[must_use]
    pub fn is_usage_error(&self) -> bool {
        self.kind() == ErrorKind::Usage
    }

    /// Returns `true` if this signals corrupted engine state.
    #[must_use]
    pub fn is_internal_error(&self) -> bool {
        self.kind() == ErrorKind::Invariant
    }
}
