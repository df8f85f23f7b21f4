//! Error types for girder-algo operations.
//!
//! Two categories are kept apart so callers can branch on them:
//!
//! - **Invalid arguments**: the caller passed a value outside the accepted
//!   domain (for example a negative depth bound).
//! - **Contract violations**: caller-supplied auxiliary data (a topological
//!   order) does not agree with the graph described by the successor function.
//!
//! Node identifiers are generic in this crate, so offending nodes are
//! carried in their `Debug` rendering.

use thiserror::Error;

/// The error type for girder-algo operations.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AlgoError {
    /// A depth bound below zero was passed to a bounded enumeration.
    #[error("maximum depth must be non-negative, got {max_depth}")]
    NegativeDepth {
        /// The rejected bound.
        max_depth: i64,
    },

    /// The supplied topological order has an empty slot.
    #[error("topological order has no entry at position {position}")]
    MissingOrderEntry {
        /// Index of the empty slot.
        position: usize,
    },

    /// The supplied topological order does not have one slot per node.
    #[error("topological order has {actual} entries but the graph has {expected} nodes")]
    OrderSizeMismatch {
        /// Number of input nodes.
        expected: usize,
        /// Number of entries in the order.
        actual: usize,
    },

    /// A node of the graph (or one referenced by an edge) is absent from the order.
    #[error("topological order omits node {node}")]
    OrderOmitsNode {
        /// The node that has no position in the order.
        node: String,
    },

    /// An edge runs from a later position to an earlier (or equal) one.
    #[error(
        "edge {from} -> {to} points backwards in the topological order; \
         the order is invalid or the graph has a cycle"
    )]
    BackwardEdge {
        /// Source of the offending edge.
        from: String,
        /// Target of the offending edge.
        to: String,
    },
}

/// Categorization of [`AlgoError`] values.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AlgoErrorKind {
    /// The caller passed a value outside the accepted domain.
    InvalidArgument,
    /// Caller-supplied auxiliary data is inconsistent with the graph.
    Contract,
}

impl AlgoError {
    /// Returns the category this error belongs to.
    #[must_use]
    pub fn kind(&self) -> AlgoErrorKind {
        match self {
            Self::NegativeDepth { .. } => AlgoErrorKind::InvalidArgument,
            Self::MissingOrderEntry { .. }
            | Self::OrderSizeMismatch { .. }
            | Self::OrderOmitsNode { .. }
            | Self::BackwardEdge { .. } => AlgoErrorKind::Contract,
        }
    }
}

/// A specialized Result type for girder-algo operations.
pub type Result<T> = std::result::Result<T, AlgoError>;
