//! Edge key encoding.
//!
//! Each endpoint is length-prefixed so that no two ordered pairs share a key,
//! whatever characters the node identifiers contain: `("a|1:b", "c")` and
//! `("a", "b|1:c")` encode differently even though naive concatenation would
//! not.

use crate::domain::{EdgeId, NodeId};

/// Encodes an ordered node pair as `"<len>:<from>|<len>:<to>"`.
///
/// Lengths are byte lengths of the identifiers.
pub(crate) fn pair_key(from: &NodeId, to: &NodeId) -> String {
    format!(
        "{}:{}|{}:{}",
        from.as_str().len(),
        from.as_str(),
        to.as_str().len(),
        to.as_str()
    )
}

/// Derives the identifier of the `ordinal`-th edge (0-based) of a pair.
pub(crate) fn edge_id(pair_key: &str, ordinal: usize) -> EdgeId {
    if ordinal == 0 {
        EdgeId(pair_key.to_string())
    } else {
        EdgeId(format!("{pair_key}#{ordinal}"))
    }
}
