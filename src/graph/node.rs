//! Node identifiers.
//!
//! A node is known to the layout only by its stable external id. Everything
//! else (children, depth, coordinates) is derived per run by the tree builder.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Stable node identifier.
///
/// Supplied by the host and echoed back in every layout result. It wraps a
/// u32 for efficient storage and WebAssembly interop.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct NodeId(pub u32);

impl fmt::Display for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Node({})", self.0)
    }
}

impl From<u32> for NodeId {
    #[inline]
    fn from(id: u32) -> Self {
        Self(id)
    }
}

impl From<NodeId> for u32 {
    #[inline]
    fn from(id: NodeId) -> Self {
        id.0
    }
}
