//! Parent → child edges.
//!
//! The layout consumes edges exactly as the host stores them: `source` is the
//! parent, `target` the child. Edge order is significant, it fixes the
//! left-to-right order of each node's children.

use serde::{Deserialize, Serialize};
use std::fmt;

use super::node::NodeId;
use crate::error::{Error, Result};

/// A directed parent → child edge.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Edge {
    /// The parent node.
    pub source: NodeId,
    /// The child node.
    pub target: NodeId,
}

impl Edge {
    /// Create an edge from `source` (parent) to `target` (child).
    #[inline]
    pub fn new(source: impl Into<NodeId>, target: impl Into<NodeId>) -> Self {
        Self {
            source: source.into(),
            target: target.into(),
        }
    }

    /// Decode a flat `[parent0, child0, parent1, child1, ...]` array.
    ///
    /// This is the wire format the WASM adapter receives from JavaScript.
    pub fn from_pairs(pairs: &[u32]) -> Result<Vec<Edge>> {
        if pairs.len() % 2 != 0 {
            return Err(Error::MalformedEdgeList { len: pairs.len() });
        }

        Ok(pairs
            .chunks_exact(2)
            .map(|pair| Edge::new(pair[0], pair[1]))
            .collect())
    }
}

impl fmt::Display for Edge {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} -> {}", self.source, self.target)
    }
}
