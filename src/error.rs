//! Errors reported before a layout run starts.
//!
//! Everything here describes input that is not a single rooted tree (or a
//! configuration the walks cannot use). Broken invariants inside the walks are
//! bugs and panic instead.

use crate::graph::NodeId;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum Error {
    #[error("cannot lay out an empty node collection")]
    EmptyTree,

    #[error("{id} appears more than once in the node collection")]
    DuplicateNode { id: NodeId },

    #[error("edge {parent} -> {child} references unknown node {missing}")]
    UnknownNode {
        parent: NodeId,
        child: NodeId,
        missing: NodeId,
    },

    #[error("{child} has more than one parent ({first} and {second})")]
    MultipleParents {
        child: NodeId,
        first: NodeId,
        second: NodeId,
    },

    #[error("no root found: every node has a parent")]
    NoRoot,

    #[error("expected exactly one root, found {}: {}", .roots.len(), join_ids(.roots))]
    MultipleRoots { roots: Vec<NodeId> },

    #[error("edges form a cycle through {node}")]
    Cycle { node: NodeId },

    #[error("edge list must hold parent/child pairs, got {len} values")]
    MalformedEdgeList { len: usize },

    #[error("invalid layout config: {field} = {value}")]
    InvalidConfig { field: &'static str, value: String },
}

fn join_ids(ids: &[NodeId]) -> String {
    ids.iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join(", ")
}
