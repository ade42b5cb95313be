//! Arena-backed rooted tree used by the layout walks.
//!
//! Nodes live in a contiguous `Vec` and refer to each other by index, so the
//! parent, child, thread and ancestor links never form ownership cycles. Arena
//! indices follow the order of the node collection handed to
//! [`build_tree`].

mod builder;
mod contour;

pub use builder::build_tree;

use std::collections::HashMap;

use crate::graph::NodeId;

/// One node of a [`Tree`]: permanent topology plus per-run working state.
#[derive(Debug, Clone)]
pub struct TreeNode {
    pub(crate) id: NodeId,
    pub(crate) parent: Option<usize>,
    pub(crate) children: Vec<usize>,
    /// Index within the parent's children (0-based).
    pub(crate) number: usize,
    pub(crate) depth: u32,

    // Working state, reset before every run.
    pub(crate) prelim: f64,
    pub(crate) modifier: f64,
    pub(crate) change: f64,
    pub(crate) shift: f64,
    pub(crate) ancestor: usize,
    pub(crate) thread: Option<usize>,

    // Output of the second walk.
    pub(crate) x: f64,
    pub(crate) y: f64,
}

impl TreeNode {
    pub(crate) fn new(id: NodeId, index: usize) -> Self {
        Self {
            id,
            parent: None,
            children: Vec::new(),
            number: 0,
            depth: 0,
            prelim: 0.0,
            modifier: 0.0,
            change: 0.0,
            shift: 0.0,
            ancestor: index,
            thread: None,
            x: 0.0,
            y: 0.0,
        }
    }

    pub fn id(&self) -> NodeId {
        self.id
    }

    pub fn parent(&self) -> Option<usize> {
        self.parent
    }

    /// Children in left-to-right drawing order.
    pub fn children(&self) -> &[usize] {
        &self.children
    }

    pub fn number(&self) -> usize {
        self.number
    }

    pub fn depth(&self) -> u32 {
        self.depth
    }

    /// Preliminary x-coordinate relative to the node's own subtree.
    pub fn prelim(&self) -> f64 {
        self.prelim
    }

    /// Offset applied to every descendant in the second walk.
    pub fn modifier(&self) -> f64 {
        self.modifier
    }

    pub fn change(&self) -> f64 {
        self.change
    }

    pub fn shift(&self) -> f64 {
        self.shift
    }

    pub fn ancestor(&self) -> usize {
        self.ancestor
    }

    pub fn thread(&self) -> Option<usize> {
        self.thread
    }

    pub fn x(&self) -> f64 {
        self.x
    }

    pub fn y(&self) -> f64 {
        self.y
    }
}

/// A validated rooted tree.
#[derive(Debug, Clone)]
pub struct Tree {
    nodes: Vec<TreeNode>,
    root: usize,
    index: HashMap<NodeId, usize>,
}

impl Tree {
    pub(crate) fn from_parts(nodes: Vec<TreeNode>, root: usize, index: HashMap<NodeId, usize>) -> Self {
        Self { nodes, root, index }
    }

    /// Arena index of the root.
    pub fn root(&self) -> usize {
        self.root
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    pub fn node(&self, v: usize) -> &TreeNode {
        &self.nodes[v]
    }

    pub(crate) fn node_mut(&mut self, v: usize) -> &mut TreeNode {
        &mut self.nodes[v]
    }

    pub fn nodes(&self) -> &[TreeNode] {
        &self.nodes
    }

    /// Arena index of the node with the given external id.
    pub fn index_of(&self, id: NodeId) -> Option<usize> {
        self.index.get(&id).copied()
    }

    pub fn is_leaf(&self, v: usize) -> bool {
        self.nodes[v].children.is_empty()
    }

    /// Restore every working field to its default.
    ///
    /// Thread and ancestor links from a previous run would otherwise be
    /// followed as if they were valid contour links.
    pub fn reset(&mut self) {
        for (index, node) in self.nodes.iter_mut().enumerate() {
            node.prelim = 0.0;
            node.modifier = 0.0;
            node.change = 0.0;
            node.shift = 0.0;
            node.ancestor = index;
            node.thread = None;
            node.x = 0.0;
            node.y = 0.0;
        }
    }
}
