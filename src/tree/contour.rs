//! Contour navigation.
//!
//! Read-only queries the walks make at every step. `next_left`/`next_right`
//! follow a thread when a node has no children, which is what keeps contour
//! traversal O(1) per level even across subtrees joined only by threads.

use super::Tree;

impl Tree {
    /// First child of `v`, or `None` for a leaf.
    pub fn leftmost_child(&self, v: usize) -> Option<usize> {
        self.node(v).children.first().copied()
    }

    /// Last child of `v`, or `None` for a leaf.
    pub fn rightmost_child(&self, v: usize) -> Option<usize> {
        self.node(v).children.last().copied()
    }

    /// First child of `v`'s parent (possibly `v` itself); `None` for the root.
    pub fn leftmost_sibling(&self, v: usize) -> Option<usize> {
        let parent = self.node(v).parent?;
        self.leftmost_child(parent)
    }

    /// The sibling immediately left of `v`.
    pub fn left_sibling(&self, v: usize) -> Option<usize> {
        let node = self.node(v);
        let parent = node.parent?;
        let number = node.number.checked_sub(1)?;
        Some(self.node(parent).children[number])
    }

    /// Successor of `v` on the left contour of its subtree.
    pub fn next_left(&self, v: usize) -> Option<usize> {
        self.leftmost_child(v).or(self.node(v).thread)
    }

    /// Successor of `v` on the right contour of its subtree.
    pub fn next_right(&self, v: usize) -> Option<usize> {
        self.rightmost_child(v).or(self.node(v).thread)
    }
}
