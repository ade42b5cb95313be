//! Apportionment: separating a freshly placed subtree from the subtrees of its
//! left siblings.
//!
//! Four contour pointers walk down level by level: `vi-`/`vo-` along the inside
//! and outside contours of the forest left of `v`, `vi+`/`vo+` along the inside
//! and outside contours of `v`'s own subtree. The `s*` sums carry the modifiers
//! accumulated along each contour, so absolute offsets are known without
//! walking back up the tree.

use super::shift::move_subtree;
use crate::tree::Tree;

/// Push the subtree of `v` right until it clears its left siblings, thread
/// the contours of unequal height, and return the updated default ancestor.
pub(crate) fn apportion(
    tree: &mut Tree,
    v: usize,
    default_ancestor: usize,
    distance: f64,
) -> usize {
    let Some(w) = tree.left_sibling(v) else {
        return default_ancestor;
    };
    let mut default_ancestor = default_ancestor;

    tracing::trace!(
        node = %tree.node(v).id,
        default_ancestor = %tree.node(default_ancestor).id,
        "apportion"
    );

    let mut vi_plus = v;
    let mut vo_plus = v;
    let mut vi_minus = w;
    let mut vo_minus = tree.leftmost_sibling(v).unwrap_or(w);

    let mut si_plus = tree.node(vi_plus).modifier;
    let mut so_plus = tree.node(vo_plus).modifier;
    let mut si_minus = tree.node(vi_minus).modifier;
    let mut so_minus = tree.node(vo_minus).modifier;

    while let (Some(next_vi_minus), Some(next_vi_plus)) =
        (tree.next_right(vi_minus), tree.next_left(vi_plus))
    {
        vi_minus = next_vi_minus;
        vi_plus = next_vi_plus;
        // The outside contours are at least as deep as the inside ones.
        vo_minus = tree
            .next_left(vo_minus)
            .expect("left outside contour ended above the inside contour");
        vo_plus = tree
            .next_right(vo_plus)
            .expect("right outside contour ended above the inside contour");

        tree.node_mut(vo_plus).ancestor = v;

        let shift = (tree.node(vi_minus).prelim + si_minus)
            - (tree.node(vi_plus).prelim + si_plus)
            + distance;

        if shift > 0.0 {
            let anchor = ancestor(tree, vi_minus, v, default_ancestor);
            move_subtree(tree, anchor, v, shift);
            si_plus += shift;
            so_plus += shift;
        }

        si_minus += tree.node(vi_minus).modifier;
        si_plus += tree.node(vi_plus).modifier;
        so_minus += tree.node(vo_minus).modifier;
        so_plus += tree.node(vo_plus).modifier;
    }

    // Left forest is deeper: continue v's right contour into it.
    if let Some(next) = tree.next_right(vi_minus) {
        if tree.next_right(vo_plus).is_none() {
            let node = tree.node_mut(vo_plus);
            node.thread = Some(next);
            node.modifier += si_minus - so_plus;
        }
    }

    // v's subtree is deeper: continue the left forest's left contour into it.
    if let Some(next) = tree.next_left(vi_plus) {
        if tree.next_left(vo_minus).is_none() {
            let node = tree.node_mut(vo_minus);
            node.thread = Some(next);
            node.modifier += si_plus - so_minus;
            default_ancestor = v;
        }
    }

    default_ancestor
}

/// The sibling of `v` whose subtree contains `vi_minus`, if the cached
/// ancestor pointer still names one; otherwise `default_ancestor`.
pub(crate) fn ancestor(tree: &Tree, vi_minus: usize, v: usize, default_ancestor: usize) -> usize {
    let candidate = tree.node(vi_minus).ancestor;
    let parent = tree.node(v).parent;
    if parent.is_some() && tree.node(candidate).parent == parent {
        candidate
    } else {
        default_ancestor
    }
}
