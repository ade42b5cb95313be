//! Subtree shifting.
//!
//! `move_subtree` moves a subtree right right away but only records how the
//! siblings in between should follow; `execute_shifts` applies those
//! recorded steps to all children of a node in a single right-to-left pass.

use crate::tree::Tree;

/// Shift the subtree rooted at `w_plus` right by `shift` and record an even
/// share of it for every sibling between `w_minus` and `w_plus`.
///
/// # Panics
///
/// If `w_minus` is not a sibling to the left of `w_plus`. That can only happen
/// through a bug in apportionment.
pub(crate) fn move_subtree(tree: &mut Tree, w_minus: usize, w_plus: usize, shift: f64) {
    let subtrees = tree.node(w_plus).number as isize - tree.node(w_minus).number as isize;
    assert!(
        subtrees > 0,
        "move_subtree: {} is not left of {}",
        tree.node(w_minus).id,
        tree.node(w_plus).id
    );
    let per_subtree = shift / subtrees as f64;

    tracing::trace!(
        w_minus = %tree.node(w_minus).id,
        w_plus = %tree.node(w_plus).id,
        shift,
        "move subtree"
    );

    let plus = tree.node_mut(w_plus);
    plus.change -= per_subtree;
    plus.shift += shift;
    plus.prelim += shift;
    plus.modifier += shift;

    tree.node_mut(w_minus).change += per_subtree;
}

/// Spread the children of `v` according to the shifts recorded by
/// [`move_subtree`].
pub(crate) fn execute_shifts(tree: &mut Tree, v: usize) {
    let mut shift = 0.0f64;
    let mut change = 0.0f64;

    tracing::trace!(node = %tree.node(v).id, "execute shifts");

    for i in (0..tree.node(v).children.len()).rev() {
        let child = tree.node(v).children[i];
        let w = tree.node_mut(child);
        w.prelim += shift;
        w.modifier += shift;
        change += w.change;
        shift += w.shift + change;
    }
}
