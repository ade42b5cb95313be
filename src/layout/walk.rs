//! The two tree walks.
//!
//! The first walk runs post-order and leaves every node with a preliminary
//! x-coordinate relative to its subtree plus a modifier for its descendants.
//! The second walk runs pre-order and folds the modifiers into absolute
//! coordinates.

use super::apportion::apportion;
use super::shift::execute_shifts;
use crate::tree::Tree;

// One open node of the post-order first walk.
struct Frame {
    v: usize,
    next_child: usize,
    default_ancestor: usize,
}

impl Frame {
    fn enter(tree: &Tree, v: usize) -> Self {
        tracing::trace!(node = %tree.node(v).id, "first walk");
        Self {
            v,
            next_child: 0,
            default_ancestor: tree.leftmost_child(v).unwrap_or(v),
        }
    }
}

/// Compute `prelim` and `modifier` for every node in the subtree of `root`.
///
/// Post-order over an explicit stack, so tree depth is bounded by memory
/// rather than by the call stack. Each child is apportioned against its left
/// siblings as soon as its own subtree is finished.
pub(crate) fn first_walk(tree: &mut Tree, root: usize, distance: f64) {
    let mut stack = vec![Frame::enter(tree, root)];

    while let Some(frame) = stack.last_mut() {
        let v = frame.v;
        if let Some(&child) = tree.node(v).children.get(frame.next_child) {
            frame.next_child += 1;
            stack.push(Frame::enter(tree, child));
            continue;
        }

        stack.pop();
        place(tree, v, distance);
        if let Some(parent) = stack.last_mut() {
            parent.default_ancestor = apportion(tree, v, parent.default_ancestor, distance);
        }
    }
}

// Runs once every child of `v` has been placed and apportioned.
fn place(tree: &mut Tree, v: usize, distance: f64) {
    let left = tree.left_sibling(v).map(|w| tree.node(w).prelim + distance);

    let (Some(first), Some(last)) = (tree.leftmost_child(v), tree.rightmost_child(v)) else {
        tree.node_mut(v).prelim = left.unwrap_or(0.0);
        return;
    };

    execute_shifts(tree, v);
    let midpoint = 0.5 * (tree.node(first).prelim + tree.node(last).prelim);

    let node = tree.node_mut(v);
    match left {
        Some(prelim) => {
            node.prelim = prelim;
            node.modifier = prelim - midpoint;
        }
        None => {
            node.prelim = midpoint;
            node.modifier = 0.0;
        }
    }
}

/// Write absolute `x`/`y` for every node in the subtree of `root`.
///
/// `m` is the sum of the modifiers of `root`'s ancestors. Call it on the tree
/// root with `-prelim(root)` to anchor the root at x = 0.
pub(crate) fn second_walk(tree: &mut Tree, root: usize, m: f64, level_separation: f64) {
    let mut stack = vec![(root, m)];

    while let Some((v, m)) = stack.pop() {
        let node = tree.node_mut(v);
        node.x = node.prelim + m;
        node.y = f64::from(node.depth) * level_separation;
        let child_m = m + node.modifier;

        tracing::trace!(node = %node.id, x = node.x, y = node.y, "second walk");

        stack.extend(tree.node(v).children.iter().rev().map(|&c| (c, child_m)));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::graph::{Edge, NodeId};
    use crate::tree::build_tree;

    fn tree_from_parents(parents: &[u32]) -> Tree {
        let nodes: Vec<NodeId> = (0..=parents.len() as u32).map(NodeId).collect();
        let edges: Vec<Edge> = parents
            .iter()
            .enumerate()
            .map(|(i, &p)| Edge::new(p, i as u32 + 1))
            .collect();
        build_tree(&nodes, &edges).unwrap()
    }

    fn run(tree: &mut Tree) -> Vec<f64> {
        let root = tree.root();
        first_walk(tree, root, 1.0);
        let anchor = -tree.node(root).prelim();
        second_walk(tree, root, anchor, 1.0);
        tree.nodes().iter().map(|n| n.x()).collect()
    }

    #[test]
    fn test_leaf_prelims_follow_left_siblings() {
        let mut tree = tree_from_parents(&[0, 0, 0]);
        first_walk(&mut tree, 0, 1.0);

        assert_eq!(tree.node(1).prelim(), 0.0);
        assert_eq!(tree.node(2).prelim(), 1.0);
        assert_eq!(tree.node(3).prelim(), 2.0);
        assert_eq!(tree.node(0).prelim(), 1.0);
        assert_eq!(tree.node(0).modifier(), 0.0);
    }

    #[test]
    fn test_three_leaves_final_coordinates() {
        let mut tree = tree_from_parents(&[0, 0, 0]);
        let xs = run(&mut tree);
        assert_eq!(xs, vec![0.0, -1.0, 0.0, 1.0]);

        let ys: Vec<f64> = tree.nodes().iter().map(|n| n.y()).collect();
        assert_eq!(ys, vec![0.0, 1.0, 1.0, 1.0]);
    }

    #[test]
    fn test_internal_node_with_left_sibling_gets_modifier() {
        // 0 → 1 (leaf), 0 → 2 → (3, 4)
        let mut tree = tree_from_parents(&[0, 0, 2, 2]);
        first_walk(&mut tree, 0, 1.0);

        // Node 2 sits one unit right of node 1; its children are centred at 0.5.
        assert_eq!(tree.node(2).prelim(), 1.0);
        assert_eq!(tree.node(2).modifier(), 0.5);
    }

    #[test]
    fn test_leaf_sibling_clears_deeper_subtree() {
        // root → A → (B, C), root → D
        let mut tree = tree_from_parents(&[0, 1, 1, 0]);
        let xs = run(&mut tree);
        assert_eq!(xs, vec![0.0, -0.5, -1.0, 0.0, 0.5]);
        assert!(xs[4] - xs[1] >= 1.0);
    }

    #[test]
    fn test_binary_tree() {
        let mut tree = tree_from_parents(&[0, 0, 1, 1, 2, 2]);
        let xs = run(&mut tree);
        assert_eq!(xs, vec![0.0, -1.0, 1.0, -1.5, -0.5, 0.5, 1.5]);
    }

    #[test]
    fn test_tall_left_subtree() {
        // 0 → 1 → 3 → 4 → 5, 0 → 2
        let mut tree = tree_from_parents(&[0, 0, 1, 3, 4]);
        let xs = run(&mut tree);
        assert_eq!(xs, vec![0.0, -0.5, 0.5, -0.5, -0.5, -0.5]);
    }

    #[test]
    fn test_intermediate_siblings_are_spread_evenly() {
        let mut tree = tree_from_parents(&[0, 0, 0, 0, 1, 1, 1, 1, 4, 4, 4, 4]);
        let xs = run(&mut tree);

        let expected = [
            0.0, -2.0, -2.0 / 3.0, 2.0 / 3.0, 2.0, -3.5, -2.5, -1.5, -0.5, 0.5, 1.5, 2.5, 3.5,
        ];
        for (i, (&x, &e)) in xs.iter().zip(expected.iter()).enumerate() {
            assert!((x - e).abs() < 1e-9, "node {i}: expected {e}, got {x}");
        }
    }

    #[test]
    fn test_deep_chain_stays_on_the_root_axis() {
        let parents: Vec<u32> = (0..100_000).collect();
        let mut tree = tree_from_parents(&parents);
        let xs = run(&mut tree);

        assert!(xs.iter().all(|&x| x == 0.0));
        let last = tree.node(100_000);
        assert_eq!((last.depth(), last.y()), (100_000, 100_000.0));
    }

    #[test]
    fn test_deep_comb() {
        // Spine node 2k has children (2k + 1, 2k + 2): a leaf, then the next
        // spine node.
        let levels = 50_000u32;
        let parents: Vec<u32> = (0..2 * levels).map(|i| i / 2 * 2).collect();
        let mut tree = tree_from_parents(&parents);
        let xs = run(&mut tree);

        for k in 0..levels as usize {
            let spine = 0.5 * k as f64;
            assert_eq!(xs[2 * k], spine, "spine {k}");
            assert_eq!(xs[2 * k + 1], spine - 0.5, "leaf {k}");
            assert_eq!(xs[2 * k + 2] - xs[2 * k + 1], 1.0);
        }
    }

    #[test]
    fn test_deep_siblings_of_unequal_height() {
        // 0 → chain 1..=60_000, 0 → chain 60_001..=90_000
        let (left, right) = (60_000u32, 30_000u32);
        let parents: Vec<u32> = (0..left + right)
            .map(|i| match i {
                0 => 0,
                i if i == left => 0,
                i => i,
            })
            .collect();
        let mut tree = tree_from_parents(&parents);
        let xs = run(&mut tree);

        assert_eq!(xs[0], 0.0);
        assert!(xs[1..=left as usize].iter().all(|&x| x == -0.5));
        assert!(xs[left as usize + 1..].iter().all(|&x| x == 0.5));
        // The shorter chain's bottom is threaded into the taller one.
        let bottom = tree.node((left + right) as usize);
        assert_eq!(bottom.thread(), Some(right as usize + 1));
    }

    #[test]
    fn test_level_separation_scales_y() {
        let mut tree = tree_from_parents(&[0, 1]);
        let root = tree.root();
        first_walk(&mut tree, root, 1.0);
        second_walk(&mut tree, root, 0.0, 40.0);
        assert_eq!(tree.node(2).y(), 80.0);
    }
}
