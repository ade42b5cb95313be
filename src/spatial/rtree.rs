//! R*-tree over the node positions of a layout result.
//!
//! Queries are O(log n) and answer in node ids, so a host can map a pointer
//! position straight back to one of its own nodes.

use rstar::{PointDistance, RTree, RTreeObject, AABB};

use crate::graph::NodeId;
use crate::layout::{NodePosition, TidyTreeResult};

// Entries are the layout's own positions; the index adds no node data.
#[derive(Debug, Clone, Copy, PartialEq)]
struct Entry(NodePosition);

impl Entry {
    fn point(&self) -> [f64; 2] {
        [self.0.x, self.0.y]
    }
}

impl RTreeObject for Entry {
    type Envelope = AABB<[f64; 2]>;

    fn envelope(&self) -> Self::Envelope {
        AABB::from_point(self.point())
    }
}

impl PointDistance for Entry {
    fn distance_2(&self, point: &[f64; 2]) -> f64 {
        let [x, y] = self.point();
        let (dx, dy) = (x - point[0], y - point[1]);
        dx * dx + dy * dy
    }
}

/// Hit-testing index over a [`TidyTreeResult`].
#[derive(Debug, Default)]
pub struct SpatialIndex {
    tree: RTree<Entry>,
}

impl SpatialIndex {
    pub fn new() -> Self {
        Self::default()
    }

    /// Bulk-load every position of a layout result.
    pub fn from_result(result: &TidyTreeResult) -> Self {
        let entries = result.positions().iter().copied().map(Entry).collect();
        Self {
            tree: RTree::bulk_load(entries),
        }
    }

    /// The node closest to `(x, y)`, if the index is not empty.
    pub fn nearest(&self, x: f64, y: f64) -> Option<NodeId> {
        self.tree.nearest_neighbor(&[x, y]).map(|e| e.0.id)
    }

    /// Like [`nearest`](Self::nearest), but only within `max_distance`.
    pub fn nearest_within(&self, x: f64, y: f64, max_distance: f64) -> Option<NodeId> {
        let point = [x, y];
        self.tree
            .nearest_neighbor(&point)
            .filter(|e| e.distance_2(&point) <= max_distance * max_distance)
            .map(|e| e.0.id)
    }

    /// Nodes inside the rectangle spanned by two corners, in any order.
    pub fn in_rect(&self, min_x: f64, min_y: f64, max_x: f64, max_y: f64) -> Vec<NodeId> {
        let envelope = AABB::from_corners([min_x, min_y], [max_x, max_y]);
        self.tree
            .locate_in_envelope(&envelope)
            .map(|e| e.0.id)
            .collect()
    }

    /// Nodes within `radius` of `(x, y)`.
    pub fn in_radius(&self, x: f64, y: f64, radius: f64) -> Vec<NodeId> {
        self.tree
            .locate_within_distance([x, y], radius * radius)
            .map(|e| e.0.id)
            .collect()
    }

    pub fn len(&self) -> usize {
        self.tree.size()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::graph::Edge;
    use crate::layout::TidyTreeLayout;

    // 0 → 1, 0 → 2, 0 → 3 lays out as (0, 0), (-1, 1), (0, 1), (1, 1).
    fn fan_index() -> SpatialIndex {
        let nodes: Vec<NodeId> = (0..4).map(NodeId).collect();
        let edges = [Edge::new(0, 1), Edge::new(0, 2), Edge::new(0, 3)];
        let result = TidyTreeLayout::with_defaults()
            .compute(&nodes, &edges)
            .unwrap();
        SpatialIndex::from_result(&result)
    }

    #[test]
    fn test_from_result_and_nearest() {
        let index = fan_index();
        assert_eq!(index.len(), 4);
        assert_eq!(index.nearest(0.1, -0.2), Some(NodeId(0)));
        assert_eq!(index.nearest(-0.9, 1.1), Some(NodeId(1)));
        assert_eq!(index.nearest(5.0, 1.0), Some(NodeId(3)));
    }

    #[test]
    fn test_nearest_within() {
        let index = fan_index();
        assert_eq!(index.nearest_within(1.0, 1.2, 0.5), Some(NodeId(3)));
        assert_eq!(index.nearest_within(3.0, 3.0, 0.5), None);
    }

    #[test]
    fn test_in_rect() {
        let index = fan_index();
        let mut hits = index.in_rect(-1.5, 0.5, 0.5, 1.5);
        hits.sort();
        assert_eq!(hits, vec![NodeId(1), NodeId(2)]);

        // Corners dragged right-to-left select the same nodes.
        let mut flipped = index.in_rect(0.5, 1.5, -1.5, 0.5);
        flipped.sort();
        assert_eq!(flipped, hits);
    }

    #[test]
    fn test_in_radius() {
        let index = fan_index();
        let mut hits = index.in_radius(0.0, 1.0, 1.01);
        hits.sort();
        assert_eq!(hits, vec![NodeId(0), NodeId(1), NodeId(2), NodeId(3)]);
    }

    #[test]
    fn test_empty() {
        let index = SpatialIndex::new();
        assert!(index.is_empty());
        assert_eq!(index.nearest(0.0, 0.0), None);
    }
}
