//! Spatial indexing for hit testing on a laid-out tree.

mod rtree;

pub use rtree::SpatialIndex;
