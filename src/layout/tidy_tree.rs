//! Buchheim-Junger-Leipert tidy tree layout.
//!
//! Implements the O(n) algorithm from "Improving Walker's Algorithm to Run in
//! Linear Time" (Buchheim, Junger, Leipert, 2002) for laying out arbitrary
//! m-ary trees with compact, symmetric, overlap-free positioning.
//!
//! # Algorithm Overview
//!
//! 1. **Build:** Validate the node/edge input as a single rooted tree and load
//!    it into an index arena.
//! 2. **First walk (bottom-up):** Recursively assign preliminary x-coordinates
//!    to each node by merging subtree contours. Uses threads for O(1) amortized
//!    contour traversal.
//! 3. **Second walk (top-down):** Apply accumulated modifiers to convert
//!    preliminary x-coordinates to final positions, with the root at x = 0
//!    and y proportional to depth.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;

use super::walk::{first_walk, second_walk};
use crate::error::{Error, Result};
use crate::graph::{Edge, NodeId};
use crate::tree::{build_tree, Tree};

/// Configuration for the tidy tree layout.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct TidyTreeConfig {
    /// Minimum horizontal gap between neighbouring nodes on one level.
    pub sibling_distance: f64,
    /// Vertical spacing between tree levels (y = depth * level_separation).
    pub level_separation: f64,
}

impl Default for TidyTreeConfig {
    fn default() -> Self {
        Self {
            sibling_distance: 1.0,
            level_separation: 1.0,
        }
    }
}

impl TidyTreeConfig {
    /// Reject spacings the walks cannot work with.
    pub fn validate(&self) -> Result<()> {
        let check = |field: &'static str, value: f64| {
            if value.is_finite() && value > 0.0 {
                Ok(())
            } else {
                Err(Error::InvalidConfig {
                    field,
                    value: value.to_string(),
                })
            }
        };
        check("siblingDistance", self.sibling_distance)?;
        check("levelSeparation", self.level_separation)
    }
}

/// Whether a layout run is in progress.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LayoutState {
    #[default]
    Idle,
    Running,
}

/// Lifecycle notifications emitted during [`TidyTreeLayout::compute_observed`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LayoutEvent {
    /// A run started; `node_count` is the size of the input node collection.
    Started { node_count: usize },
    /// Both walks completed for every node.
    Finished { node_count: usize },
    /// The input was rejected before any walk ran.
    Aborted,
    /// A host began animating its nodes towards the last result.
    Interpolating { node_count: usize },
}

/// Receives [`LayoutEvent`]s, e.g. to trigger a redraw or an animated
/// transition on the host side.
pub trait LayoutObserver {
    fn notify(&mut self, event: &LayoutEvent);
}

impl<F: FnMut(&LayoutEvent)> LayoutObserver for F {
    fn notify(&mut self, event: &LayoutEvent) {
        self(event)
    }
}

/// Final position of a single node.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct NodePosition {
    pub id: NodeId,
    pub x: f64,
    pub y: f64,
    pub depth: u32,
}

/// Result of the tidy tree layout computation.
///
/// Plain data: one [`NodePosition`] per input node, in input order.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TidyTreeResult {
    root: NodeId,
    positions: Vec<NodePosition>,
    #[serde(skip)]
    index: HashMap<NodeId, usize>,
}

impl TidyTreeResult {
    /// Collect the coordinates written by the second walk.
    pub fn from_tree(tree: &Tree) -> Self {
        let positions: Vec<NodePosition> = tree
            .nodes()
            .iter()
            .map(|node| NodePosition {
                id: node.id(),
                x: node.x(),
                y: node.y(),
                depth: node.depth(),
            })
            .collect();
        let index = positions
            .iter()
            .enumerate()
            .map(|(i, p)| (p.id, i))
            .collect();

        Self {
            root: tree.node(tree.root()).id(),
            positions,
            index,
        }
    }

    pub fn root(&self) -> NodeId {
        self.root
    }

    pub fn positions(&self) -> &[NodePosition] {
        &self.positions
    }

    pub fn position(&self, id: NodeId) -> Option<&NodePosition> {
        self.index.get(&id).map(|&i| &self.positions[i])
    }

    pub fn len(&self) -> usize {
        self.positions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.positions.is_empty()
    }

    /// Bounding box as `(min_x, min_y, max_x, max_y)`.
    pub fn bounds(&self) -> (f64, f64, f64, f64) {
        self.positions.iter().fold(
            (f64::INFINITY, f64::INFINITY, f64::NEG_INFINITY, f64::NEG_INFINITY),
            |(min_x, min_y, max_x, max_y), p| {
                (min_x.min(p.x), min_y.min(p.y), max_x.max(p.x), max_y.max(p.y))
            },
        )
    }

    /// Interleaved `[x0, y0, x1, y1, ...]` in input order.
    pub fn to_flat(&self) -> Vec<f64> {
        self.positions.iter().flat_map(|p| [p.x, p.y]).collect()
    }

    /// Node id → (x, y).
    pub fn to_map(&self) -> HashMap<NodeId, (f64, f64)> {
        self.positions.iter().map(|p| (p.id, (p.x, p.y))).collect()
    }
}

/// The tidy tree layout engine.
///
/// The caller owns one instance per tree it lays out; runs on independent
/// instances share no state.
#[derive(Debug, Clone, Default)]
pub struct TidyTreeLayout {
    config: TidyTreeConfig,
    state: LayoutState,
}

impl TidyTreeLayout {
    /// Create a new tidy tree layout with the given configuration.
    pub fn new(config: TidyTreeConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self {
            config,
            state: LayoutState::Idle,
        })
    }

    /// Create a tidy tree layout with default configuration.
    pub fn with_defaults() -> Self {
        Self::default()
    }

    pub fn config(&self) -> &TidyTreeConfig {
        &self.config
    }

    pub fn state(&self) -> LayoutState {
        self.state
    }

    pub fn is_running(&self) -> bool {
        self.state == LayoutState::Running
    }

    /// Compute the layout of the tree described by `nodes` and `edges`.
    ///
    /// `edges` run parent → child; their order fixes the left-to-right order
    /// of each node's children.
    pub fn compute(&mut self, nodes: &[NodeId], edges: &[Edge]) -> Result<TidyTreeResult> {
        self.compute_observed(nodes, edges, &mut |_: &LayoutEvent| {})
    }

    /// Like [`compute`](Self::compute), reporting lifecycle events to
    /// `observer`.
    pub fn compute_observed(
        &mut self,
        nodes: &[NodeId],
        edges: &[Edge],
        observer: &mut dyn LayoutObserver,
    ) -> Result<TidyTreeResult> {
        let _span = tracing::debug_span!(
            "tidy_tree_layout",
            nodes = nodes.len(),
            edges = edges.len()
        )
        .entered();

        self.state = LayoutState::Running;
        observer.notify(&LayoutEvent::Started {
            node_count: nodes.len(),
        });

        let mut tree = match build_tree(nodes, edges) {
            Ok(tree) => tree,
            Err(err) => {
                tracing::debug!(error = %err, "rejected layout input");
                self.state = LayoutState::Idle;
                observer.notify(&LayoutEvent::Aborted);
                return Err(err);
            }
        };

        self.layout_tree(&mut tree);
        let result = TidyTreeResult::from_tree(&tree);

        self.state = LayoutState::Idle;
        observer.notify(&LayoutEvent::Finished {
            node_count: result.len(),
        });
        Ok(result)
    }

    /// Run both walks over an already built tree.
    ///
    /// Working state from any previous run is reset first, so the same
    /// [`Tree`] can be laid out repeatedly.
    pub fn layout_tree(&self, tree: &mut Tree) {
        tree.reset();
        let root = tree.root();
        first_walk(tree, root, self.config.sibling_distance);
        let anchor = -tree.node(root).prelim();
        second_walk(tree, root, anchor, self.config.level_separation);
    }
}
