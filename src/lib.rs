//! Tidy Tree - WASM Module
//!
//! Computes compact, symmetric, overlap-free coordinates for the nodes of a
//! rooted tree with the linear-time algorithm of Buchheim, Junger and
//! Leipert. The core is plain Rust; the `TidyTreeWasm` adapter exposes it to
//! JavaScript hosts via wasm-bindgen.
//!
//! # Architecture
//!
//! - `graph`: Host vocabulary (stable node ids, parent → child edges)
//! - `tree`: Index arena, tree builder and contour navigation
//! - `layout`: First/second walk, apportionment, layout facade, transitions
//! - `spatial`: R-tree spatial indexing over a layout result for hit testing

use js_sys::{Float64Array, Function};
use serde::Deserialize;
use wasm_bindgen::prelude::*;

pub mod error;
pub mod graph;
pub mod layout;
pub mod spatial;
pub mod tree;

pub use error::Error;
pub use graph::{Edge, NodeId};
pub use layout::{
    AnimationConfig, Easing, LayoutEvent, LayoutObserver, LayoutState, NodePosition,
    TidyTreeConfig, TidyTreeLayout, TidyTreeResult, Transition,
};
pub use spatial::SpatialIndex;
pub use tree::{build_tree, Tree, TreeNode};

/// Initialize the WASM module.
#[wasm_bindgen(start)]
pub fn init() {
    console_error_panic_hook::set_once();
}

/// Options accepted by the `TidyTreeWasm` constructor.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
struct WasmOptions {
    #[serde(flatten)]
    layout: TidyTreeConfig,
    #[serde(flatten)]
    animation: AnimationConfig,
}

/// Forwards lifecycle events to a JavaScript listener as
/// `"start"`, `"stop"`, `"abort"` or `"interpolate"`.
struct JsListener<'a>(Option<&'a Function>);

impl LayoutObserver for JsListener<'_> {
    fn notify(&mut self, event: &LayoutEvent) {
        let Some(listener) = self.0 else {
            return;
        };
        let name = match event {
            LayoutEvent::Started { .. } => "start",
            LayoutEvent::Finished { .. } => "stop",
            LayoutEvent::Aborted => "abort",
            LayoutEvent::Interpolating { .. } => "interpolate",
        };
        if let Err(err) = listener.call1(&JsValue::NULL, &JsValue::from_str(name)) {
            tracing::warn!(event = name, error = ?err, "layout listener threw");
        }
    }
}

/// Main entry point for JavaScript hosts.
///
/// One instance per host graph object. The host keeps ownership of its node
/// store: it passes ids and edges in and writes the returned coordinates back.
#[wasm_bindgen]
pub struct TidyTreeWasm {
    layout: TidyTreeLayout,
    animation: AnimationConfig,
    listener: Option<Function>,
    last: Option<TidyTreeResult>,
    spatial: SpatialIndex,
    // Set by the first transition frame after each layout.
    interpolating: bool,
}

#[wasm_bindgen]
impl TidyTreeWasm {
    /// Create a layout instance.
    ///
    /// `options` may be undefined or an object with any of `siblingDistance`,
    /// `levelSeparation`, `easing` and `durationMs`.
    #[wasm_bindgen(constructor)]
    pub fn new(options: JsValue) -> Result<TidyTreeWasm, JsError> {
        let options: WasmOptions = if options.is_undefined() || options.is_null() {
            WasmOptions::default()
        } else {
            serde_wasm_bindgen::from_value(options)?
        };
        Ok(Self::from_options(options)?)
    }

    /// Register a listener called with `"start"`, `"stop"`, `"abort"` or
    /// `"interpolate"`.
    #[wasm_bindgen(js_name = onEvent)]
    pub fn on_event(&mut self, listener: Function) {
        self.listener = Some(listener);
    }

    /// Whether a layout run is in progress.
    #[wasm_bindgen(js_name = isRunning)]
    pub fn is_running(&self) -> bool {
        self.layout.is_running()
    }

    /// Animation duration the host should use, in milliseconds.
    #[wasm_bindgen(getter, js_name = durationMs)]
    pub fn duration_ms(&self) -> f64 {
        self.animation.duration_ms
    }

    // =========================================================================
    // Layout
    // =========================================================================

    /// Compute a tidy tree layout.
    ///
    /// Takes the node ids and the tree edges as [parent0, child0, parent1,
    /// child1, ...] pairs. Returns a Float64Array of positions
    /// [x0, y0, x1, y1, ...] in the order of `node_ids`.
    pub fn compute(&mut self, node_ids: &[u32], edges: &[u32]) -> Result<Float64Array, JsError> {
        let result = self.run(node_ids, edges)?;
        Ok(Float64Array::from(&result.to_flat()[..]))
    }

    /// Like `compute`, returning `[{ id, x, y, depth }, ...]`.
    #[wasm_bindgen(js_name = computeNodes)]
    pub fn compute_nodes(&mut self, node_ids: &[u32], edges: &[u32]) -> Result<JsValue, JsError> {
        let result = self.run(node_ids, edges)?;
        Ok(serde_wasm_bindgen::to_value(result.positions())?)
    }

    /// Sample the transition from the host's current positions to the last
    /// computed layout.
    ///
    /// `from` holds [x0, y0, x1, y1, ...] in the node order of the last
    /// `compute` call. The first frame after a layout fires `"interpolate"`.
    #[wasm_bindgen(js_name = transitionFrame)]
    pub fn transition_frame(
        &mut self,
        from: &[f64],
        elapsed_ms: f64,
    ) -> Result<Float64Array, JsError> {
        let listener = self.listener.clone();
        match self.frame_observed(from, elapsed_ms, &mut JsListener(listener.as_ref())) {
            Some(positions) => Ok(Float64Array::from(&positions[..])),
            None => Err(JsError::new(
                "transitionFrame needs a computed layout and one (x, y) pair per node",
            )),
        }
    }

    // =========================================================================
    // Spatial Queries
    // =========================================================================

    /// Find the laid-out node nearest to a point.
    #[wasm_bindgen(js_name = findNearestNode)]
    pub fn find_nearest_node(&self, x: f64, y: f64) -> Option<u32> {
        self.spatial.nearest(x, y).map(|id| id.0)
    }

    /// Find the nearest laid-out node within a maximum distance.
    #[wasm_bindgen(js_name = findNearestNodeWithin)]
    pub fn find_nearest_node_within(&self, x: f64, y: f64, max_distance: f64) -> Option<u32> {
        self.spatial
            .nearest_within(x, y, max_distance)
            .map(|id| id.0)
    }

    /// Find all laid-out nodes within a rectangular region.
    #[wasm_bindgen(js_name = findNodesInRect)]
    pub fn find_nodes_in_rect(&self, min_x: f64, min_y: f64, max_x: f64, max_y: f64) -> Vec<u32> {
        self.spatial
            .in_rect(min_x, min_y, max_x, max_y)
            .into_iter()
            .map(|id| id.0)
            .collect()
    }
}

impl TidyTreeWasm {
    fn from_options(options: WasmOptions) -> error::Result<Self> {
        Ok(Self {
            layout: TidyTreeLayout::new(options.layout)?,
            animation: options.animation,
            listener: None,
            last: None,
            spatial: SpatialIndex::new(),
            interpolating: false,
        })
    }

    fn run(&mut self, node_ids: &[u32], edge_pairs: &[u32]) -> error::Result<&TidyTreeResult> {
        let nodes: Vec<NodeId> = node_ids.iter().copied().map(NodeId).collect();
        let edges = Edge::from_pairs(edge_pairs)?;

        let mut listener = JsListener(self.listener.as_ref());
        let result = self.layout.compute_observed(&nodes, &edges, &mut listener)?;

        self.spatial = SpatialIndex::from_result(&result);
        self.interpolating = false;
        Ok(&*self.last.insert(result))
    }

    fn frame_observed(
        &mut self,
        from: &[f64],
        elapsed_ms: f64,
        observer: &mut dyn LayoutObserver,
    ) -> Option<Vec<f64>> {
        let positions = self.frame(from, elapsed_ms)?;
        if !self.interpolating {
            self.interpolating = true;
            observer.notify(&LayoutEvent::Interpolating {
                node_count: positions.len() / 2,
            });
        }
        Some(positions)
    }

    fn frame(&self, from: &[f64], elapsed_ms: f64) -> Option<Vec<f64>> {
        let result = self.last.as_ref()?;
        if from.len() != result.len() * 2 {
            return None;
        }

        let previous = result
            .positions()
            .iter()
            .zip(from.chunks_exact(2))
            .map(|(p, xy)| (p.id, (xy[0], xy[1])));
        let transition = Transition::new(previous, result, self.animation);

        Some(
            transition
                .sample(elapsed_ms)
                .iter()
                .flat_map(|p| [p.x, p.y])
                .collect(),
        )
    }
}
