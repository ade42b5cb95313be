//! Animated transitions from a host's current coordinates to a layout result.
//!
//! The layout itself is instantaneous; hosts that want to move nodes smoothly
//! sample a [`Transition`] once per frame.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;

use super::tidy_tree::{NodePosition, TidyTreeResult};
use crate::graph::NodeId;

/// Easing curves, named as in sigma.js.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Easing {
    Linear,
    QuadraticIn,
    QuadraticOut,
    #[default]
    QuadraticInOut,
    CubicIn,
    CubicOut,
    CubicInOut,
}

impl Easing {
    /// Map progress `t` (clamped to [0, 1]) onto the curve.
    pub fn apply(self, t: f64) -> f64 {
        let t = t.clamp(0.0, 1.0);
        match self {
            Easing::Linear => t,
            Easing::QuadraticIn => t * t,
            Easing::QuadraticOut => t * (2.0 - t),
            Easing::QuadraticInOut => {
                let k = t * 2.0;
                if k < 1.0 {
                    0.5 * k * k
                } else {
                    let k = k - 1.0;
                    -0.5 * (k * (k - 2.0) - 1.0)
                }
            }
            Easing::CubicIn => t * t * t,
            Easing::CubicOut => {
                let k = t - 1.0;
                k * k * k + 1.0
            }
            Easing::CubicInOut => {
                let k = t * 2.0;
                if k < 1.0 {
                    0.5 * k * k * k
                } else {
                    let k = k - 2.0;
                    0.5 * (k * k * k + 2.0)
                }
            }
        }
    }
}

/// How a host animates between layouts.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct AnimationConfig {
    pub easing: Easing,
    /// Duration in milliseconds; zero or less jumps straight to the target.
    pub duration_ms: f64,
}

impl Default for AnimationConfig {
    fn default() -> Self {
        Self {
            easing: Easing::QuadraticInOut,
            duration_ms: 200.0,
        }
    }
}

/// Interpolation from previous node coordinates to a layout result.
#[derive(Debug, Clone)]
pub struct Transition {
    config: AnimationConfig,
    // (from, to) per node, in result order.
    tracks: Vec<(NodePosition, NodePosition)>,
}

impl Transition {
    /// Nodes missing from `from` start at their target position.
    pub fn new(
        from: impl IntoIterator<Item = (NodeId, (f64, f64))>,
        to: &TidyTreeResult,
        config: AnimationConfig,
    ) -> Self {
        let from: HashMap<NodeId, (f64, f64)> = from.into_iter().collect();
        let tracks = to
            .positions()
            .iter()
            .map(|&target| {
                let start = match from.get(&target.id) {
                    Some(&(x, y)) => NodePosition { x, y, ..target },
                    None => target,
                };
                (start, target)
            })
            .collect();

        Self { config, tracks }
    }

    pub fn config(&self) -> &AnimationConfig {
        &self.config
    }

    pub fn is_complete(&self, elapsed_ms: f64) -> bool {
        elapsed_ms >= self.config.duration_ms
    }

    /// Positions `elapsed_ms` into the transition.
    pub fn sample(&self, elapsed_ms: f64) -> Vec<NodePosition> {
        let progress = if self.config.duration_ms > 0.0 {
            elapsed_ms / self.config.duration_ms
        } else {
            1.0
        };
        let k = self.config.easing.apply(progress);

        self.tracks
            .iter()
            .map(|(start, target)| NodePosition {
                x: start.x + (target.x - start.x) * k,
                y: start.y + (target.y - start.y) * k,
                ..*target
            })
            .collect()
    }
}
