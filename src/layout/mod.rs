//! Tidy tree layout.
//!
//! The walks (`walk`, `apportion`, `shift`) operate on a [`Tree`](crate::tree::Tree)
//! arena and are driven by [`TidyTreeLayout`]. `animate` turns a result into
//! frame-by-frame positions for hosts that animate between layouts.

pub mod animate;
mod apportion;
mod shift;
pub mod tidy_tree;
mod walk;

pub use animate::{AnimationConfig, Easing, Transition};
pub use tidy_tree::{
    LayoutEvent, LayoutObserver, LayoutState, NodePosition, TidyTreeConfig, TidyTreeLayout,
    TidyTreeResult,
};
