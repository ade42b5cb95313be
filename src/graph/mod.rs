//! Host-facing graph vocabulary.
//!
//! The layout never owns the host's node store. It only sees stable node ids
//! and the parent → child edges between them.

mod edge;
mod node;

pub use edge::Edge;
pub use node::NodeId;
