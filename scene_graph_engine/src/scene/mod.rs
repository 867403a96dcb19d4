//! Scene module
//!
//! Provides the node arena (SceneGraph), its nodes, local transforms
//! and light payloads.

mod transform;
mod light;
mod scene_node;
mod scene_graph;

pub use transform::{Transform, Axis};
pub use light::{Light, LightKind};
pub use scene_node::{SceneNode, NodeKey, NodeDesc, NodeFlags};
pub use scene_graph::SceneGraph;
