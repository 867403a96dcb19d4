/// SceneContext - everything one running scene owns, passed explicitly.

use crate::animation::{AnimationDriver, DEFAULT_TIME_SCALE};
use crate::camera::{CameraConfig, ViewportController};
use crate::resource::AssetAttachQueue;
use crate::scene::SceneGraph;

/// Per-scene setup parameters
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RenderLoopConfig {
    /// Host timestamp units to seconds (0.001 for milliseconds)
    pub time_scale: f64,
    pub camera: CameraConfig,
}

impl Default for RenderLoopConfig {
    fn default() -> Self {
        Self {
            time_scale: DEFAULT_TIME_SCALE,
            camera: CameraConfig::default(),
        }
    }
}

/// Scene graph, camera/viewport, bindings and pending asset attaches.
///
/// Built once during setup, owned by the RenderLoop while it runs and
/// handed back by `RenderLoop::into_parts`. If it ever has to be shared
/// across threads, guard the whole context with a single lock: a partial
/// update observed mid-traversal would expose inconsistent world matrices.
pub struct SceneContext {
    pub graph: SceneGraph,
    pub viewport: ViewportController,
    pub animation: AnimationDriver,
    pub assets: AssetAttachQueue,
}

impl SceneContext {
    pub fn new(config: &RenderLoopConfig) -> Self {
        Self::with_graph(SceneGraph::new(), config)
    }

    pub fn with_graph(graph: SceneGraph, config: &RenderLoopConfig) -> Self {
        Self {
            graph,
            viewport: ViewportController::new(config.camera),
            animation: AnimationDriver::new(config.time_scale),
            assets: AssetAttachQueue::new(),
        }
    }
}

impl Default for SceneContext {
    fn default() -> Self {
        Self::new(&RenderLoopConfig::default())
    }
}
