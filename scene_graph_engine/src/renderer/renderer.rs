/// Renderer trait - the external rasterizer seen from the scene graph

use crate::camera::{Camera, Viewport};
use crate::error::Result;
use crate::scene::SceneGraph;

/// Renderer statistics for the last submitted frame
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct RendererStats {
    /// Frames submitted since creation
    pub frames: u64,
    /// Visible nodes with geometry in the last frame
    pub drawn_nodes: u32,
    /// Lights in the last frame
    pub lights: u32,
}

/// Consumes a scene and a camera and produces a frame.
///
/// The scene's world matrices are up to date when `submit` is called.
/// Implementations report malformed input through `Err`.
pub trait Renderer {
    /// Viewport changed; called after the camera projection was updated
    fn resize(&mut self, _viewport: &Viewport) -> Result<()> {
        Ok(())
    }

    /// Render one frame
    fn submit(&mut self, scene: &SceneGraph, camera: &Camera) -> Result<()>;

    /// Statistics for the last frame
    fn stats(&self) -> RendererStats {
        RendererStats::default()
    }
}
