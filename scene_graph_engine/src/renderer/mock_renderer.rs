//! Mock collaborators for unit tests (no window, no GPU)
//!
//! MockRenderer records what it was asked to draw, MockHost records
//! scheduling requests, MockMeshFactory and MockAssetLoader hand out
//! sequential handles.

use glam::Vec3;
use rustc_hash::FxHashMap;

use crate::camera::{Camera, Viewport};
use crate::error::Result;
use crate::engine_bail;
use crate::render_loop::Host;
use crate::renderer::{Renderer, RendererStats};
use crate::resource::{
    asset_channel, AssetLoader, AssetPromise, GeometryHandle, MeshFactory, MeshKind,
    PendingAsset, ResourceHandle,
};
use crate::scene::{NodeKey, SceneGraph};

// ============================================================================
// Mock Renderer
// ============================================================================

/// Snapshot of one submitted frame
#[derive(Debug, Clone)]
pub struct MockFrame {
    pub aspect: f32,
    pub world_positions: FxHashMap<NodeKey, Vec3>,
    pub light_targets: FxHashMap<NodeKey, Vec3>,
    /// Reachable nodes still flagged dirty at submit time
    pub dirty_nodes: usize,
}

#[derive(Default)]
pub struct MockRenderer {
    pub frames: Vec<MockFrame>,
    pub resizes: Vec<Viewport>,
    pub fail_next_submit: bool,
    stats: RendererStats,
}

impl MockRenderer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn last_frame(&self) -> Option<&MockFrame> {
        self.frames.last()
    }
}

impl Renderer for MockRenderer {
    fn resize(&mut self, viewport: &Viewport) -> Result<()> {
        self.resizes.push(*viewport);
        Ok(())
    }

    fn submit(&mut self, scene: &SceneGraph, camera: &Camera) -> Result<()> {
        if self.fail_next_submit {
            self.fail_next_submit = false;
            engine_bail!("scenegraph::mock", "submit: forced failure");
        }

        let mut frame = MockFrame {
            aspect: camera.aspect(),
            world_positions: FxHashMap::default(),
            light_targets: FxHashMap::default(),
            dirty_nodes: 0,
        };
        let mut drawn = 0;
        let mut lights = 0;
        for (key, node) in scene.iter_reachable() {
            frame.world_positions.insert(key, node.world_position());
            if let Some(light) = node.light() {
                frame.light_targets.insert(key, light.target);
                lights += 1;
            }
            if node.is_world_dirty() {
                frame.dirty_nodes += 1;
            }
            if node.geometry().is_some() && node.is_visible() {
                drawn += 1;
            }
        }
        self.frames.push(frame);
        self.stats = RendererStats {
            frames: self.stats.frames + 1,
            drawn_nodes: drawn,
            lights,
        };
        Ok(())
    }

    fn stats(&self) -> RendererStats {
        self.stats
    }
}

// ============================================================================
// Mock Host
// ============================================================================

pub struct MockHost {
    pub size: (u32, u32),
    pub pixel_ratio: f64,
    pub tick_requests: usize,
}

impl MockHost {
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            size: (width, height),
            pixel_ratio: 1.0,
            tick_requests: 0,
        }
    }
}

impl Host for MockHost {
    fn viewport_size(&self) -> (u32, u32) {
        self.size
    }

    fn pixel_ratio(&self) -> f64 {
        self.pixel_ratio
    }

    fn request_tick(&mut self) {
        self.tick_requests += 1;
    }
}

// ============================================================================
// Mock Mesh Factory
// ============================================================================

#[derive(Default)]
pub struct MockMeshFactory {
    pub built: Vec<MeshKind>,
}

impl MeshFactory for MockMeshFactory {
    fn build(&mut self, kind: &MeshKind) -> Result<GeometryHandle> {
        self.built.push(kind.clone());
        Ok(GeometryHandle::new(self.built.len() as u64))
    }
}

// ============================================================================
// Mock Asset Loader
// ============================================================================

/// Keeps the promises so the test decides when (and whether) loads complete
#[derive(Default)]
pub struct MockAssetLoader {
    pub promises: Vec<(String, AssetPromise)>,
}

impl MockAssetLoader {
    /// Complete the oldest outstanding load with `handle`
    pub fn complete_next(&mut self, handle: ResourceHandle) -> bool {
        if self.promises.is_empty() {
            return false;
        }
        let (_, promise) = self.promises.remove(0);
        promise.complete(handle);
        true
    }
}

impl AssetLoader for MockAssetLoader {
    fn load(&mut self, uri: &str) -> PendingAsset {
        let (promise, pending) = asset_channel(uri);
        self.promises.push((uri.to_string(), promise));
        pending
    }
}
