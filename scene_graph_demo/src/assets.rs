//! Stand-ins for geometry generation and font loading.
//!
//! Meshes get sequential handles. Fonts are "loaded" on a worker thread
//! after a delay, so the text node shows up a few frames after start.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use std::thread;
use std::time::Duration;
use scene_graph_engine::scenegraph::Result;
use scene_graph_engine::scenegraph::resource::{
    asset_channel, AssetLoader, GeometryHandle, MeshFactory, MeshKind, PendingAsset, ResourceHandle,
};
use scene_graph_engine::{engine_debug, engine_info};

/// Hands out geometry handles. Clones share the same counter, so a clone
/// can be moved into an asset attach closure.
#[derive(Clone, Default)]
pub struct DemoMeshFactory {
    next_id: Arc<AtomicU64>,
}

impl DemoMeshFactory {
    pub fn new() -> Self {
        Self::default()
    }
}

impl MeshFactory for DemoMeshFactory {
    fn build(&mut self, kind: &MeshKind) -> Result<GeometryHandle> {
        let id = self.next_id.fetch_add(1, Ordering::Relaxed) + 1;
        engine_debug!("demo::MeshFactory", "Built {} geometry #{}", kind.label(), id);
        Ok(GeometryHandle::new(id))
    }
}

/// Completes each load from its own thread after `delay`.
///
/// Only `.json` typeface files are accepted; anything else fails.
pub struct ThreadFontLoader {
    delay: Duration,
    next_id: u64,
}

impl ThreadFontLoader {
    pub fn new(delay: Duration) -> Self {
        Self { delay, next_id: 0 }
    }
}

impl AssetLoader for ThreadFontLoader {
    fn load(&mut self, uri: &str) -> PendingAsset {
        self.next_id += 1;
        let handle = ResourceHandle::new(self.next_id);
        let delay = self.delay;
        let (promise, pending) = asset_channel(uri);
        let uri = uri.to_string();

        engine_info!("demo::FontLoader", "Loading '{}'", uri);
        thread::spawn(move || {
            thread::sleep(delay);
            if uri.ends_with(".json") {
                promise.complete(handle);
            } else {
                promise.fail("unsupported font format");
            }
        });
        pending
    }
}
