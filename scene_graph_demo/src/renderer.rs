//! Renderer that logs what it would draw instead of rasterizing.

use scene_graph_engine::scenegraph::{Error, Result};
use scene_graph_engine::scenegraph::camera::{Camera, Viewport};
use scene_graph_engine::scenegraph::render::{Renderer, RendererStats};
use scene_graph_engine::scenegraph::scene::SceneGraph;
use scene_graph_engine::{engine_info, engine_trace};

const SOURCE: &str = "demo::LoggingRenderer";

pub struct LoggingRenderer {
    stats: RendererStats,
    /// Log a frame summary every `summary_interval` frames
    summary_interval: u64,
}

impl LoggingRenderer {
    pub fn new(summary_interval: u64) -> Self {
        Self {
            stats: RendererStats::default(),
            summary_interval: summary_interval.max(1),
        }
    }
}

impl Renderer for LoggingRenderer {
    fn resize(&mut self, viewport: &Viewport) -> Result<()> {
        engine_info!(SOURCE, "Surface {}x{} (pixel ratio {:.2})",
            viewport.width, viewport.height, viewport.pixel_ratio);
        Ok(())
    }

    fn submit(&mut self, scene: &SceneGraph, camera: &Camera) -> Result<()> {
        let aspect = camera.aspect();
        if !aspect.is_finite() || aspect <= 0.0 {
            return Err(Error::RenderFailed(format!("camera aspect {} is not drawable", aspect)));
        }

        let mut drawn = 0;
        let mut lights = 0;
        let mut pivots = 0;
        for (key, node) in scene.iter_reachable() {
            if node.is_pivot() {
                pivots += 1;
                continue;
            }
            if node.is_visible() && node.geometry().is_some() {
                drawn += 1;
            }
            if let Some(light) = node.light() {
                lights += 1;
                if light.kind.has_target() {
                    engine_trace!(SOURCE, "Light {:?} rgb {:?} aims at {:?}",
                        key, light.color_rgb() * light.intensity, light.target);
                }
            }
        }

        self.stats = RendererStats {
            frames: self.stats.frames + 1,
            drawn_nodes: drawn,
            lights,
        };

        if (self.stats.frames - 1) % self.summary_interval == 0 {
            let light_direction = scene
                .iter_reachable()
                .find(|(_, node)| node.light().map(|l| l.kind.has_target()).unwrap_or(false))
                .and_then(|(key, _)| scene.light_direction(key));
            engine_info!(SOURCE, "Frame {}: {} mesh(es), {} light(s), {} pivot(s), camera at {:?}, light direction {:?}",
                self.stats.frames, drawn, lights, pivots, camera.position(), light_direction);
        }
        Ok(())
    }

    fn stats(&self) -> RendererStats {
        self.stats
    }
}
