/// Viewport and the controller that keeps the camera projection in sync
/// with the host-reported size.

use crate::error::{Error, Result};
use crate::{engine_debug, engine_warn};
use super::camera::{Camera, CameraConfig};

const SOURCE: &str = "scenegraph::ViewportController";

/// Host viewport size in physical pixels
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Viewport {
    pub width: u32,
    pub height: u32,
    /// Device pixels per logical pixel
    pub pixel_ratio: f64,
}

impl Viewport {
    pub fn new(width: u32, height: u32) -> Self {
        Self { width, height, pixel_ratio: 1.0 }
    }

    /// Width / height. Only meaningful for a non-zero height.
    pub fn aspect(&self) -> f32 {
        self.width as f32 / self.height as f32
    }
}

/// Owns the camera and recomputes its projection on every resize.
///
/// The last accepted viewport is kept: a rejected resize leaves both the
/// viewport and the camera aspect untouched.
pub struct ViewportController {
    camera: Camera,
    viewport: Option<Viewport>,
    pixel_ratio: f64,
}

impl ViewportController {
    pub fn new(config: CameraConfig) -> Self {
        Self {
            camera: Camera::new(config),
            viewport: None,
            pixel_ratio: 1.0,
        }
    }

    pub fn camera(&self) -> &Camera {
        &self.camera
    }

    /// Position / look-at / fov changes; the projection is kept up to date
    /// by the camera's own setters.
    pub fn camera_mut(&mut self) -> &mut Camera {
        &mut self.camera
    }

    /// Last accepted viewport, None before the first successful resize
    pub fn viewport(&self) -> Option<&Viewport> {
        self.viewport.as_ref()
    }

    /// Pixel ratio applied to subsequent resizes
    pub fn set_pixel_ratio(&mut self, pixel_ratio: f64) {
        self.pixel_ratio = pixel_ratio;
        if let Some(viewport) = self.viewport.as_mut() {
            viewport.pixel_ratio = pixel_ratio;
        }
    }

    /// Apply a host-reported size.
    ///
    /// # Errors
    ///
    /// `InvalidViewport` if either dimension is zero (minimized window).
    /// The previous aspect ratio and projection stay in effect.
    pub fn on_resize(&mut self, width: u32, height: u32) -> Result<&Viewport> {
        if width == 0 || height == 0 {
            let error = Error::InvalidViewport { width, height };
            engine_warn!(SOURCE, "{}; keeping aspect {:.4}", error, self.camera.aspect());
            return Err(error);
        }

        let viewport = Viewport {
            width,
            height,
            pixel_ratio: self.pixel_ratio,
        };
        self.camera.set_aspect(viewport.aspect());
        engine_debug!(SOURCE, "Viewport {}x{} (aspect {:.4})", width, height, viewport.aspect());
        Ok(self.viewport.insert(viewport))
    }
}

impl Default for ViewportController {
    fn default() -> Self {
        Self::new(CameraConfig::default())
    }
}

#[cfg(test)]
#[path = "viewport_tests.rs"]
mod tests;
