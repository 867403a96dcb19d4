//! Camera module - perspective camera and viewport controller.
//!
//! The controller recomputes the camera aspect ratio from every host resize.

mod camera;
mod viewport;

pub use camera::{Camera, CameraConfig};
pub use viewport::{Viewport, ViewportController};
