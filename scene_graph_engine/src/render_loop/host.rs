//! Host environment boundary (window / canvas / display link).

/// What the render loop needs from its host.
///
/// The host owns the event loop: it calls `RenderLoop::on_resize` when
/// the size changes and `RenderLoop::tick` when a requested frame is due.
pub trait Host {
    /// Current drawable size in physical pixels
    fn viewport_size(&self) -> (u32, u32);

    /// Device pixels per logical pixel
    fn pixel_ratio(&self) -> f64 {
        1.0
    }

    /// Ask for one more tick (display-refresh driven)
    fn request_tick(&mut self);
}
