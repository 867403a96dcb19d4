//! winit application: the window is the render loop's host.

use std::time::Instant;
use winit::application::ApplicationHandler;
use winit::dpi::LogicalSize;
use winit::event::WindowEvent;
use winit::event_loop::ActiveEventLoop;
use winit::window::{Window, WindowId};
use scene_graph_engine::scenegraph::Error;
use scene_graph_engine::scenegraph::render::{Host, RenderLoop, Renderer};
use scene_graph_engine::{engine_error, engine_info};
use crate::renderer::LoggingRenderer;

const SOURCE: &str = "demo::App";

/// Host view of a window: size, scale factor and redraw scheduling
struct WinitHost<'a> {
    window: &'a Window,
}

impl Host for WinitHost<'_> {
    fn viewport_size(&self) -> (u32, u32) {
        let size = self.window.inner_size();
        (size.width, size.height)
    }

    fn pixel_ratio(&self) -> f64 {
        self.window.scale_factor()
    }

    fn request_tick(&mut self) {
        self.window.request_redraw();
    }
}

pub struct App {
    title: &'static str,
    window: Option<Window>,
    render_loop: RenderLoop<LoggingRenderer>,
    /// Tick timestamps are milliseconds since the loop started
    clock: Instant,
}

impl App {
    pub fn new(title: &'static str, render_loop: RenderLoop<LoggingRenderer>) -> Self {
        Self {
            title,
            window: None,
            render_loop,
            clock: Instant::now(),
        }
    }
}

impl ApplicationHandler for App {
    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        if self.window.is_some() {
            return;
        }

        let attributes = Window::default_attributes()
            .with_title(self.title)
            .with_inner_size(LogicalSize::new(1280.0, 720.0));
        let window = match event_loop.create_window(attributes) {
            Ok(window) => window,
            Err(e) => {
                engine_error!(SOURCE, "Failed to create window: {}", e);
                event_loop.exit();
                return;
            }
        };

        let mut host = WinitHost { window: &window };
        if let Err(e) = self.render_loop.start(&mut host) {
            engine_error!(SOURCE, "Failed to start render loop: {}", e);
            event_loop.exit();
            return;
        }
        self.clock = Instant::now();
        self.window = Some(window);
    }

    fn window_event(&mut self, event_loop: &ActiveEventLoop, _id: WindowId, event: WindowEvent) {
        match event {
            WindowEvent::CloseRequested => {
                self.render_loop.stop();
                event_loop.exit();
            }
            WindowEvent::Resized(size) => {
                match self.render_loop.on_resize(size.width, size.height) {
                    // Minimized: the controller already warned, keep the old projection
                    Ok(()) | Err(Error::InvalidViewport { .. }) => {}
                    Err(e) => engine_error!(SOURCE, "Resize failed: {}", e),
                }
            }
            WindowEvent::RedrawRequested => {
                if let Some(window) = self.window.as_ref() {
                    let mut host = WinitHost { window };
                    let timestamp = self.clock.elapsed().as_secs_f64() * 1000.0;
                    if let Err(e) = self.render_loop.tick(&mut host, timestamp) {
                        engine_error!(SOURCE, "Frame failed: {}", e);
                    }
                }
            }
            _ => {}
        }
    }

    fn exiting(&mut self, _event_loop: &ActiveEventLoop) {
        let stats = self.render_loop.renderer().stats();
        engine_info!(SOURCE, "Exiting after {} tick(s), {} frame(s) rendered",
            self.render_loop.tick_count(), stats.frames);
    }
}
