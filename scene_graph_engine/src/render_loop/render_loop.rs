/// RenderLoop - top-level per-frame scheduler.
///
/// State machine: `Idle -> Running -> Stopped`. One tick runs to
/// completion before the next may start; the only suspension point is
/// between ticks, when control goes back to the host. `stop()` is
/// cooperative: a tick delivered after it is a no-op.

use crate::animation::TickReport;
use crate::error::{Error, Result};
use crate::renderer::Renderer;
use crate::{engine_error, engine_info, engine_trace, engine_warn};
use super::context::SceneContext;
use super::host::Host;

const SOURCE: &str = "scenegraph::RenderLoop";

/// Render loop lifecycle state
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoopState {
    Idle,
    Running,
    Stopped,
}

/// Result of a delivered tick
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum TickOutcome {
    /// A frame was animated and submitted
    Rendered(TickReport),
    /// The loop is not running; nothing happened
    Skipped,
}

/// Drives animation, world-transform recomputation and rendering.
pub struct RenderLoop<R: Renderer> {
    context: SceneContext,
    renderer: R,
    state: LoopState,
    tick_count: u64,
    tick_pending: bool,
}

impl<R: Renderer> RenderLoop<R> {
    pub fn new(context: SceneContext, renderer: R) -> Self {
        Self {
            context,
            renderer,
            state: LoopState::Idle,
            tick_count: 0,
            tick_pending: false,
        }
    }

    // ===== ACCESS =====

    pub fn state(&self) -> LoopState {
        self.state
    }

    pub fn is_running(&self) -> bool {
        self.state == LoopState::Running
    }

    /// Ticks processed (skipped ticks are not counted)
    pub fn tick_count(&self) -> u64 {
        self.tick_count
    }

    /// Whether a tick was requested from the host and not yet delivered
    pub fn tick_pending(&self) -> bool {
        self.tick_pending
    }

    pub fn context(&self) -> &SceneContext {
        &self.context
    }

    /// Setup-time or between-tick access to the scene
    pub fn context_mut(&mut self) -> &mut SceneContext {
        &mut self.context
    }

    pub fn renderer(&self) -> &R {
        &self.renderer
    }

    pub fn renderer_mut(&mut self) -> &mut R {
        &mut self.renderer
    }

    /// Tear down: give back the context and the renderer
    pub fn into_parts(self) -> (SceneContext, R) {
        (self.context, self.renderer)
    }

    // ===== LIFECYCLE =====

    /// `Idle -> Running`: apply the host's current size, then request the first tick.
    ///
    /// An invalid initial size is logged and the configured aspect is kept
    /// until the host reports a valid one.
    ///
    /// # Errors
    ///
    /// - `InvalidState` if the loop was already started or stopped
    /// - renderer resize failures (the loop stays Idle)
    pub fn start(&mut self, host: &mut dyn Host) -> Result<()> {
        match self.state {
            LoopState::Idle => {}
            LoopState::Running => {
                return Err(self.fail(Error::InvalidState("render loop already running".to_string())));
            }
            LoopState::Stopped => {
                return Err(self.fail(Error::InvalidState("a stopped render loop cannot restart".to_string())));
            }
        }

        self.context.viewport.set_pixel_ratio(host.pixel_ratio());
        let (width, height) = host.viewport_size();
        match self.on_resize(width, height) {
            Ok(()) => {}
            Err(Error::InvalidViewport { .. }) => {
                engine_warn!(SOURCE, "Starting with the configured aspect ratio");
            }
            Err(error) => return Err(error),
        }

        self.state = LoopState::Running;
        engine_info!(SOURCE, "Render loop started ({}x{})", width, height);

        host.request_tick();
        self.tick_pending = true;
        Ok(())
    }

    /// Host size changed: update the projection, then tell the renderer.
    ///
    /// # Errors
    ///
    /// `InvalidViewport` for a zero dimension (the previous projection is
    /// kept and rendering can continue), or a renderer resize failure.
    pub fn on_resize(&mut self, width: u32, height: u32) -> Result<()> {
        let viewport = *self.context.viewport.on_resize(width, height)?;
        self.renderer.resize(&viewport).map_err(|error| self.fail(error))
    }

    /// Process one host tick.
    ///
    /// Order: completed asset attaches, animation (two-phase), world
    /// recomputation, renderer submit, re-arm. The next tick is requested
    /// even if this one failed, so one bad frame does not end the loop;
    /// the error is still returned to the host.
    pub fn tick(&mut self, host: &mut dyn Host, timestamp: f64) -> Result<TickOutcome> {
        self.tick_pending = false;
        if self.state != LoopState::Running {
            engine_trace!(SOURCE, "Tick ignored in state {:?}", self.state);
            return Ok(TickOutcome::Skipped);
        }

        let result = self.run_frame(timestamp);
        self.tick_count += 1;

        host.request_tick();
        self.tick_pending = true;

        result.map(TickOutcome::Rendered)
    }

    /// `Running -> Stopped` (or `Idle -> Stopped`). Already-requested ticks become no-ops.
    pub fn stop(&mut self) {
        if self.state == LoopState::Stopped {
            return;
        }
        self.state = LoopState::Stopped;
        engine_info!(SOURCE, "Render loop stopped after {} tick(s)", self.tick_count);
    }

    fn run_frame(&mut self, timestamp: f64) -> Result<TickReport> {
        let context = &mut self.context;

        context.assets.drain_completed(&mut context.graph)?;

        let report = context.animation.tick(&mut context.graph, timestamp);
        let visited = context.graph.recompute_world_transforms();

        engine_trace!(SOURCE, "Tick {}: t={:.3}s, {} node(s)",
            self.tick_count, report.time_seconds, visited);

        if let Err(error) = self.renderer.submit(&context.graph, context.viewport.camera()) {
            engine_error!(SOURCE, "Frame {} not rendered: {}", self.tick_count, error);
            return Err(error);
        }
        Ok(report)
    }

    fn fail(&self, error: Error) -> Error {
        engine_error!(SOURCE, "{}", error);
        error
    }
}

#[cfg(test)]
#[path = "render_loop_tests.rs"]
mod tests;
