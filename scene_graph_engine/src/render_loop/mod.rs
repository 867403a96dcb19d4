//! Render loop module
//!
//! The explicit scene context, the host boundary and the scheduler
//! that ties animation, recomputation and rendering together.

mod host;
mod context;
mod render_loop;

pub use host::Host;
pub use context::{SceneContext, RenderLoopConfig};
pub use render_loop::{RenderLoop, LoopState, TickOutcome};
