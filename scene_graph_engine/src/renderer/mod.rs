//! Renderer boundary module

mod renderer;
#[cfg(test)]
pub(crate) mod mock_renderer;

pub use renderer::{Renderer, RendererStats};
