/*!
# Scene Graph Engine

A small real-time scene-graph core: a tree of spatial nodes with
parent-relative transforms, a per-frame animation/render loop, and
bindings that let one node's animated state drive another node's
derived property (a light continuously retargeted at a moving object).

## Architecture

- **Transform**: position / Euler rotation / scale and the derived local matrix
- **SceneGraph**: node arena, attach/detach/re-parent, name index, world-matrix pass
- **ViewportController**: camera projection kept in sync with the host viewport
- **AnimationDriver**: per-tick bindings, two-phase (independent, then dependent)
- **RenderLoop**: `Idle -> Running -> Stopped` scheduler driving everything above

Rasterization, mesh generation, asset decoding and windowing are external
collaborators reached through the `Renderer`, `MeshFactory`, `AssetLoader`
and `Host` traits.
*/

// Internal modules
mod error;
mod engine;
pub mod log;
pub mod scene;
pub mod camera;
pub mod animation;
pub mod renderer;
pub mod resource;
pub mod render_loop;

// Main scenegraph namespace module
pub mod scenegraph {
    // Error types
    pub use crate::error::{Error, Result};

    // Logging facade
    pub use crate::engine::Engine;

    // Logging sub-module (types only, NOT macros)
    pub mod log {
        pub use crate::log::{Logger, LogEntry, LogSeverity, DefaultLogger};
    }

    pub mod scene {
        pub use crate::scene::*;
    }

    pub mod camera {
        pub use crate::camera::*;
    }

    pub mod animation {
        pub use crate::animation::*;
    }

    pub mod render {
        pub use crate::renderer::*;
        pub use crate::render_loop::*;
    }

    pub mod resource {
        pub use crate::resource::*;
    }
}

// Re-export math library at crate root
pub use glam;
