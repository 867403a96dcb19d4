//! Error types for the scene graph engine
//!
//! Structural errors (cycle, double attach, detach of a non-child) are caller
//! bugs and are surfaced synchronously by the mutating operation. Viewport
//! errors are recoverable: the previous projection stays in effect.

use std::fmt;
use crate::scene::NodeKey;

/// Result type for scene graph engine operations
pub type Result<T> = std::result::Result<T, Error>;

/// Scene graph engine errors
#[derive(Debug, Clone, PartialEq)]
pub enum Error {
    /// Attaching `child` under `parent` would make a node its own ancestor
    Cycle {
        child: NodeKey,
        parent: NodeKey,
    },

    /// `child` already has a different parent (detach it first)
    AlreadyAttached {
        child: NodeKey,
        current_parent: NodeKey,
    },

    /// `child` is not a direct child of `parent`
    NotAChild {
        child: NodeKey,
        parent: NodeKey,
    },

    /// Host reported a viewport with a zero dimension
    InvalidViewport {
        width: u32,
        height: u32,
    },

    /// Key does not refer to a live node of this graph
    InvalidNode(NodeKey),

    /// Operation not allowed in the current render loop state
    InvalidState(String),

    /// Renderer rejected a resize or a frame submission
    RenderFailed(String),

    /// Asset loader reported a failure
    AssetFailed(String),

    /// Generic engine failure
    Engine(String),
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::Cycle { child, parent } => write!(
                f, "Cycle error: node {:?} is {:?} or one of its ancestors", child, parent
            ),
            Error::AlreadyAttached { child, current_parent } => write!(
                f, "Already attached: node {:?} is a child of {:?}", child, current_parent
            ),
            Error::NotAChild { child, parent } => write!(
                f, "Not a child: node {:?} is not a direct child of {:?}", child, parent
            ),
            Error::InvalidViewport { width, height } => write!(
                f, "Invalid viewport: {}x{}", width, height
            ),
            Error::InvalidNode(key) => write!(f, "Invalid node: {:?}", key),
            Error::InvalidState(msg) => write!(f, "Invalid state: {}", msg),
            Error::RenderFailed(msg) => write!(f, "Render failed: {}", msg),
            Error::AssetFailed(msg) => write!(f, "Asset failed: {}", msg),
            Error::Engine(msg) => write!(f, "Engine error: {}", msg),
        }
    }
}

impl std::error::Error for Error {}

/// Log an error message and build an [`Error::Engine`] from it
///
/// # Example
///
/// ```ignore
/// let err = engine_err!("scenegraph::RenderLoop", "no renderer for {}", name);
/// ```
#[macro_export]
macro_rules! engine_err {
    ($source:expr, $($arg:tt)*) => {{
        let message = format!($($arg)*);
        $crate::engine_error!($source, "{}", message);
        $crate::scenegraph::Error::Engine(message)
    }};
}

/// Log an error message and return it as `Err(Error::Engine(..))`
#[macro_export]
macro_rules! engine_bail {
    ($source:expr, $($arg:tt)*) => {
        return Err($crate::engine_err!($source, $($arg)*))
    };
}

#[cfg(test)]
#[path = "error_tests.rs"]
mod tests;
