/// Mesh factory boundary.
///
/// Geometry generation is external: the core only asks a factory for a
/// handle and stores it on a leaf node. It never looks inside.

use crate::error::Result;

/// Opaque geometry handle produced by a MeshFactory
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct GeometryHandle(u64);

impl GeometryHandle {
    pub fn new(id: u64) -> Self {
        Self(id)
    }

    pub fn id(&self) -> u64 {
        self.0
    }
}

/// Geometry requested from a factory, with its construction parameters
#[derive(Debug, Clone, PartialEq)]
pub enum MeshKind {
    Box {
        width: f32,
        height: f32,
        depth: f32,
    },
    Sphere {
        radius: f32,
        width_segments: u32,
        height_segments: u32,
    },
    Plane {
        width: f32,
        height: f32,
    },
    Torus {
        radius: f32,
        tube: f32,
        radial_segments: u32,
        tubular_segments: u32,
    },
    TorusKnot {
        radius: f32,
        tube: f32,
        tubular_segments: u32,
        radial_segments: u32,
        p: u32,
        q: u32,
    },
    /// Extruded text. `font` is a handle from an AssetLoader.
    Text {
        text: String,
        font: crate::resource::ResourceHandle,
        size: f32,
        depth: f32,
    },
}

impl MeshKind {
    /// Short name for logs
    pub fn label(&self) -> &'static str {
        match self {
            MeshKind::Box { .. } => "box",
            MeshKind::Sphere { .. } => "sphere",
            MeshKind::Plane { .. } => "plane",
            MeshKind::Torus { .. } => "torus",
            MeshKind::TorusKnot { .. } => "torus_knot",
            MeshKind::Text { .. } => "text",
        }
    }
}

/// Builds geometry and hands back an opaque handle
pub trait MeshFactory {
    fn build(&mut self, kind: &MeshKind) -> Result<GeometryHandle>;
}
