/// Scene node types.
///
/// A SceneNode lives in the SceneGraph arena and is addressed by a stable
/// NodeKey. Children are owned (removing a node removes its subtree); the
/// parent link is a plain key used for traversal only.

use bitflags::bitflags;
use glam::{Mat4, Vec3};
use slotmap::new_key_type;
use crate::resource::{GeometryHandle, ResourceHandle};
use super::light::Light;
use super::transform::Transform;

// ===== SLOT MAP KEY =====

new_key_type! {
    /// Stable key for a SceneNode within a SceneGraph.
    ///
    /// Keys remain valid across re-parenting and across removal of
    /// unrelated nodes. A key becomes invalid only when its own node
    /// (or an ancestor) is removed.
    pub struct NodeKey;
}

// ===== FLAGS =====

bitflags! {
    /// Per-node state bits
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
    pub struct NodeFlags: u32 {
        /// Node is submitted to the renderer
        const VISIBLE        = 1 << 0;
        /// Node casts shadows
        const CAST_SHADOW    = 1 << 1;
        /// Node receives shadows
        const RECEIVE_SHADOW = 1 << 2;
        /// Cached world matrix does not reflect the current ancestry/transform
        const WORLD_DIRTY    = 1 << 3;
    }
}

impl Default for NodeFlags {
    fn default() -> Self {
        NodeFlags::VISIBLE
    }
}

// ===== NODE DESCRIPTOR =====

/// Everything needed to create a node. The node starts detached.
#[derive(Debug, Clone, Default)]
pub struct NodeDesc {
    pub name: Option<String>,
    pub transform: Transform,
    pub geometry: Option<GeometryHandle>,
    pub resource: Option<ResourceHandle>,
    pub light: Option<Light>,
    pub flags: NodeFlags,
}

impl NodeDesc {
    pub fn new() -> Self {
        Self::default()
    }

    /// Geometry-less node used to re-center rotation for its children
    pub fn pivot(name: &str) -> Self {
        Self::new().with_name(name)
    }

    pub fn with_name(mut self, name: &str) -> Self {
        self.name = Some(name.to_string());
        self
    }

    pub fn with_transform(mut self, transform: Transform) -> Self {
        self.transform = transform;
        self
    }

    pub fn with_position(mut self, position: Vec3) -> Self {
        self.transform.position = position;
        self
    }

    pub fn with_geometry(mut self, geometry: GeometryHandle) -> Self {
        self.geometry = Some(geometry);
        self
    }

    pub fn with_resource(mut self, resource: ResourceHandle) -> Self {
        self.resource = Some(resource);
        self
    }

    pub fn with_light(mut self, light: Light) -> Self {
        self.light = Some(light);
        self
    }

    pub fn with_flags(mut self, flags: NodeFlags) -> Self {
        self.flags = flags;
        self
    }

    /// Enable both shadow casting and receiving
    pub fn with_shadows(mut self) -> Self {
        self.flags |= NodeFlags::CAST_SHADOW | NodeFlags::RECEIVE_SHADOW;
        self
    }
}

// ===== SCENE NODE =====

/// A node of the scene graph.
///
/// Structural fields (parent, children) are only modified by SceneGraph so
/// the tree stays acyclic and the name index stays consistent.
#[derive(Debug, Clone)]
pub struct SceneNode {
    name: Option<String>,
    transform: Transform,
    world_matrix: Mat4,
    parent: Option<NodeKey>,
    children: Vec<NodeKey>,
    flags: NodeFlags,
    geometry: Option<GeometryHandle>,
    resource: Option<ResourceHandle>,
    light: Option<Light>,
}

impl SceneNode {
    /// Create a detached node. Its world matrix starts as the local matrix
    /// and is flagged dirty until the first recomputation.
    pub fn new(desc: NodeDesc) -> Self {
        let world_matrix = desc.transform.to_matrix();
        Self {
            name: desc.name,
            transform: desc.transform,
            world_matrix,
            parent: None,
            children: Vec::new(),
            flags: desc.flags | NodeFlags::WORLD_DIRTY,
            geometry: desc.geometry,
            resource: desc.resource,
            light: desc.light,
        }
    }

    // ===== GETTERS =====

    pub fn name(&self) -> Option<&str> {
        self.name.as_deref()
    }

    /// Local transform (relative to the parent)
    pub fn transform(&self) -> &Transform {
        &self.transform
    }

    /// Local matrix derived from the transform
    pub fn local_matrix(&self) -> Mat4 {
        self.transform.to_matrix()
    }

    /// Cached world matrix from the last recomputation.
    ///
    /// Stale while [`is_world_dirty`](Self::is_world_dirty) is true.
    pub fn world_matrix(&self) -> &Mat4 {
        &self.world_matrix
    }

    /// Translation part of the cached world matrix
    pub fn world_position(&self) -> Vec3 {
        self.world_matrix.w_axis.truncate()
    }

    pub fn parent(&self) -> Option<NodeKey> {
        self.parent
    }

    /// Children in attach order
    pub fn children(&self) -> &[NodeKey] {
        &self.children
    }

    pub fn flags(&self) -> NodeFlags {
        self.flags
    }

    pub fn is_visible(&self) -> bool {
        self.flags.contains(NodeFlags::VISIBLE)
    }

    pub fn is_world_dirty(&self) -> bool {
        self.flags.contains(NodeFlags::WORLD_DIRTY)
    }

    pub fn geometry(&self) -> Option<GeometryHandle> {
        self.geometry
    }

    pub fn resource(&self) -> Option<ResourceHandle> {
        self.resource
    }

    pub fn light(&self) -> Option<&Light> {
        self.light.as_ref()
    }

    /// Node without geometry, resource or light
    pub fn is_pivot(&self) -> bool {
        self.geometry.is_none() && self.resource.is_none() && self.light.is_none()
    }

    /// `parent_world * local`. Pure: the graph decides what to cache.
    pub fn compute_world_matrix(&self, parent_world_matrix: &Mat4) -> Mat4 {
        *parent_world_matrix * self.local_matrix()
    }

    // ===== PAYLOAD SETTERS =====

    pub fn set_geometry(&mut self, geometry: Option<GeometryHandle>) {
        self.geometry = geometry;
    }

    pub fn set_resource(&mut self, resource: Option<ResourceHandle>) {
        self.resource = resource;
    }

    pub fn light_mut(&mut self) -> Option<&mut Light> {
        self.light.as_mut()
    }

    pub fn set_light(&mut self, light: Option<Light>) {
        self.light = light;
    }

    /// Set visibility / shadow flags. The dirty bit is not caller-controlled.
    pub fn set_flags(&mut self, flags: NodeFlags) {
        let dirty = self.flags & NodeFlags::WORLD_DIRTY;
        self.flags = (flags - NodeFlags::WORLD_DIRTY) | dirty;
    }

    // ===== GRAPH-INTERNAL =====

    pub(crate) fn set_name_internal(&mut self, name: Option<String>) {
        self.name = name;
    }

    pub(crate) fn transform_mut_internal(&mut self) -> &mut Transform {
        &mut self.transform
    }

    pub(crate) fn set_world_matrix(&mut self, matrix: Mat4) {
        self.world_matrix = matrix;
        self.flags.remove(NodeFlags::WORLD_DIRTY);
    }

    pub(crate) fn mark_world_dirty(&mut self) {
        self.flags.insert(NodeFlags::WORLD_DIRTY);
    }

    pub(crate) fn set_parent(&mut self, parent: Option<NodeKey>) {
        self.parent = parent;
    }

    pub(crate) fn push_child(&mut self, child: NodeKey) {
        self.children.push(child);
    }

    /// Remove `child` from the child list. Returns false if absent.
    pub(crate) fn remove_child(&mut self, child: NodeKey) -> bool {
        match self.children.iter().position(|&k| k == child) {
            Some(index) => {
                self.children.remove(index);
                true
            }
            None => false,
        }
    }
}

#[cfg(test)]
#[path = "scene_node_tests.rs"]
mod tests;
