/// Animation bindings: what a binding targets and how it mutates it.

use glam::Vec3;
use crate::scene::{Axis, NodeKey, SceneGraph, Transform};
use crate::engine_debug;

const SOURCE: &str = "scenegraph::AnimationBinding";

/// Reference to a binding's target or dependency node.
///
/// Resolved on every tick. A name that is not registered, or a key whose
/// node was removed or detached from the root, resolves to None and the
/// binding is skipped for that tick.
#[derive(Debug, Clone, PartialEq)]
pub enum NodeRef {
    Key(NodeKey),
    Name(String),
}

impl NodeRef {
    pub fn resolve(&self, graph: &SceneGraph) -> Option<NodeKey> {
        match self {
            NodeRef::Key(key) => {
                if graph.contains(*key) && graph.is_reachable(*key) {
                    Some(*key)
                } else {
                    None
                }
            }
            NodeRef::Name(name) => graph.find_by_name(name),
        }
    }
}

impl From<NodeKey> for NodeRef {
    fn from(key: NodeKey) -> Self {
        NodeRef::Key(key)
    }
}

impl From<&str> for NodeRef {
    fn from(name: &str) -> Self {
        NodeRef::Name(name.to_string())
    }
}

impl From<String> for NodeRef {
    fn from(name: String) -> Self {
        NodeRef::Name(name)
    }
}

/// Rule mutating a node's local transform from the tick time (seconds).
///
/// Implemented for any `FnMut(&mut Transform, f32) + Send` closure.
pub trait MutationRule: Send {
    fn apply(&mut self, transform: &mut Transform, time: f32);
}

impl<F> MutationRule for F
where
    F: FnMut(&mut Transform, f32) + Send,
{
    fn apply(&mut self, transform: &mut Transform, time: f32) {
        self(transform, time)
    }
}

/// Sets the rotation about one axis to `offset + time * speed` (radians).
///
/// Absolute, not incremental: the same time always yields the same angle.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Spin {
    pub axis: Axis,
    /// Radians per second
    pub speed: f32,
    /// Angle at time zero, in radians
    pub offset: f32,
}

impl Spin {
    pub fn new(axis: Axis, radians_per_second: f32) -> Self {
        Self { axis, speed: radians_per_second, offset: 0.0 }
    }

    pub fn degrees_per_second(axis: Axis, degrees: f32) -> Self {
        Self::new(axis, degrees.to_radians())
    }

    pub fn with_offset(mut self, radians: f32) -> Self {
        self.offset = radians;
        self
    }
}

impl MutationRule for Spin {
    fn apply(&mut self, transform: &mut Transform, time: f32) {
        transform.set_rotation_axis(self.axis, self.offset + time * self.speed);
    }
}

/// Rules deriving a node's state from another node's world position.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DependentRule {
    /// Aim the target node's light at the dependency's world position
    LightTarget,
    /// Move the target node onto the dependency's world position
    /// (converted into the target parent's space)
    FollowPosition,
}

/// What a DependentRule did on one tick
#[derive(Debug, Clone, Copy, PartialEq)]
pub(crate) enum DependentOutcome {
    /// A derived (non-transform) property changed
    Derived(Vec3),
    /// The target's local transform changed
    Moved(Vec3),
    /// The rule does not apply to this target (e.g. no light)
    NotApplicable,
}

impl DependentRule {
    pub(crate) fn apply(
        &self,
        graph: &mut SceneGraph,
        target: NodeKey,
        dependency_world: Vec3,
    ) -> DependentOutcome {
        match self {
            DependentRule::LightTarget => {
                match graph.node_mut(target).and_then(|node| node.light_mut()) {
                    Some(light) => {
                        light.target = dependency_world;
                        DependentOutcome::Derived(dependency_world)
                    }
                    None => DependentOutcome::NotApplicable,
                }
            }
            DependentRule::FollowPosition => {
                let local = match graph.parent(target).and_then(|parent| graph.world_matrix(parent)) {
                    // A degenerate parent (zero scale) has no parent space to move into
                    Some(parent_world) if parent_world.determinant().abs() <= f32::EPSILON => {
                        engine_debug!(SOURCE, "Parent of {:?} is not invertible, cannot follow", target);
                        return DependentOutcome::NotApplicable;
                    }
                    Some(parent_world) => parent_world.inverse().transform_point3(dependency_world),
                    None => dependency_world,
                };
                match graph.transform_mut(target) {
                    Ok(transform) => {
                        transform.position = local;
                        DependentOutcome::Moved(local)
                    }
                    Err(_) => DependentOutcome::NotApplicable,
                }
            }
        }
    }
}

/// A registered binding
pub(crate) enum AnimationBinding {
    Independent {
        target: NodeRef,
        rule: Box<dyn MutationRule>,
    },
    Dependent {
        target: NodeRef,
        dependency: NodeRef,
        rule: DependentRule,
    },
}

impl AnimationBinding {
    pub(crate) fn is_dependent(&self) -> bool {
        matches!(self, AnimationBinding::Dependent { .. })
    }
}
