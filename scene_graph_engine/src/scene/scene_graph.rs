/// SceneGraph - a tree of SceneNodes rooted at a single root node.
///
/// Nodes live in a SlotMap arena and reference each other by NodeKey, so
/// cycle detection and re-parenting are key comparisons and removing a
/// subtree is removing its keys. Detached nodes stay in the arena until
/// re-attached or removed, but are invisible to traversal and name lookup.

use glam::{Mat4, Vec3};
use rustc_hash::FxHashMap;
use slotmap::SlotMap;
use crate::error::{Error, Result};
use crate::{engine_bail, engine_debug, engine_error, engine_trace};
use super::scene_node::{NodeDesc, NodeKey, SceneNode};
use super::transform::Transform;

const SOURCE: &str = "scenegraph::SceneGraph";

/// Arena-backed scene graph with a name index.
///
/// Invariants:
/// - the parent links form a forest; the tree holding `root` is the scene
/// - `name_index` only holds nodes reachable from `root`, in attach order
pub struct SceneGraph {
    nodes: SlotMap<NodeKey, SceneNode>,
    root: NodeKey,
    name_index: FxHashMap<String, Vec<NodeKey>>,
    /// Reused by recompute_world_transforms to avoid a per-frame allocation
    traversal_stack: Vec<(NodeKey, Option<Mat4>)>,
}

impl SceneGraph {
    /// Create a graph with an unnamed identity root
    pub fn new() -> Self {
        Self::with_root(NodeDesc::new())
    }

    /// Create a graph whose root is built from `desc`
    pub fn with_root(desc: NodeDesc) -> Self {
        let mut nodes = SlotMap::with_key();
        let root = nodes.insert(SceneNode::new(desc));
        let mut graph = Self {
            nodes,
            root,
            name_index: FxHashMap::default(),
            traversal_stack: Vec::new(),
        };
        graph.register_subtree(root);
        graph
    }

    // ===== ACCESS =====

    pub fn root(&self) -> NodeKey {
        self.root
    }

    pub fn node(&self, key: NodeKey) -> Option<&SceneNode> {
        self.nodes.get(key)
    }

    /// Mutable access to a node's payload (light, geometry, flags).
    ///
    /// Use [`transform_mut`](Self::transform_mut) for transforms so the
    /// subtree is marked dirty.
    pub fn node_mut(&mut self, key: NodeKey) -> Option<&mut SceneNode> {
        self.nodes.get_mut(key)
    }

    pub fn contains(&self, key: NodeKey) -> bool {
        self.nodes.contains_key(key)
    }

    /// Number of nodes in the arena, detached ones included
    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    pub fn parent(&self, key: NodeKey) -> Option<NodeKey> {
        self.nodes.get(key).and_then(|node| node.parent())
    }

    /// Children in attach order (empty for unknown keys)
    pub fn children(&self, key: NodeKey) -> &[NodeKey] {
        self.nodes.get(key).map(|node| node.children()).unwrap_or(&[])
    }

    /// Whether `key` is connected to the root
    pub fn is_reachable(&self, key: NodeKey) -> bool {
        let mut current = Some(key);
        while let Some(k) = current {
            if k == self.root {
                return true;
            }
            current = self.nodes.get(k).and_then(|node| node.parent());
        }
        false
    }

    /// Whether `ancestor` is `node` or one of its ancestors
    pub fn is_ancestor_or_self(&self, ancestor: NodeKey, node: NodeKey) -> bool {
        let mut current = Some(node);
        while let Some(k) = current {
            if k == ancestor {
                return true;
            }
            current = self.nodes.get(k).and_then(|n| n.parent());
        }
        false
    }

    // ===== CREATION / DESTRUCTION =====

    /// Create a detached node. Attach it with [`attach_child`](Self::attach_child).
    pub fn create_node(&mut self, desc: NodeDesc) -> NodeKey {
        self.nodes.insert(SceneNode::new(desc))
    }

    /// Create a node and attach it under `parent`
    pub fn add_node(&mut self, parent: NodeKey, desc: NodeDesc) -> Result<NodeKey> {
        if !self.nodes.contains_key(parent) {
            return Err(self.fail(Error::InvalidNode(parent)));
        }
        let key = self.create_node(desc);
        self.attach_child(parent, key)?;
        Ok(key)
    }

    /// Remove `key` and its whole subtree from the graph.
    ///
    /// Returns the number of nodes removed. The root cannot be removed.
    pub fn remove_node(&mut self, key: NodeKey) -> Result<usize> {
        self.check_node(key)?;
        if key == self.root {
            engine_bail!(SOURCE, "The root node cannot be removed");
        }

        if let Some(parent) = self.parent(key) {
            self.detach_child(parent, key)?;
        }

        let subtree = self.collect_subtree(key);
        for k in &subtree {
            self.nodes.remove(*k);
        }
        engine_debug!(SOURCE, "Removed {} node(s)", subtree.len());
        Ok(subtree.len())
    }

    // ===== STRUCTURE =====

    /// Append `child` to `parent`'s children.
    ///
    /// # Errors
    ///
    /// - `Cycle` if `child` is `parent` or one of its ancestors
    /// - `AlreadyAttached` if `child` has a different parent
    /// - `InvalidNode` for stale keys
    ///
    /// On error the graph is left untouched.
    pub fn attach_child(&mut self, parent: NodeKey, child: NodeKey) -> Result<()> {
        self.check_node(parent)?;
        self.check_node(child)?;

        if self.is_ancestor_or_self(child, parent) {
            return Err(self.fail(Error::Cycle { child, parent }));
        }
        if child == self.root {
            engine_bail!(SOURCE, "The root node cannot be attached to another node");
        }
        match self.parent(child) {
            Some(current) if current == parent => {
                engine_debug!(SOURCE, "Node {:?} is already a child of {:?}", child, parent);
                return Ok(());
            }
            Some(current_parent) => {
                return Err(self.fail(Error::AlreadyAttached { child, current_parent }));
            }
            None => {}
        }

        if let Some(node) = self.nodes.get_mut(parent) {
            node.push_child(child);
        }
        if let Some(node) = self.nodes.get_mut(child) {
            node.set_parent(Some(parent));
        }
        self.mark_subtree_dirty(child);

        if self.is_reachable(parent) {
            self.register_subtree(child);
        }
        engine_trace!(SOURCE, "Attached {:?} under {:?}", child, parent);
        Ok(())
    }

    /// Remove `child` from `parent`'s children.
    ///
    /// The detached subtree keeps its nodes but its world matrices are
    /// flagged dirty (they are meaningless without the old ancestry).
    pub fn detach_child(&mut self, parent: NodeKey, child: NodeKey) -> Result<()> {
        self.check_node(parent)?;
        self.check_node(child)?;

        if self.parent(child) != Some(parent) {
            return Err(self.fail(Error::NotAChild { child, parent }));
        }

        if self.is_reachable(parent) {
            self.unregister_subtree(child);
        }
        if let Some(node) = self.nodes.get_mut(parent) {
            node.remove_child(child);
        }
        if let Some(node) = self.nodes.get_mut(child) {
            node.set_parent(None);
        }
        self.mark_subtree_dirty(child);

        engine_trace!(SOURCE, "Detached {:?} from {:?}", child, parent);
        Ok(())
    }

    /// Move `child` under `new_parent` (detach, then attach).
    ///
    /// A would-be cycle is rejected before the detach so the graph is
    /// never left half re-parented.
    pub fn reparent(&mut self, child: NodeKey, new_parent: NodeKey) -> Result<()> {
        self.check_node(child)?;
        self.check_node(new_parent)?;

        if self.is_ancestor_or_self(child, new_parent) {
            return Err(self.fail(Error::Cycle { child, parent: new_parent }));
        }
        if let Some(old_parent) = self.parent(child) {
            if old_parent == new_parent {
                return Ok(());
            }
            self.detach_child(old_parent, child)?;
        }
        self.attach_child(new_parent, child)
    }

    // ===== NAMES =====

    /// First reachable node registered under `name`, in attach order.
    ///
    /// Absence is a normal outcome, not an error.
    pub fn find_by_name(&self, name: &str) -> Option<NodeKey> {
        self.name_index.get(name).and_then(|keys| keys.first().copied())
    }

    /// All reachable nodes registered under `name`, in attach order
    pub fn find_all_by_name(&self, name: &str) -> &[NodeKey] {
        self.name_index.get(name).map(|keys| keys.as_slice()).unwrap_or(&[])
    }

    /// Rename a node (or clear its name with `None`)
    ///
    /// Setting the current name again is a no-op. A real rename moves the
    /// node to the end of the new name's lookup order.
    pub fn set_name(&mut self, key: NodeKey, name: Option<&str>) -> Result<()> {
        self.check_node(key)?;
        if self.nodes.get(key).and_then(|node| node.name()) == name {
            return Ok(());
        }
        let reachable = self.is_reachable(key);

        if reachable {
            self.unregister_one(key);
        }
        if let Some(node) = self.nodes.get_mut(key) {
            node.set_name_internal(name.map(|n| n.to_string()));
        }
        if reachable {
            self.register_one(key);
        }
        Ok(())
    }

    // ===== TRANSFORMS =====

    /// Replace a node's local transform and mark its subtree dirty
    pub fn set_local_transform(&mut self, key: NodeKey, transform: Transform) -> Result<()> {
        *self.transform_mut(key)? = transform;
        Ok(())
    }

    /// Mutable access to a node's local transform; marks its subtree dirty
    pub fn transform_mut(&mut self, key: NodeKey) -> Result<&mut Transform> {
        self.check_node(key)?;
        self.mark_subtree_dirty(key);
        match self.nodes.get_mut(key) {
            Some(node) => Ok(node.transform_mut_internal()),
            None => Err(Error::InvalidNode(key)),
        }
    }

    /// Recompute every reachable node's world matrix, pre-order from the root.
    ///
    /// Root: world = local. Others: world = parent world * local.
    /// Every reachable node is visited exactly once regardless of dirty
    /// flags. Returns the number of nodes visited.
    pub fn recompute_world_transforms(&mut self) -> usize {
        self.recompute_from(self.root, None)
    }

    /// Recompute `key` and its descendants from the parent's cached world matrix.
    ///
    /// Used after a single node moved mid-tick. Returns the number of nodes
    /// visited, 0 for an unknown key.
    pub fn recompute_subtree(&mut self, key: NodeKey) -> usize {
        if !self.nodes.contains_key(key) {
            return 0;
        }
        let parent_world = self.parent(key)
            .and_then(|parent| self.world_matrix(parent))
            .copied();
        self.recompute_from(key, parent_world)
    }

    fn recompute_from(&mut self, start: NodeKey, start_parent_world: Option<Mat4>) -> usize {
        let mut stack = std::mem::take(&mut self.traversal_stack);
        stack.clear();
        stack.push((start, start_parent_world));

        let mut visited = 0;
        while let Some((key, parent_world)) = stack.pop() {
            let node = match self.nodes.get_mut(key) {
                Some(node) => node,
                None => continue,
            };
            let world = match parent_world {
                Some(parent_world) => node.compute_world_matrix(&parent_world),
                None => node.local_matrix(),
            };
            node.set_world_matrix(world);
            visited += 1;

            // Reverse push keeps attach order on pop
            for &child in node.children().iter().rev() {
                stack.push((child, Some(world)));
            }
        }

        self.traversal_stack = stack;
        visited
    }

    pub fn world_matrix(&self, key: NodeKey) -> Option<&Mat4> {
        self.nodes.get(key).map(|node| node.world_matrix())
    }

    /// World position from the last recomputation
    pub fn world_position(&self, key: NodeKey) -> Option<Vec3> {
        self.nodes.get(key).map(|node| node.world_position())
    }

    /// Normalized direction from a light node to its target point.
    ///
    /// None if the node has no light; zero if the target coincides with
    /// the light's position.
    pub fn light_direction(&self, key: NodeKey) -> Option<Vec3> {
        let node = self.nodes.get(key)?;
        let light = node.light()?;
        Some((light.target - node.world_position()).normalize_or_zero())
    }

    // ===== TRAVERSAL =====

    /// Reachable node keys in pre-order (children in attach order)
    pub fn traverse(&self) -> Vec<NodeKey> {
        self.collect_subtree(self.root)
    }

    /// Reachable nodes in pre-order
    pub fn iter_reachable(&self) -> impl Iterator<Item = (NodeKey, &SceneNode)> + '_ {
        self.traverse()
            .into_iter()
            .filter_map(move |key| self.nodes.get(key).map(|node| (key, node)))
    }

    // ===== INTERNAL =====

    fn check_node(&self, key: NodeKey) -> Result<()> {
        if self.nodes.contains_key(key) {
            Ok(())
        } else {
            Err(self.fail(Error::InvalidNode(key)))
        }
    }

    /// Log a structural error before handing it back to the caller
    fn fail(&self, error: Error) -> Error {
        engine_error!(SOURCE, "{}", error);
        error
    }

    /// `key` and all its descendants, pre-order
    fn collect_subtree(&self, key: NodeKey) -> Vec<NodeKey> {
        let mut result = Vec::new();
        let mut stack = vec![key];
        while let Some(k) = stack.pop() {
            if let Some(node) = self.nodes.get(k) {
                result.push(k);
                stack.extend(node.children().iter().rev());
            }
        }
        result
    }

    fn mark_subtree_dirty(&mut self, key: NodeKey) {
        let mut stack = vec![key];
        while let Some(k) = stack.pop() {
            if let Some(node) = self.nodes.get_mut(k) {
                node.mark_world_dirty();
                stack.extend(node.children().iter());
            }
        }
    }

    fn register_subtree(&mut self, key: NodeKey) {
        for k in self.collect_subtree(key) {
            self.register_one(k);
        }
    }

    fn unregister_subtree(&mut self, key: NodeKey) {
        for k in self.collect_subtree(key) {
            self.unregister_one(k);
        }
    }

    fn register_one(&mut self, key: NodeKey) {
        if let Some(name) = self.nodes.get(key).and_then(|node| node.name()) {
            self.name_index.entry(name.to_string()).or_default().push(key);
        }
    }

    fn unregister_one(&mut self, key: NodeKey) {
        let name = match self.nodes.get(key).and_then(|node| node.name()) {
            Some(name) => name.to_string(),
            None => return,
        };
        if let Some(keys) = self.name_index.get_mut(&name) {
            keys.retain(|&k| k != key);
            if keys.is_empty() {
                self.name_index.remove(&name);
            }
        }
    }
}

impl Default for SceneGraph {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
#[path = "scene_graph_tests.rs"]
mod tests;
