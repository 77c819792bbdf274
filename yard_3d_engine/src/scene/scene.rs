/// Scene — a tree of nodes referencing shared resources.
///
/// Uses a SlotMap for O(1) insert/remove with stable keys. Each node keeps
/// a parent link and an ordered list of children; world transforms are
/// composed on demand by walking the parent chain.
///
/// Nodes also carry the cached world-space bounding sphere used by the
/// culling registry. Moving a node drops the cached sphere of the node and
/// of its whole subtree.

use std::sync::Arc;
use bitflags::bitflags;
use glam::{EulerRot, Mat4, Quat, Vec3};
use slotmap::{new_key_type, SlotMap};
use crate::engine_bail;
use crate::error::Result;
use crate::resource::{Geometry, Material};
use super::bounds::BoundingSphere;
use super::environment::Environment;

// ===== SLOT MAP KEY =====

new_key_type! {
    /// Stable key for a node within a Scene.
    ///
    /// Keys remain valid even after other nodes are removed.
    /// A key becomes invalid only when its own node is removed.
    pub struct NodeKey;
}

// ===== FLAGS =====

bitflags! {
    /// Per-node render flags
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
    pub struct NodeFlags: u32 {
        const VISIBLE        = 1 << 0;
        const CAST_SHADOW    = 1 << 1;
        const RECEIVE_SHADOW = 1 << 2;
    }
}

impl Default for NodeFlags {
    fn default() -> Self {
        NodeFlags::VISIBLE
    }
}

// ===== TRANSFORM =====

/// Local transform relative to the parent node
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Transform {
    pub position: Vec3,
    pub rotation: Quat,
    pub scale: Vec3,
}

impl Transform {
    pub const IDENTITY: Self = Self {
        position: Vec3::ZERO,
        rotation: Quat::IDENTITY,
        scale: Vec3::ONE,
    };

    pub fn from_position(position: Vec3) -> Self {
        Self { position, ..Self::IDENTITY }
    }

    /// Build from Euler angles (radians, applied X then Y then Z).
    pub fn from_euler(position: Vec3, euler: Vec3, scale: Vec3) -> Self {
        Self {
            position,
            rotation: Quat::from_euler(EulerRot::XYZ, euler.x, euler.y, euler.z),
            scale,
        }
    }

    /// Local matrix: translate * rotate * scale
    pub fn matrix(&self) -> Mat4 {
        Mat4::from_scale_rotation_translation(self.scale, self.rotation, self.position)
    }
}

impl Default for Transform {
    fn default() -> Self {
        Self::IDENTITY
    }
}

// ===== NODE =====

/// What a node draws
#[derive(Debug, Clone)]
pub enum NodeKind {
    /// Geometry drawn with a material, both shared through the caches
    Mesh {
        geometry: Arc<Geometry>,
        material: Arc<Material>,
    },
    /// Pure transform node that only holds children
    Group,
}

#[derive(Debug, Clone)]
pub struct SceneNode {
    name: String,
    kind: NodeKind,
    transform: Transform,
    flags: NodeFlags,
    parent: Option<NodeKey>,
    children: Vec<NodeKey>,
    /// Overrides the geometry-derived culling radius
    bounding_radius: Option<f32>,
    /// Cached world-space sphere, filled lazily by the culling registry
    bounds: Option<BoundingSphere>,
}

impl SceneNode {
    fn new(name: String, kind: NodeKind, transform: Transform) -> Self {
        Self {
            name,
            kind,
            transform,
            flags: NodeFlags::default(),
            parent: None,
            children: Vec::new(),
            bounding_radius: None,
            bounds: None,
        }
    }

    // ===== ACCESSORS =====

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn kind(&self) -> &NodeKind {
        &self.kind
    }

    /// Geometry of a mesh node
    pub fn geometry(&self) -> Option<&Arc<Geometry>> {
        match &self.kind {
            NodeKind::Mesh { geometry, .. } => Some(geometry),
            NodeKind::Group => None,
        }
    }

    /// Material of a mesh node
    pub fn material(&self) -> Option<&Arc<Material>> {
        match &self.kind {
            NodeKind::Mesh { material, .. } => Some(material),
            NodeKind::Group => None,
        }
    }

    pub fn transform(&self) -> &Transform {
        &self.transform
    }

    pub fn flags(&self) -> NodeFlags {
        self.flags
    }

    pub fn parent(&self) -> Option<NodeKey> {
        self.parent
    }

    pub fn children(&self) -> &[NodeKey] {
        &self.children
    }

    pub fn bounding_radius(&self) -> Option<f32> {
        self.bounding_radius
    }

    /// Cached world-space bounding sphere, if computed
    pub fn bounds(&self) -> Option<&BoundingSphere> {
        self.bounds.as_ref()
    }

    pub fn is_visible(&self) -> bool {
        self.flags.contains(NodeFlags::VISIBLE)
    }

    pub fn casts_shadow(&self) -> bool {
        self.flags.contains(NodeFlags::CAST_SHADOW)
    }

    pub fn receives_shadow(&self) -> bool {
        self.flags.contains(NodeFlags::RECEIVE_SHADOW)
    }

    // ===== MUTATORS =====

    pub fn set_visible(&mut self, visible: bool) {
        self.flags.set(NodeFlags::VISIBLE, visible);
    }

    pub fn set_cast_shadow(&mut self, enabled: bool) {
        self.flags.set(NodeFlags::CAST_SHADOW, enabled);
    }

    pub fn set_receive_shadow(&mut self, enabled: bool) {
        self.flags.set(NodeFlags::RECEIVE_SHADOW, enabled);
    }

    /// Set an explicit culling radius. Clears the cached sphere.
    pub fn set_bounding_radius(&mut self, radius: Option<f32>) {
        self.bounding_radius = radius;
        self.bounds = None;
    }

    pub(crate) fn set_bounds(&mut self, bounds: BoundingSphere) {
        self.bounds = Some(bounds);
    }

    pub(crate) fn clear_bounds(&mut self) {
        self.bounds = None;
    }
}

// ===== SCENE =====

/// A scene graph of meshes and groups.
#[derive(Debug, Clone, Default)]
pub struct Scene {
    nodes: SlotMap<NodeKey, SceneNode>,
    environment: Environment,
}

impl Scene {
    pub fn new() -> Self {
        Self { nodes: SlotMap::with_key(), environment: Environment::default() }
    }

    /// Add a root mesh node
    pub fn add_mesh(
        &mut self,
        name: impl Into<String>,
        geometry: Arc<Geometry>,
        material: Arc<Material>,
        transform: Transform,
    ) -> NodeKey {
        self.nodes.insert(SceneNode::new(
            name.into(),
            NodeKind::Mesh { geometry, material },
            transform,
        ))
    }

    /// Add a root group node
    pub fn add_group(&mut self, name: impl Into<String>, transform: Transform) -> NodeKey {
        self.nodes.insert(SceneNode::new(name.into(), NodeKind::Group, transform))
    }

    /// Attach a root node under `parent`.
    ///
    /// # Errors
    ///
    /// `InvalidNode` if either key is unknown, the child already has a
    /// parent, or the link would create a cycle.
    pub fn add_child(&mut self, parent: NodeKey, child: NodeKey) -> Result<()> {
        if !self.nodes.contains_key(parent) || !self.nodes.contains_key(child) {
            engine_bail!("yard3d::Scene", InvalidNode,
                "add_child: unknown node (parent {:?}, child {:?})", parent, child);
        }
        if let Some(existing) = self.nodes[child].parent {
            engine_bail!("yard3d::Scene", InvalidNode,
                "Node '{}' already has parent {:?}", self.nodes[child].name, existing);
        }
        if self.ancestors_and_self(parent).any(|key| key == child) {
            engine_bail!("yard3d::Scene", InvalidNode,
                "Attaching '{}' under '{}' would create a cycle",
                self.nodes[child].name, self.nodes[parent].name);
        }

        self.nodes[child].parent = Some(parent);
        self.nodes[parent].children.push(child);
        self.invalidate_subtree_bounds(child);
        Ok(())
    }

    /// Remove a node and its whole subtree.
    ///
    /// Returns the number of removed nodes (0 if the key is unknown).
    pub fn remove(&mut self, key: NodeKey) -> usize {
        let Some(node) = self.nodes.get(key) else {
            return 0;
        };
        if let Some(parent) = node.parent {
            if let Some(parent_node) = self.nodes.get_mut(parent) {
                parent_node.children.retain(|&c| c != key);
            }
        }

        let subtree = self.subtree(key);
        for &k in &subtree {
            self.nodes.remove(k);
        }
        subtree.len()
    }

    // ===== LOOKUP =====

    pub fn node(&self, key: NodeKey) -> Option<&SceneNode> {
        self.nodes.get(key)
    }

    pub fn node_mut(&mut self, key: NodeKey) -> Option<&mut SceneNode> {
        self.nodes.get_mut(key)
    }

    pub fn contains(&self, key: NodeKey) -> bool {
        self.nodes.contains_key(key)
    }

    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    /// Background and lights
    pub fn environment(&self) -> &Environment {
        &self.environment
    }

    pub fn set_environment(&mut self, environment: Environment) {
        self.environment = environment;
    }

    /// Iterate over all nodes (key, node)
    pub fn nodes(&self) -> impl Iterator<Item = (NodeKey, &SceneNode)> {
        self.nodes.iter()
    }

    /// Nodes without a parent
    pub fn roots(&self) -> impl Iterator<Item = NodeKey> + '_ {
        self.nodes.iter()
            .filter(|(_, node)| node.parent.is_none())
            .map(|(key, _)| key)
    }

    /// First node with the given name
    pub fn find_by_name(&self, name: &str) -> Option<NodeKey> {
        self.nodes.iter()
            .find(|(_, node)| node.name == name)
            .map(|(key, _)| key)
    }

    /// The node followed by all its descendants, depth-first
    pub fn subtree(&self, key: NodeKey) -> Vec<NodeKey> {
        let mut result = Vec::new();
        if !self.nodes.contains_key(key) {
            return result;
        }
        let mut stack = vec![key];
        while let Some(current) = stack.pop() {
            result.push(current);
            if let Some(node) = self.nodes.get(current) {
                stack.extend(node.children.iter().rev().copied());
            }
        }
        result
    }

    fn ancestors_and_self(&self, key: NodeKey) -> impl Iterator<Item = NodeKey> + '_ {
        std::iter::successors(Some(key), move |&k| {
            self.nodes.get(k).and_then(|node| node.parent)
        })
    }

    // ===== TRANSFORMS =====

    /// World matrix of a node: parent world matrix * local matrix.
    pub fn world_matrix(&self, key: NodeKey) -> Option<Mat4> {
        if !self.nodes.contains_key(key) {
            return None;
        }
        // Leaf-to-root walk, multiplied root first
        let chain: Vec<NodeKey> = self.ancestors_and_self(key).collect();
        Some(chain.iter().rev().fold(Mat4::IDENTITY, |world, &k| {
            world * self.nodes[k].transform.matrix()
        }))
    }

    /// World-space position of a node's origin
    pub fn world_position(&self, key: NodeKey) -> Option<Vec3> {
        self.world_matrix(key).map(|m| m.w_axis.truncate())
    }

    pub fn set_transform(&mut self, key: NodeKey, transform: Transform) -> Result<()> {
        self.modify_transform(key, |t| *t = transform)
    }

    pub fn set_position(&mut self, key: NodeKey, position: Vec3) -> Result<()> {
        self.modify_transform(key, |t| t.position = position)
    }

    pub fn set_rotation(&mut self, key: NodeKey, rotation: Quat) -> Result<()> {
        self.modify_transform(key, |t| t.rotation = rotation)
    }

    pub fn set_scale(&mut self, key: NodeKey, scale: Vec3) -> Result<()> {
        self.modify_transform(key, |t| t.scale = scale)
    }

    fn modify_transform(&mut self, key: NodeKey, f: impl FnOnce(&mut Transform)) -> Result<()> {
        let Some(node) = self.nodes.get_mut(key) else {
            engine_bail!("yard3d::Scene", InvalidNode, "Unknown node {:?}", key);
        };
        f(&mut node.transform);
        self.invalidate_subtree_bounds(key);
        Ok(())
    }

    /// Drop the cached bounding sphere of a node and all its descendants.
    pub fn invalidate_subtree_bounds(&mut self, key: NodeKey) {
        for k in self.subtree(key) {
            if let Some(node) = self.nodes.get_mut(k) {
                node.clear_bounds();
            }
        }
    }

    // ===== VISIBILITY =====

    /// Visibility flag of the node itself (false for unknown keys)
    pub fn is_visible(&self, key: NodeKey) -> bool {
        self.nodes.get(key).is_some_and(|node| node.is_visible())
    }

    /// Whether the node and every ancestor are visible.
    ///
    /// A hidden group hides its whole subtree for drawing.
    pub fn is_effectively_visible(&self, key: NodeKey) -> bool {
        self.nodes.contains_key(key)
            && self.ancestors_and_self(key).all(|k| self.nodes[k].is_visible())
    }
}

#[cfg(test)]
#[path = "scene_tests.rs"]
mod tests;
