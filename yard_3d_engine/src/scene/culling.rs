/// Visibility culling registry.
///
/// Nodes are registered into one of two pools (foreground, background).
/// Once per frame `cull_frame()` tests every registered node's world-space
/// bounding sphere against the camera frustum and writes the node's
/// visibility flag, only when the decision differs from the current flag.
///
/// Bounding spheres are computed lazily on first use and cached on the
/// node. The scene drops the cached sphere when a node or one of its
/// ancestors moves; `invalidate_bounds()` drops it explicitly.

use rustc_hash::FxHashMap;
use serde::{Deserialize, Serialize};
use crate::camera::Camera;
use crate::config::CullingConfig;
use crate::engine_bail;
use crate::error::Result;
use super::bounds::BoundingSphere;
use super::scene::{NodeKey, Scene};

/// Default radius for nodes without geometry or explicit radius
pub const DEFAULT_GROUP_RADIUS: f32 = 10.0;

/// Registration pool
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum Pool {
    /// Scenery near the viewer (house, trees, fences)
    #[default]
    Foreground,
    /// Distant decoration (clouds)
    Background,
}

/// Counters for one `cull_frame()` pass
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CullStats {
    /// Registered nodes that were tested
    pub tested: usize,
    pub visible: usize,
    pub culled: usize,
    /// Visibility flags actually modified
    pub flag_writes: usize,
    /// Registered keys no longer present in the scene
    pub stale: usize,
}

#[derive(Debug)]
pub struct CullingRegistry {
    foreground: Vec<NodeKey>,
    background: Vec<NodeKey>,
    membership: FxHashMap<NodeKey, Pool>,
    group_radius: f32,
    enabled: bool,
}

impl CullingRegistry {
    pub fn new() -> Self {
        Self {
            foreground: Vec::new(),
            background: Vec::new(),
            membership: FxHashMap::default(),
            group_radius: DEFAULT_GROUP_RADIUS,
            enabled: true,
        }
    }

    pub fn from_config(config: &CullingConfig) -> Self {
        Self {
            group_radius: config.group_radius,
            enabled: config.enabled,
            ..Self::new()
        }
    }

    // ===== REGISTRATION =====

    /// Add a node to a pool.
    ///
    /// # Errors
    ///
    /// `DuplicateRegistration` if the node is already registered, in
    /// either pool.
    pub fn register(&mut self, key: NodeKey, pool: Pool) -> Result<()> {
        if let Some(existing) = self.membership.get(&key) {
            engine_bail!("yard3d::CullingRegistry", DuplicateRegistration,
                "Node {:?} is already registered in the {:?} pool", key, existing);
        }
        self.membership.insert(key, pool);
        self.pool_vec_mut(pool).push(key);
        crate::engine_trace!("yard3d::CullingRegistry",
            "Registered {:?} in {:?} pool", key, pool);
        Ok(())
    }

    /// Remove a node from its pool. Returns the pool it was in.
    pub fn unregister(&mut self, key: NodeKey) -> Option<Pool> {
        let pool = self.membership.remove(&key)?;
        self.pool_vec_mut(pool).retain(|&k| k != key);
        Some(pool)
    }

    pub fn pool_of(&self, key: NodeKey) -> Option<Pool> {
        self.membership.get(&key).copied()
    }

    pub fn contains(&self, key: NodeKey) -> bool {
        self.membership.contains_key(&key)
    }

    /// Registered keys of one pool, in registration order
    pub fn pool(&self, pool: Pool) -> &[NodeKey] {
        match pool {
            Pool::Foreground => &self.foreground,
            Pool::Background => &self.background,
        }
    }

    fn pool_vec_mut(&mut self, pool: Pool) -> &mut Vec<NodeKey> {
        match pool {
            Pool::Foreground => &mut self.foreground,
            Pool::Background => &mut self.background,
        }
    }

    /// Total registered nodes across both pools
    pub fn len(&self) -> usize {
        self.membership.len()
    }

    pub fn is_empty(&self) -> bool {
        self.membership.is_empty()
    }

    pub fn group_radius(&self) -> f32 {
        self.group_radius
    }

    pub fn is_enabled(&self) -> bool {
        self.enabled
    }

    /// With culling disabled every registered node is shown.
    pub fn set_enabled(&mut self, enabled: bool) {
        self.enabled = enabled;
    }

    // ===== BOUNDS =====

    /// Drop the cached bounding sphere of a node.
    ///
    /// The sphere is recomputed on the next `cull_frame()`. Returns false
    /// if the node is not in the scene.
    pub fn invalidate_bounds(&self, scene: &mut Scene, key: NodeKey) -> bool {
        match scene.node_mut(key) {
            Some(node) => {
                node.clear_bounds();
                true
            }
            None => false,
        }
    }

    /// World-space bounding sphere of a node, computed without caching.
    ///
    /// - explicit bounding radius: that radius at the node's world position
    /// - mesh: the geometry's sphere transformed to world space
    /// - anything else: `group_radius` at the node's world position
    ///
    /// An explicit radius that is not finite and positive is ignored.
    pub fn compute_bounds(&self, scene: &Scene, key: NodeKey) -> Option<BoundingSphere> {
        let node = scene.node(key)?;
        let world = scene.world_matrix(key)?;
        let origin = world.w_axis.truncate();

        let explicit = match node.bounding_radius() {
            Some(radius) if radius.is_finite() && radius > 0.0 => Some(radius),
            Some(radius) => {
                crate::engine_warn!("yard3d::CullingRegistry",
                    "Ignoring bounding radius {} of '{}'", radius, node.name());
                None
            }
            None => None,
        };

        let sphere = if let Some(radius) = explicit {
            BoundingSphere::new(origin, radius)
        } else if let Some(geometry) = node.geometry() {
            geometry.bounding_sphere().transformed(&world)
        } else {
            BoundingSphere::new(origin, self.group_radius)
        };
        Some(sphere)
    }

    /// Cached sphere of a node, computing and storing it if absent
    fn ensure_bounds(&self, scene: &mut Scene, key: NodeKey) -> Option<BoundingSphere> {
        if let Some(bounds) = scene.node(key)?.bounds() {
            return Some(*bounds);
        }
        let bounds = self.compute_bounds(scene, key)?;
        scene.node_mut(key)?.set_bounds(bounds);
        Some(bounds)
    }

    // ===== CULLING =====

    /// Update the visibility flag of every registered node for `camera`.
    ///
    /// The frustum is derived from the camera's current matrices. Keys
    /// whose node left the scene are skipped and counted as stale.
    pub fn cull_frame(&self, scene: &mut Scene, camera: &Camera) -> CullStats {
        let frustum = camera.frustum();
        let mut stats = CullStats::default();

        for &key in self.foreground.iter().chain(self.background.iter()) {
            let Some(bounds) = self.ensure_bounds(scene, key) else {
                crate::engine_trace!("yard3d::CullingRegistry",
                    "Skipping stale key {:?}", key);
                stats.stale += 1;
                continue;
            };
            stats.tested += 1;

            let visible = !self.enabled || frustum.intersects_sphere(&bounds);
            if visible {
                stats.visible += 1;
            } else {
                stats.culled += 1;
            }

            if let Some(node) = scene.node_mut(key) {
                if node.is_visible() != visible {
                    node.set_visible(visible);
                    stats.flag_writes += 1;
                }
            }
        }

        crate::engine_trace!("yard3d::CullingRegistry",
            "Culled frame: {} tested, {} visible, {} culled, {} writes",
            stats.tested, stats.visible, stats.culled, stats.flag_writes);
        stats
    }
}

impl Default for CullingRegistry {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
#[path = "culling_tests.rs"]
mod tests;
