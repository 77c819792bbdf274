/// SceneBuilder — turns a `SceneDescription` into scene nodes.
///
/// Geometries and materials go through the resource caches, so the first
/// descriptor seen for a key defines the resource and later uses of the
/// same key share it. Every top-level object is registered into its
/// culling pool, and the background and lights replace the scene's
/// environment.

use crate::engine_bail;
use crate::error::Result;
use crate::resource::{Palette, ResourceManager};
use super::culling::CullingRegistry;
use super::description::{NodeDesc, NodeKindDesc, SceneDescription};
use super::environment::Environment;
use super::scene::{NodeKey, Scene, Transform};

pub struct SceneBuilder;

impl SceneBuilder {
    /// Build every object of `description` into `scene`.
    ///
    /// Returns the keys of the top-level objects, in description order.
    ///
    /// # Errors
    ///
    /// Propagates invalid resource descriptors, unknown palette names,
    /// invalid lights and duplicate registrations. Objects built before the
    /// failure are removed from the scene and the registry again, so a
    /// failed build leaves both untouched.
    pub fn build(
        description: &SceneDescription,
        resources: &mut ResourceManager,
        scene: &mut Scene,
        registry: &mut CullingRegistry,
    ) -> Result<Vec<NodeKey>> {
        let environment = Environment::from_desc(
            description.background.as_ref(), &description.lights, &description.palette)?;
        let mut roots = Vec::with_capacity(description.objects.len());

        for object in &description.objects {
            let result = Self::build_node(&object.node, &description.palette, resources, scene)
                .and_then(|key| match registry.register(key, object.pool) {
                    Ok(()) => Ok(key),
                    Err(e) => {
                        scene.remove(key);
                        Err(e)
                    }
                });

            match result {
                Ok(key) => roots.push(key),
                Err(e) => {
                    for &key in &roots {
                        registry.unregister(key);
                        scene.remove(key);
                    }
                    return Err(e);
                }
            }
        }

        let (geometry_stats, material_stats) = resources.stats();
        crate::engine_info!("yard3d::SceneBuilder",
            "Built {} objects ({} nodes, {} lights): {} geometries, {} materials cached",
            roots.len(), description.node_count(), environment.lights.len(),
            geometry_stats.entries, material_stats.entries);
        scene.set_environment(environment);

        Ok(roots)
    }

    /// Build one node and its subtree as a new root.
    ///
    /// On failure the partially built subtree is removed.
    pub fn build_node(
        desc: &NodeDesc,
        palette: &Palette,
        resources: &mut ResourceManager,
        scene: &mut Scene,
    ) -> Result<NodeKey> {
        if let Some(radius) = desc.bounding_radius {
            if !(radius.is_finite() && radius > 0.0) {
                engine_bail!("yard3d::SceneBuilder", InvalidConfig,
                    "Node '{}' has bounding radius {}, expected a positive finite value",
                    desc.name, radius);
            }
        }
        let transform = Transform::from_euler(desc.position, desc.rotation, desc.scale);

        let key = match &desc.kind {
            NodeKindDesc::Mesh { geometry, material } => {
                let geometry = resources.geometry(&geometry.key, &geometry.desc)?;
                let material = resources.material(&material.key, &material.desc, palette)?;
                scene.add_mesh(desc.name.as_str(), geometry, material, transform)
            }
            NodeKindDesc::Group { children } => {
                let group = scene.add_group(desc.name.as_str(), transform);
                for child in children {
                    let linked = Self::build_node(child, palette, resources, scene)
                        .and_then(|child_key| scene.add_child(group, child_key));
                    if let Err(e) = linked {
                        scene.remove(group);
                        return Err(e);
                    }
                }
                group
            }
        };

        if let Some(node) = scene.node_mut(key) {
            node.set_cast_shadow(desc.cast_shadow);
            node.set_receive_shadow(desc.receive_shadow);
            if desc.bounding_radius.is_some() {
                node.set_bounding_radius(desc.bounding_radius);
            }
        }

        crate::engine_trace!("yard3d::SceneBuilder", "Built node '{}' ({:?})", desc.name, key);
        Ok(key)
    }
}

#[cfg(test)]
#[path = "builder_tests.rs"]
mod tests;
