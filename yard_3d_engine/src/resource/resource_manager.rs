/// Central resource manager for the engine.
///
/// Owns the two resource caches (geometries and materials). Both follow
/// the same contract: one shared instance per key, created on first
/// request, kept for the manager's lifetime.

use std::sync::Arc;
use crate::error::Result;
use super::geometry::{Geometry, GeometryDesc};
use super::material::{Material, MaterialDesc, Palette};
use super::resource_cache::{CacheStats, ResourceCache};

pub struct ResourceManager {
    geometries: ResourceCache<Geometry>,
    materials: ResourceCache<Material>,
}

impl ResourceManager {
    /// Create a new empty resource manager
    pub fn new() -> Self {
        Self {
            geometries: ResourceCache::new("geometry"),
            materials: ResourceCache::new("material"),
        }
    }

    /// Shared geometry for `key`, built from `desc` on first request.
    ///
    /// Later requests return the stored geometry even when `desc` differs.
    pub fn geometry(&mut self, key: &str, desc: &GeometryDesc) -> Result<Arc<Geometry>> {
        self.geometries.try_get(key, || Geometry::new(desc.clone()))
    }

    /// Shared material for `key`, resolved against `palette` on first request.
    pub fn material(
        &mut self,
        key: &str,
        desc: &MaterialDesc,
        palette: &Palette,
    ) -> Result<Arc<Material>> {
        self.materials.try_get(key, || Material::new(desc, palette))
    }

    /// Geometry cache
    pub fn geometries(&self) -> &ResourceCache<Geometry> {
        &self.geometries
    }

    /// Mutable geometry cache, for callers supplying their own factories
    pub fn geometries_mut(&mut self) -> &mut ResourceCache<Geometry> {
        &mut self.geometries
    }

    /// Material cache
    pub fn materials(&self) -> &ResourceCache<Material> {
        &self.materials
    }

    /// Mutable material cache, for callers supplying their own factories
    pub fn materials_mut(&mut self) -> &mut ResourceCache<Material> {
        &mut self.materials
    }

    /// Counters for (geometries, materials)
    pub fn stats(&self) -> (CacheStats, CacheStats) {
        (self.geometries.stats(), self.materials.stats())
    }
}

impl Default for ResourceManager {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
#[path = "resource_manager_tests.rs"]
mod tests;
