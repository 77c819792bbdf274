//! Resource management module
//!
//! Key-based caches for the shared resources scene nodes reference.

mod resource_cache;
mod resource_manager;
pub mod geometry;
pub mod material;

pub use resource_cache::{ResourceCache, CacheStats};
pub use resource_manager::ResourceManager;
pub use geometry::{Geometry, GeometryDesc};
pub use material::{
    Material, MaterialDesc, Color, ColorRef, Palette, Shading,
};
