//! Scene management module
//!
//! Provides the scene graph and its lighting environment, declarative
//! scene descriptions and their builder, and the visibility culling
//! registry.

mod bounds;
mod scene;
mod culling;
mod description;
mod builder;
mod environment;

pub use bounds::BoundingSphere;
pub use scene::{NodeFlags, NodeKey, NodeKind, Scene, SceneNode, Transform};
pub use culling::{CullStats, CullingRegistry, Pool, DEFAULT_GROUP_RADIUS};
pub use description::{
    KeyedGeometry, KeyedMaterial, LightDesc, NodeDesc, NodeKindDesc, ObjectDesc,
    SceneDescription, ShadowDesc,
};
pub use environment::{Environment, Light, LightKind};
pub use builder::SceneBuilder;
