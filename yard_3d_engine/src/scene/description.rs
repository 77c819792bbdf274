/// Scene description — declarative scene content, loadable from RON.
///
/// A description is a palette of named colors, an optional background
/// color, the scene lights and a list of top-level objects. Each object
/// names its culling pool and a node tree; mesh nodes reference their
/// geometry and material by cache key together with the descriptor used to
/// build them on first use.
///
/// ```ron
/// (
///     palette: { "grass": 0x7EC850, "sky": 0x87CEEB },
///     background: Some("sky"),
///     lights: [
///         Ambient(color: 0xFFFFFF, intensity: 0.6),
///         Directional(color: 0xFFFFFF, intensity: 0.8, position: (10.0, 20.0, 10.0), shadow: Some((map_size: 2048))),
///     ],
///     objects: [
///         (
///             pool: Foreground,
///             node: (
///                 name: "ground",
///                 rotation: (-1.5707964, 0.0, 0.0),
///                 receive_shadow: true,
///                 kind: Mesh(
///                     geometry: (key: "ground", desc: Plane(width: 50.0, height: 30.0)),
///                     material: (key: "ground", desc: (color: "grass")),
///                 ),
///             ),
///         ),
///     ],
/// )
/// ```

use std::path::Path;
use glam::Vec3;
use serde::{Deserialize, Serialize};
use crate::error::{Error, Result};
use crate::resource::{ColorRef, GeometryDesc, MaterialDesc, Palette};
use super::culling::Pool;

fn default_scale() -> Vec3 {
    Vec3::ONE
}

fn default_intensity() -> f32 {
    1.0
}

fn default_shadow_map_size() -> u32 {
    2048
}

fn default_shadow_near() -> f32 {
    0.5
}

fn default_shadow_far() -> f32 {
    50.0
}

fn default_shadow_extent() -> f32 {
    20.0
}

/// Shadow map of a directional light.
///
/// The shadow camera is orthographic, spanning `[-extent, extent]` on both
/// axes between `near` and `far`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ShadowDesc {
    #[serde(default = "default_shadow_map_size")]
    pub map_size: u32,
    #[serde(default = "default_shadow_near")]
    pub near: f32,
    #[serde(default = "default_shadow_far")]
    pub far: f32,
    #[serde(default = "default_shadow_extent")]
    pub extent: f32,
}

impl Default for ShadowDesc {
    fn default() -> Self {
        Self {
            map_size: default_shadow_map_size(),
            near: default_shadow_near(),
            far: default_shadow_far(),
            extent: default_shadow_extent(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum LightDesc {
    /// Uniform light from every direction
    Ambient {
        color: ColorRef,
        #[serde(default = "default_intensity")]
        intensity: f32,
    },
    /// Parallel light shining from `position` towards the origin
    Directional {
        color: ColorRef,
        #[serde(default = "default_intensity")]
        intensity: f32,
        position: Vec3,
        /// Present when the light casts shadows
        #[serde(default)]
        shadow: Option<ShadowDesc>,
    },
}

/// Geometry reference: cache key and the descriptor used on a cache miss
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct KeyedGeometry {
    pub key: String,
    pub desc: GeometryDesc,
}

/// Material reference: cache key and the descriptor used on a cache miss
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct KeyedMaterial {
    pub key: String,
    pub desc: MaterialDesc,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum NodeKindDesc {
    Mesh {
        geometry: KeyedGeometry,
        material: KeyedMaterial,
    },
    Group {
        #[serde(default)]
        children: Vec<NodeDesc>,
    },
}

/// One node and, for groups, its subtree
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NodeDesc {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub position: Vec3,
    /// Euler angles in radians (XYZ order)
    #[serde(default)]
    pub rotation: Vec3,
    #[serde(default = "default_scale")]
    pub scale: Vec3,
    #[serde(default)]
    pub cast_shadow: bool,
    #[serde(default)]
    pub receive_shadow: bool,
    /// Overrides the culling sphere radius
    #[serde(default)]
    pub bounding_radius: Option<f32>,
    pub kind: NodeKindDesc,
}

impl NodeDesc {
    pub fn mesh(name: impl Into<String>, geometry: KeyedGeometry, material: KeyedMaterial) -> Self {
        Self::with_kind(name, NodeKindDesc::Mesh { geometry, material })
    }

    pub fn group(name: impl Into<String>, children: Vec<NodeDesc>) -> Self {
        Self::with_kind(name, NodeKindDesc::Group { children })
    }

    fn with_kind(name: impl Into<String>, kind: NodeKindDesc) -> Self {
        Self {
            name: name.into(),
            position: Vec3::ZERO,
            rotation: Vec3::ZERO,
            scale: Vec3::ONE,
            cast_shadow: false,
            receive_shadow: false,
            bounding_radius: None,
            kind,
        }
    }

    pub fn at(mut self, position: Vec3) -> Self {
        self.position = position;
        self
    }

    pub fn rotated(mut self, euler: Vec3) -> Self {
        self.rotation = euler;
        self
    }

    /// Number of nodes in this subtree, including this one
    pub fn node_count(&self) -> usize {
        match &self.kind {
            NodeKindDesc::Mesh { .. } => 1,
            NodeKindDesc::Group { children } => {
                1 + children.iter().map(NodeDesc::node_count).sum::<usize>()
            }
        }
    }
}

/// A top-level object and the culling pool it registers into
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ObjectDesc {
    #[serde(default)]
    pub pool: Pool,
    pub node: NodeDesc,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct SceneDescription {
    #[serde(default)]
    pub palette: Palette,
    /// Clear color; the render host keeps its own when absent
    #[serde(default)]
    pub background: Option<ColorRef>,
    #[serde(default)]
    pub lights: Vec<LightDesc>,
    #[serde(default)]
    pub objects: Vec<ObjectDesc>,
}

impl SceneDescription {
    pub fn from_ron_str(text: &str) -> Result<Self> {
        ron::from_str(text)
            .map_err(|e| Error::InvalidConfig(format!("Scene description parse error: {}", e)))
    }

    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path)
            .map_err(|e| Error::Io(format!("{}: {}", path.display(), e)))?;
        Self::from_ron_str(&text)
    }

    pub fn to_ron_string(&self) -> Result<String> {
        ron::ser::to_string_pretty(self, ron::ser::PrettyConfig::default())
            .map_err(|e| Error::InvalidConfig(format!("Scene description serialize error: {}", e)))
    }

    /// Total number of nodes the description builds
    pub fn node_count(&self) -> usize {
        self.objects.iter().map(|o| o.node.node_count()).sum()
    }
}
