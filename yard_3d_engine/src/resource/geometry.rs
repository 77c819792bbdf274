/// Geometry resources.
///
/// A Geometry is an immutable primitive shape shared by every mesh node
/// that references it through the geometry cache. Shapes follow the usual
/// primitive conventions: centered on the origin, Y up, planes in the XY
/// plane, cones and cylinders spanning `[-height/2, height/2]` on Y.

use glam::Vec3;
use serde::{Deserialize, Serialize};
use crate::error::{Error, Result};
use crate::scene::BoundingSphere;

fn default_plane_segments() -> u32 { 1 }
fn default_radial_segments() -> u32 { 32 }
fn default_sphere_width_segments() -> u32 { 32 }
fn default_sphere_height_segments() -> u32 { 16 }

/// Primitive shape descriptor
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum GeometryDesc {
    Box {
        width: f32,
        height: f32,
        depth: f32,
    },
    Plane {
        width: f32,
        height: f32,
        #[serde(default = "default_plane_segments")]
        width_segments: u32,
        #[serde(default = "default_plane_segments")]
        height_segments: u32,
    },
    Cone {
        radius: f32,
        height: f32,
        #[serde(default = "default_radial_segments")]
        radial_segments: u32,
    },
    Cylinder {
        radius_top: f32,
        radius_bottom: f32,
        height: f32,
        #[serde(default = "default_radial_segments")]
        radial_segments: u32,
    },
    Sphere {
        radius: f32,
        #[serde(default = "default_sphere_width_segments")]
        width_segments: u32,
        #[serde(default = "default_sphere_height_segments")]
        height_segments: u32,
    },
}

impl GeometryDesc {
    /// Short name of the primitive kind
    pub fn kind(&self) -> &'static str {
        match self {
            GeometryDesc::Box { .. } => "box",
            GeometryDesc::Plane { .. } => "plane",
            GeometryDesc::Cone { .. } => "cone",
            GeometryDesc::Cylinder { .. } => "cylinder",
            GeometryDesc::Sphere { .. } => "sphere",
        }
    }

    fn validate(&self) -> Result<()> {
        let positive = |name: &str, value: f32| -> Result<()> {
            if value.is_finite() && value > 0.0 {
                Ok(())
            } else {
                Err(Error::InvalidResource(format!(
                    "{} {} must be positive and finite, got {}", self.kind(), name, value
                )))
            }
        };
        let at_least = |name: &str, value: u32, min: u32| -> Result<()> {
            if value >= min {
                Ok(())
            } else {
                Err(Error::InvalidResource(format!(
                    "{} {} must be at least {}, got {}", self.kind(), name, min, value
                )))
            }
        };

        match *self {
            GeometryDesc::Box { width, height, depth } => {
                positive("width", width)?;
                positive("height", height)?;
                positive("depth", depth)
            }
            GeometryDesc::Plane { width, height, width_segments, height_segments } => {
                positive("width", width)?;
                positive("height", height)?;
                at_least("width_segments", width_segments, 1)?;
                at_least("height_segments", height_segments, 1)
            }
            GeometryDesc::Cone { radius, height, radial_segments } => {
                positive("radius", radius)?;
                positive("height", height)?;
                at_least("radial_segments", radial_segments, 3)
            }
            GeometryDesc::Cylinder { radius_top, radius_bottom, height, radial_segments } => {
                // One cap may collapse to a point, not both
                if !(radius_top.is_finite() && radius_bottom.is_finite())
                    || radius_top < 0.0
                    || radius_bottom < 0.0
                    || radius_top.max(radius_bottom) <= 0.0
                {
                    return Err(Error::InvalidResource(format!(
                        "cylinder radii must be non-negative with one positive, got {} / {}",
                        radius_top, radius_bottom
                    )));
                }
                positive("height", height)?;
                at_least("radial_segments", radial_segments, 3)
            }
            GeometryDesc::Sphere { radius, width_segments, height_segments } => {
                positive("radius", radius)?;
                at_least("width_segments", width_segments, 3)?;
                at_least("height_segments", height_segments, 2)
            }
        }
    }

    /// Local-space bounding sphere: center of the bounding box, radius to
    /// the farthest point of the shape.
    fn bounding_sphere(&self) -> BoundingSphere {
        let radius = match *self {
            GeometryDesc::Box { width, height, depth } => {
                0.5 * Vec3::new(width, height, depth).length()
            }
            GeometryDesc::Plane { width, height, .. } => {
                0.5 * Vec3::new(width, height, 0.0).length()
            }
            GeometryDesc::Cone { radius, height, .. } => {
                Vec3::new(radius, 0.5 * height, 0.0).length()
            }
            GeometryDesc::Cylinder { radius_top, radius_bottom, height, .. } => {
                Vec3::new(radius_top.max(radius_bottom), 0.5 * height, 0.0).length()
            }
            GeometryDesc::Sphere { radius, .. } => radius,
        };
        BoundingSphere::new(Vec3::ZERO, radius)
    }
}

/// Immutable shared geometry
#[derive(Debug, Clone, PartialEq)]
pub struct Geometry {
    desc: GeometryDesc,
    bounding_sphere: BoundingSphere,
}

impl Geometry {
    /// Validate a descriptor and build the geometry.
    ///
    /// # Errors
    ///
    /// `InvalidResource` for non-finite or non-positive dimensions and
    /// segment counts below the primitive's minimum.
    pub fn new(desc: GeometryDesc) -> Result<Self> {
        desc.validate()?;
        let bounding_sphere = desc.bounding_sphere();
        Ok(Self { desc, bounding_sphere })
    }

    pub fn desc(&self) -> &GeometryDesc {
        &self.desc
    }

    /// Bounding sphere in the geometry's local space
    pub fn bounding_sphere(&self) -> BoundingSphere {
        self.bounding_sphere
    }
}

#[cfg(test)]
#[path = "geometry_tests.rs"]
mod tests;
