/// Bounding sphere used for visibility tests.

use glam::{Mat4, Vec3};

/// Conservative spherical approximation of an object's extent.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BoundingSphere {
    pub center: Vec3,
    pub radius: f32,
}

impl BoundingSphere {
    pub fn new(center: Vec3, radius: f32) -> Self {
        Self { center, radius }
    }

    /// Transform a local-space sphere into the space of `matrix`.
    ///
    /// The radius grows with the largest axis scale so the result still
    /// encloses the transformed geometry under non-uniform scaling.
    pub fn transformed(&self, matrix: &Mat4) -> BoundingSphere {
        let center = matrix.transform_point3(self.center);
        let max_scale = matrix.x_axis.truncate().length()
            .max(matrix.y_axis.truncate().length())
            .max(matrix.z_axis.truncate().length());

        BoundingSphere {
            center,
            radius: self.radius * max_scale,
        }
    }

    /// Whether a point lies inside or on the sphere
    pub fn contains_point(&self, point: Vec3) -> bool {
        self.center.distance_squared(point) <= self.radius * self.radius
    }
}

#[cfg(test)]
#[path = "bounds_tests.rs"]
mod tests;
