/// Camera — perspective camera with a position and a look-at target.
///
/// The camera owns the parameters the drivers (path, orbit, user controls)
/// write each frame and derives view, projection and frustum from them on
/// demand. Projection follows WebGL clip space (`perspective_rh_gl`).

use glam::{Mat4, Vec3};
use crate::config::CameraConfig;
use super::frustum::Frustum;

#[derive(Debug, Clone, PartialEq)]
pub struct Camera {
    position: Vec3,
    target: Vec3,
    up: Vec3,
    /// Vertical field of view, in radians
    fov_y: f32,
    aspect: f32,
    near: f32,
    far: f32,
}

impl Camera {
    /// Create a camera at `position` looking at `target`.
    pub fn new(
        position: Vec3,
        target: Vec3,
        fov_y_degrees: f32,
        aspect: f32,
        near: f32,
        far: f32,
    ) -> Self {
        Self {
            position,
            target,
            up: Vec3::Y,
            fov_y: fov_y_degrees.to_radians(),
            aspect,
            near,
            far,
        }
    }

    /// Create a camera from configuration and the initial viewport aspect.
    pub fn from_config(config: &CameraConfig, aspect: f32) -> Self {
        Self::new(
            config.position,
            config.target,
            config.fov_y_degrees,
            aspect,
            config.near,
            config.far,
        )
    }

    // ===== GETTERS =====

    pub fn position(&self) -> Vec3 {
        self.position
    }

    pub fn target(&self) -> Vec3 {
        self.target
    }

    pub fn aspect(&self) -> f32 {
        self.aspect
    }

    /// Vertical field of view, in radians
    pub fn fov_y(&self) -> f32 {
        self.fov_y
    }

    pub fn near(&self) -> f32 {
        self.near
    }

    pub fn far(&self) -> f32 {
        self.far
    }

    /// Unit viewing direction.
    ///
    /// Falls back to -Z when the target coincides with the position.
    pub fn direction(&self) -> Vec3 {
        (self.target - self.position).try_normalize().unwrap_or(Vec3::NEG_Z)
    }

    /// View matrix (world to camera).
    pub fn view_matrix(&self) -> Mat4 {
        let direction = self.direction();
        // Looking straight up or down: Y can't serve as the up vector
        let up = if direction.cross(self.up).length_squared() < 1e-10 {
            Vec3::Z
        } else {
            self.up
        };
        Mat4::look_to_rh(self.position, direction, up)
    }

    /// Projection matrix (perspective, WebGL clip space).
    pub fn projection_matrix(&self) -> Mat4 {
        Mat4::perspective_rh_gl(self.fov_y, self.aspect, self.near, self.far)
    }

    /// Combined view-projection matrix (projection * view).
    pub fn view_projection_matrix(&self) -> Mat4 {
        self.projection_matrix() * self.view_matrix()
    }

    /// Frustum planes for the current pose and projection.
    pub fn frustum(&self) -> Frustum {
        Frustum::from_view_projection(&self.view_projection_matrix())
    }

    // ===== SETTERS =====

    pub fn set_position(&mut self, position: Vec3) {
        self.position = position;
    }

    /// Orient the camera toward `target`
    pub fn look_at(&mut self, target: Vec3) {
        self.target = target;
    }

    /// Set position and target together
    pub fn set_pose(&mut self, position: Vec3, target: Vec3) {
        self.position = position;
        self.target = target;
    }

    /// Set the aspect ratio (width / height).
    pub fn set_aspect(&mut self, aspect: f32) {
        self.aspect = aspect;
    }
}

#[cfg(test)]
#[path = "camera_tests.rs"]
mod tests;
