/// OrbitControls — user-driven orbit around a target.
///
/// Pointer drags and wheel steps are accumulated as pending deltas and
/// consumed by `update()`, once per frame. The camera offset from the
/// target is handled in spherical coordinates:
/// - theta: azimuth around +Y, measured from +Z
/// - phi: polar angle from +Y, clamped to `[EPS, max_polar_angle]`
/// - radius: clamped to `[min_distance, max_distance]`
///
/// With damping enabled only a fraction (`damping_factor`) of the pending
/// rotation is applied per update and the remainder decays, giving the
/// camera some inertia after the pointer is released.

use glam::Vec3;
use crate::config::ControlsConfig;
use super::camera::Camera;

/// Smallest polar angle, keeps the camera off the +Y pole
const POLAR_EPSILON: f32 = 1e-6;

/// Per-step wheel zoom ratio before `zoom_speed` is applied
const ZOOM_BASE: f32 = 0.95;

/// Below this, leftover rotation momentum is dropped
const MOTION_EPSILON: f32 = 1e-6;

#[derive(Debug, Clone, PartialEq)]
pub struct OrbitControls {
    config: ControlsConfig,
    target: Vec3,
    /// Pending azimuth change, radians
    theta_delta: f32,
    /// Pending polar change, radians
    phi_delta: f32,
    /// Pending radius multiplier
    scale: f32,
}

impl OrbitControls {
    /// Create controls orbiting the camera's current target.
    pub fn new(config: &ControlsConfig, camera: &Camera) -> Self {
        Self {
            config: config.clone(),
            target: camera.target(),
            theta_delta: 0.0,
            phi_delta: 0.0,
            scale: 1.0,
        }
    }

    /// Queue a rotation from a pointer drag, in pixels.
    ///
    /// Dragging right turns the camera left around the target, dragging
    /// down raises it toward the top.
    pub fn rotate(&mut self, dx: f32, dy: f32) {
        if !self.config.enabled {
            return;
        }
        self.theta_delta -= dx * self.config.rotate_speed;
        self.phi_delta -= dy * self.config.rotate_speed;
    }

    /// Queue a zoom step. Positive deltas move away from the target.
    pub fn zoom(&mut self, delta: f32) {
        if !self.config.enabled || delta == 0.0 {
            return;
        }
        let ratio = ZOOM_BASE.powf(self.config.zoom_speed);
        if delta > 0.0 {
            self.scale /= ratio;
        } else {
            self.scale *= ratio;
        }
    }

    /// Apply pending input to the camera.
    ///
    /// Distance and polar limits are enforced on every call, even without
    /// input. Disabled controls leave the camera alone. Returns `true` when
    /// the camera pose changed.
    pub fn update(&mut self, camera: &mut Camera) -> bool {
        if !self.config.enabled {
            return false;
        }

        let offset = camera.position() - self.target;
        let mut radius = offset.length();
        let (mut theta, mut phi) = if radius > 0.0 {
            (offset.x.atan2(offset.z), (offset.y / radius).clamp(-1.0, 1.0).acos())
        } else {
            (0.0, std::f32::consts::FRAC_PI_2)
        };

        let weight = if self.config.enable_damping { self.config.damping_factor } else { 1.0 };
        theta += self.theta_delta * weight;
        phi += self.phi_delta * weight;

        phi = phi.clamp(POLAR_EPSILON, self.config.max_polar_angle.max(POLAR_EPSILON));
        radius = (radius * self.scale).clamp(self.config.min_distance, self.config.max_distance);

        let sin_phi = phi.sin();
        let new_offset = Vec3::new(
            radius * sin_phi * theta.sin(),
            radius * phi.cos(),
            radius * sin_phi * theta.cos(),
        );
        let position = self.target + new_offset;

        if self.config.enable_damping {
            self.theta_delta *= 1.0 - self.config.damping_factor;
            self.phi_delta *= 1.0 - self.config.damping_factor;
            if self.theta_delta.abs() < MOTION_EPSILON {
                self.theta_delta = 0.0;
            }
            if self.phi_delta.abs() < MOTION_EPSILON {
                self.phi_delta = 0.0;
            }
        } else {
            self.theta_delta = 0.0;
            self.phi_delta = 0.0;
        }
        self.scale = 1.0;

        let moved = position.distance_squared(camera.position()) > MOTION_EPSILON
            || camera.target() != self.target;
        if moved {
            camera.set_pose(position, self.target);
        }
        moved
    }

    /// Whether rotation momentum is still pending
    pub fn is_moving(&self) -> bool {
        self.theta_delta != 0.0 || self.phi_delta != 0.0 || self.scale != 1.0
    }

    pub fn target(&self) -> Vec3 {
        self.target
    }

    pub fn set_target(&mut self, target: Vec3) {
        self.target = target;
    }

    pub fn is_enabled(&self) -> bool {
        self.config.enabled
    }

    /// Enable or disable input. Disabling also drops pending motion.
    pub fn set_enabled(&mut self, enabled: bool) {
        self.config.enabled = enabled;
        if !enabled {
            self.theta_delta = 0.0;
            self.phi_delta = 0.0;
            self.scale = 1.0;
        }
    }

    pub fn config(&self) -> &ControlsConfig {
        &self.config
    }
}

#[cfg(test)]
#[path = "controls_tests.rs"]
mod tests;
