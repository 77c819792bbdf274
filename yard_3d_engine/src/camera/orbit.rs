/// Automatic circular orbit around a fixed center.
///
/// Each `advance()` moves the angle by `step` and places the camera on the
/// horizontal circle of `radius` around `center`, looking at the center.

use glam::Vec3;
use crate::config::OrbitConfig;
use super::camera::Camera;

#[derive(Debug, Clone, PartialEq)]
pub struct OrbitMotion {
    center: Vec3,
    radius: f32,
    step: f32,
    angle: f32,
}

impl OrbitMotion {
    pub fn new(center: Vec3, radius: f32, step: f32) -> Self {
        Self { center, radius, step, angle: 0.0 }
    }

    pub fn from_config(config: &OrbitConfig) -> Self {
        Self {
            center: config.center,
            radius: config.radius,
            step: config.step,
            angle: config.start_angle,
        }
    }

    /// Camera position for the current angle
    pub fn position(&self) -> Vec3 {
        self.center + Vec3::new(self.angle.cos(), 0.0, self.angle.sin()) * self.radius
    }

    /// Step the angle and place the camera.
    ///
    /// The stored angle is kept in [0, 2π).
    pub fn advance(&mut self, camera: &mut Camera) {
        self.angle = (self.angle + self.step).rem_euclid(std::f32::consts::TAU);
        camera.set_pose(self.position(), self.center);
    }

    pub fn center(&self) -> Vec3 {
        self.center
    }

    pub fn radius(&self) -> f32 {
        self.radius
    }

    pub fn step(&self) -> f32 {
        self.step
    }

    /// Current angle in radians, in [0, 2π)
    pub fn angle(&self) -> f32 {
        self.angle
    }

    pub fn set_angle(&mut self, angle: f32) {
        self.angle = angle.rem_euclid(std::f32::consts::TAU);
    }
}

#[cfg(test)]
#[path = "orbit_tests.rs"]
mod tests;
