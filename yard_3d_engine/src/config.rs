//! Engine configuration
//!
//! Configuration is plain data deserialized from RON. Every section has a
//! `Default` matching the stock yard scene, so a config file only needs to
//! name the fields it changes.

use std::path::Path;
use glam::Vec3;
use serde::{Deserialize, Serialize};
use crate::camera::Waypoint;
use crate::error::{Error, Result};
use crate::log::LogSeverity;

/// Which driver owns the camera each frame.
///
/// The modes are mutually exclusive: exactly one of them moves the camera
/// during a given frame.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum CameraMode {
    /// Camera stays where it was placed
    Fixed,
    /// Looping waypoint tour
    Path,
    /// Automatic circular orbit around a center
    Orbit,
    /// User-driven orbit controls (pointer drag / wheel)
    Controls,
}

/// Waypoint tour settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PathConfig {
    pub waypoints: Vec<Waypoint>,
    /// Progress increment per frame
    pub speed: f32,
}

impl Default for PathConfig {
    fn default() -> Self {
        Self {
            waypoints: vec![
                Waypoint::new(Vec3::new(15.0, 8.0, 15.0), Vec3::new(0.0, 0.0, 0.0)),
                Waypoint::new(Vec3::new(0.0, 10.0, 20.0), Vec3::new(0.0, 5.0, 0.0)),
                Waypoint::new(Vec3::new(-15.0, 5.0, 10.0), Vec3::new(0.0, 3.0, 0.0)),
                Waypoint::new(Vec3::new(0.0, 5.0, -10.0), Vec3::new(0.0, 5.0, 5.0)),
            ],
            speed: 0.005,
        }
    }
}

/// Automatic orbit settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct OrbitConfig {
    pub center: Vec3,
    pub radius: f32,
    /// Angle increment per frame, in radians
    pub step: f32,
    pub start_angle: f32,
}

impl Default for OrbitConfig {
    fn default() -> Self {
        Self {
            center: Vec3::new(0.0, 5.0, 0.0),
            radius: 20.0,
            step: 0.002,
            start_angle: 0.0,
        }
    }
}

/// Camera placement, projection and motion
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CameraConfig {
    pub mode: CameraMode,
    pub position: Vec3,
    pub target: Vec3,
    pub fov_y_degrees: f32,
    pub near: f32,
    pub far: f32,
    pub path: PathConfig,
    pub orbit: OrbitConfig,
}

impl Default for CameraConfig {
    fn default() -> Self {
        Self {
            mode: CameraMode::Controls,
            position: Vec3::new(10.0, 8.0, 15.0),
            target: Vec3::ZERO,
            fov_y_degrees: 75.0,
            near: 0.1,
            far: 1000.0,
            path: PathConfig::default(),
            orbit: OrbitConfig::default(),
        }
    }
}

/// User orbit controls
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ControlsConfig {
    pub enabled: bool,
    pub enable_damping: bool,
    pub damping_factor: f32,
    pub min_distance: f32,
    pub max_distance: f32,
    /// Upper bound for the polar angle, measured from +Y, in radians
    pub max_polar_angle: f32,
    /// Radians of rotation per pixel of pointer drag
    pub rotate_speed: f32,
    pub zoom_speed: f32,
}

impl Default for ControlsConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            enable_damping: true,
            damping_factor: 0.05,
            min_distance: 5.0,
            max_distance: 30.0,
            max_polar_angle: std::f32::consts::PI * 0.9,
            rotate_speed: 0.005,
            zoom_speed: 1.0,
        }
    }
}

/// Visibility culling
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CullingConfig {
    pub enabled: bool,
    /// Radius of the coarse sphere used for nodes without geometry
    pub group_radius: f32,
}

impl Default for CullingConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            group_radius: 10.0,
        }
    }
}

/// Render surface placement
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SurfaceConfig {
    /// Id of the host element that receives the render surface
    pub container_id: String,
    pub title: String,
    pub width: u32,
    pub height: u32,
}

impl Default for SurfaceConfig {
    fn default() -> Self {
        Self {
            container_id: "canvas-container".to_string(),
            title: "Yard3D".to_string(),
            width: 1280,
            height: 720,
        }
    }
}

/// Top-level engine configuration
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    pub log_level: Option<LogSeverity>,
    pub camera: CameraConfig,
    pub controls: ControlsConfig,
    pub culling: CullingConfig,
    pub surface: SurfaceConfig,
}

impl EngineConfig {
    /// Parse a configuration from RON text and validate it.
    pub fn from_ron_str(text: &str) -> Result<Self> {
        let config: EngineConfig = ron::from_str(text)
            .map_err(|e| Error::InvalidConfig(format!("RON parse error: {}", e)))?;
        config.validate()?;
        Ok(config)
    }

    /// Load and validate a RON configuration file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path)
            .map_err(|e| Error::Io(format!("{}: {}", path.display(), e)))?;
        Self::from_ron_str(&text)
    }

    /// Serialize to pretty RON.
    pub fn to_ron_string(&self) -> Result<String> {
        ron::ser::to_string_pretty(self, ron::ser::PrettyConfig::default())
            .map_err(|e| Error::InvalidConfig(format!("RON serialize error: {}", e)))
    }

    /// Check value ranges that serde cannot express.
    ///
    /// The waypoint tour is checked whatever the starting mode, since the
    /// rig keeps it available for a later switch to `Path`.
    pub fn validate(&self) -> Result<()> {
        let camera = &self.camera;
        if !(camera.fov_y_degrees > 0.0 && camera.fov_y_degrees < 180.0) {
            return Err(Error::InvalidConfig(format!(
                "fov_y_degrees must be in (0, 180), got {}", camera.fov_y_degrees
            )));
        }
        if !(camera.near > 0.0 && camera.far > camera.near && camera.far.is_finite()) {
            return Err(Error::InvalidConfig(format!(
                "clip planes must satisfy 0 < near < far, got near={} far={}",
                camera.near, camera.far
            )));
        }
        crate::camera::CameraPath::validate(&camera.path.waypoints, camera.path.speed)?;
        if camera.mode == CameraMode::Orbit
            && !(camera.orbit.radius.is_finite() && camera.orbit.step.is_finite())
        {
            return Err(Error::InvalidConfig("orbit radius and step must be finite".to_string()));
        }

        let controls = &self.controls;
        if !(controls.min_distance > 0.0 && controls.max_distance >= controls.min_distance) {
            return Err(Error::InvalidConfig(format!(
                "controls distance range is empty: [{}, {}]",
                controls.min_distance, controls.max_distance
            )));
        }
        if !(0.0..=1.0).contains(&controls.damping_factor) {
            return Err(Error::InvalidConfig(format!(
                "damping_factor must be in [0, 1], got {}", controls.damping_factor
            )));
        }

        if !(self.culling.group_radius > 0.0 && self.culling.group_radius.is_finite()) {
            return Err(Error::InvalidConfig(format!(
                "group_radius must be positive, got {}", self.culling.group_radius
            )));
        }
        Ok(())
    }
}

#[cfg(test)]
#[path = "config_tests.rs"]
mod tests;
