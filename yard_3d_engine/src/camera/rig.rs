/// CameraRig — selects the single driver that moves the camera each frame.
///
/// The rig owns one instance of every driver (waypoint path, automatic
/// orbit, user orbit controls) but only the one matching the current
/// `CameraMode` runs in `update()`. Pointer input is forwarded to the user
/// controls only while `Controls` mode is active.

use crate::config::{CameraMode, EngineConfig};
use crate::error::Result;
use super::camera::Camera;
use super::controls::OrbitControls;
use super::orbit::OrbitMotion;
use super::path::CameraPath;

#[derive(Debug, Clone)]
pub struct CameraRig {
    mode: CameraMode,
    path: CameraPath,
    orbit: OrbitMotion,
    controls: OrbitControls,
}

impl CameraRig {
    /// Build the rig from configuration.
    ///
    /// # Errors
    ///
    /// `InvalidConfig` when the waypoint tour is malformed, whatever the
    /// starting mode.
    pub fn from_config(config: &EngineConfig, camera: &Camera) -> Result<Self> {
        let mode = config.camera.mode;
        let path = CameraPath::from_config(&config.camera.path)?;

        crate::engine_debug!("yard3d::CameraRig", "Camera rig created in {:?} mode", mode);

        Ok(Self {
            mode,
            path,
            orbit: OrbitMotion::from_config(&config.camera.orbit),
            controls: OrbitControls::new(&config.controls, camera),
        })
    }

    /// Run the active driver for one frame.
    ///
    /// Returns `true` when the camera pose changed.
    pub fn update(&mut self, camera: &mut Camera) -> bool {
        match self.mode {
            CameraMode::Fixed => false,
            CameraMode::Path => self.path.advance(camera),
            CameraMode::Orbit => {
                self.orbit.advance(camera);
                true
            }
            CameraMode::Controls => self.controls.update(camera),
        }
    }

    /// Switch the active driver.
    ///
    /// Entering `Controls` re-targets the user controls on the camera's
    /// current look-at point so the hand-over is seamless.
    pub fn set_mode(&mut self, mode: CameraMode, camera: &Camera) -> Result<()> {
        if mode == CameraMode::Controls {
            self.controls.set_target(camera.target());
        }
        if mode != self.mode {
            crate::engine_info!("yard3d::CameraRig", "Camera mode {:?} -> {:?}", self.mode, mode);
        }
        self.mode = mode;
        Ok(())
    }

    /// Replace the waypoint tour.
    pub fn set_path(&mut self, path: CameraPath) {
        self.path = path;
    }

    // ===== INPUT =====

    /// Forward a pointer drag (pixels) to the user controls.
    ///
    /// Ignored unless `Controls` mode is active.
    pub fn on_pointer_drag(&mut self, dx: f32, dy: f32) {
        if self.mode == CameraMode::Controls {
            self.controls.rotate(dx, dy);
        }
    }

    /// Forward a wheel step to the user controls.
    pub fn on_wheel(&mut self, delta: f32) {
        if self.mode == CameraMode::Controls {
            self.controls.zoom(delta);
        }
    }

    // ===== GETTERS =====

    pub fn mode(&self) -> CameraMode {
        self.mode
    }

    pub fn path(&self) -> &CameraPath {
        &self.path
    }

    pub fn orbit(&self) -> &OrbitMotion {
        &self.orbit
    }

    pub fn controls(&self) -> &OrbitControls {
        &self.controls
    }

    pub fn controls_mut(&mut self) -> &mut OrbitControls {
        &mut self.controls
    }
}

#[cfg(test)]
#[path = "rig_tests.rs"]
mod tests;
