/// Camera path — a looping tour over waypoints.
///
/// The path holds a cursor `(current_index, progress)` on the segment from
/// waypoint `current_index` to the next one (wrapping). Each `advance()`
/// places the camera on that segment and moves the cursor forward by
/// `speed`. Reaching the end of a segment moves to the next one with
/// progress reset to 0, so the tour repeats forever.
///
/// Progress is derived from a per-segment step count rather than summed
/// frame after frame, so a segment always takes `ceil(1 / speed)` frames.

use glam::Vec3;
use serde::{Deserialize, Serialize};
use crate::config::PathConfig;
use crate::engine_bail;
use crate::error::Result;
use super::camera::Camera;

/// Tolerance on the end of a segment for speeds not exact in binary
const SEGMENT_END_EPSILON: f64 = 1e-6;

/// A camera pose in the tour
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Waypoint {
    pub position: Vec3,
    pub look_at: Vec3,
}

impl Waypoint {
    pub fn new(position: Vec3, look_at: Vec3) -> Self {
        Self { position, look_at }
    }
}

#[derive(Debug, Clone)]
pub struct CameraPath {
    waypoints: Vec<Waypoint>,
    current_index: usize,
    /// Position on the current segment, always in [0, 1)
    progress: f32,
    /// Progress when stepping on this segment began
    segment_start: f32,
    /// Advances taken since `segment_start`
    steps: u64,
    speed: f32,
}

impl CameraPath {
    /// Create a path starting at the first waypoint.
    ///
    /// # Errors
    ///
    /// `InvalidConfig` when there are fewer than two waypoints, a waypoint
    /// has non-finite coordinates, or `speed` is negative or non-finite.
    /// A speed of zero is accepted and holds the camera in place.
    pub fn new(waypoints: Vec<Waypoint>, speed: f32) -> Result<Self> {
        Self::validate(&waypoints, speed)?;
        Ok(Self {
            waypoints,
            current_index: 0,
            progress: 0.0,
            segment_start: 0.0,
            steps: 0,
            speed,
        })
    }

    /// Create a path from its configuration section
    pub fn from_config(config: &PathConfig) -> Result<Self> {
        Self::new(config.waypoints.clone(), config.speed)
    }

    /// Check a waypoint list and speed without building a path
    pub fn validate(waypoints: &[Waypoint], speed: f32) -> Result<()> {
        if waypoints.len() < 2 {
            engine_bail!("yard3d::CameraPath", InvalidConfig,
                "Camera path needs at least 2 waypoints, got {}", waypoints.len());
        }
        if let Some(index) = waypoints
            .iter()
            .position(|w| !(w.position.is_finite() && w.look_at.is_finite()))
        {
            engine_bail!("yard3d::CameraPath", InvalidConfig,
                "Waypoint {} has non-finite coordinates", index);
        }
        Self::validate_speed(speed)
    }

    fn validate_speed(speed: f32) -> Result<()> {
        if !speed.is_finite() || speed < 0.0 {
            engine_bail!("yard3d::CameraPath", InvalidConfig,
                "Camera path speed must be finite and non-negative, got {}", speed);
        }
        Ok(())
    }

    /// Advance the tour by one frame.
    ///
    /// Returns `true` when the camera was moved. A call that only performs
    /// the segment transition (progress already at 1) leaves the camera
    /// untouched.
    pub fn advance(&mut self, camera: &mut Camera) -> bool {
        if self.progress >= 1.0 {
            self.next_segment();
            return false;
        }

        let (position, look_at) = self.sample();
        camera.set_pose(position, look_at);

        self.steps += 1;
        let progress = self.segment_start as f64 + self.steps as f64 * self.speed as f64;
        if progress >= 1.0 - SEGMENT_END_EPSILON {
            self.next_segment();
        } else {
            self.progress = progress as f32;
        }
        true
    }

    /// Interpolated `(position, look_at)` at the current cursor.
    ///
    /// The parameter is clamped to [0, 1], so the result always lies on the
    /// segment between the two bracketing waypoints.
    pub fn sample(&self) -> (Vec3, Vec3) {
        let from = &self.waypoints[self.current_index];
        let to = &self.waypoints[self.next_index()];
        let t = self.progress.clamp(0.0, 1.0);
        (
            from.position.lerp(to.position, t),
            from.look_at.lerp(to.look_at, t),
        )
    }

    fn next_segment(&mut self) {
        self.current_index = self.next_index();
        self.restart_segment(0.0);
    }

    fn restart_segment(&mut self, progress: f32) {
        self.progress = progress;
        self.segment_start = progress;
        self.steps = 0;
    }

    // ===== GETTERS =====

    pub fn current_index(&self) -> usize {
        self.current_index
    }

    /// Index of the waypoint the current segment leads to
    pub fn next_index(&self) -> usize {
        (self.current_index + 1) % self.waypoints.len()
    }

    pub fn progress(&self) -> f32 {
        self.progress
    }

    pub fn speed(&self) -> f32 {
        self.speed
    }

    pub fn waypoints(&self) -> &[Waypoint] {
        &self.waypoints
    }

    pub fn len(&self) -> usize {
        self.waypoints.len()
    }

    /// Always false: a path has at least two waypoints
    pub fn is_empty(&self) -> bool {
        self.waypoints.is_empty()
    }

    // ===== SETTERS =====

    /// Change the per-frame progress increment.
    pub fn set_speed(&mut self, speed: f32) -> Result<()> {
        Self::validate_speed(speed)?;
        self.speed = speed;
        self.restart_segment(self.progress);
        Ok(())
    }

    /// Move the cursor along the current segment.
    ///
    /// A progress of exactly 1 is accepted: the next `advance()` then only
    /// performs the transition to the following segment.
    pub fn set_progress(&mut self, progress: f32) -> Result<()> {
        if !(0.0..=1.0).contains(&progress) {
            engine_bail!("yard3d::CameraPath", InvalidConfig,
                "Camera path progress must be in [0, 1], got {}", progress);
        }
        self.restart_segment(progress);
        Ok(())
    }

    /// Jump to the start of the segment leaving `index`.
    ///
    /// Out-of-range indices wrap around.
    pub fn jump_to(&mut self, index: usize) {
        self.current_index = index % self.waypoints.len();
        self.restart_segment(0.0);
    }
}

#[cfg(test)]
#[path = "path_tests.rs"]
mod tests;
