/// Frame context — owns the scene state and runs the per-frame sequence.
///
/// Each `frame()` call:
/// 1. runs the active camera driver (path, orbit or user controls),
/// 2. updates visibility flags with the culling registry,
/// 3. hands scene and camera to the render host.
///
/// The host drives the loop (one call per display refresh) and forwards
/// resize and pointer input between frames. All entry points take
/// `&mut self`, so input is never applied in the middle of a frame.

use crate::camera::{Camera, CameraRig};
use crate::config::{CameraMode, EngineConfig};
use crate::error::Result;
use crate::resource::ResourceManager;
use crate::scene::{CullStats, CullingRegistry, NodeKey, Scene, SceneBuilder, SceneDescription};

// ===== HOST SEAMS =====

/// Consumer of the culled scene.
///
/// Called once per frame after visibility flags are up to date. Nodes
/// whose flag is cleared (or whose ancestor's flag is cleared) should not
/// be drawn.
pub trait RenderHost {
    fn render(&mut self, scene: &Scene, camera: &Camera) -> Result<()>;
}

/// Host environment that provides the element the render surface attaches to.
pub trait SurfaceHost {
    type Container;

    /// Look up an existing container by id
    fn find_container(&mut self, id: &str) -> Option<Self::Container>;

    /// Create a new container with the given id
    fn create_container(&mut self, id: &str) -> Result<Self::Container>;

    /// Attach the render surface to a container
    fn attach(&mut self, container: &Self::Container) -> Result<()>;
}

/// Attach the render surface to container `id`, creating it when missing.
///
/// A missing container is not fatal: a warning is logged and a fresh
/// container with that id is created.
pub fn attach_surface<H: SurfaceHost>(host: &mut H, id: &str) -> Result<H::Container> {
    let container = match host.find_container(id) {
        Some(container) => container,
        None => {
            crate::engine_warn!("yard3d::Surface",
                "Container '{}' not found, creating a new one", id);
            host.create_container(id)?
        }
    };
    host.attach(&container)?;
    crate::engine_debug!("yard3d::Surface", "Render surface attached to '{}'", id);
    Ok(container)
}

// ===== INPUT / STATS =====

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PointerButton {
    Primary,
    Secondary,
    Middle,
}

/// Pointer click in surface pixel coordinates
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PointerEvent {
    pub x: f32,
    pub y: f32,
    pub button: PointerButton,
}

/// Render surface size in pixels
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Viewport {
    pub width: u32,
    pub height: u32,
}

impl Viewport {
    pub fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }

    /// Width / height (1.0 for a degenerate viewport)
    pub fn aspect(&self) -> f32 {
        if self.height == 0 {
            1.0
        } else {
            self.width as f32 / self.height as f32
        }
    }
}

/// What happened during one frame
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct FrameStats {
    /// Index of the frame, starting at 0
    pub frame: u64,
    pub camera_moved: bool,
    pub cull: CullStats,
}

// ===== FRAME CONTEXT =====

pub struct FrameContext {
    resources: ResourceManager,
    scene: Scene,
    registry: CullingRegistry,
    camera: Camera,
    rig: CameraRig,
    viewport: Viewport,
    frame_index: u64,
}

impl FrameContext {
    /// Create the context from validated configuration.
    ///
    /// # Errors
    ///
    /// `InvalidConfig` if the configuration fails validation, including a
    /// malformed waypoint tour when path mode is selected.
    pub fn new(config: &EngineConfig) -> Result<Self> {
        config.validate()?;
        if let Some(level) = config.log_level {
            crate::log::set_min_severity(level);
        }

        let viewport = Viewport::new(config.surface.width, config.surface.height);
        let camera = Camera::from_config(&config.camera, viewport.aspect());
        let rig = CameraRig::from_config(config, &camera)?;

        crate::engine_info!("yard3d::FrameContext",
            "Frame context created ({}x{}, {:?} camera, culling {})",
            viewport.width, viewport.height, rig.mode(),
            if config.culling.enabled { "on" } else { "off" });

        Ok(Self {
            resources: ResourceManager::new(),
            scene: Scene::new(),
            registry: CullingRegistry::from_config(&config.culling),
            camera,
            rig,
            viewport,
            frame_index: 0,
        })
    }

    /// Build a scene description into the context's scene.
    pub fn build_scene(&mut self, description: &SceneDescription) -> Result<Vec<NodeKey>> {
        SceneBuilder::build(description, &mut self.resources, &mut self.scene, &mut self.registry)
    }

    /// Run one frame: camera driver, culling, render.
    pub fn frame<H: RenderHost>(&mut self, host: &mut H) -> Result<FrameStats> {
        let camera_moved = self.rig.update(&mut self.camera);
        let cull = self.registry.cull_frame(&mut self.scene, &self.camera);
        host.render(&self.scene, &self.camera)?;

        let stats = FrameStats {
            frame: self.frame_index,
            camera_moved,
            cull,
        };
        self.frame_index += 1;
        Ok(stats)
    }

    // ===== HOST EVENTS =====

    /// Apply a new surface size.
    ///
    /// Zero-sized surfaces (minimized windows) are ignored. Returns whether
    /// the size was applied.
    pub fn on_resize(&mut self, width: u32, height: u32) -> bool {
        if width == 0 || height == 0 {
            crate::engine_warn!("yard3d::FrameContext",
                "Ignoring resize to {}x{}", width, height);
            return false;
        }
        self.viewport = Viewport::new(width, height);
        self.camera.set_aspect(self.viewport.aspect());
        crate::engine_debug!("yard3d::FrameContext", "Resized to {}x{}", width, height);
        true
    }

    /// Pointer click. Reserved for object picking; currently does nothing.
    pub fn on_click(&mut self, event: &PointerEvent) {
        crate::engine_trace!("yard3d::FrameContext",
            "Click {:?} at ({}, {})", event.button, event.x, event.y);
    }

    /// Pointer drag in pixels, for the user orbit controls
    pub fn on_pointer_drag(&mut self, dx: f32, dy: f32) {
        self.rig.on_pointer_drag(dx, dy);
    }

    /// Wheel step, for the user orbit controls
    pub fn on_wheel(&mut self, delta: f32) {
        self.rig.on_wheel(delta);
    }

    /// Switch the camera driver.
    pub fn set_camera_mode(&mut self, mode: CameraMode) -> Result<()> {
        self.rig.set_mode(mode, &self.camera)
    }

    // ===== ACCESSORS =====

    pub fn scene(&self) -> &Scene {
        &self.scene
    }

    pub fn scene_mut(&mut self) -> &mut Scene {
        &mut self.scene
    }

    pub fn registry(&self) -> &CullingRegistry {
        &self.registry
    }

    pub fn registry_mut(&mut self) -> &mut CullingRegistry {
        &mut self.registry
    }

    pub fn resources(&self) -> &ResourceManager {
        &self.resources
    }

    pub fn camera(&self) -> &Camera {
        &self.camera
    }

    pub fn rig(&self) -> &CameraRig {
        &self.rig
    }

    pub fn viewport(&self) -> Viewport {
        self.viewport
    }

    /// Number of frames run so far
    pub fn frame_count(&self) -> u64 {
        self.frame_index
    }
}

#[cfg(test)]
#[path = "frame_tests.rs"]
mod tests;
