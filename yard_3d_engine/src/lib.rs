/*!
# Yard3D Engine

Core of a small decorative 3D scene viewer: a stylized yard with a house,
trees, fences and clouds, seen through a slowly moving camera.

The crate does not draw anything itself. It owns the scene state and the
per-frame logic, and hands the culled scene to a host-provided renderer.

## Architecture

- **ResourceManager**: key-based caches sharing geometries and materials
  between scene nodes
- **Scene**: node tree (meshes and groups) with local transforms
- **SceneBuilder**: builds nodes from a declarative `SceneDescription`
- **CullingRegistry**: per-frame frustum culling of registered objects
- **Camera / CameraRig**: perspective camera driven by a waypoint tour,
  an automatic orbit, or user orbit controls
- **FrameContext**: runs the frame sequence (camera, culling, render) and
  receives host input

Scene content and engine settings are plain data, loaded from RON.
*/

// Internal modules
mod error;
pub mod log;
mod config;
mod camera;
mod resource;
mod scene;
mod frame;

// Main yard3d namespace module
pub mod yard3d {
    // Error types
    pub use crate::error::{Error, Result};

    // Frame loop and host seams
    pub use crate::frame::{
        FrameContext, FrameStats, RenderHost, SurfaceHost, attach_surface,
        PointerEvent, PointerButton, Viewport,
    };

    // Logging sub-module (types only, NOT macros)
    pub mod log {
        pub use crate::log::{
            Logger, LogEntry, LogSeverity, DefaultLogger,
            set_logger, reset_logger, set_min_severity, min_severity,
        };
        // Note: engine_* macros are NOT re-exported here - they are internal only
    }

    // Configuration sub-module
    pub mod config {
        pub use crate::config::*;
    }

    // Camera sub-module
    pub mod camera {
        pub use crate::camera::*;
    }

    // Resource sub-module
    pub mod resource {
        pub use crate::resource::*;
    }

    // Scene sub-module
    pub mod scene {
        pub use crate::scene::*;
    }
}

// Re-export math library at crate root
pub use glam;
