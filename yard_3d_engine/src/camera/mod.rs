//! Camera module — perspective camera, frustum, and camera drivers.
//!
//! The camera itself is plain state. Drivers (waypoint path, automatic
//! orbit, user orbit controls) write its pose each frame; `CameraRig`
//! makes sure exactly one of them runs per frame.

mod camera;
mod frustum;
mod path;
mod orbit;
mod controls;
mod rig;

pub use camera::Camera;
pub use frustum::{
    Frustum,
    PLANE_LEFT, PLANE_RIGHT, PLANE_BOTTOM, PLANE_TOP, PLANE_NEAR, PLANE_FAR,
};
pub use path::{CameraPath, Waypoint};
pub use orbit::OrbitMotion;
pub use controls::OrbitControls;
pub use rig::CameraRig;
