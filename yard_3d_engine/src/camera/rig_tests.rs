use glam::Vec3;
use crate::config::{CameraMode, EngineConfig, PathConfig};
use crate::error::Error;
use crate::camera::Waypoint;
use super::*;

fn config_with_mode(mode: CameraMode) -> EngineConfig {
    let mut config = EngineConfig::default();
    config.camera.mode = mode;
    config
}

fn camera_for(config: &EngineConfig) -> Camera {
    Camera::from_config(&config.camera, 16.0 / 9.0)
}

#[test]
fn test_default_mode_is_controls() {
    let config = EngineConfig::default();
    let camera = camera_for(&config);
    let rig = CameraRig::from_config(&config, &camera).unwrap();

    assert_eq!(rig.mode(), CameraMode::Controls);
    assert_eq!(rig.controls().target(), Vec3::ZERO);
    assert_eq!(rig.path().len(), config.camera.path.waypoints.len());
}

#[test]
fn test_fixed_mode_never_moves_camera() {
    let config = config_with_mode(CameraMode::Fixed);
    let mut camera = camera_for(&config);
    let mut rig = CameraRig::from_config(&config, &camera).unwrap();
    let start = camera.clone();

    rig.on_pointer_drag(100.0, 50.0);
    for _ in 0..10 {
        assert!(!rig.update(&mut camera));
    }
    assert_eq!(camera, start);
}

#[test]
fn test_path_mode_drives_camera_along_tour() {
    let config = config_with_mode(CameraMode::Path);
    let mut camera = camera_for(&config);
    let mut rig = CameraRig::from_config(&config, &camera).unwrap();

    assert!(rig.update(&mut camera));
    let first = config.camera.path.waypoints[0];
    assert_eq!(camera.position(), first.position);
    assert_eq!(camera.target(), first.look_at);
}

#[test]
fn test_path_mode_with_invalid_tour_is_fatal() {
    let mut config = config_with_mode(CameraMode::Path);
    config.camera.path = PathConfig { waypoints: Vec::new(), speed: 0.1 };
    let camera = camera_for(&config);

    let result = CameraRig::from_config(&config, &camera);
    assert!(matches!(result, Err(Error::InvalidConfig(_))));
}

#[test]
fn test_invalid_tour_is_fatal_in_every_mode() {
    for mode in [CameraMode::Fixed, CameraMode::Orbit, CameraMode::Controls] {
        let mut config = config_with_mode(mode);
        config.camera.path = PathConfig { waypoints: Vec::new(), speed: 0.1 };
        let camera = camera_for(&config);

        let result = CameraRig::from_config(&config, &camera);
        assert!(matches!(result, Err(Error::InvalidConfig(_))), "{:?}", mode);
    }
}

#[test]
fn test_orbit_mode_circles_center() {
    let config = config_with_mode(CameraMode::Orbit);
    let mut camera = camera_for(&config);
    let mut rig = CameraRig::from_config(&config, &camera).unwrap();

    for _ in 0..5 {
        assert!(rig.update(&mut camera));
        assert_eq!(camera.target(), config.camera.orbit.center);
        let offset = camera.position() - config.camera.orbit.center;
        assert!((offset.length() - config.camera.orbit.radius).abs() < 1e-3);
    }
}

#[test]
fn test_input_only_reaches_controls_in_controls_mode() {
    let config = config_with_mode(CameraMode::Orbit);
    let camera = camera_for(&config);
    let mut rig = CameraRig::from_config(&config, &camera).unwrap();

    rig.on_pointer_drag(100.0, 0.0);
    rig.on_wheel(1.0);
    assert!(!rig.controls().is_moving());

    rig.set_mode(CameraMode::Controls, &camera).unwrap();
    rig.on_pointer_drag(100.0, 0.0);
    assert!(rig.controls().is_moving());
}

#[test]
fn test_switch_to_controls_retargets() {
    let config = config_with_mode(CameraMode::Orbit);
    let mut camera = camera_for(&config);
    let mut rig = CameraRig::from_config(&config, &camera).unwrap();

    rig.update(&mut camera);
    rig.set_mode(CameraMode::Controls, &camera).unwrap();
    assert_eq!(rig.controls().target(), config.camera.orbit.center);

    // Orbit no longer runs: only the controls move the camera now
    let angle = rig.orbit().angle();
    rig.update(&mut camera);
    assert_eq!(rig.orbit().angle(), angle);
}

#[test]
fn test_set_path_replaces_tour() {
    let config = config_with_mode(CameraMode::Fixed);
    let mut camera = camera_for(&config);
    let mut rig = CameraRig::from_config(&config, &camera).unwrap();

    let tour = CameraPath::new(
        vec![
            Waypoint::new(Vec3::new(1.0, 2.0, 3.0), Vec3::ZERO),
            Waypoint::new(Vec3::new(4.0, 5.0, 6.0), Vec3::ZERO),
        ],
        0.5,
    ).unwrap();
    rig.set_path(tour);
    rig.set_mode(CameraMode::Path, &camera).unwrap();
    assert!(rig.update(&mut camera));
    assert_eq!(camera.position(), Vec3::new(1.0, 2.0, 3.0));
    assert_eq!(rig.path().len(), 2);
    assert_eq!(rig.path().current_index(), 0);
}
