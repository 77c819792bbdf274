use glam::Vec3;
use super::*;

fn create_test_camera() -> Camera {
    Camera::new(Vec3::new(10.0, 8.0, 15.0), Vec3::ZERO, 75.0, 1.0, 0.1, 1000.0)
}

fn undamped_config() -> ControlsConfig {
    ControlsConfig {
        enable_damping: false,
        ..ControlsConfig::default()
    }
}

fn polar_angle(camera: &Camera, target: Vec3) -> f32 {
    let offset = camera.position() - target;
    (offset.y / offset.length()).acos()
}

// ============================================================================
// update without input
// ============================================================================

#[test]
fn test_update_without_input_keeps_pose() {
    let mut camera = create_test_camera();
    let mut controls = OrbitControls::new(&ControlsConfig::default(), &camera);

    assert!(!controls.update(&mut camera));
    assert!(camera.position().abs_diff_eq(Vec3::new(10.0, 8.0, 15.0), 1e-4));
    assert_eq!(controls.target(), Vec3::ZERO);
    assert!(!controls.is_moving());
}

#[test]
fn test_update_clamps_distance() {
    let mut camera = Camera::new(Vec3::new(0.0, 0.0, 50.0), Vec3::ZERO, 75.0, 1.0, 0.1, 1000.0);
    let mut controls = OrbitControls::new(&ControlsConfig::default(), &camera);

    assert!(controls.update(&mut camera));
    assert!((camera.position().length() - 30.0).abs() < 1e-3);

    camera.set_position(Vec3::new(0.0, 0.0, 1.0));
    controls.update(&mut camera);
    assert!((camera.position().length() - 5.0).abs() < 1e-3);
}

// ============================================================================
// rotate
// ============================================================================

#[test]
fn test_rotate_without_damping_applies_once() {
    let mut camera = create_test_camera();
    let mut controls = OrbitControls::new(&undamped_config(), &camera);
    let distance = camera.position().length();

    controls.rotate(100.0, 0.0);
    assert!(controls.update(&mut camera));
    let after_drag = camera.position();
    assert!(!after_drag.abs_diff_eq(Vec3::new(10.0, 8.0, 15.0), 1e-2));
    assert!((after_drag.length() - distance).abs() < 1e-3);
    assert!((after_drag.y - 8.0).abs() < 1e-3);

    // Nothing left to apply
    assert!(!controls.update(&mut camera));
    assert!(camera.position().abs_diff_eq(after_drag, 1e-4));
}

#[test]
fn test_rotate_with_damping_keeps_momentum() {
    let mut camera = create_test_camera();
    let mut controls = OrbitControls::new(&ControlsConfig::default(), &camera);

    controls.rotate(200.0, 0.0);
    let start = camera.position();
    assert!(controls.update(&mut camera));
    let first = camera.position();
    assert!(controls.is_moving());

    // Pointer released: the camera keeps drifting, by smaller amounts
    assert!(controls.update(&mut camera));
    let second = camera.position();
    assert!(second.distance(first) < first.distance(start));
    assert!(second.distance(first) > 0.0);
}

#[test]
fn test_damping_momentum_dies_out() {
    let mut camera = create_test_camera();
    let mut controls = OrbitControls::new(&ControlsConfig::default(), &camera);

    controls.rotate(50.0, 20.0);
    for _ in 0..2000 {
        controls.update(&mut camera);
    }
    assert!(!controls.is_moving());
    assert!(!controls.update(&mut camera));
}

#[test]
fn test_polar_angle_is_clamped() {
    let mut camera = create_test_camera();
    let config = undamped_config();
    let mut controls = OrbitControls::new(&config, &camera);

    // Drag far upward: camera goes under the target until the limit
    controls.rotate(0.0, -10_000.0);
    controls.update(&mut camera);
    assert!(polar_angle(&camera, Vec3::ZERO) <= config.max_polar_angle + 1e-4);

    // Drag far downward: camera stops just short of the pole
    controls.rotate(0.0, 10_000.0);
    controls.update(&mut camera);
    let phi = polar_angle(&camera, Vec3::ZERO);
    assert!(phi >= 0.0 && phi < 1e-2);
    assert!(camera.view_matrix().is_finite());
}

// ============================================================================
// zoom
// ============================================================================

#[test]
fn test_zoom_in_and_out() {
    let mut camera = create_test_camera();
    let mut controls = OrbitControls::new(&undamped_config(), &camera);
    let distance = camera.position().length();

    controls.zoom(-1.0);
    controls.update(&mut camera);
    assert!(camera.position().length() < distance);

    controls.zoom(1.0);
    controls.zoom(1.0);
    controls.update(&mut camera);
    assert!(camera.position().length() > distance);
}

#[test]
fn test_zoom_respects_distance_limits() {
    let mut camera = create_test_camera();
    let mut controls = OrbitControls::new(&undamped_config(), &camera);

    for _ in 0..200 {
        controls.zoom(-1.0);
        controls.update(&mut camera);
    }
    assert!((camera.position().length() - 5.0).abs() < 1e-3);

    for _ in 0..200 {
        controls.zoom(1.0);
        controls.update(&mut camera);
    }
    assert!((camera.position().length() - 30.0).abs() < 1e-3);
}

// ============================================================================
// enabled flag / target
// ============================================================================

#[test]
fn test_disabled_controls_ignore_input() {
    let mut camera = create_test_camera();
    let mut controls = OrbitControls::new(&undamped_config(), &camera);
    controls.set_enabled(false);
    assert!(!controls.is_enabled());

    controls.rotate(300.0, 300.0);
    controls.zoom(-5.0);
    assert!(!controls.is_moving());
    assert!(!controls.update(&mut camera));
}

#[test]
fn test_set_target_reorients_camera() {
    let mut camera = create_test_camera();
    let mut controls = OrbitControls::new(&undamped_config(), &camera);

    controls.set_target(Vec3::new(0.0, 2.0, 0.0));
    assert!(controls.update(&mut camera));
    assert_eq!(camera.target(), Vec3::new(0.0, 2.0, 0.0));
}
