use glam::{Mat4, Quat, Vec3};
use super::*;

#[test]
fn test_transformed_by_translation() {
    let sphere = BoundingSphere::new(Vec3::ZERO, 2.0);
    let moved = sphere.transformed(&Mat4::from_translation(Vec3::new(8.0, 5.0, 9.0)));
    assert_eq!(moved.center, Vec3::new(8.0, 5.0, 9.0));
    assert_eq!(moved.radius, 2.0);
}

#[test]
fn test_transformed_uses_largest_scale_axis() {
    let sphere = BoundingSphere::new(Vec3::new(1.0, 0.0, 0.0), 1.0);
    let matrix = Mat4::from_scale_rotation_translation(
        Vec3::new(1.0, 4.0, 2.0),
        Quat::IDENTITY,
        Vec3::ZERO,
    );
    let scaled = sphere.transformed(&matrix);
    assert_eq!(scaled.center, Vec3::new(1.0, 0.0, 0.0));
    assert!((scaled.radius - 4.0).abs() < 1e-6);
}

#[test]
fn test_rotation_keeps_radius() {
    let sphere = BoundingSphere::new(Vec3::X, 3.0);
    let rotated = sphere.transformed(&Mat4::from_rotation_y(std::f32::consts::FRAC_PI_2));
    assert!(rotated.center.abs_diff_eq(Vec3::NEG_Z, 1e-6));
    assert!((rotated.radius - 3.0).abs() < 1e-5);
}

#[test]
fn test_contains_point() {
    let sphere = BoundingSphere::new(Vec3::ZERO, 1.0);
    assert!(sphere.contains_point(Vec3::new(0.0, 1.0, 0.0)));
    assert!(!sphere.contains_point(Vec3::new(0.8, 0.8, 0.0)));
}
