use glam::{Mat4, Vec3};
use crate::probe::BoundingSphere;
use super::*;

fn perspective_frustum(fov: f32, far: f32) -> Frustum {
    let projection = Mat4::perspective_rh(fov, 1.0, 0.1, far);
    let view = Mat4::look_at_rh(
        Vec3::new(0.0, 0.0, 5.0),   // eye
        Vec3::ZERO,                  // target
        Vec3::Y,                     // up
    );
    Frustum::from_view_projection(&(projection * view))
}

// ============================================================================
// Frustum::from_view_projection
// ============================================================================

#[test]
fn test_frustum_from_identity_matrix() {
    let frustum = Frustum::from_view_projection(&Mat4::IDENTITY);

    for plane in &frustum.planes {
        let normal_len = Vec3::new(plane.x, plane.y, plane.z).length();
        assert!((normal_len - 1.0).abs() < 1e-5, "plane normal should be unit length");
    }
}

#[test]
fn test_frustum_from_perspective_projection_is_normalized() {
    let frustum = perspective_frustum(std::f32::consts::FRAC_PI_4, 100.0);

    for plane in &frustum.planes {
        let normal_len = Vec3::new(plane.x, plane.y, plane.z).length();
        assert!((normal_len - 1.0).abs() < 1e-4, "plane normal should be unit length");
    }
}

#[test]
fn test_near_plane_matches_near_distance() {
    let frustum = perspective_frustum(std::f32::consts::FRAC_PI_2, 100.0);

    // Camera at z=5 looking down -Z, near = 0.1 → near plane at z = 4.9
    let on_near = Vec3::new(0.0, 0.0, 4.9);
    assert!(frustum.signed_distance(PLANE_NEAR, on_near).abs() < 1e-3);
    assert!(frustum.signed_distance(PLANE_NEAR, Vec3::ZERO) > 0.0);
    assert!(frustum.signed_distance(PLANE_NEAR, Vec3::new(0.0, 0.0, 6.0)) < 0.0);
}

// ============================================================================
// Frustum::intersects_sphere
// ============================================================================

#[test]
fn test_sphere_inside_frustum() {
    let frustum = perspective_frustum(std::f32::consts::FRAC_PI_2, 100.0);
    let sphere = BoundingSphere::new(Vec3::ZERO, 1.0);
    assert!(frustum.intersects_sphere(&sphere));
}

#[test]
fn test_sphere_outside_frustum() {
    let frustum = perspective_frustum(std::f32::consts::FRAC_PI_4, 100.0);
    let sphere = BoundingSphere::new(Vec3::new(100.0, 100.0, 0.0), 1.0);
    assert!(!frustum.intersects_sphere(&sphere));
}

#[test]
fn test_sphere_behind_camera() {
    let frustum = perspective_frustum(std::f32::consts::FRAC_PI_2, 100.0);
    let sphere = BoundingSphere::new(Vec3::new(0.0, 0.0, 12.0), 1.0);
    assert!(!frustum.intersects_sphere(&sphere));
}

#[test]
fn test_sphere_beyond_far_plane() {
    let frustum = perspective_frustum(std::f32::consts::FRAC_PI_2, 10.0);
    let sphere = BoundingSphere::new(Vec3::new(0.0, 0.0, -20.0), 1.0);
    assert!(!frustum.intersects_sphere(&sphere));
}

#[test]
fn test_sphere_straddling_boundary() {
    let projection = Mat4::orthographic_rh(-5.0, 5.0, -5.0, 5.0, 0.1, 100.0);
    let frustum = Frustum::from_view_projection(&projection);

    // Center outside the right plane (x=5) but radius reaches inside
    let sphere = BoundingSphere::new(Vec3::new(5.5, 0.0, -10.0), 1.0);
    assert!(frustum.intersects_sphere(&sphere));

    let far_out = BoundingSphere::new(Vec3::new(7.0, 0.0, -10.0), 1.0);
    assert!(!frustum.intersects_sphere(&far_out));
}

#[test]
fn test_contains_point() {
    let frustum = perspective_frustum(std::f32::consts::FRAC_PI_2, 100.0);
    assert!(frustum.contains_point(Vec3::ZERO));
    assert!(!frustum.contains_point(Vec3::new(0.0, 0.0, 10.0)));
}

// ============================================================================
// Plane constants
// ============================================================================

#[test]
fn test_plane_constants() {
    assert_eq!(PLANE_LEFT, 0);
    assert_eq!(PLANE_RIGHT, 1);
    assert_eq!(PLANE_BOTTOM, 2);
    assert_eq!(PLANE_TOP, 3);
    assert_eq!(PLANE_NEAR, 4);
    assert_eq!(PLANE_FAR, 5);
}
