use glam::{Mat4, Vec3};
use slotmap::SlotMap;
use crate::camera::Frustum;
use crate::probe::{BoundingSphere, ProbeKey};
use super::*;

/// Camera at the origin looking down -Z, 90° fov, near 0.1, far 100
fn frustum() -> Frustum {
    let view = Mat4::look_at_rh(Vec3::ZERO, Vec3::NEG_Z, Vec3::Y);
    let projection = Mat4::perspective_rh(90f32.to_radians(), 1.0, 0.1, 100.0);
    Frustum::from_view_projection(&(projection * view))
}

fn spheres() -> Vec<BoundingSphere> {
    vec![
        // In front
        BoundingSphere::new(Vec3::new(0.0, 0.0, -10.0), 1.0),
        // Behind the camera
        BoundingSphere::new(Vec3::new(0.0, 0.0, 10.0), 1.0),
        // Beyond the far plane
        BoundingSphere::new(Vec3::new(0.0, 0.0, -200.0), 1.0),
        // Outside left, but large enough to straddle the plane
        BoundingSphere::new(Vec3::new(-12.0, 0.0, -10.0), 5.0),
        // Far outside right
        BoundingSphere::new(Vec3::new(50.0, 0.0, -10.0), 1.0),
    ]
}

// ============================================================================
// CullingGroup
// ============================================================================

#[test]
fn test_culling_group_exposes_inputs() {
    let frustum = frustum();
    let spheres = spheres();
    let group = CullingGroup::new(&frustum, &spheres);

    assert_eq!(group.len(), 5);
    assert!(!group.is_empty());
    assert_eq!(group.bounding_spheres()[3], spheres[3]);
}

// ============================================================================
// Cullers
// ============================================================================

#[test]
fn test_frustum_culler_keeps_intersecting_spheres() {
    let frustum = frustum();
    let spheres = spheres();
    let mut culler = FrustumProbeCuller::new();
    let mut visible = Vec::new();

    culler.cull(&CullingGroup::new(&frustum, &spheres), &mut visible);

    assert_eq!(visible, vec![0, 3]);
}

#[test]
fn test_brute_force_culler_reports_all() {
    let frustum = frustum();
    let spheres = spheres();
    let mut culler = BruteForceProbeCuller::new();
    let mut visible = Vec::new();

    culler.cull(&CullingGroup::new(&frustum, &spheres), &mut visible);

    assert_eq!(visible, vec![0, 1, 2, 3, 4]);
}

#[test]
fn test_cullers_handle_empty_group() {
    let frustum = frustum();
    let group = CullingGroup::new(&frustum, &[]);
    let mut visible = Vec::new();

    FrustumProbeCuller::new().cull(&group, &mut visible);
    BruteForceProbeCuller::new().cull(&group, &mut visible);

    assert!(group.is_empty());
    assert!(visible.is_empty());
}

#[test]
fn test_cullers_are_object_safe() {
    let cullers: Vec<Box<dyn ProbeCuller>> = vec![
        Box::new(FrustumProbeCuller::default()),
        Box::new(BruteForceProbeCuller::default()),
    ];
    let frustum = frustum();
    let spheres = spheres();
    for mut culler in cullers {
        let mut visible = Vec::new();
        culler.cull(&CullingGroup::new(&frustum, &spheres), &mut visible);
        assert!(visible.contains(&0));
    }
}

// ============================================================================
// ProbeCullResults
// ============================================================================

#[test]
fn test_cull_results_push_and_clear() {
    let mut keys: SlotMap<ProbeKey, ()> = SlotMap::with_key();
    let a = keys.insert(());
    let b = keys.insert(());
    let mut results = ProbeCullResults::new();

    results.push(a);
    results.push(b);
    assert_eq!(results.visible_probes(), &[a, b]);
    assert_eq!(results.iter().collect::<Vec<_>>(), vec![a, b]);
    assert!(results.contains(b));
    assert_eq!(results.len(), 2);

    results.clear();
    assert!(results.is_empty());
    assert!(!results.contains(a));
}
