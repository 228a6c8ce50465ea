//! Integration tests for ProbeSystem
//!
//! Drive a full frame loop through the public API: create and register
//! probes, capture realtime probes, cull planar probes and tear down.
//! No GPU required (in-memory capture device).
//!
//! Run with: cargo test --test probe_system_integration_tests


use galaxy_3d_probes::galaxy3d::camera::Camera;
use galaxy_3d_probes::galaxy3d::device::{RenderTargetUsage, TextureDimension};
use galaxy_3d_probes::galaxy3d::probe::{Probe, ProbeKey, ProbeMode, ProbeSettings};
use galaxy_3d_probes::galaxy3d::probe_system::{ProbeCullResults, ViewerTransform};
use galaxy_3d_probes::galaxy3d::{Error, PipelineSettings, ProbeSystem};
use galaxy_3d_probes::glam::{Mat4, Quat, Vec3};
use test_device_utils::RecordingDevice;

fn main_camera() -> Camera {
    Camera::from_matrices(
        Mat4::look_at_rh(Vec3::new(0.0, 2.0, 10.0), Vec3::new(0.0, 2.0, 0.0), Vec3::Y),
        Mat4::perspective_rh(60f32.to_radians(), 16.0 / 9.0, 0.1, 200.0),
    )
}

fn viewer() -> ViewerTransform {
    ViewerTransform::looking_at(Vec3::new(0.0, 2.0, 10.0), Vec3::new(0.0, 2.0, 0.0), Vec3::Y)
}

fn create_and_register(system: &mut ProbeSystem, probe: Probe) -> ProbeKey {
    let key = system.create_probe(probe);
    system.register_probe(key).unwrap();
    key
}

// ============================================================================
// Frame loop
// ============================================================================

#[test]
fn test_integration_frame_loop() {
    let (device, state) = RecordingDevice::shared();
    let settings = PipelineSettings {
        planar_reflection_texture_size: 256,
        reflection_cubemap_size: 128,
        ..Default::default()
    };
    let mut system = ProbeSystem::new(settings, device).unwrap();

    let floor = create_and_register(&mut system,
        Probe::planar("floor", ProbeSettings::with_mode(ProbeMode::Realtime)));
    let room = create_and_register(&mut system,
        Probe::reflection("room", ProbeSettings::with_mode(ProbeMode::Realtime))
            .with_transform(Vec3::new(0.0, 2.0, 0.0), Quat::IDENTITY));
    let sky = create_and_register(&mut system,
        Probe::reflection("sky", ProbeSettings::with_mode(ProbeMode::Baked)));

    // Bake once
    let baked: Vec<ProbeKey> = system.baked_probes().to_vec();
    assert_eq!(baked, vec![sky]);
    system.render_and_update_render_data_batch(&baked, &viewer(), ProbeMode::Baked).unwrap();

    // Three frames
    for _ in 0..3 {
        assert_eq!(system.render_realtime_probes(&viewer()).unwrap(), 2);
        let mut visible = ProbeCullResults::new();
        system.prepare_cull(&main_camera(), &mut visible);
        assert_eq!(visible.visible_probes(), &[floor]);
    }

    let state = state.lock().unwrap();
    // One target per (probe, mode), reused every frame
    assert_eq!(state.created.len(), 3);
    assert_eq!(state.captures.len(), 1 + 3 * 2);

    let sky_desc = state.created.iter().find(|d| d.name.starts_with("sky")).unwrap();
    assert_eq!(sky_desc.size, 128);
    assert!(sky_desc.usage.contains(RenderTargetUsage::GENERATE_MIPS));
    let floor_desc = state.created.iter().find(|d| d.name.starts_with("floor")).unwrap();
    assert_eq!(floor_desc.size, 256);
    assert_eq!(floor_desc.dimension, TextureDimension::Tex2D);

    assert_eq!(
        state.captured_targets()[1..3],
        ["room_realtime_cube".to_string(), "floor_realtime_planar".to_string()]
    );

    drop(state);
    assert!(system.probe(floor).unwrap().render_data(ProbeMode::Realtime).is_some());
    assert!(system.probe(room).unwrap().render_data(ProbeMode::Realtime).is_none());
}

#[test]
fn test_integration_planar_capture_mirrors_viewer() {
    let (device, state) = RecordingDevice::shared();
    let mut system = ProbeSystem::new(PipelineSettings::default(), device).unwrap();
    let floor = create_and_register(&mut system,
        Probe::planar("floor", ProbeSettings::with_mode(ProbeMode::Realtime)));

    let data = system.render_and_update_render_data(floor, &viewer(), ProbeMode::Realtime)
        .unwrap()
        .unwrap();

    assert!(data.capture_position().abs_diff_eq(Vec3::new(0.0, -2.0, 10.0), 1e-4));
    let state = state.lock().unwrap();
    assert!(state.captures[0].0.invert_face_culling);
    assert_eq!(state.captures[0].0.dimension, TextureDimension::Tex2D);
}

// ============================================================================
// Registration lifecycle
// ============================================================================

#[test]
fn test_integration_enable_disable_cycle() {
    let (device, _) = RecordingDevice::shared();
    let mut system = ProbeSystem::new(PipelineSettings::default(), device).unwrap();

    let probes: Vec<ProbeKey> = (0..40)
        .map(|i| system.create_probe(
            Probe::planar(&format!("mirror_{}", i), ProbeSettings::with_mode(ProbeMode::Realtime))
                .with_transform(Vec3::new(i as f32, 0.0, 0.0), Quat::IDENTITY)))
        .collect();
    for &key in &probes {
        system.register_probe(key).unwrap();
    }

    assert_eq!(system.planar_bounds().len(), 40);
    assert_eq!(system.planar_bounds().capacity(), 64);

    // Disable every other probe
    for &key in probes.iter().step_by(2) {
        system.unregister_probe(key);
    }
    let expected: Vec<ProbeKey> = probes.iter().copied().skip(1).step_by(2).collect();
    assert_eq!(system.realtime_view_dependent_probes(), &expected[..]);
    assert_eq!(system.planar_bounds().len(), 20);
    assert_eq!(system.planar_bounds().capacity(), 64);
    for &key in &expected {
        let slot = system.planar_bounds().slot_of(key).unwrap();
        let center = system.planar_bounds().bounds()[slot].center;
        assert_eq!(center, system.probe(key).unwrap().position());
    }
}

#[test]
fn test_integration_destroyed_probes_leave_every_list() {
    let (device, _) = RecordingDevice::shared();
    let mut system = ProbeSystem::new(PipelineSettings::default(), device).unwrap();
    let a = create_and_register(&mut system, Probe::reflection("a", ProbeSettings::with_mode(ProbeMode::Baked)));
    let b = create_and_register(&mut system, Probe::reflection("b", ProbeSettings::with_mode(ProbeMode::Realtime)));
    let c = create_and_register(&mut system, Probe::planar("c", ProbeSettings::with_mode(ProbeMode::Realtime)));

    for key in [a, b, c] {
        system.destroy_probe(key);
    }

    assert!(system.baked_probes().is_empty());
    assert!(system.realtime_view_independent_probes().is_empty());
    assert!(system.realtime_view_dependent_probes().is_empty());
    assert!(system.planar_bounds().is_empty());
    assert!(matches!(system.register_probe(a), Err(Error::InvalidResource(_))));
}

#[test]
fn test_integration_teardown_allows_reuse() {
    let (device, _) = RecordingDevice::shared();
    let mut system = ProbeSystem::new(PipelineSettings::default(), device).unwrap();
    create_and_register(&mut system, Probe::planar("old", ProbeSettings::with_mode(ProbeMode::Realtime)));

    system.teardown();
    let key = create_and_register(&mut system, Probe::planar("new", ProbeSettings::with_mode(ProbeMode::Realtime)));

    assert_eq!(system.probe_count(), 1);
    assert_eq!(system.realtime_view_dependent_probes(), &[key]);
    assert_eq!(system.planar_bounds().probes(), &[key]);
}
