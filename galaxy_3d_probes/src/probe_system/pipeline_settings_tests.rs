use crate::error::Error;
use super::*;

fn assert_rejected(settings: PipelineSettings) {
    assert!(matches!(settings.validate(), Err(Error::InitializationFailed(_))), "{settings:?}");
}

#[test]
fn test_defaults() {
    let settings = PipelineSettings::default();
    assert_eq!(settings.planar_reflection_texture_size, 512);
    assert_eq!(settings.reflection_cubemap_size, 256);
    assert!(!settings.force_flip_y);
    assert_eq!(settings.reference_field_of_view, 90.0);
    assert_eq!(settings.planar_bounds_initial_capacity, 32);
    assert!(settings.validate().is_ok());
}

#[test]
fn test_texture_sizes_must_be_powers_of_two() {
    assert_rejected(PipelineSettings { planar_reflection_texture_size: 0, ..Default::default() });
    assert_rejected(PipelineSettings { planar_reflection_texture_size: 500, ..Default::default() });
    assert_rejected(PipelineSettings { reflection_cubemap_size: 0, ..Default::default() });
    assert_rejected(PipelineSettings { reflection_cubemap_size: 96, ..Default::default() });
    assert!(PipelineSettings { reflection_cubemap_size: 1, ..Default::default() }.validate().is_ok());
}

#[test]
fn test_field_of_view_range() {
    assert_rejected(PipelineSettings { reference_field_of_view: 0.0, ..Default::default() });
    assert_rejected(PipelineSettings { reference_field_of_view: 180.0, ..Default::default() });
    assert_rejected(PipelineSettings { reference_field_of_view: f32::NAN, ..Default::default() });
    assert!(PipelineSettings { reference_field_of_view: 179.0, ..Default::default() }.validate().is_ok());
}

#[test]
fn test_zero_planar_capacity_rejected() {
    assert_rejected(PipelineSettings { planar_bounds_initial_capacity: 0, ..Default::default() });
}
