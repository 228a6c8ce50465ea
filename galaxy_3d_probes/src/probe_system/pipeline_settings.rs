/// Pipeline-wide probe settings

use crate::engine_error;
use crate::error::{Error, Result};
use super::planar_bounds::DEFAULT_PLANAR_CAPACITY;

/// Pipeline-wide settings consumed by the probe system
///
/// Quality settings (texture sizes) are read when a render target is first
/// allocated; changing them does not resize existing targets.
#[derive(Debug, Clone, PartialEq)]
pub struct PipelineSettings {
    /// Width/height of planar reflection targets in pixels
    pub planar_reflection_texture_size: u32,
    /// Face width/height of reflection probe cubemaps in pixels
    pub reflection_cubemap_size: u32,
    /// Negate the projection Y axis (backends with inverted texture origin)
    pub force_flip_y: bool,
    /// Vertical field of view of planar captures, in degrees
    pub reference_field_of_view: f32,
    /// Initial capacity of the planar bounds index
    pub planar_bounds_initial_capacity: usize,
}

impl Default for PipelineSettings {
    fn default() -> Self {
        Self {
            planar_reflection_texture_size: 512,
            reflection_cubemap_size: 256,
            force_flip_y: false,
            reference_field_of_view: 90.0,
            planar_bounds_initial_capacity: DEFAULT_PLANAR_CAPACITY,
        }
    }
}

impl PipelineSettings {
    /// Check the settings before a ProbeSystem is built from them
    ///
    /// # Errors
    ///
    /// Returns `Error::InitializationFailed` if a texture size is zero or not
    /// a power of two, the field of view is outside (0, 180) degrees, or the
    /// initial planar capacity is zero.
    pub fn validate(&self) -> Result<()> {
        if !self.planar_reflection_texture_size.is_power_of_two() {
            return Err(invalid_settings(format!(
                "planar_reflection_texture_size must be a non-zero power of two (got {})",
                self.planar_reflection_texture_size)));
        }
        if !self.reflection_cubemap_size.is_power_of_two() {
            return Err(invalid_settings(format!(
                "reflection_cubemap_size must be a non-zero power of two (got {})",
                self.reflection_cubemap_size)));
        }
        if !(self.reference_field_of_view > 0.0 && self.reference_field_of_view < 180.0) {
            return Err(invalid_settings(format!(
                "reference_field_of_view must be in (0, 180) degrees (got {})",
                self.reference_field_of_view)));
        }
        if self.planar_bounds_initial_capacity == 0 {
            return Err(invalid_settings(
                "planar_bounds_initial_capacity must be > 0".to_string()));
        }
        Ok(())
    }
}

fn invalid_settings(message: String) -> Error {
    engine_error!("galaxy3d::PipelineSettings", "{}", message);
    Error::InitializationFailed(message)
}

#[cfg(test)]
#[path = "pipeline_settings_tests.rs"]
mod tests;
