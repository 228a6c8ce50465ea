/// Render target allocator - lazily creates the capture target of a probe.
///
/// Targets are cached on the probe, keyed by mode. The allocator never
/// frees them: their lifetime follows the probe (last `Arc` dropped).

use std::sync::{Arc, Mutex};
use crate::device::{
    CaptureDevice, RenderTarget, RenderTargetDesc, RenderTargetUsage,
    TextureDimension, TextureFormat,
};
use crate::error::Result;
use crate::probe::{Probe, ProbeMode, ProbeType};
use crate::{engine_debug, engine_err, engine_trace};
use super::pipeline_settings::PipelineSettings;

/// HDR format used for every automatically allocated probe target
const PROBE_TARGET_FORMAT: TextureFormat = TextureFormat::R16G16B16A16_SFLOAT;

pub struct RenderTargetAllocator {
    created_count: usize,
}

impl RenderTargetAllocator {
    pub fn new() -> Self {
        Self { created_count: 0 }
    }

    /// Number of targets created since construction
    pub fn created_count(&self) -> usize {
        self.created_count
    }

    /// Descriptor of the target a probe needs for `mode`.
    ///
    /// Returns `None` for `ProbeMode::Custom`, whose targets are always
    /// user-supplied.
    pub fn describe(probe: &Probe, mode: ProbeMode, settings: &PipelineSettings) -> Option<RenderTargetDesc> {
        let (dimension, size, shape) = match probe.probe_type() {
            ProbeType::PlanarProbe => (TextureDimension::Tex2D, settings.planar_reflection_texture_size, "planar"),
            ProbeType::ReflectionProbe => (TextureDimension::Cube, settings.reflection_cubemap_size, "cube"),
        };

        let (mip_levels, usage, tag) = match mode {
            ProbeMode::Realtime => (
                1,
                RenderTargetUsage::RENDER_TARGET | RenderTargetUsage::SAMPLED,
                "realtime",
            ),
            ProbeMode::Baked => (
                RenderTargetDesc::full_mip_chain(size),
                RenderTargetUsage::RENDER_TARGET
                    | RenderTargetUsage::SAMPLED
                    | RenderTargetUsage::GENERATE_MIPS,
                "baked",
            ),
            ProbeMode::Custom => return None,
        };

        Some(RenderTargetDesc {
            name: format!("{}_{}_{}", probe.name(), tag, shape),
            dimension,
            size,
            format: PROBE_TARGET_FORMAT,
            mip_levels,
            usage,
        })
    }

    /// Return the probe's target for `mode`, creating and caching it if needed.
    ///
    /// Custom mode never allocates: the user-assigned texture is returned,
    /// or `None` when there is none.
    ///
    /// # Errors
    ///
    /// Returns `Error::BackendError` if the device lock is poisoned, or the
    /// device error if creation fails.
    pub fn get_or_create(
        &mut self,
        probe: &mut Probe,
        mode: ProbeMode,
        settings: &PipelineSettings,
        device: &Mutex<dyn CaptureDevice>,
    ) -> Result<Option<Arc<dyn RenderTarget>>> {
        if let Some(target) = probe.texture(mode) {
            return Ok(Some(Arc::clone(target)));
        }

        let Some(desc) = Self::describe(probe, mode, settings) else {
            engine_trace!("galaxy3d::RenderTargetAllocator",
                "No target for custom probe '{}'", probe.name());
            return Ok(None);
        };

        let target = {
            let mut device = device.lock()
                .map_err(|_| engine_err!("galaxy3d::RenderTargetAllocator", "CaptureDevice lock poisoned"))?;
            device.create_render_target(&desc)?
        };

        self.created_count += 1;
        engine_debug!("galaxy3d::RenderTargetAllocator",
            "Created render target '{}' ({:?} {}x{}, {} mips)",
            desc.name, desc.dimension, desc.size, desc.size, desc.mip_levels);

        probe.set_texture(mode, Some(Arc::clone(&target)));
        Ok(Some(target))
    }
}

impl Default for RenderTargetAllocator {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
#[path = "target_allocator_tests.rs"]
mod tests;
