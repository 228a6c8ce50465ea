/// ProbeSystem - the pipeline-scoped owner of every probe.
///
/// Holds the probe storage (SlotMap, stable keys), the registry of enabled
/// probes, the render target allocator, the planar culler and the pipeline
/// settings. The renderer creates one per pipeline instance and drops or
/// tears it down with the pipeline.

use std::sync::{Arc, Mutex};
use bytemuck::Zeroable;
use slotmap::SlotMap;
use crate::camera::Camera;
use crate::device::{CaptureDevice, RenderTarget, TextureDimension};
use crate::error::{Error, Result};
use crate::probe::{
    BoundingSphere, GpuRenderData, Probe, ProbeKey, ProbeMode, ProbeSettings, ProbeType, RenderData,
};
use crate::{engine_debug, engine_err, engine_error, engine_info, engine_trace, engine_warn};
use super::capture::{compute_capture_pass, CaptureSettings, ViewerTransform};
use super::culler::{CullingGroup, FrustumProbeCuller, ProbeCuller, ProbeCullResults};
use super::pipeline_settings::PipelineSettings;
use super::planar_bounds::PlanarBoundsIndex;
use super::registry::{ProbePartition, ProbeRegistry};
use super::target_allocator::RenderTargetAllocator;

pub struct ProbeSystem {
    /// Pipeline-wide settings (validated at construction)
    settings: PipelineSettings,
    /// Capture backend, shared with the renderer
    device: Arc<Mutex<dyn CaptureDevice>>,
    /// Every probe of the pipeline, registered or not
    probes: SlotMap<ProbeKey, Probe>,
    /// Enabled probes partitioned by update policy
    registry: ProbeRegistry,
    /// Lazily creates capture targets
    allocator: RenderTargetAllocator,
    /// Planar visibility strategy
    culler: Box<dyn ProbeCuller>,
    /// Reused slot buffer for prepare_cull
    visible_slots: Vec<usize>,
}

impl ProbeSystem {
    /// Create an empty probe system
    ///
    /// # Arguments
    ///
    /// * `settings` - Pipeline-wide settings
    /// * `device` - Backend used to allocate targets and render captures
    ///
    /// # Errors
    ///
    /// Returns `Error::InitializationFailed` if `settings` are invalid.
    pub fn new(settings: PipelineSettings, device: Arc<Mutex<dyn CaptureDevice>>) -> Result<Self> {
        settings.validate()?;

        engine_info!("galaxy3d::ProbeSystem",
            "Probe system created (planar {}px, cubemap {}px, flip_y={})",
            settings.planar_reflection_texture_size,
            settings.reflection_cubemap_size,
            settings.force_flip_y);

        Ok(Self {
            registry: ProbeRegistry::new(settings.planar_bounds_initial_capacity),
            settings,
            device,
            probes: SlotMap::with_key(),
            allocator: RenderTargetAllocator::new(),
            culler: Box::new(FrustumProbeCuller::new()),
            visible_slots: Vec::new(),
        })
    }

    // ===== ACCESSORS =====

    pub fn settings(&self) -> &PipelineSettings {
        &self.settings
    }

    pub fn device(&self) -> &Arc<Mutex<dyn CaptureDevice>> {
        &self.device
    }

    pub fn allocator(&self) -> &RenderTargetAllocator {
        &self.allocator
    }

    /// Planar bounds index (read-only)
    pub fn planar_bounds(&self) -> &PlanarBoundsIndex {
        self.registry.planar_bounds()
    }

    /// Replace the planar culling strategy
    pub fn set_culler(&mut self, culler: Box<dyn ProbeCuller>) {
        self.culler = culler;
    }

    // ===== PROBE STORAGE =====

    /// Take ownership of `probe`. The probe is not registered.
    pub fn create_probe(&mut self, probe: Probe) -> ProbeKey {
        engine_trace!("galaxy3d::ProbeSystem", "Created probe '{}'", probe.name());
        self.probes.insert(probe)
    }

    /// Unregister and remove a probe. Returns the probe, or `None` if the
    /// key is unknown.
    pub fn destroy_probe(&mut self, key: ProbeKey) -> Option<Probe> {
        self.registry.unregister(key);
        let probe = self.probes.remove(key)?;
        engine_debug!("galaxy3d::ProbeSystem", "Destroyed probe '{}'", probe.name());
        Some(probe)
    }

    pub fn probe(&self, key: ProbeKey) -> Option<&Probe> {
        self.probes.get(key)
    }

    /// Mutable access for placement changes.
    ///
    /// Call `refresh_planar_bounds` after moving registered planar probes.
    pub fn probe_mut(&mut self, key: ProbeKey) -> Option<&mut Probe> {
        self.probes.get_mut(key)
    }

    pub fn probe_count(&self) -> usize {
        self.probes.len()
    }

    pub fn probes(&self) -> impl Iterator<Item = (ProbeKey, &Probe)> + '_ {
        self.probes.iter()
    }

    /// Replace the settings of a probe.
    ///
    /// # Errors
    ///
    /// Returns `Error::InvalidResource` if the key is unknown, or if the
    /// probe is registered and `settings` change its mode (unregister first).
    pub fn set_probe_settings(&mut self, key: ProbeKey, settings: ProbeSettings) -> Result<()> {
        let probe = self.probes.get_mut(key).ok_or_else(|| unknown_probe(key))?;

        if self.registry.is_registered(key) && probe.mode() != settings.mode {
            return Err(invalid_resource(format!(
                "Probe '{}' is registered: cannot change mode {:?} -> {:?}",
                probe.name(), probe.mode(), settings.mode)));
        }

        probe.set_settings(settings);
        if self.registry.planar_bounds().contains(key) {
            let sphere = probe.bounding_sphere();
            self.registry.planar_bounds_mut().update_bounds(key, sphere);
        }
        Ok(())
    }

    /// Assign a user-supplied texture to a probe for `mode`, or clear it with `None`.
    ///
    /// This is the only way Custom probes get a target. For other modes the
    /// texture replaces (or pre-empts) the automatically allocated one.
    ///
    /// # Errors
    ///
    /// Returns `Error::InvalidResource` if the key is unknown or the texture
    /// shape does not match the probe type (2D for planar, cube otherwise).
    pub fn set_probe_texture(
        &mut self,
        key: ProbeKey,
        mode: ProbeMode,
        target: Option<Arc<dyn RenderTarget>>,
    ) -> Result<()> {
        let probe = self.probes.get_mut(key).ok_or_else(|| unknown_probe(key))?;

        if let Some(target) = &target {
            let expected = match probe.probe_type() {
                ProbeType::PlanarProbe => TextureDimension::Tex2D,
                ProbeType::ReflectionProbe => TextureDimension::Cube,
            };
            if target.dimension() != expected {
                return Err(invalid_resource(format!(
                    "Probe '{}' needs a {:?} texture, got {:?} ('{}')",
                    probe.name(), expected, target.dimension(), target.desc().name)));
            }
        }

        probe.set_texture(mode, target);
        Ok(())
    }

    // ===== REGISTRATION =====

    /// Register (enable) a probe.
    ///
    /// Returns the partition it was placed in, or `None` if it was already
    /// registered.
    ///
    /// # Errors
    ///
    /// Returns `Error::InvalidResource` if the key is unknown.
    pub fn register_probe(&mut self, key: ProbeKey) -> Result<Option<ProbePartition>> {
        let probe = self.probes.get(key).ok_or_else(|| unknown_probe(key))?;
        Ok(self.registry.register(key, probe))
    }

    /// Unregister (disable) a probe. No-op for unknown or unregistered keys.
    pub fn unregister_probe(&mut self, key: ProbeKey) -> bool {
        self.registry.unregister(key)
    }

    pub fn is_registered(&self, key: ProbeKey) -> bool {
        self.registry.is_registered(key)
    }

    pub fn registered_count(&self) -> usize {
        self.registry.registered_count()
    }

    /// Baked probes, in registration order
    pub fn baked_probes(&mut self) -> &[ProbeKey] {
        self.registry.baked_probes(&self.probes)
    }

    /// Realtime reflection (cubemap) probes, in registration order
    pub fn realtime_view_independent_probes(&mut self) -> &[ProbeKey] {
        self.registry.realtime_view_independent_probes(&self.probes)
    }

    /// Realtime planar probes, in registration order
    pub fn realtime_view_dependent_probes(&mut self) -> &[ProbeKey] {
        self.registry.realtime_view_dependent_probes(&self.probes)
    }

    /// Re-read the bounding sphere of every indexed planar probe.
    ///
    /// Entries of probes destroyed behind the system's back are unregistered.
    pub fn refresh_planar_bounds(&mut self) {
        self.registry.prune_destroyed(&self.probes);

        let refreshed: Vec<(ProbeKey, BoundingSphere)> = self.registry.planar_bounds()
            .probes()
            .iter()
            .filter_map(|&key| self.probes.get(key).map(|probe| (key, probe.bounding_sphere())))
            .collect();

        let bounds = self.registry.planar_bounds_mut();
        for (key, sphere) in refreshed {
            bounds.update_bounds(key, sphere);
        }
    }

    // ===== CAPTURE =====

    /// Capture one probe for `mode` and store the resulting render data.
    ///
    /// The target is resolved (or created) through the allocator. Returns
    /// `Ok(None)` when the probe has no target and none can be allocated
    /// (Custom mode without a user texture). The computed render data is
    /// returned in every other case, but only planar probes persist it.
    ///
    /// # Errors
    ///
    /// Returns `Error::InvalidResource` for an unknown key, and propagates
    /// backend errors from allocation or rendering.
    pub fn render_and_update_render_data(
        &mut self,
        key: ProbeKey,
        viewer: &ViewerTransform,
        mode: ProbeMode,
    ) -> Result<Option<RenderData>> {
        let probe = self.probes.get_mut(key).ok_or_else(|| unknown_probe(key))?;

        let Some(target) = self.allocator.get_or_create(probe, mode, &self.settings, &self.device)? else {
            engine_trace!("galaxy3d::ProbeSystem",
                "Skipping capture of '{}' ({:?}): no render target", probe.name(), mode);
            return Ok(None);
        };

        let (pass, data) = compute_capture_pass(probe, viewer, &CaptureSettings::from(&self.settings));

        {
            let mut device = self.device.lock()
                .map_err(|_| engine_err!("galaxy3d::ProbeSystem", "CaptureDevice lock poisoned"))?;
            device.render_capture(&pass, target.as_ref())?;
        }

        if probe.assign_render_data(mode, data) {
            engine_trace!("galaxy3d::ProbeSystem",
                "Captured '{}' ({:?}) into '{}'", probe.name(), mode, target.desc().name);
        } else {
            engine_debug!("galaxy3d::ProbeSystem",
                "Captured '{}' ({:?}); render data not stored for {:?}",
                probe.name(), mode, probe.probe_type());
        }

        Ok(Some(data))
    }

    /// Capture several probes in order.
    ///
    /// Returns one entry per key (`None` where the capture was skipped).
    /// Stops at the first error.
    pub fn render_and_update_render_data_batch(
        &mut self,
        keys: &[ProbeKey],
        viewer: &ViewerTransform,
        mode: ProbeMode,
    ) -> Result<Vec<Option<RenderData>>> {
        keys.iter()
            .map(|&key| self.render_and_update_render_data(key, viewer, mode))
            .collect()
    }

    /// Capture every registered realtime probe for this frame.
    ///
    /// Cubemap probes come first, then planar probes. Returns the number of
    /// captures performed.
    pub fn render_realtime_probes(&mut self, viewer: &ViewerTransform) -> Result<usize> {
        let mut keys = self.realtime_view_independent_probes().to_vec();
        keys.extend_from_slice(self.realtime_view_dependent_probes());

        let captured = self.render_and_update_render_data_batch(&keys, viewer, ProbeMode::Realtime)?
            .iter()
            .filter(|data| data.is_some())
            .count();

        engine_trace!("galaxy3d::ProbeSystem", "Rendered {} realtime probes", captured);
        Ok(captured)
    }

    // ===== CULLING =====

    /// Cull the indexed planar probes against `camera`.
    ///
    /// `results` is cleared first, then filled with the keys of the visible
    /// planar probes in bounds index slot order. Does not modify the index.
    pub fn prepare_cull(&mut self, camera: &Camera, results: &mut ProbeCullResults) {
        results.clear();
        self.visible_slots.clear();

        let bounds = self.registry.planar_bounds();
        let group = CullingGroup::new(camera.frustum(), bounds.bounds());
        self.culler.cull(&group, &mut self.visible_slots);

        for &slot in &self.visible_slots {
            match bounds.get(slot) {
                Some((key, _)) if self.probes.contains_key(key) => results.push(key),
                Some(_) => {}
                None => {
                    engine_warn!("galaxy3d::ProbeSystem",
                        "Culler reported slot {} outside the planar index ({} entries)",
                        slot, bounds.len());
                }
            }
        }
    }

    /// GPU render data of `keys` for `mode`, index-aligned with `keys`.
    ///
    /// Probes without render data for `mode` (or unknown keys) get a
    /// zeroed entry so the slice can be uploaded as-is.
    pub fn gpu_render_data(&self, keys: &[ProbeKey], mode: ProbeMode) -> Vec<GpuRenderData> {
        keys.iter()
            .map(|&key| {
                self.probes.get(key)
                    .and_then(|probe| probe.render_data(mode))
                    .map(RenderData::to_gpu)
                    .unwrap_or_else(GpuRenderData::zeroed)
            })
            .collect()
    }

    // ===== LIFECYCLE =====

    /// Drop every registration and every probe (pipeline teardown).
    ///
    /// Targets are released with their probes. Settings, culler and the
    /// allocator statistics are kept.
    pub fn teardown(&mut self) {
        let count = self.probes.len();
        self.registry.clear();
        self.probes.clear();
        self.visible_slots.clear();
        engine_info!("galaxy3d::ProbeSystem", "Probe system torn down ({} probes released)", count);
    }
}

fn unknown_probe(key: ProbeKey) -> Error {
    invalid_resource(format!("Probe {:?} not found", key))
}

fn invalid_resource(message: String) -> Error {
    engine_error!("galaxy3d::ProbeSystem", "{}", message);
    Error::InvalidResource(message)
}

#[cfg(test)]
#[path = "probe_system_tests.rs"]
mod tests;
