/// Probe - a scene entity capturing an environment image for reflections.
///
/// A probe is stored in the `ProbeSystem` and addressed through a stable
/// `ProbeKey`. Type-specific data lives in the `ProbeKind` variant; only
/// planar probes carry per-mode render data slots.

use std::fmt;
use std::sync::Arc;
use glam::{Quat, Vec3, Vec4};
use slotmap::new_key_type;
use crate::device::RenderTarget;
use super::bounding_sphere::BoundingSphere;
use super::render_data::RenderData;
use super::settings::{PerMode, ProbeMode, ProbeSettings, ProbeType};

// ===== SLOT MAP KEY =====

new_key_type! {
    /// Stable key for a Probe within a ProbeSystem.
    ///
    /// Keys remain valid even after other probes are destroyed. A key
    /// whose probe was destroyed never resolves again (generational).
    pub struct ProbeKey;
}

// ===== PROBE KIND =====

/// Reflection (cubemap) probe payload
#[derive(Debug, Clone, Default)]
pub struct ReflectionProbe {
    /// Capture position relative to the probe, in probe space
    pub capture_offset: Vec3,
}

/// Planar (mirror) probe payload
///
/// The mirror plane passes through the probe position with normal
/// `rotation * +Y`.
#[derive(Debug, Clone, Default)]
pub struct PlanarProbe {
    render_data: PerMode<RenderData>,
}

impl PlanarProbe {
    /// Render data of the last capture for `mode`
    pub fn render_data(&self, mode: ProbeMode) -> Option<&RenderData> {
        self.render_data.get(mode)
    }
}

/// Type-specific probe payload
#[derive(Debug, Clone)]
pub enum ProbeKind {
    Reflection(ReflectionProbe),
    Planar(PlanarProbe),
}

impl ProbeKind {
    pub fn probe_type(&self) -> ProbeType {
        match self {
            ProbeKind::Reflection(_) => ProbeType::ReflectionProbe,
            ProbeKind::Planar(_) => ProbeType::PlanarProbe,
        }
    }
}

// ===== PROBE =====

pub struct Probe {
    name: String,
    position: Vec3,
    rotation: Quat,
    settings: ProbeSettings,
    kind: ProbeKind,
    textures: PerMode<Arc<dyn RenderTarget>>,
}

impl Probe {
    /// Create a probe of the given kind at the origin
    pub fn new(name: &str, settings: ProbeSettings, kind: ProbeKind) -> Self {
        Self {
            name: name.to_string(),
            position: Vec3::ZERO,
            rotation: Quat::IDENTITY,
            settings,
            kind,
            textures: PerMode::default(),
        }
    }

    /// Create a reflection (cubemap) probe
    pub fn reflection(name: &str, settings: ProbeSettings) -> Self {
        Self::new(name, settings, ProbeKind::Reflection(ReflectionProbe::default()))
    }

    /// Create a planar (mirror) probe
    pub fn planar(name: &str, settings: ProbeSettings) -> Self {
        Self::new(name, settings, ProbeKind::Planar(PlanarProbe::default()))
    }

    /// Builder-style placement
    pub fn with_transform(mut self, position: Vec3, rotation: Quat) -> Self {
        self.position = position;
        self.rotation = rotation;
        self
    }

    // ===== GETTERS =====

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn position(&self) -> Vec3 {
        self.position
    }

    pub fn rotation(&self) -> Quat {
        self.rotation
    }

    pub fn settings(&self) -> &ProbeSettings {
        &self.settings
    }

    pub fn mode(&self) -> ProbeMode {
        self.settings.mode
    }

    pub fn kind(&self) -> &ProbeKind {
        &self.kind
    }

    pub fn probe_type(&self) -> ProbeType {
        self.kind.probe_type()
    }

    /// World-space bounding sphere of the influence volume
    pub fn bounding_sphere(&self) -> BoundingSphere {
        BoundingSphere::new(self.position, self.settings.influence_radius.max(0.0))
    }

    /// World-space capture position of a reflection probe.
    ///
    /// Planar probes have no fixed capture position (it depends on the
    /// viewer), their probe position is returned instead.
    pub fn capture_position(&self) -> Vec3 {
        match &self.kind {
            ProbeKind::Reflection(reflection) => {
                self.position + self.rotation * reflection.capture_offset
            }
            ProbeKind::Planar(_) => self.position,
        }
    }

    /// World-space mirror plane (normal.xyz, d) of a planar probe.
    pub fn mirror_plane(&self) -> Option<Vec4> {
        match &self.kind {
            ProbeKind::Planar(_) => {
                let normal = (self.rotation * Vec3::Y).try_normalize().unwrap_or(Vec3::Y);
                Some(normal.extend(-normal.dot(self.position)))
            }
            ProbeKind::Reflection(_) => None,
        }
    }

    /// Render target cached for `mode`, if any
    pub fn texture(&self, mode: ProbeMode) -> Option<&Arc<dyn RenderTarget>> {
        self.textures.get(mode)
    }

    /// Render data of the last capture for `mode` (planar probes only)
    pub fn render_data(&self, mode: ProbeMode) -> Option<&RenderData> {
        match &self.kind {
            ProbeKind::Planar(planar) => planar.render_data(mode),
            ProbeKind::Reflection(_) => None,
        }
    }

    // ===== SETTERS =====

    pub fn set_position(&mut self, position: Vec3) {
        self.position = position;
    }

    pub fn set_rotation(&mut self, rotation: Quat) {
        self.rotation = rotation;
    }

    /// Set the capture offset of a reflection probe. No-op on planar probes.
    pub fn set_capture_offset(&mut self, offset: Vec3) {
        if let ProbeKind::Reflection(reflection) = &mut self.kind {
            reflection.capture_offset = offset;
        }
    }

    /// Replace the settings. Mode changes of registered probes are guarded
    /// by `ProbeSystem::set_probe_settings`.
    pub(crate) fn set_settings(&mut self, settings: ProbeSettings) {
        self.settings = settings;
    }

    pub(crate) fn set_texture(&mut self, mode: ProbeMode, target: Option<Arc<dyn RenderTarget>>) {
        self.textures.set(mode, target);
    }

    /// Store `data` in the slot for `mode`.
    ///
    /// Only planar probes persist render data. Returns `true` if the data
    /// was stored.
    pub(crate) fn assign_render_data(&mut self, mode: ProbeMode, data: RenderData) -> bool {
        match &mut self.kind {
            ProbeKind::Planar(planar) => {
                planar.render_data.set(mode, Some(data));
                true
            }
            ProbeKind::Reflection(_) => false,
        }
    }
}

impl fmt::Debug for Probe {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let texture_names: Vec<(ProbeMode, &str)> = ProbeMode::ALL
            .iter()
            .filter_map(|&mode| self.texture(mode).map(|t| (mode, t.desc().name.as_str())))
            .collect();

        f.debug_struct("Probe")
            .field("name", &self.name)
            .field("position", &self.position)
            .field("rotation", &self.rotation)
            .field("settings", &self.settings)
            .field("kind", &self.kind)
            .field("textures", &texture_names)
            .finish()
    }
}

#[cfg(test)]
#[path = "probe_tests.rs"]
mod tests;
