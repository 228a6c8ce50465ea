//! Probe capture settings: mode, type and per-probe capture parameters.

/// When a probe's environment image is produced
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ProbeMode {
    /// Captured once, ahead of time
    Baked,
    /// Recaptured every frame or on demand
    Realtime,
    /// User-supplied target, no automatic allocation
    Custom,
}

impl ProbeMode {
    pub const ALL: [ProbeMode; 3] = [ProbeMode::Baked, ProbeMode::Realtime, ProbeMode::Custom];
}

/// Discriminant of `ProbeKind`, used for logging and partition lookup
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ProbeType {
    /// Cubemap capture, view-independent
    ReflectionProbe,
    /// Mirror capture, view-dependent
    PlanarProbe,
}

/// Capture parameters shared by all probe types
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ProbeSettings {
    /// Update policy
    pub mode: ProbeMode,
    /// Radius of the influence volume around the probe position
    pub influence_radius: f32,
    /// Capture camera near clip plane
    pub near_clip_plane: f32,
    /// Capture camera far clip plane
    pub far_clip_plane: f32,
}

impl Default for ProbeSettings {
    fn default() -> Self {
        Self {
            mode: ProbeMode::Baked,
            influence_radius: 10.0,
            near_clip_plane: 0.3,
            far_clip_plane: 1000.0,
        }
    }
}

impl ProbeSettings {
    /// Default settings with the given mode
    pub fn with_mode(mode: ProbeMode) -> Self {
        Self { mode, ..Self::default() }
    }
}

/// One optional value per probe mode (baked / custom / realtime slots).
#[derive(Debug, Clone)]
pub struct PerMode<T> {
    baked: Option<T>,
    custom: Option<T>,
    realtime: Option<T>,
}

impl<T> Default for PerMode<T> {
    fn default() -> Self {
        Self { baked: None, custom: None, realtime: None }
    }
}

impl<T> PerMode<T> {
    pub fn get(&self, mode: ProbeMode) -> Option<&T> {
        match mode {
            ProbeMode::Baked => self.baked.as_ref(),
            ProbeMode::Custom => self.custom.as_ref(),
            ProbeMode::Realtime => self.realtime.as_ref(),
        }
    }

    pub fn set(&mut self, mode: ProbeMode, value: Option<T>) {
        match mode {
            ProbeMode::Baked => self.baked = value,
            ProbeMode::Custom => self.custom = value,
            ProbeMode::Realtime => self.realtime = value,
        }
    }
}
