/// Planar probe culling strategies.
///
/// A ProbeCuller decides which planar probes are visible from a camera.
/// It works on a `CullingGroup`: the camera frustum plus the dense sphere
/// array of the planar bounds index. Cullers only report slot indices; the
/// probe system maps them back to probe keys.

use crate::camera::Frustum;
use crate::probe::{BoundingSphere, ProbeKey};

// ============================================================================
// CullingGroup
// ============================================================================

/// One culling query: a frustum and the spheres to test against it.
///
/// Borrowed for the duration of a single `prepare_cull` call.
#[derive(Debug, Clone, Copy)]
pub struct CullingGroup<'a> {
    frustum: &'a Frustum,
    bounding_spheres: &'a [BoundingSphere],
}

impl<'a> CullingGroup<'a> {
    pub fn new(frustum: &'a Frustum, bounding_spheres: &'a [BoundingSphere]) -> Self {
        Self { frustum, bounding_spheres }
    }

    pub fn frustum(&self) -> &'a Frustum {
        self.frustum
    }

    /// Spheres indexed by planar bounds slot
    pub fn bounding_spheres(&self) -> &'a [BoundingSphere] {
        self.bounding_spheres
    }

    pub fn len(&self) -> usize {
        self.bounding_spheres.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bounding_spheres.is_empty()
    }
}

// ============================================================================
// ProbeCullResults
// ============================================================================

/// Keys of the planar probes visible from the last culled camera
#[derive(Debug, Clone, Default)]
pub struct ProbeCullResults {
    visible: Vec<ProbeKey>,
}

impl ProbeCullResults {
    pub fn new() -> Self {
        Self::default()
    }

    /// Visible planar probes, in bounds index slot order
    pub fn visible_probes(&self) -> &[ProbeKey] {
        &self.visible
    }

    pub fn len(&self) -> usize {
        self.visible.len()
    }

    pub fn is_empty(&self) -> bool {
        self.visible.is_empty()
    }

    pub fn contains(&self, key: ProbeKey) -> bool {
        self.visible.contains(&key)
    }

    pub fn iter(&self) -> impl Iterator<Item = ProbeKey> + '_ {
        self.visible.iter().copied()
    }

    pub fn clear(&mut self) {
        self.visible.clear();
    }

    pub(crate) fn push(&mut self, key: ProbeKey) {
        self.visible.push(key);
    }
}

// ============================================================================
// Cullers
// ============================================================================

/// Strategy for determining visible planar probes.
///
/// `&mut self` allows stateful implementations (temporal coherence,
/// occlusion history) to keep state across frames.
pub trait ProbeCuller: Send + Sync {
    /// Push the slot index of every visible sphere of `group` into
    /// `visible`, in ascending order. `visible` is empty on entry.
    fn cull(&mut self, group: &CullingGroup<'_>, visible: &mut Vec<usize>);
}

/// Reports every sphere as visible.
///
/// Baseline for comparison, or for scenes with a handful of mirrors.
pub struct BruteForceProbeCuller;

impl BruteForceProbeCuller {
    pub fn new() -> Self {
        Self
    }
}

impl Default for BruteForceProbeCuller {
    fn default() -> Self {
        Self::new()
    }
}

impl ProbeCuller for BruteForceProbeCuller {
    fn cull(&mut self, group: &CullingGroup<'_>, visible: &mut Vec<usize>) {
        visible.extend(0..group.len());
    }
}

/// Sphere vs. six frustum planes (default strategy)
pub struct FrustumProbeCuller;

impl FrustumProbeCuller {
    pub fn new() -> Self {
        Self
    }
}

impl Default for FrustumProbeCuller {
    fn default() -> Self {
        Self::new()
    }
}

impl ProbeCuller for FrustumProbeCuller {
    fn cull(&mut self, group: &CullingGroup<'_>, visible: &mut Vec<usize>) {
        let frustum = group.frustum();
        visible.extend(
            group.bounding_spheres()
                .iter()
                .enumerate()
                .filter(|(_, sphere)| frustum.intersects_sphere(sphere))
                .map(|(slot, _)| slot),
        );
    }
}

#[cfg(test)]
#[path = "culler_tests.rs"]
mod tests;
