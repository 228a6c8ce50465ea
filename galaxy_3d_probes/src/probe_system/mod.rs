//! Probe system - registry, capture scheduling, target allocation and culling
//!
//! `ProbeSystem` is the pipeline-scoped context object owning every piece of
//! probe state. The renderer creates one per pipeline instance.

mod pipeline_settings;
mod planar_bounds;
mod registry;
mod target_allocator;
mod capture;
mod culler;
mod probe_system;

pub use pipeline_settings::PipelineSettings;
pub use planar_bounds::{PlanarBoundsIndex, DEFAULT_PLANAR_CAPACITY};
pub use registry::{ProbeRegistry, ProbePartition};
pub use target_allocator::RenderTargetAllocator;
pub use capture::{ViewerTransform, CaptureSettings, compute_capture_pass, oblique_projection, reflection_matrix};
pub use culler::{ProbeCuller, FrustumProbeCuller, BruteForceProbeCuller, CullingGroup, ProbeCullResults};
pub use probe_system::ProbeSystem;
