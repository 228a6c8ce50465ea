//! Probe data model
//!
//! Probes, their capture settings, per-mode render state and the
//! bounding volume used for culling.

mod bounding_sphere;
mod settings;
mod render_data;
mod probe;

pub use bounding_sphere::BoundingSphere;
pub use settings::{ProbeMode, ProbeType, ProbeSettings, PerMode};
pub use render_data::{RenderData, GpuRenderData};
pub use probe::{Probe, ProbeKey, ProbeKind, ReflectionProbe, PlanarProbe};
