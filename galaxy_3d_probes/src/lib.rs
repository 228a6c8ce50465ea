/*!
# Galaxy 3D Probes

Reflection probe management for the Galaxy 3D rendering pipeline.

This crate tracks the reflection probes of a scene, decides when each probe
is (re)captured, allocates the render targets captures are written to, and
culls planar probes against the active camera. It does not render anything
itself: the graphics backend is reached through the `CaptureDevice` trait.

## Architecture

- **ProbeSystem**: Pipeline-scoped context owning probes, registry, allocator and culler
- **ProbeRegistry**: Registered probes partitioned by update policy (baked, realtime cubemap, realtime planar)
- **PlanarBoundsIndex**: Dense (probe, bounding sphere) arrays with swap-remove, culled every frame
- **RenderTargetAllocator**: Lazily creates one render target per probe and mode
- **ProbeCuller**: Planar probe visibility strategy (frustum or brute force)
- **CaptureDevice / RenderTarget**: Backend traits implemented by the renderer

Backend implementations provide concrete types that implement the device traits.
*/

// Internal modules
mod error;
pub mod log;
pub mod camera;
pub mod device;
pub mod probe;
pub mod probe_system;

// Main galaxy3d namespace module
pub mod galaxy3d {
    // Error types
    pub use crate::error::{Error, Result};

    // Pipeline context
    pub use crate::probe_system::{ProbeSystem, PipelineSettings};

    // Logging sub-module (types only, NOT macros)
    pub mod log {
        pub use crate::log::{Logger, LogEntry, LogSeverity, DefaultLogger, set_logger, reset_logger, log, log_detailed};
    }

    // Camera sub-module
    pub mod camera {
        pub use crate::camera::*;
    }

    // Capture backend sub-module
    pub mod device {
        pub use crate::device::*;
    }

    // Probe data model sub-module
    pub mod probe {
        pub use crate::probe::*;
    }

    // Registry, scheduling, allocation and culling
    pub mod probe_system {
        pub use crate::probe_system::*;
    }
}

// Re-export math library at crate root
pub use glam;
