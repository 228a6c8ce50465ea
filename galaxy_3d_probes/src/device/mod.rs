/// Device module - capture backend traits consumed by the probe system

// Module declarations
pub mod render_target;
pub mod capture_device;

// Re-export from submodules
pub use render_target::*;
pub use capture_device::*;

// Mock capture device for tests (no GPU required)
#[cfg(test)]
pub mod mock_capture_device;
