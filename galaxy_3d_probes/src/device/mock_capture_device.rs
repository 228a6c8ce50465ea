/// Mock CaptureDevice for unit tests (no GPU required)
///
/// Records every created render target and every capture pass so tests
/// can assert on what the probe system asked the backend to do.

use std::sync::{Arc, Mutex};
use crate::device::{CaptureDevice, CapturePass, RenderTarget, RenderTargetDesc};
use crate::error::{Error, Result};
use crate::engine_bail;

// ============================================================================
// Mock RenderTarget
// ============================================================================

#[derive(Debug)]
pub struct MockRenderTarget {
    pub desc: RenderTargetDesc,
}

impl MockRenderTarget {
    pub fn new(desc: RenderTargetDesc) -> Self {
        Self { desc }
    }
}

impl RenderTarget for MockRenderTarget {
    fn desc(&self) -> &RenderTargetDesc {
        &self.desc
    }
}

// ============================================================================
// Mock CaptureDevice
// ============================================================================

/// Mock capture device
///
/// The recorded lists are shared through `Arc<Mutex<..>>` so a test can
/// keep a handle after the device itself has been moved into the
/// probe system.
pub struct MockCaptureDevice {
    pub created_targets: Arc<Mutex<Vec<RenderTargetDesc>>>,
    pub captures: Arc<Mutex<Vec<(CapturePass, String)>>>,
    pub fail_captures: bool,
    pub fail_allocations: bool,
}

impl MockCaptureDevice {
    pub fn new() -> Self {
        Self {
            created_targets: Arc::new(Mutex::new(Vec::new())),
            captures: Arc::new(Mutex::new(Vec::new())),
            fail_captures: false,
            fail_allocations: false,
        }
    }
}

impl CaptureDevice for MockCaptureDevice {
    fn create_render_target(&mut self, desc: &RenderTargetDesc) -> Result<Arc<dyn RenderTarget>> {
        if self.fail_allocations {
            return Err(Error::OutOfMemory);
        }
        self.created_targets.lock().unwrap().push(desc.clone());
        Ok(Arc::new(MockRenderTarget::new(desc.clone())))
    }

    fn render_capture(&mut self, pass: &CapturePass, target: &dyn RenderTarget) -> Result<()> {
        if self.fail_captures {
            engine_bail!("galaxy3d::mock", "render_capture: simulated backend failure");
        }
        if pass.dimension != target.dimension() {
            engine_bail!("galaxy3d::mock",
                "render_capture: pass dimension {:?} does not match target {:?}",
                pass.dimension, target.dimension());
        }
        self.captures.lock().unwrap().push((pass.clone(), target.desc().name.clone()));
        Ok(())
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
#[path = "mock_capture_device_tests.rs"]
mod tests;
