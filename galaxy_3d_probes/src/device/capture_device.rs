/// CaptureDevice trait - the graphics backend seen by the probe system

use glam::{Mat4, Quat, Vec3};
use std::sync::Arc;
use crate::error::Result;
use super::render_target::{RenderTarget, RenderTargetDesc, TextureDimension};

/// Everything the backend needs to render one probe capture.
///
/// For cubemap targets, `world_to_camera` and `projection` describe the
/// face looking down world -Z (identity orientation) at `position`; the
/// backend derives the five remaining faces by rotating around the capture
/// position.
#[derive(Debug, Clone, PartialEq)]
pub struct CapturePass {
    /// World-space capture position
    pub position: Vec3,
    /// World-space capture orientation
    pub rotation: Quat,
    /// World-to-camera (view) matrix
    pub world_to_camera: Mat4,
    /// Projection matrix (right-handed, [0, 1] depth, Y flipped if requested)
    pub projection: Mat4,
    /// Shape of the output (must match the target)
    pub dimension: TextureDimension,
    /// Mirrored captures swap triangle winding
    pub invert_face_culling: bool,
}

/// Capture backend trait
///
/// Implemented by the renderer backend (Vulkan, D3D12, etc.). The probe
/// system shares it as `Arc<Mutex<dyn CaptureDevice>>` and only holds the
/// lock for a single allocation or a single capture.
pub trait CaptureDevice: Send + Sync {
    /// Allocate a render target described by `desc`
    fn create_render_target(&mut self, desc: &RenderTargetDesc) -> Result<Arc<dyn RenderTarget>>;

    /// Render the scene for `pass` into `target`
    fn render_capture(&mut self, pass: &CapturePass, target: &dyn RenderTarget) -> Result<()>;
}
