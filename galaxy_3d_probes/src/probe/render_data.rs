/// Render data - the transform snapshot produced by one probe capture.

use bytemuck::{Pod, Zeroable};
use glam::{Mat4, Vec3, Vec4};

/// Immutable snapshot of one capture.
///
/// Overwritten (never mutated) by each new capture of the same mode.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RenderData {
    projection_matrix: Mat4,
    world_to_camera_matrix: Mat4,
    capture_position: Vec3,
}

impl RenderData {
    pub fn new(projection_matrix: Mat4, world_to_camera_matrix: Mat4, capture_position: Vec3) -> Self {
        Self {
            projection_matrix,
            world_to_camera_matrix,
            capture_position,
        }
    }

    pub fn projection_matrix(&self) -> &Mat4 {
        &self.projection_matrix
    }

    pub fn world_to_camera_matrix(&self) -> &Mat4 {
        &self.world_to_camera_matrix
    }

    pub fn capture_position(&self) -> Vec3 {
        self.capture_position
    }

    /// projection * world_to_camera
    pub fn view_projection_matrix(&self) -> Mat4 {
        self.projection_matrix * self.world_to_camera_matrix
    }

    /// GPU layout for the planar probe storage buffer
    pub fn to_gpu(&self) -> GpuRenderData {
        GpuRenderData {
            view_projection: self.view_projection_matrix(),
            capture_position: self.capture_position.extend(1.0),
        }
    }
}

/// std430-compatible layout of one planar probe, uploaded by the renderer.
#[repr(C)]
#[derive(Debug, Clone, Copy, Pod, Zeroable)]
pub struct GpuRenderData {
    /// projection * world_to_camera (used to project into the planar texture)
    pub view_projection: Mat4,
    /// xyz = capture position, w = 1
    pub capture_position: Vec4,
}
