/// Capture math - turns a probe (and, for planar probes, the viewer) into
/// the matrices of one capture pass.
///
/// All projections are right-handed with a `[0, 1]` depth range.

use glam::{Mat3, Mat4, Quat, Vec3, Vec4};
use crate::device::{CapturePass, TextureDimension};
use crate::probe::{Probe, ProbeKind, RenderData};
use crate::engine_trace;
use super::pipeline_settings::PipelineSettings;

/// Cubemap faces are square 90° frusta
const CUBE_FACE_FOV_DEGREES: f32 = 90.0;

/// Smallest near distance handed to a perspective projection
const MIN_NEAR_CLIP: f32 = 1.0e-4;

// ============================================================================
// Inputs
// ============================================================================

/// World-space transform of the camera a planar reflection is rendered for
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ViewerTransform {
    pub position: Vec3,
    pub rotation: Quat,
}

impl ViewerTransform {
    pub fn new(position: Vec3, rotation: Quat) -> Self {
        Self { position, rotation }
    }

    /// Viewer looking from `position` towards `target`
    pub fn looking_at(position: Vec3, target: Vec3, up: Vec3) -> Self {
        let view = Mat4::look_at_rh(position, target, up);
        let (_, rotation, _) = view.inverse().to_scale_rotation_translation();
        Self { position, rotation }
    }

    /// World-to-camera matrix (camera looks down -Z)
    pub fn view_matrix(&self) -> Mat4 {
        Mat4::from_rotation_translation(self.rotation, self.position).inverse()
    }
}

impl Default for ViewerTransform {
    fn default() -> Self {
        Self::new(Vec3::ZERO, Quat::IDENTITY)
    }
}

/// Pipeline settings that affect capture matrices
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CaptureSettings {
    pub force_flip_y: bool,
    /// Vertical field of view of planar captures, in degrees
    pub reference_field_of_view: f32,
}

impl From<&PipelineSettings> for CaptureSettings {
    fn from(settings: &PipelineSettings) -> Self {
        Self {
            force_flip_y: settings.force_flip_y,
            reference_field_of_view: settings.reference_field_of_view,
        }
    }
}

impl Default for CaptureSettings {
    fn default() -> Self {
        Self::from(&PipelineSettings::default())
    }
}

// ============================================================================
// Matrix helpers
// ============================================================================

/// Affine reflection across `plane` (normal.xyz, d), normal unit length
pub fn reflection_matrix(plane: Vec4) -> Mat4 {
    let n = plane.truncate();
    let d = plane.w;
    Mat4::from_cols(
        Vec4::new(1.0 - 2.0 * n.x * n.x, -2.0 * n.x * n.y, -2.0 * n.x * n.z, 0.0),
        Vec4::new(-2.0 * n.x * n.y, 1.0 - 2.0 * n.y * n.y, -2.0 * n.y * n.z, 0.0),
        Vec4::new(-2.0 * n.x * n.z, -2.0 * n.y * n.z, 1.0 - 2.0 * n.z * n.z, 0.0),
        Vec4::new(-2.0 * d * n.x, -2.0 * d * n.y, -2.0 * d * n.z, 1.0),
    )
}

/// Replace the near plane of `projection` with `clip_plane` (camera space).
///
/// Points with `dot(clip_plane, p) >= 0` stay visible and points on the
/// plane land at depth 0. The far plane is tilted to pass through the
/// frustum corner opposite the clip plane. `clip_plane` must have the
/// camera on its negative side.
pub fn oblique_projection(projection: Mat4, clip_plane: Vec4) -> Mat4 {
    let corner = projection.inverse() * Vec4::new(
        clip_plane.x.signum(),
        clip_plane.y.signum(),
        1.0,
        1.0,
    );

    let denominator = clip_plane.dot(corner);
    if denominator.abs() <= f32::EPSILON {
        return projection;
    }
    let c = clip_plane * (projection.row(3).dot(corner) / denominator);

    let mut oblique = projection;
    oblique.x_axis.z = c.x;
    oblique.y_axis.z = c.y;
    oblique.z_axis.z = c.z;
    oblique.w_axis.z = c.w;
    oblique
}

fn perspective(fov_degrees: f32, near: f32, far: f32) -> Mat4 {
    let near = near.max(MIN_NEAR_CLIP);
    let far = far.max(near * 2.0);
    Mat4::perspective_rh(fov_degrees.to_radians(), 1.0, near, far)
}

fn apply_flip_y(projection: Mat4, settings: &CaptureSettings) -> Mat4 {
    if settings.force_flip_y {
        Mat4::from_scale(Vec3::new(1.0, -1.0, 1.0)) * projection
    } else {
        projection
    }
}

fn reflect_direction(direction: Vec3, normal: Vec3) -> Vec3 {
    direction - 2.0 * direction.dot(normal) * normal
}

// ============================================================================
// Capture pass
// ============================================================================

/// Matrices of one capture of `probe`.
///
/// Reflection probes ignore `viewer`: they capture from their own capture
/// position with an identity orientation. Planar probes mirror the viewer
/// across their plane and clip everything behind the plane. A viewer on
/// or behind the plane gets the plain perspective without oblique clipping.
pub fn compute_capture_pass(
    probe: &Probe,
    viewer: &ViewerTransform,
    settings: &CaptureSettings,
) -> (CapturePass, RenderData) {
    let near = probe.settings().near_clip_plane;
    let far = probe.settings().far_clip_plane;

    let pass = match probe.kind() {
        ProbeKind::Reflection(_) => {
            let position = probe.capture_position();
            CapturePass {
                position,
                rotation: Quat::IDENTITY,
                world_to_camera: Mat4::from_translation(-position),
                projection: apply_flip_y(perspective(CUBE_FACE_FOV_DEGREES, near, far), settings),
                dimension: TextureDimension::Cube,
                invert_face_culling: false,
            }
        }
        ProbeKind::Planar(_) => {
            let plane = probe.mirror_plane().unwrap_or(Vec4::Y);
            planar_pass(plane, viewer, settings, near, far)
        }
    };

    let data = RenderData::new(pass.projection, pass.world_to_camera, pass.position);
    (pass, data)
}

fn planar_pass(
    plane: Vec4,
    viewer: &ViewerTransform,
    settings: &CaptureSettings,
    near: f32,
    far: f32,
) -> CapturePass {
    let normal = plane.truncate();
    let mirror = reflection_matrix(plane);
    let world_to_camera = viewer.view_matrix() * mirror;

    // Mirrored camera frame; the handedness flip stays in world_to_camera
    let forward = reflect_direction(viewer.rotation * Vec3::NEG_Z, normal);
    let up = reflect_direction(viewer.rotation * Vec3::Y, normal);
    let back = -forward;
    let rotation = Quat::from_mat3(&Mat3::from_cols(up.cross(back), up, back)).normalize();

    let projection = perspective(settings.reference_field_of_view, near, far);
    let projection = if plane.dot(viewer.position.extend(1.0)) > 0.0 {
        // Plane in the mirrored camera space: dot(camera_plane, p_cam) == dot(plane, p_world)
        let camera_plane = world_to_camera.inverse().transpose() * plane;
        oblique_projection(projection, camera_plane)
    } else {
        engine_trace!("galaxy3d::ProbeCapture",
            "Viewer at {:?} is behind the mirror plane, oblique clipping skipped", viewer.position);
        projection
    };

    CapturePass {
        position: mirror.transform_point3(viewer.position),
        rotation,
        world_to_camera,
        projection: apply_flip_y(projection, settings),
        dimension: TextureDimension::Tex2D,
        invert_face_culling: true,
    }
}

#[cfg(test)]
#[path = "capture_tests.rs"]
mod tests;
