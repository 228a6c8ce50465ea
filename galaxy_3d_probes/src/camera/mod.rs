//! Camera module - low-level camera and frustum.
//!
//! Provides passive data containers consumed by the probe culler.
//! The probe system does NOT store or manage cameras - they are owned
//! and driven by the renderer, and passed in per cull request.

mod camera;
mod frustum;

pub use camera::Camera;
pub use frustum::{
    Frustum,
    PLANE_LEFT, PLANE_RIGHT, PLANE_BOTTOM, PLANE_TOP, PLANE_NEAR, PLANE_FAR,
};
