//! Error types for the Galaxy3D probe system
//!
//! This module defines the error types used throughout the probe system,
//! including capture backend failures, render target allocation and
//! probe lookups.

use std::fmt;

/// Result type for probe system operations
pub type Result<T> = std::result::Result<T, Error>;

/// Probe system errors
#[derive(Debug, Clone)]
pub enum Error {
    /// Backend-specific error (capture device, render target creation, etc.)
    BackendError(String),

    /// Out of GPU memory
    OutOfMemory,

    /// Invalid resource (unknown probe key, illegal settings change, etc.)
    InvalidResource(String),

    /// Initialization failed (invalid pipeline settings, subsystems)
    InitializationFailed(String),
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::BackendError(msg) => write!(f, "Backend error: {}", msg),
            Error::OutOfMemory => write!(f, "Out of GPU memory"),
            Error::InvalidResource(msg) => write!(f, "Invalid resource: {}", msg),
            Error::InitializationFailed(msg) => write!(f, "Initialization failed: {}", msg),
        }
    }
}

impl std::error::Error for Error {}

// ===== ERROR MACROS =====

/// Log an error message and build an `Error::BackendError` from it
///
/// # Example
///
/// ```ignore
/// let err = engine_err!("galaxy3d::ProbeSystem", "Capture device lock poisoned");
/// ```
#[macro_export]
macro_rules! engine_err {
    ($source:expr, $($arg:tt)*) => {{
        let message = format!($($arg)*);
        $crate::engine_error!($source, "{}", message);
        $crate::galaxy3d::Error::BackendError(message)
    }};
}

/// Log an error message and return early with an `Error::BackendError`
///
/// # Example
///
/// ```ignore
/// engine_bail!("galaxy3d::mock", "Render target '{}' failed", name);
/// ```
#[macro_export]
macro_rules! engine_bail {
    ($source:expr, $($arg:tt)*) => {
        return Err($crate::engine_err!($source, $($arg)*))
    };
}

#[cfg(test)]
#[path = "error_tests.rs"]
mod tests;
