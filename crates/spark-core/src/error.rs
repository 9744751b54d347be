//! Error types for the effect core.
//!
//! Nothing here is fatal to the host: surface errors are logged at the tick
//! boundary and option errors only reject the offending key.

use thiserror::Error;

/// Failures reported by a [`DrawSurface`](crate::surface::DrawSurface).
#[derive(Debug, Clone, PartialEq, Error)]
pub enum SurfaceError {
    /// The host could not provide a drawing surface at all.
    #[error("drawing surface unavailable: {0}")]
    Unavailable(String),
    /// The backend rejected a draw call.
    #[error("drawing backend error: {0}")]
    Backend(String),
}

/// Problems with a recognised configuration option.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum OptionError {
    #[error("option `{key}` expects {expected}")]
    WrongType { key: &'static str, expected: &'static str },
    #[error("option `{key}` out of range: {value}")]
    OutOfRange { key: &'static str, value: f64 },
    #[error("unknown performance mode `{0}`")]
    UnknownMode(String),
}
