//! Error types for the tunnel.
//!
//! Only configuration can fail. Everything on the per-frame path recovers
//! locally, so there is no frame error type.

use thiserror::Error;

/// Errors raised while building or loading a [`TunnelConfig`](crate::TunnelConfig).
#[derive(Error, Debug)]
pub enum ConfigError {
    /// The tunnel needs at least one particle.
    #[error("particle count must be at least 1")]
    EmptyTunnel,

    /// The ring sampling bounds are empty or inverted.
    #[error("inner radius {inner} must be smaller than outer radius {outer}")]
    InvalidRadii { inner: f32, outer: f32 },

    /// The far plane sits at or behind the viewer, which would divide by zero when stepping.
    #[error("far distance must be positive, got {0}")]
    InvalidFarDistance(f32),

    /// Particles would travel away from the viewer and never recycle.
    #[error("speed must not be negative, got {0}")]
    InvalidSpeed(f32),

    /// A numeric field is NaN or infinite.
    #[error("field `{field}` must be finite, got {value}")]
    NonFinite { field: &'static str, value: f32 },

    /// Explicit initial state does not match the configured particle count.
    #[error("initial state holds {actual} particles, config expects {expected}")]
    StateMismatch { expected: usize, actual: usize },

    /// Failed to read or write a config file.
    #[error("config I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Failed to parse or serialize config JSON.
    #[error("config JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Result type using [`ConfigError`].
pub type Result<T> = std::result::Result<T, ConfigError>;
