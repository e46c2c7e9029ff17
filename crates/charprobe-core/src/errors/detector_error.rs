//! Detector construction errors.
//!
//! These are the only errors the engine raises. Per-call detection never
//! fails; it reports an empty probe or an absent result instead.

use super::{ConfigError, ResourceError};

/// Errors that can occur while building a `Detector`.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum DetectorError {
    #[error("No encodings specified")]
    NoEncodings,

    #[error("min_confidence must be in range [0, 1], got {value}")]
    InvalidMinConfidence { value: f64 },

    #[error("Resource error: {0}")]
    Resource(#[from] ResourceError),

    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),
}
