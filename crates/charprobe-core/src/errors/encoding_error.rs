//! Encoding identity errors.

/// Errors raised while resolving an encoding name.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum EncodingError {
    #[error("Unknown encoding: {name}")]
    Unknown { name: String },
}
