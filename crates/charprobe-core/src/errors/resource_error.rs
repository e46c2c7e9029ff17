//! Resource table errors.
//!
//! Every variant names the resource it concerns. The type is `Clone`
//! because the resource caches hand one shared error to every caller
//! waiting on the same load.

/// Errors raised while loading or validating model resources.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ResourceError {
    #[error("Resource not found: {path}")]
    NotFound { path: String },

    #[error("I/O error reading {path}: {message}")]
    Io { path: String, message: String },

    #[error("Corrupt resource {resource}: {message}")]
    Corrupt { resource: String, message: String },

    #[error("Weight vector for {encoding} has {actual} entries, vocabulary has {expected}")]
    LengthMismatch {
        encoding: String,
        expected: usize,
        actual: usize,
    },

    #[error("No bias value for encoding {encoding}")]
    MissingBias { encoding: String },

    #[error("No model for encoding {encoding}")]
    MissingModel { encoding: String },

    #[error("Non-finite value in {resource} at index {index}")]
    NonFiniteValue { resource: String, index: usize },
}
