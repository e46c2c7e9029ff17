//! Configuration errors.

/// Errors that can occur during configuration loading and validation.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ConfigError {
    #[error("Config file not found: {path}")]
    FileNotFound { path: String },

    #[error("Config parse error in {path}: {message}")]
    ParseError { path: String, message: String },

    #[error("Config validation failed for {field}: {message}")]
    ValidationFailed { field: String, message: String },

    #[error("Invalid config value for {field}: {message}")]
    InvalidValue { field: String, message: String },
}
