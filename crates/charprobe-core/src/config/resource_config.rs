//! Resource location configuration.

use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use crate::errors::ConfigError;

/// Where the compressed model tables live.
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq)]
#[serde(default)]
pub struct ResourceConfig {
    /// Directory holding `features.gzip`, `biases.gzip` and `weights/`.
    pub directory: Option<PathBuf>,
}

impl ResourceConfig {
    /// The configured resource directory. There is no compiled default.
    pub fn effective_directory(&self) -> Result<PathBuf, ConfigError> {
        self.directory
            .clone()
            .ok_or_else(|| ConfigError::ValidationFailed {
                field: "resources.directory".to_string(),
                message: "must be set".to_string(),
            })
    }
}
