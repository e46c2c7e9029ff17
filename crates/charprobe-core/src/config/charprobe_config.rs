//! Top-level charprobe configuration with layered resolution.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use tracing::warn;

use super::{DetectorConfig, ResourceConfig};
use crate::constants::{CONFIG_FILE_NAME, USER_CONFIG_DIRECTORY};
use crate::errors::ConfigError;

/// Top-level configuration aggregating all sub-configs.
///
/// Resolution order (highest priority first):
/// 1. Programmatic overrides (`ConfigOverrides`)
/// 2. Environment variables (`CHARPROBE_*`)
/// 3. Project config (`charprobe.toml` in the project root)
/// 4. User config (`~/.charprobe/config.toml`)
/// 5. Compiled defaults
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq)]
#[serde(default)]
pub struct CharprobeConfig {
    pub detector: DetectorConfig,
    pub resources: ResourceConfig,
}

/// Overrides applied on top of every other layer.
#[derive(Debug, Clone, Default)]
pub struct ConfigOverrides {
    pub min_confidence: Option<f64>,
    pub encodings: Option<Vec<String>>,
    pub resource_dir: Option<PathBuf>,
}

impl CharprobeConfig {
    /// Load configuration with layered resolution rooted at `root`.
    pub fn load(root: &Path, overrides: Option<&ConfigOverrides>) -> Result<Self, ConfigError> {
        let mut config = Self::default();

        // Lowest priority: user config
        if let Some(user_config_path) = Self::user_config_path() {
            if user_config_path.exists() {
                match Self::merge_toml_file(&mut config, &user_config_path) {
                    Ok(()) => {}
                    Err(err @ ConfigError::ParseError { .. }) => return Err(err),
                    Err(err) => {
                        // Unreadable user config is not fatal.
                        warn!(path = %user_config_path.display(), error = %err, "skipping user config");
                    }
                }
            }
        }

        let project_config_path = root.join(CONFIG_FILE_NAME);
        if project_config_path.exists() {
            Self::merge_toml_file(&mut config, &project_config_path)?;
        }

        Self::apply_env_overrides(&mut config)?;

        if let Some(overrides) = overrides {
            Self::apply_overrides(&mut config, overrides);
        }

        Self::validate(&config)?;

        Ok(config)
    }

    /// Load configuration from a TOML string.
    pub fn from_toml(toml_str: &str) -> Result<Self, ConfigError> {
        toml::from_str(toml_str).map_err(|e| ConfigError::ParseError {
            path: "<string>".to_string(),
            message: e.to_string(),
        })
    }

    /// Serialize the config back to TOML.
    pub fn to_toml(&self) -> Result<String, ConfigError> {
        toml::to_string_pretty(self).map_err(|e| ConfigError::ParseError {
            path: "<serialization>".to_string(),
            message: e.to_string(),
        })
    }

    /// Validate the configuration values.
    pub fn validate(config: &CharprobeConfig) -> Result<(), ConfigError> {
        if let Some(threshold) = config.detector.min_confidence {
            if !(0.0..=1.0).contains(&threshold) {
                return Err(ConfigError::ValidationFailed {
                    field: "detector.min_confidence".to_string(),
                    message: "must be between 0.0 and 1.0".to_string(),
                });
            }
        }
        config.detector.effective_encodings()?;
        Ok(())
    }

    fn user_config_path() -> Option<PathBuf> {
        home_dir().map(|h| h.join(USER_CONFIG_DIRECTORY).join("config.toml"))
    }

    /// Merge a TOML file into the existing config.
    /// Unknown keys are silently ignored.
    fn merge_toml_file(config: &mut CharprobeConfig, path: &Path) -> Result<(), ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|_| ConfigError::FileNotFound {
            path: path.display().to_string(),
        })?;

        let file_config: CharprobeConfig =
            toml::from_str(&content).map_err(|e| ConfigError::ParseError {
                path: path.display().to_string(),
                message: e.to_string(),
            })?;

        Self::merge(config, &file_config);
        Ok(())
    }

    /// Merge `other` into `base`; `other` wins wherever it sets a value.
    fn merge(base: &mut CharprobeConfig, other: &CharprobeConfig) {
        if !other.detector.encodings.is_empty() {
            base.detector.encodings = other.detector.encodings.clone();
        }
        if other.detector.min_confidence.is_some() {
            base.detector.min_confidence = other.detector.min_confidence;
        }
        if other.resources.directory.is_some() {
            base.resources.directory = other.resources.directory.clone();
        }
    }

    /// Apply environment variable overrides.
    /// Pattern: `CHARPROBE_MIN_CONFIDENCE`, `CHARPROBE_ENCODINGS`, `CHARPROBE_RESOURCE_DIR`.
    fn apply_env_overrides(config: &mut CharprobeConfig) -> Result<(), ConfigError> {
        if let Ok(val) = std::env::var("CHARPROBE_MIN_CONFIDENCE") {
            let v = val.trim().parse::<f64>().map_err(|e| ConfigError::InvalidValue {
                field: "CHARPROBE_MIN_CONFIDENCE".to_string(),
                message: e.to_string(),
            })?;
            config.detector.min_confidence = Some(v);
        }
        if let Ok(val) = std::env::var("CHARPROBE_ENCODINGS") {
            let names: Vec<String> = val
                .split(',')
                .map(str::trim)
                .filter(|s| !s.is_empty())
                .map(str::to_string)
                .collect();
            if !names.is_empty() {
                config.detector.encodings = names;
            }
        }
        if let Some(val) = std::env::var_os("CHARPROBE_RESOURCE_DIR") {
            config.resources.directory = Some(PathBuf::from(val));
        }
        Ok(())
    }

    fn apply_overrides(config: &mut CharprobeConfig, overrides: &ConfigOverrides) {
        if let Some(v) = overrides.min_confidence {
            config.detector.min_confidence = Some(v);
        }
        if let Some(ref v) = overrides.encodings {
            config.detector.encodings = v.clone();
        }
        if let Some(ref v) = overrides.resource_dir {
            config.resources.directory = Some(v.clone());
        }
    }
}

/// Cross-platform home directory resolution.
fn home_dir() -> Option<PathBuf> {
    std::env::var_os("HOME")
        .or_else(|| std::env::var_os("USERPROFILE"))
        .map(PathBuf::from)
}
