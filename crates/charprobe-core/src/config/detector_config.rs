//! Detector configuration.

use serde::{Deserialize, Serialize};

use crate::constants::DEFAULT_MIN_CONFIDENCE;
use crate::encoding::Encoding;
use crate::errors::ConfigError;

/// Configuration for detector construction.
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq)]
#[serde(default)]
pub struct DetectorConfig {
    /// Candidate encoding names or aliases. Empty means every encoding.
    pub encodings: Vec<String>,
    /// Minimum confidence `detect` requires. Default: 0.0.
    pub min_confidence: Option<f64>,
}

impl DetectorConfig {
    /// Resolve `encodings` to canonical identifiers, in canonical order
    /// with duplicates removed. An empty list yields every encoding.
    pub fn effective_encodings(&self) -> Result<Vec<Encoding>, ConfigError> {
        if self.encodings.is_empty() {
            return Ok(Encoding::all().to_vec());
        }
        let mut resolved = self
            .encodings
            .iter()
            .map(|name| {
                name.parse::<Encoding>().map_err(|e| ConfigError::InvalidValue {
                    field: "detector.encodings".to_string(),
                    message: e.to_string(),
                })
            })
            .collect::<Result<Vec<_>, _>>()?;
        resolved.sort_unstable();
        resolved.dedup();
        Ok(resolved)
    }

    /// Returns the effective minimum confidence, defaulting to 0.0.
    pub fn effective_min_confidence(&self) -> f64 {
        self.min_confidence.unwrap_or(DEFAULT_MIN_CONFIDENCE)
    }
}
