//! Per-encoding linear model.

use std::sync::Arc;

use charprobe_core::encoding::Encoding;
use charprobe_core::errors::ResourceError;

/// One-vs-rest linear discriminant for a single encoding.
///
/// Weights are stored upconverted from their half-precision on-disk form.
/// Every value is finite.
#[derive(Debug, Clone, PartialEq)]
pub struct Model {
    weights: Arc<[f32]>,
    bias: f64,
}

impl Model {
    pub fn new(encoding: Encoding, weights: Vec<f32>, bias: f64) -> Result<Self, ResourceError> {
        if let Some(index) = weights.iter().position(|w| !w.is_finite()) {
            return Err(ResourceError::NonFiniteValue {
                resource: format!("{encoding} weights"),
                index,
            });
        }
        if !bias.is_finite() {
            return Err(ResourceError::NonFiniteValue {
                resource: format!("{encoding} bias"),
                index: 0,
            });
        }
        Ok(Self {
            weights: weights.into(),
            bias,
        })
    }

    pub fn weights(&self) -> &[f32] {
        &self.weights
    }

    pub fn bias(&self) -> f64 {
        self.bias
    }

    /// Number of weights; equals the vocabulary size for a loaded model.
    pub fn len(&self) -> usize {
        self.weights.len()
    }

    pub fn is_empty(&self) -> bool {
        self.weights.is_empty()
    }
}
