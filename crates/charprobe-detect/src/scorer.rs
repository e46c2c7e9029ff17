//! Linear scoring and the logistic confidence map.

use charprobe_resources::Model;

use crate::features::FeatureVector;

/// `bias + Σ weight[i] * frequency[i]`.
pub fn raw_score(features: &FeatureVector, model: &Model) -> f64 {
    model.bias() + features.dot(model.weights())
}

/// Confidence in `[0, 1]` for one encoding.
pub fn score(features: &FeatureVector, model: &Model) -> f64 {
    sigmoid(raw_score(features, model))
}

/// Logistic function. Negative inputs take the `e^x / (1 + e^x)` form so
/// large magnitudes never overflow `exp`.
pub fn sigmoid(x: f64) -> f64 {
    if x >= 0.0 {
        1.0 / (1.0 + (-x).exp())
    } else {
        let e = x.exp();
        e / (1.0 + e)
    }
}
