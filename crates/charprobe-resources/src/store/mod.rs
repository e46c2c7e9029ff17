//! Resource store abstraction and its implementations.

pub mod file_store;
pub mod memory_store;

use std::collections::BTreeMap;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use charprobe_core::encoding::Encoding;
use charprobe_core::errors::ResourceError;

pub use file_store::FileResourceStore;
pub use memory_store::MemoryResourceStore;

use crate::model::Model;
use crate::vocabulary::FeatureVocabulary;

/// Provider of the immutable tables a detector is built from.
///
/// Implementations must hand out fully initialized tables and must never
/// substitute defaults for a missing or corrupt resource.
pub trait ResourceStore: Send + Sync {
    /// The shared feature vocabulary.
    fn vocabulary(&self) -> Result<Arc<FeatureVocabulary>, ResourceError>;

    /// The model for one encoding. Its weight vector has exactly
    /// `vocabulary().len()` entries.
    fn model(&self, encoding: Encoding) -> Result<Arc<Model>, ResourceError>;

    /// Models for several encodings, keyed in canonical order. Fails on the
    /// first encoding whose model cannot be provided.
    fn models(&self, encodings: &[Encoding]) -> Result<BTreeMap<Encoding, Arc<Model>>, ResourceError> {
        encodings
            .iter()
            .map(|&encoding| self.model(encoding).map(|model| (encoding, model)))
            .collect()
    }
}

/// Snapshot of how many times each table kind was actually decoded.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct LoadCounts {
    pub vocabulary: u64,
    pub biases: u64,
    pub weights: u64,
}

#[derive(Debug, Default)]
pub(crate) struct LoadStats {
    vocabulary: AtomicU64,
    biases: AtomicU64,
    weights: AtomicU64,
}

impl LoadStats {
    pub(crate) fn record_vocabulary(&self) {
        self.vocabulary.fetch_add(1, Ordering::Relaxed);
    }

    pub(crate) fn record_biases(&self) {
        self.biases.fetch_add(1, Ordering::Relaxed);
    }

    pub(crate) fn record_weights(&self) {
        self.weights.fetch_add(1, Ordering::Relaxed);
    }

    pub(crate) fn snapshot(&self) -> LoadCounts {
        LoadCounts {
            vocabulary: self.vocabulary.load(Ordering::Relaxed),
            biases: self.biases.load(Ordering::Relaxed),
            weights: self.weights.load(Ordering::Relaxed),
        }
    }
}

/// Reject a weight vector that does not line up with the vocabulary.
pub(crate) fn check_length(
    encoding: Encoding,
    vocabulary: &FeatureVocabulary,
    weights: &[f32],
) -> Result<(), ResourceError> {
    if weights.len() != vocabulary.len() {
        return Err(ResourceError::LengthMismatch {
            encoding: encoding.name().to_string(),
            expected: vocabulary.len(),
            actual: weights.len(),
        });
    }
    Ok(())
}
