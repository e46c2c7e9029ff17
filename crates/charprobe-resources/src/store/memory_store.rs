//! In-memory resource store for synthetic or embedded tables.

use std::sync::Arc;

use charprobe_core::encoding::Encoding;
use charprobe_core::errors::ResourceError;
use rustc_hash::FxHashMap;

use super::{check_length, ResourceStore};
use crate::model::Model;
use crate::vocabulary::FeatureVocabulary;

/// Resource store whose tables are supplied directly. Applies the same
/// validation as the file-backed store.
#[derive(Debug, Clone)]
pub struct MemoryResourceStore {
    vocabulary: Arc<FeatureVocabulary>,
    models: FxHashMap<Encoding, Arc<Model>>,
}

impl MemoryResourceStore {
    pub fn new(codes: Vec<u16>) -> Result<Self, ResourceError> {
        Ok(Self {
            vocabulary: Arc::new(FeatureVocabulary::new(codes)?),
            models: FxHashMap::default(),
        })
    }

    /// Add or replace the model for `encoding`.
    pub fn insert_model(
        &mut self,
        encoding: Encoding,
        weights: Vec<f32>,
        bias: f64,
    ) -> Result<(), ResourceError> {
        check_length(encoding, &self.vocabulary, &weights)?;
        let model = Model::new(encoding, weights, bias)?;
        self.models.insert(encoding, Arc::new(model));
        Ok(())
    }

    /// Builder-style `insert_model`.
    pub fn with_model(
        mut self,
        encoding: Encoding,
        weights: Vec<f32>,
        bias: f64,
    ) -> Result<Self, ResourceError> {
        self.insert_model(encoding, weights, bias)?;
        Ok(self)
    }

    /// Encodings that have a model, in canonical order.
    pub fn encodings(&self) -> Vec<Encoding> {
        let mut encodings: Vec<Encoding> = self.models.keys().copied().collect();
        encodings.sort_unstable();
        encodings
    }
}

impl ResourceStore for MemoryResourceStore {
    fn vocabulary(&self) -> Result<Arc<FeatureVocabulary>, ResourceError> {
        Ok(Arc::clone(&self.vocabulary))
    }

    fn model(&self, encoding: Encoding) -> Result<Arc<Model>, ResourceError> {
        self.models
            .get(&encoding)
            .cloned()
            .ok_or_else(|| ResourceError::MissingModel {
                encoding: encoding.name().to_string(),
            })
    }
}
