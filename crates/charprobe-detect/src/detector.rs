//! Detection engine: ranking, thresholding, and construction.

use std::cmp::Ordering;
use std::collections::BTreeMap;
use std::fmt;
use std::sync::Arc;

use charprobe_core::codec::{Codec, StrictCodec};
use charprobe_core::config::CharprobeConfig;
use charprobe_core::constants::DEFAULT_MIN_CONFIDENCE;
use charprobe_core::encoding::Encoding;
use charprobe_core::errors::DetectorError;
use charprobe_core::tracing::fields::PROBE_SPAN;
use charprobe_resources::{FeatureVocabulary, Model, ResourceStore};
use rayon::prelude::*;
use serde::Serialize;
use tracing::{info, trace};

use crate::features::FeatureVector;
use crate::filter;
use crate::scorer;

/// One structurally valid encoding and its confidence for a buffer.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Candidate {
    pub encoding: Encoding,
    pub confidence: f64,
}

/// Immutable binding of candidate encodings to their models.
///
/// Cloning is cheap; every table is shared.
#[derive(Clone)]
pub struct Detector {
    encodings: Arc<[Encoding]>,
    models: Arc<BTreeMap<Encoding, Arc<Model>>>,
    vocabulary: Arc<FeatureVocabulary>,
    min_confidence: f64,
    codec: Arc<dyn Codec>,
}

impl Detector {
    /// Detector over every known encoding with a threshold of 0.
    pub fn new(store: &dyn ResourceStore) -> Result<Self, DetectorError> {
        Self::builder().build(store)
    }

    pub fn builder() -> DetectorBuilder {
        DetectorBuilder::default()
    }

    /// Build from the `detector` section of a loaded configuration.
    pub fn from_config(
        config: &CharprobeConfig,
        store: &dyn ResourceStore,
    ) -> Result<Self, DetectorError> {
        Self::builder()
            .encodings(config.detector.effective_encodings()?)
            .min_confidence(config.detector.effective_min_confidence())
            .build(store)
    }

    /// Every surviving candidate, highest confidence first. Equal
    /// confidences keep canonical encoding order. Never fails; an empty
    /// result means no configured encoding can decode `content`.
    pub fn probe(&self, content: &[u8]) -> Vec<Candidate> {
        let _span = tracing::trace_span!(PROBE_SPAN, len = content.len()).entered();

        let features = FeatureVector::extract(content, &self.vocabulary);
        let survivors = filter::filter(self.codec.as_ref(), content, &self.encodings);

        let mut candidates: Vec<Candidate> = survivors
            .into_iter()
            .filter_map(|encoding| {
                self.models.get(&encoding).map(|model| Candidate {
                    encoding,
                    confidence: scorer::score(&features, model),
                })
            })
            .collect();
        candidates.sort_by(rank);

        trace!(
            active_features = features.active().len(),
            candidates = candidates.len(),
            "probe complete"
        );
        candidates
    }

    /// The top candidate if its confidence is at least `min_confidence`.
    pub fn detect(&self, content: &[u8]) -> Option<Encoding> {
        self.probe(content)
            .first()
            .filter(|top| top.confidence >= self.min_confidence)
            .map(|top| top.encoding)
    }

    /// `probe` over many buffers in parallel. Output order matches input.
    pub fn probe_batch<B>(&self, contents: &[B]) -> Vec<Vec<Candidate>>
    where
        B: AsRef<[u8]> + Sync,
    {
        contents.par_iter().map(|c| self.probe(c.as_ref())).collect()
    }

    /// `detect` over many buffers in parallel. Output order matches input.
    pub fn detect_batch<B>(&self, contents: &[B]) -> Vec<Option<Encoding>>
    where
        B: AsRef<[u8]> + Sync,
    {
        contents.par_iter().map(|c| self.detect(c.as_ref())).collect()
    }

    /// Configured encodings in canonical order.
    pub fn encodings(&self) -> &[Encoding] {
        &self.encodings
    }

    pub fn min_confidence(&self) -> f64 {
        self.min_confidence
    }

    pub fn vocabulary_len(&self) -> usize {
        self.vocabulary.len()
    }
}

impl fmt::Debug for Detector {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Detector")
            .field("encodings", &self.encodings)
            .field("min_confidence", &self.min_confidence)
            .field("vocabulary_len", &self.vocabulary.len())
            .finish()
    }
}

/// Confidence descending, then canonical encoding order.
fn rank(a: &Candidate, b: &Candidate) -> Ordering {
    b.confidence
        .total_cmp(&a.confidence)
        .then_with(|| a.encoding.cmp(&b.encoding))
}

/// Collects detector parameters before any resource is loaded.
#[derive(Clone)]
pub struct DetectorBuilder {
    encodings: Option<Vec<Encoding>>,
    min_confidence: f64,
    codec: Arc<dyn Codec>,
}

impl Default for DetectorBuilder {
    fn default() -> Self {
        Self {
            encodings: None,
            min_confidence: DEFAULT_MIN_CONFIDENCE,
            codec: Arc::new(StrictCodec),
        }
    }
}

impl DetectorBuilder {
    /// Restrict detection to `encodings`. Unset means every encoding; an
    /// explicitly empty set is rejected by `build`.
    pub fn encodings(mut self, encodings: impl IntoIterator<Item = Encoding>) -> Self {
        self.encodings = Some(encodings.into_iter().collect());
        self
    }

    pub fn min_confidence(mut self, min_confidence: f64) -> Self {
        self.min_confidence = min_confidence;
        self
    }

    /// Replace the validity predicate.
    pub fn codec(mut self, codec: impl Codec + 'static) -> Self {
        self.codec = Arc::new(codec);
        self
    }

    /// Validate parameters, then fetch the vocabulary and every model from
    /// `store`. Parameter errors are reported before any resource is read.
    pub fn build(&self, store: &dyn ResourceStore) -> Result<Detector, DetectorError> {
        let mut encodings = match &self.encodings {
            Some(encodings) => encodings.clone(),
            None => Encoding::all().to_vec(),
        };
        if encodings.is_empty() {
            return Err(DetectorError::NoEncodings);
        }
        // NaN fails the range check too.
        if !(0.0..=1.0).contains(&self.min_confidence) {
            return Err(DetectorError::InvalidMinConfidence {
                value: self.min_confidence,
            });
        }
        encodings.sort_unstable();
        encodings.dedup();

        let vocabulary = store.vocabulary()?;
        let models = store.models(&encodings)?;

        info!(
            encodings = encodings.len(),
            features = vocabulary.len(),
            min_confidence = self.min_confidence,
            "detector built"
        );

        Ok(Detector {
            encodings: encodings.into(),
            models: Arc::new(models),
            vocabulary,
            min_confidence: self.min_confidence,
            codec: Arc::clone(&self.codec),
        })
    }
}

impl fmt::Debug for DetectorBuilder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DetectorBuilder")
            .field("encodings", &self.encodings)
            .field("min_confidence", &self.min_confidence)
            .finish()
    }
}
