//! Gzip-file-backed resource store with per-key memoization.
//!
//! Each table kind has its own moka cache. `try_get_with` coalesces
//! concurrent first requests for a key into a single load, so a table is
//! decompressed once and every waiter receives the same `Arc`. Failed loads
//! are not cached.

use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::Instant;

use charprobe_core::config::CharprobeConfig;
use charprobe_core::constants::{BIASES_FILE, FEATURES_FILE, WEIGHTS_DIRECTORY, WEIGHTS_EXTENSION};
use charprobe_core::encoding::Encoding;
use charprobe_core::errors::{DetectorError, ResourceError};
use charprobe_core::tracing::fields::RESOURCE_LOAD_SPAN;
use moka::sync::Cache;
use rustc_hash::FxHashMap;
use tracing::{debug, info};

use super::{check_length, LoadCounts, LoadStats, ResourceStore};
use crate::format;
use crate::model::Model;
use crate::vocabulary::FeatureVocabulary;

type BiasTable = FxHashMap<String, f64>;

/// Resource store reading the compressed tables under one directory:
///
/// ```text
/// <root>/features.gzip
/// <root>/biases.gzip
/// <root>/weights/<canonical-name>.gzip
/// ```
pub struct FileResourceStore {
    root: PathBuf,
    vocabulary: Cache<(), Arc<FeatureVocabulary>>,
    biases: Cache<(), Arc<BiasTable>>,
    models: Cache<Encoding, Arc<Model>>,
    stats: LoadStats,
}

impl FileResourceStore {
    /// Open a store rooted at `root`. Nothing is read until first use.
    pub fn open(root: impl Into<PathBuf>) -> Result<Self, ResourceError> {
        let root = root.into();
        if !root.is_dir() {
            return Err(ResourceError::NotFound {
                path: root.display().to_string(),
            });
        }
        Ok(Self {
            root,
            // Unbounded: entries are never evicted, so each key loads once.
            vocabulary: Cache::builder().build(),
            biases: Cache::builder().build(),
            models: Cache::builder().build(),
            stats: LoadStats::default(),
        })
    }

    /// Open the store named by `resources.directory`.
    pub fn from_config(config: &CharprobeConfig) -> Result<Self, DetectorError> {
        let root = config.resources.effective_directory()?;
        Ok(Self::open(root)?)
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// How many times each table kind has been read from disk.
    pub fn load_counts(&self) -> LoadCounts {
        self.stats.snapshot()
    }

    fn weights_path(&self, encoding: Encoding) -> PathBuf {
        self.root
            .join(WEIGHTS_DIRECTORY)
            .join(format!("{}.{}", encoding.name(), WEIGHTS_EXTENSION))
    }

    fn read_table(path: &Path) -> Result<Vec<u8>, ResourceError> {
        let compressed = std::fs::read(path).map_err(|e| match e.kind() {
            std::io::ErrorKind::NotFound => ResourceError::NotFound {
                path: path.display().to_string(),
            },
            _ => ResourceError::Io {
                path: path.display().to_string(),
                message: e.to_string(),
            },
        })?;
        format::gunzip(&compressed, &path.display().to_string())
    }

    fn load_vocabulary(&self) -> Result<Arc<FeatureVocabulary>, ResourceError> {
        let path = self.root.join(FEATURES_FILE);
        let _span = tracing::info_span!(RESOURCE_LOAD_SPAN, path = %path.display()).entered();
        let start = Instant::now();

        let raw = Self::read_table(&path)?;
        let codes = format::decode_vocabulary(&raw, &path.display().to_string())?;
        let vocabulary = FeatureVocabulary::new(codes)?;
        self.stats.record_vocabulary();

        info!(
            features = vocabulary.len(),
            elapsed_ms = start.elapsed().as_millis() as u64,
            "loaded feature vocabulary"
        );
        Ok(Arc::new(vocabulary))
    }

    fn load_biases(&self) -> Result<Arc<BiasTable>, ResourceError> {
        let path = self.root.join(BIASES_FILE);
        let _span = tracing::info_span!(RESOURCE_LOAD_SPAN, path = %path.display()).entered();

        let raw = Self::read_table(&path)?;
        let resource = path.display().to_string();
        let text = String::from_utf8(raw).map_err(|e| ResourceError::Corrupt {
            resource: resource.clone(),
            message: e.to_string(),
        })?;
        let biases = format::parse_biases(&text, &resource)?;
        self.stats.record_biases();

        info!(entries = biases.len(), "loaded bias table");
        Ok(Arc::new(biases))
    }

    fn biases(&self) -> Result<Arc<BiasTable>, ResourceError> {
        self.biases
            .try_get_with((), || self.load_biases())
            .map_err(|e| (*e).clone())
    }

    fn load_model(&self, encoding: Encoding) -> Result<Arc<Model>, ResourceError> {
        let vocabulary = self.vocabulary()?;
        let bias = self
            .biases()?
            .get(encoding.name())
            .copied()
            .ok_or_else(|| ResourceError::MissingBias {
                encoding: encoding.name().to_string(),
            })?;

        let path = self.weights_path(encoding);
        let _span = tracing::info_span!(RESOURCE_LOAD_SPAN, path = %path.display()).entered();
        let start = Instant::now();

        let raw = Self::read_table(&path)?;
        let weights = format::decode_weights(&raw, &path.display().to_string())?;
        check_length(encoding, &vocabulary, &weights)?;
        let model = Model::new(encoding, weights, bias)?;
        self.stats.record_weights();

        info!(
            encoding = %encoding,
            elapsed_ms = start.elapsed().as_millis() as u64,
            "loaded model weights"
        );
        Ok(Arc::new(model))
    }
}

impl ResourceStore for FileResourceStore {
    fn vocabulary(&self) -> Result<Arc<FeatureVocabulary>, ResourceError> {
        self.vocabulary
            .try_get_with((), || self.load_vocabulary())
            .map_err(|e| (*e).clone())
    }

    fn model(&self, encoding: Encoding) -> Result<Arc<Model>, ResourceError> {
        if let Some(model) = self.models.get(&encoding) {
            debug!(encoding = %encoding, "model cache hit");
            return Ok(model);
        }
        self.models
            .try_get_with(encoding, || self.load_model(encoding))
            .map_err(|e| (*e).clone())
    }
}

impl std::fmt::Debug for FileResourceStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FileResourceStore")
            .field("root", &self.root)
            .field("loads", &self.stats.snapshot())
            .finish()
    }
}
