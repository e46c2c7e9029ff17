//! # charprobe-resources
//!
//! Immutable model tables shared by every detector: the feature
//! vocabulary, one weight vector per encoding, and the bias table.
//! Tables are loaded lazily, at most once per key, and shared read-only
//! afterwards.

pub mod format;
pub mod model;
pub mod store;
pub mod vocabulary;

pub use model::Model;
pub use store::{FileResourceStore, LoadCounts, MemoryResourceStore, ResourceStore};
pub use vocabulary::FeatureVocabulary;
