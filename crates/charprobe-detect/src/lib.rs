//! # charprobe-detect
//!
//! Guesses the character encoding of a byte buffer.
//!
//! A buffer is reduced to bigram frequencies over the shared feature
//! vocabulary, candidates that cannot decode it are dropped, and each
//! survivor is scored by its own one-vs-rest linear model. `probe` returns
//! every survivor ranked by confidence; `detect` returns the winner if it
//! clears the detector's threshold.

pub mod detector;
pub mod features;
pub mod filter;
pub mod scorer;

pub use charprobe_core::Encoding;
pub use detector::{Candidate, Detector, DetectorBuilder};
pub use features::FeatureVector;
