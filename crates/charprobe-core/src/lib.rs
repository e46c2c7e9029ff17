//! # charprobe-core
//!
//! Foundation crate for the charprobe encoding detector.
//! Defines encoding identity, the strict codec predicate, errors, config,
//! tracing setup, and constants. Every other crate in the workspace
//! depends on this.

pub mod codec;
pub mod config;
pub mod constants;
pub mod encoding;
pub mod errors;
pub mod tracing;

pub use codec::{Codec, StrictCodec};
pub use config::CharprobeConfig;
pub use encoding::Encoding;
pub use errors::{ConfigError, DetectorError, EncodingError, ResourceError};
