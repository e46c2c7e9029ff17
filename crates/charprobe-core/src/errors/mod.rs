//! Error handling for charprobe.
//! One error enum per subsystem, `thiserror` only.

pub mod config_error;
pub mod detector_error;
pub mod encoding_error;
pub mod resource_error;

pub use config_error::ConfigError;
pub use detector_error::DetectorError;
pub use encoding_error::EncodingError;
pub use resource_error::ResourceError;
