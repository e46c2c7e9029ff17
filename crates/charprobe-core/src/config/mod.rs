//! Configuration system for charprobe.
//! TOML-based, layered resolution: overrides > env > project > user > defaults.

pub mod charprobe_config;
pub mod detector_config;
pub mod resource_config;

pub use charprobe_config::{CharprobeConfig, ConfigOverrides};
pub use detector_config::DetectorConfig;
pub use resource_config::ResourceConfig;
