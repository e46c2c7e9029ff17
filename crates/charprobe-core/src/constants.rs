//! Shared constants for the charprobe detector.

/// charprobe version string.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Default minimum confidence for `detect`. Permissive: any candidate wins.
pub const DEFAULT_MIN_CONFIDENCE: f64 = 0.0;

// ---- Resource layout ----

/// Compressed feature vocabulary (big-endian `u16` codes).
pub const FEATURES_FILE: &str = "features.gzip";

/// Compressed bias table (`<name> <bias>` per line).
pub const BIASES_FILE: &str = "biases.gzip";

/// Directory holding one compressed weight file per encoding.
pub const WEIGHTS_DIRECTORY: &str = "weights";

/// Extension of every compressed weight file.
pub const WEIGHTS_EXTENSION: &str = "gzip";

// ---- Configuration ----

/// Project-level config file name.
pub const CONFIG_FILE_NAME: &str = "charprobe.toml";

/// User-level config directory, relative to the home directory.
pub const USER_CONFIG_DIRECTORY: &str = ".charprobe";

/// Environment variable carrying the `EnvFilter` directive.
pub const LOG_ENV_VAR: &str = "CHARPROBE_LOG";

/// Filter used when `CHARPROBE_LOG` is unset or invalid.
pub const DEFAULT_LOG_FILTER: &str = "charprobe=info";
