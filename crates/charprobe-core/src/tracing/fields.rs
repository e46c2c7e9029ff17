//! Span names shared across charprobe crates.

/// Span around a full probe of one buffer.
pub const PROBE_SPAN: &str = "charprobe.probe";

/// Span around loading one resource table.
pub const RESOURCE_LOAD_SPAN: &str = "charprobe.resource_load";
