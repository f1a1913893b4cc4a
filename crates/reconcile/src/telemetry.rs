//! Telemetry collaborator.

/// Counter incremented when a per-content-type write is discarded.
pub const UPDATE_DISCARDED: &str = "editor_interface.update_discarded";

/// Fire-and-forget counters. Implementations must not block.
pub trait TelemetrySink: Send + Sync {
	fn increment(&self, counter: &'static str, tags: &[(&'static str, &str)]);
}

/// Discards every signal.
#[derive(Debug, Default, Clone, Copy)]
pub struct NoopTelemetry;

impl TelemetrySink for NoopTelemetry {
	fn increment(&self, _counter: &'static str, _tags: &[(&'static str, &str)]) {}
}
