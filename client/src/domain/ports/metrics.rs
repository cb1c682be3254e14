//! Port for usage telemetry.
//!
//! Tracking is fire-and-forget: callers never wait on, or learn about, the
//! delivery of an event.

use crate::domain::MetricEvent;

/// Usage telemetry sink.
pub trait Metrics: Send + Sync {
    /// Record a usage event.
    fn track(&self, event: MetricEvent);
}

/// Metrics sink that discards every event.
#[derive(Debug, Default, Clone, Copy)]
pub struct NoOpMetrics;

impl Metrics for NoOpMetrics {
    fn track(&self, _event: MetricEvent) {}
}
