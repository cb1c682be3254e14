//! Metrics sink that records usage events in the tracing log.

use tracing::info;

use crate::domain::MetricEvent;
use crate::domain::ports::Metrics;

/// Writes each event as a structured `info` line with target `metrics`.
#[derive(Debug, Default, Clone, Copy)]
pub struct TracingMetrics;

impl Metrics for TracingMetrics {
    fn track(&self, event: MetricEvent) {
        info!(target: "metrics", event = event.name(), "usage event");
    }
}
