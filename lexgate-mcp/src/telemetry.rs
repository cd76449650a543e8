// lexgate-mcp/src/telemetry.rs
// ============================================================================
// Module: Tool-Call Telemetry
// Description: Observability hooks for tool routing.
// Purpose: Provide metric events and latency buckets without hard deps.
// Dependencies: lexgate-core
// ============================================================================

//! ## Overview
//! A thin metrics interface for request counters and latency histograms,
//! dependency-light so deployments can plug in Prometheus or
//! OpenTelemetry without redesign.

use lexgate_core::ToolName;

/// Default latency buckets in milliseconds for tool-call histograms.
pub const LATENCY_BUCKETS_MS: &[u64] =
    &[1, 2, 5, 10, 25, 50, 100, 250, 500, 1_000, 2_500, 5_000];

/// One tool-call metric sample.
#[derive(Debug, Clone, Copy)]
pub struct MetricEvent {
    /// Recognized tool, when the name parsed.
    pub tool: Option<ToolName>,
    /// Outcome label: `ok` or the stable error code.
    pub outcome: &'static str,
    /// Wall-clock duration in milliseconds.
    pub duration_ms: u128,
}

/// Metrics sink for tool-call events.
pub trait Metrics: Send + Sync {
    /// Record a metric event.
    fn record(&self, event: &MetricEvent);
}

/// Metrics sink that discards all events.
pub struct NoopMetrics;

impl Metrics for NoopMetrics {
    fn record(&self, _event: &MetricEvent) {}
}
