//! Observability: runtime telemetry (metrics) and sink abstractions.
//!
//! This module does not access snapshots or indexes directly.

pub(crate) mod metrics;
pub(crate) mod sink;

// re-exports
pub use metrics::{EventMetrics, EventOps, EventPerf, EventReport, EventState};
pub use sink::{ExecKind, MetricsEvent, MetricsSink, PlanKind};
