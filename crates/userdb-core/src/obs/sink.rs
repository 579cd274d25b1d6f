//! Metrics sink boundary.
//!
//! Store and query logic MUST NOT touch obs::metrics state directly.
//! All instrumentation flows through MetricsEvent and MetricsSink.
use std::time::Instant;

///
/// ExecKind
///

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum ExecKind {
    Create,
    List,
    Get,
    SearchAge,
    SearchName,
}

///
/// PlanKind
///

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum PlanKind {
    /// Point lookup on the primary key.
    Keys,
    /// Bounded walk over a secondary index from a seek point.
    Range,
    /// Walk of the whole primary index.
    FullScan,
}

///
/// MetricsEvent
///

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum MetricsEvent {
    ExecStart {
        kind: ExecKind,
    },
    ExecFinish {
        kind: ExecKind,
        rows_returned: u64,
        micros: u64,
    },
    RowsScanned {
        rows_scanned: u64,
    },
    IndexDelta {
        inserts: u64,
        removes: u64,
    },
    Plan {
        kind: PlanKind,
    },
    TxnBegin {
        write: bool,
    },
    TxnCommit {
        version: u64,
    },
    TxnRelease {
        write: bool,
    },
    WriterBusy,
}

///
/// MetricsSink
///

pub trait MetricsSink: Send + Sync {
    fn record(&self, event: MetricsEvent);
}

///
/// Span
/// Executor span: records `ExecStart` on creation and `ExecFinish` on drop,
/// so error paths are still counted.
///

pub(crate) struct Span<'a> {
    sink: &'a dyn MetricsSink,
    kind: ExecKind,
    start: Instant,
    rows: u64,
}

impl<'a> Span<'a> {
    #[must_use]
    pub(crate) fn new(sink: &'a dyn MetricsSink, kind: ExecKind) -> Self {
        sink.record(MetricsEvent::ExecStart { kind });

        Self {
            sink,
            kind,
            start: Instant::now(),
            rows: 0,
        }
    }

    pub(crate) const fn set_rows(&mut self, rows: u64) {
        self.rows = rows;
    }
}

impl Drop for Span<'_> {
    fn drop(&mut self) {
        let micros = u64::try_from(self.start.elapsed().as_micros()).unwrap_or(u64::MAX);

        self.sink.record(MetricsEvent::ExecFinish {
            kind: self.kind,
            rows_returned: self.rows,
            micros,
        });
    }
}

///
/// TESTS
///
