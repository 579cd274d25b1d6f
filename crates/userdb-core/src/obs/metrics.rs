use crate::obs::sink::{ExecKind, MetricsEvent, MetricsSink, PlanKind};
use parking_lot::Mutex;
use serde::{Deserialize, Serialize};
use std::time::{SystemTime, UNIX_EPOCH};

///
/// EventState
/// Ephemeral, in-memory counters and simple perf totals for one store.
///

#[derive(Clone, Debug, Deserialize, Eq, PartialEq, Serialize)]
pub struct EventState {
    pub ops: EventOps,
    pub perf: EventPerf,
    pub since_ms: u64,
}

impl Default for EventState {
    fn default() -> Self {
        Self {
            ops: EventOps::default(),
            perf: EventPerf::default(),
            since_ms: now_millis(),
        }
    }
}

///
/// EventOps
///

#[derive(Clone, Debug, Default, Deserialize, Eq, PartialEq, Serialize)]
pub struct EventOps {
    // Query entrypoints
    pub create_calls: u64,
    pub list_calls: u64,
    pub get_calls: u64,
    pub search_age_calls: u64,
    pub search_name_calls: u64,

    // Access paths
    pub plan_keys: u64,
    pub plan_range: u64,
    pub plan_full_scan: u64,

    // Rows
    pub rows_returned: u64,
    pub rows_scanned: u64,

    // Index maintenance
    pub index_inserts: u64,
    pub index_removes: u64,

    // Transactions
    pub read_txns: u64,
    pub write_txns: u64,
    pub commits: u64,
    pub releases: u64,
    pub writer_busy: u64,
    pub last_version: u64,
}

///
/// EventPerf
///

#[derive(Clone, Debug, Default, Deserialize, Eq, PartialEq, Serialize)]
pub struct EventPerf {
    pub exec_micros_total: u128,
    pub exec_micros_max: u64,
}

///
/// EventReport
/// Point-in-time copy of the counters, safe to hand to any caller.
///

#[derive(Clone, Debug, Deserialize, Eq, PartialEq, Serialize)]
pub struct EventReport {
    pub counters: EventState,
}

///
/// EventMetrics
/// Default sink: folds events into an `EventState` owned by the store.
///

#[derive(Debug, Default)]
pub struct EventMetrics {
    state: Mutex<EventState>,
}

impl EventMetrics {
    #[must_use]
    pub fn report(&self) -> EventReport {
        EventReport {
            counters: self.state.lock().clone(),
        }
    }

    /// Reset all counters and restart the window.
    pub fn reset(&self) {
        *self.state.lock() = EventState::default();
    }
}

impl MetricsSink for EventMetrics {
    fn record(&self, event: MetricsEvent) {
        let mut m = self.state.lock();

        match event {
            MetricsEvent::ExecStart { kind } => {
                let calls = match kind {
                    ExecKind::Create => &mut m.ops.create_calls,
                    ExecKind::List => &mut m.ops.list_calls,
                    ExecKind::Get => &mut m.ops.get_calls,
                    ExecKind::SearchAge => &mut m.ops.search_age_calls,
                    ExecKind::SearchName => &mut m.ops.search_name_calls,
                };
                *calls = calls.saturating_add(1);
            }

            MetricsEvent::ExecFinish {
                rows_returned,
                micros,
                ..
            } => {
                m.ops.rows_returned = m.ops.rows_returned.saturating_add(rows_returned);
                add_micros(&mut m.perf, micros);
            }

            MetricsEvent::RowsScanned { rows_scanned } => {
                m.ops.rows_scanned = m.ops.rows_scanned.saturating_add(rows_scanned);
            }

            MetricsEvent::IndexDelta { inserts, removes } => {
                m.ops.index_inserts = m.ops.index_inserts.saturating_add(inserts);
                m.ops.index_removes = m.ops.index_removes.saturating_add(removes);
            }

            MetricsEvent::Plan { kind } => {
                let plans = match kind {
                    PlanKind::Keys => &mut m.ops.plan_keys,
                    PlanKind::Range => &mut m.ops.plan_range,
                    PlanKind::FullScan => &mut m.ops.plan_full_scan,
                };
                *plans = plans.saturating_add(1);
            }

            MetricsEvent::TxnBegin { write } => {
                if write {
                    m.ops.write_txns = m.ops.write_txns.saturating_add(1);
                } else {
                    m.ops.read_txns = m.ops.read_txns.saturating_add(1);
                }
            }

            MetricsEvent::TxnCommit { version } => {
                m.ops.commits = m.ops.commits.saturating_add(1);
                m.ops.last_version = m.ops.last_version.max(version);
            }

            MetricsEvent::TxnRelease { .. } => {
                m.ops.releases = m.ops.releases.saturating_add(1);
            }

            MetricsEvent::WriterBusy => {
                m.ops.writer_busy = m.ops.writer_busy.saturating_add(1);
            }
        }
    }
}

/// Accumulate span micros and track a max.
fn add_micros(perf: &mut EventPerf, micros: u64) {
    perf.exec_micros_total = perf.exec_micros_total.saturating_add(u128::from(micros));
    if micros > perf.exec_micros_max {
        perf.exec_micros_max = micros;
    }
}

fn now_millis() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map_or(0, |d| u64::try_from(d.as_millis()).unwrap_or(u64::MAX))
}

///
/// TESTS
///
