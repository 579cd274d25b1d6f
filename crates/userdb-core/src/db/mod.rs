pub mod index;
pub mod snapshot;
pub mod store;
pub mod txn;


use crate::{
    config::{DbConfig, WriteMode},
    db::{
        snapshot::Snapshot,
        txn::{ReadTxn, WriteTxn},
    },
    error::InternalError,
    obs::{EventMetrics, EventReport, MetricsEvent, MetricsSink},
    traits::EntityKind,
};
use arc_swap::ArcSwap;
use parking_lot::Mutex;
use std::sync::Arc;

///
/// Db
///
/// Transaction manager over one entity's indexed record set.
///
/// Thread-safe with interior mutability: any number of read handles may be
/// open alongside at most one write handle.
///
/// # Transaction Isolation (Copy-on-Write)
///
/// - A read handle captures the committed `Arc<Snapshot>` when it opens and
///   holds no lock afterwards.
/// - A write handle owns the writer slot for its whole life and mutates a
///   private copy of the snapshot.
/// - Commit is a single atomic pointer swap; handles opened before it keep
///   the previous snapshot alive until they are released.
///
/// One instance is built at startup and shared by reference; there is no
/// global state.
///

pub struct Db<E: EntityKind> {
    /// Current committed view, swapped atomically on commit.
    committed: ArcSwap<Snapshot<E>>,
    /// Writer slot; held by the open `WriteTxn`, if any.
    writer: Mutex<()>,
    config: DbConfig,
    metrics: EventMetrics,
    sink_override: Option<Arc<dyn MetricsSink>>,
}

impl<E: EntityKind> Db<E> {
    /// Validate the entity model and build an empty store.
    pub fn new(config: DbConfig) -> Result<Self, InternalError> {
        E::MODEL.validate()?;

        tracing::debug!(
            entity = E::MODEL.entity_name,
            indexes = E::MODEL.indexes.len(),
            write_mode = ?config.write_mode,
            "store initialized"
        );

        Ok(Self {
            committed: ArcSwap::from_pointee(Snapshot::empty()),
            writer: Mutex::new(()),
            config,
            metrics: EventMetrics::default(),
            sink_override: None,
        })
    }

    /// Route metrics events to `sink` instead of the built-in counters.
    #[must_use]
    pub fn with_metrics_sink(mut self, sink: Arc<dyn MetricsSink>) -> Self {
        self.sink_override = Some(sink);
        self
    }

    /// Version of the currently committed snapshot.
    #[must_use]
    pub fn version(&self) -> u64 {
        self.committed.load().version()
    }

    /// Begin a read-only transaction.
    ///
    /// Never blocks: readers wait on neither writers nor each other.
    pub fn begin_read(&self) -> ReadTxn<'_, E> {
        ReadTxn::new(self, self.committed.load_full())
    }

    /// Begin a read-write transaction.
    ///
    /// Only one can be open at a time. Under `WriteMode::Block` this waits for
    /// the slot; under `WriteMode::FailFast` it returns a conflict error.
    pub fn begin_write(&self) -> Result<WriteTxn<'_, E>, InternalError> {
        let slot = match self.config.write_mode {
            WriteMode::Block => self.writer.lock(),
            WriteMode::FailFast => self.writer.try_lock().ok_or_else(|| {
                tracing::warn!(
                    entity = E::MODEL.entity_name,
                    "write transaction rejected: writer slot busy"
                );
                self.record(MetricsEvent::WriterBusy);

                InternalError::writer_busy()
            })?,
        };

        // Loaded under the slot, so no other commit can land before ours.
        let base = self.committed.load_full();

        Ok(WriteTxn::new(self, slot, base))
    }

    /// Snapshot the store's metrics counters.
    #[must_use]
    pub fn metrics_report(&self) -> EventReport {
        self.metrics.report()
    }

    /// Reset the store's metrics counters.
    pub fn metrics_reset(&self) {
        self.metrics.reset();
    }

    pub(crate) fn sink(&self) -> &dyn MetricsSink {
        match &self.sink_override {
            Some(sink) => sink.as_ref(),
            None => &self.metrics,
        }
    }

    pub(crate) fn record(&self, event: MetricsEvent) {
        self.sink().record(event);
    }

    pub(crate) fn publish(&self, snapshot: Arc<Snapshot<E>>) {
        self.committed.store(snapshot);
    }
}
