use crate::{
    db::{Db, snapshot::Snapshot},
    error::InternalError,
    obs::MetricsEvent,
    traits::EntityKind,
};
use derive_more::Deref;
use parking_lot::MutexGuard;
use std::sync::Arc;

///
/// WriteTxn
///
/// The single outstanding read-write handle.
///
/// Mutations go to a private overlay: the committed snapshot is shared until
/// the first `put`/`delete`, which clones it. `commit` stamps the overlay with
/// the next version and swaps it in as the committed view in one atomic
/// store; nothing else makes a write visible. Reads through `Deref` see the
/// overlay, so the writer reads its own writes.
///
/// Dropping the handle without `commit` discards the overlay.
///

#[derive(Deref)]
pub struct WriteTxn<'db, E: EntityKind> {
    db: &'db Db<E>,
    #[deref(forward)]
    overlay: Arc<Snapshot<E>>,
    base_version: u64,
    dirty: bool,
    finished: bool,
    _slot: MutexGuard<'db, ()>,
}

impl<'db, E: EntityKind> WriteTxn<'db, E> {
    pub(crate) fn new(db: &'db Db<E>, slot: MutexGuard<'db, ()>, base: Arc<Snapshot<E>>) -> Self {
        let base_version = base.version();
        tracing::debug!(
            entity = E::MODEL.entity_name,
            version = base_version,
            "write transaction opened"
        );
        db.record(MetricsEvent::TxnBegin { write: true });

        Self {
            db,
            overlay: base,
            base_version,
            dirty: false,
            finished: false,
            _slot: slot,
        }
    }

    /// Insert `entity`, or replace the live record under its key across all
    /// indexes. Returns the replaced record.
    pub fn put(&mut self, entity: E) -> Result<Option<Arc<E>>, InternalError> {
        let outcome = Arc::make_mut(&mut self.overlay).put(entity)?;
        self.dirty = true;
        self.db.record(MetricsEvent::IndexDelta {
            inserts: outcome.inserts,
            removes: outcome.removes,
        });

        Ok(outcome.replaced)
    }

    /// Remove the live record under `key` from every index.
    pub fn delete(&mut self, key: &str) -> Result<Option<Arc<E>>, InternalError> {
        if self.overlay.get(key).is_none() {
            return Ok(None);
        }

        let removed = Arc::make_mut(&mut self.overlay).delete(key)?;
        self.dirty = true;

        Ok(removed.map(|(entity, removes)| {
            self.db.record(MetricsEvent::IndexDelta {
                inserts: 0,
                removes,
            });
            entity
        }))
    }

    /// Terminal: publish the overlay as the committed view.
    /// Returns the version now visible to new transactions.
    pub fn commit(mut self) -> u64 {
        self.finished = true;

        let version = if self.dirty {
            let version = self.base_version + 1;
            Arc::make_mut(&mut self.overlay).set_version(version);
            self.db.publish(Arc::clone(&self.overlay));
            version
        } else {
            self.base_version
        };

        tracing::debug!(
            entity = E::MODEL.entity_name,
            version,
            changed = self.dirty,
            "write transaction committed"
        );
        self.db.record(MetricsEvent::TxnCommit { version });

        version
    }

    /// Terminal: discard the overlay without publishing it.
    pub fn release(mut self) {
        self.finished = true;

        tracing::debug!(
            entity = E::MODEL.entity_name,
            version = self.base_version,
            "write transaction released"
        );
        self.db.record(MetricsEvent::TxnRelease { write: true });
    }
}

impl<E: EntityKind> Drop for WriteTxn<'_, E> {
    fn drop(&mut self) {
        if !self.finished {
            tracing::warn!(
                entity = E::MODEL.entity_name,
                version = self.base_version,
                changed = self.dirty,
                "write transaction dropped without commit; changes discarded"
            );
            self.db.record(MetricsEvent::TxnRelease { write: true });
        }
    }
}
