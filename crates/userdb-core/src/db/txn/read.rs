use crate::{
    db::{Db, snapshot::Snapshot},
    obs::MetricsEvent,
    traits::EntityKind,
};
use derive_more::Deref;
use std::sync::Arc;

///
/// ReadTxn
///
/// Read-only handle over the snapshot that was committed when it opened.
/// Holds no lock; later commits never change what it sees. Read operations
/// come from `Snapshot` through `Deref`.
///

#[derive(Deref)]
pub struct ReadTxn<'db, E: EntityKind> {
    db: &'db Db<E>,
    #[deref(forward)]
    snapshot: Arc<Snapshot<E>>,
}

impl<'db, E: EntityKind> ReadTxn<'db, E> {
    pub(crate) fn new(db: &'db Db<E>, snapshot: Arc<Snapshot<E>>) -> Self {
        tracing::debug!(
            entity = E::MODEL.entity_name,
            version = snapshot.version(),
            "read transaction opened"
        );
        db.record(MetricsEvent::TxnBegin { write: false });

        Self { db, snapshot }
    }

    /// Terminal: give up the snapshot. Release and abort are the same thing
    /// for a handle that never mutates.
    pub fn release(self) {
        drop(self);
    }
}

impl<E: EntityKind> Drop for ReadTxn<'_, E> {
    fn drop(&mut self) {
        tracing::debug!(
            entity = E::MODEL.entity_name,
            version = self.snapshot.version(),
            "read transaction released"
        );
        self.db.record(MetricsEvent::TxnRelease { write: false });
    }
}
