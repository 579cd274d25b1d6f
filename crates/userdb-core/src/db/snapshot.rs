//! Module: db::snapshot
//! Responsibility: one immutable-once-published version of every index.
//! Does not own: publication (the transaction manager swaps snapshots).
//! Boundary: mutation happens only on a writer's private copy.

use crate::{
    db::{
        index::{IndexKey, IndexRange, IndexStore},
        store::{DataRow, DataStore},
    },
    error::InternalError,
    traits::EntityKind,
    value::Value,
};
use std::{collections::btree_map, sync::Arc};

///
/// Snapshot
///
/// Primary index plus one `IndexStore` per declared secondary index, kept in
/// lockstep. Readers share a published snapshot through an `Arc`; a writer
/// clones it on first mutation.
///

#[derive(Debug)]
pub struct Snapshot<E> {
    data: DataStore<E>,
    indexes: Vec<IndexStore>,
    next_seq: u64,
    version: u64,
}

impl<E: EntityKind> Snapshot<E> {
    pub(crate) fn empty() -> Self {
        Self {
            data: DataStore::new(),
            indexes: E::MODEL.indexes.iter().map(|_| IndexStore::new()).collect(),
            next_seq: 0,
            version: 0,
        }
    }

    /// Commit version this view reflects; 0 is the empty store.
    #[must_use]
    pub const fn version(&self) -> u64 {
        self.version
    }

    pub(crate) const fn set_version(&mut self, version: u64) {
        self.version = version;
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.data.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    /// Unique lookup on the primary key.
    #[must_use]
    pub fn get(&self, key: &str) -> Option<&E> {
        self.data.get(key).map(|row| row.entity.as_ref())
    }

    /// Walk the primary index in key order.
    #[must_use]
    pub fn iter_all(&self) -> PrimaryIter<'_, E> {
        PrimaryIter {
            inner: self.data.iter(),
        }
    }

    /// Walk the named secondary index from the first entry with value
    /// `>= from`, ascending. Every call yields a fresh cursor.
    pub fn iter_from(&self, index: &str, from: &Value) -> Result<IndexIter<'_, E>, InternalError> {
        let slot = self.index_slot(index)?;

        Ok(IndexIter {
            index: E::MODEL.indexes[slot].name,
            range: self.indexes[slot].range_from(from),
            data: &self.data,
        })
    }

    /// Direct access to one secondary index (diagnostics and tests).
    pub fn index(&self, name: &str) -> Result<&IndexStore, InternalError> {
        let slot = self.index_slot(name)?;

        Ok(&self.indexes[slot])
    }

    /// Insert `entity`, replacing any live row under the same key.
    ///
    /// Stale secondary entries are removed before the new ones are filed, so
    /// a replaced record never shows up under its old values.
    pub(crate) fn put(&mut self, entity: E) -> Result<PutOutcome<E>, InternalError> {
        let key = entity.key().to_string();
        let (replaced, removes) = match self.delete(&key)? {
            Some((prev, removes)) => (Some(prev), removes),
            None => (None, 0),
        };

        let seq = self.next_seq;
        self.next_seq = self.next_seq.saturating_add(1);

        let mut inserts = 0;
        for (model, store) in E::MODEL.indexes.iter().zip(self.indexes.iter_mut()) {
            let index_key = IndexKey::new(model.value_of(&entity), seq);
            if store.insert(index_key, key.clone()).is_some() {
                return Err(InternalError::index_corruption(format!(
                    "index '{}' already held an entry at seq {seq}",
                    model.name
                )));
            }
            inserts += 1;
        }

        let row = DataRow {
            entity: Arc::new(entity),
            seq,
        };
        if self.data.insert(key.clone(), row).is_some() {
            return Err(InternalError::store_corruption(format!(
                "primary key '{key}' still live after removal"
            )));
        }

        Ok(PutOutcome {
            replaced,
            inserts,
            removes,
        })
    }

    /// Remove the live row under `key` from the primary and every secondary
    /// index. Returns the removed record and the number of index entries
    /// dropped.
    pub(crate) fn delete(&mut self, key: &str) -> Result<Option<(Arc<E>, u64)>, InternalError> {
        let Some(row) = self.data.remove(key) else {
            return Ok(None);
        };

        let mut removes = 0;
        for (model, store) in E::MODEL.indexes.iter().zip(self.indexes.iter_mut()) {
            let index_key = IndexKey::new(model.value_of(&row.entity), row.seq);
            match store.remove(&index_key) {
                Some(owner) if owner == key => removes += 1,
                Some(owner) => {
                    return Err(InternalError::index_corruption(format!(
                        "index '{}' entry {index_key:?} pointed at '{owner}', expected '{key}'",
                        model.name
                    )));
                }
                None => {
                    return Err(InternalError::index_corruption(format!(
                        "index '{}' missing entry {index_key:?} for '{key}'",
                        model.name
                    )));
                }
            }
        }

        Ok(Some((row.entity, removes)))
    }

    fn index_slot(&self, name: &str) -> Result<usize, InternalError> {
        E::MODEL.index_slot(name).ok_or_else(|| {
            InternalError::index_unsupported(format!(
                "entity '{}' has no index '{name}'",
                E::MODEL.entity_name
            ))
        })
    }
}

impl<E> Clone for Snapshot<E> {
    fn clone(&self) -> Self {
        Self {
            data: self.data.clone(),
            indexes: self.indexes.clone(),
            next_seq: self.next_seq,
            version: self.version,
        }
    }
}

///
/// PutOutcome
///

#[derive(Debug)]
pub(crate) struct PutOutcome<E> {
    pub(crate) replaced: Option<Arc<E>>,
    pub(crate) inserts: u64,
    pub(crate) removes: u64,
}

///
/// PrimaryIter
///

pub struct PrimaryIter<'a, E> {
    inner: btree_map::Iter<'a, String, DataRow<E>>,
}

impl<'a, E> Iterator for PrimaryIter<'a, E> {
    type Item = &'a E;

    fn next(&mut self) -> Option<Self::Item> {
        self.inner.next().map(|(_, row)| row.entity.as_ref())
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.inner.size_hint()
    }
}

impl<E> ExactSizeIterator for PrimaryIter<'_, E> {}

///
/// IndexIter
///
/// Secondary-index cursor resolving each entry through the primary index of
/// the same snapshot. An entry whose row is gone or was re-filed under a
/// different sequence is index drift and surfaces as corruption.
///

pub struct IndexIter<'a, E> {
    index: &'static str,
    range: IndexRange<'a>,
    data: &'a DataStore<E>,
}

impl<'a, E> Iterator for IndexIter<'a, E> {
    type Item = Result<&'a E, InternalError>;

    fn next(&mut self) -> Option<Self::Item> {
        let (index_key, primary_key) = self.range.next()?;

        let resolved = match self.data.get(primary_key) {
            Some(row) if row.seq == index_key.seq => Ok(row.entity.as_ref()),
            Some(_) => Err(InternalError::index_corruption(format!(
                "index '{}' entry {index_key:?} is stale for '{primary_key}'",
                self.index
            ))),
            None => Err(InternalError::index_corruption(format!(
                "index '{}' entry {index_key:?} points at missing row '{primary_key}'",
                self.index
            ))),
        };

        Some(resolved)
    }
}
