use std::{
    collections::{BTreeMap, btree_map},
    sync::Arc,
};

///
/// DataRow
///
/// One live record plus the insertion sequence it was filed under.
/// The sequence ties the row to its secondary index entries.
///

#[derive(Debug)]
pub struct DataRow<E> {
    pub entity: Arc<E>,
    pub seq: u64,
}

impl<E> Clone for DataRow<E> {
    fn clone(&self) -> Self {
        Self {
            entity: Arc::clone(&self.entity),
            seq: self.seq,
        }
    }
}

///
/// DataStore
///
/// Unique primary index: primary key to live row, iterated in key order.
///

#[derive(Debug)]
pub struct DataStore<E> {
    rows: BTreeMap<String, DataRow<E>>,
}

impl<E> DataStore<E> {
    #[must_use]
    pub const fn new() -> Self {
        Self {
            rows: BTreeMap::new(),
        }
    }

    #[must_use]
    pub fn get(&self, key: &str) -> Option<&DataRow<E>> {
        self.rows.get(key)
    }

    pub fn insert(&mut self, key: String, row: DataRow<E>) -> Option<DataRow<E>> {
        self.rows.insert(key, row)
    }

    pub fn remove(&mut self, key: &str) -> Option<DataRow<E>> {
        self.rows.remove(key)
    }

    pub fn iter(&self) -> btree_map::Iter<'_, String, DataRow<E>> {
        self.rows.iter()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}

impl<E> Clone for DataStore<E> {
    fn clone(&self) -> Self {
        Self {
            rows: self.rows.clone(),
        }
    }
}

impl<E> Default for DataStore<E> {
    fn default() -> Self {
        Self::new()
    }
}
