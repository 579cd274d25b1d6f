use crate::{db::index::IndexKey, value::Value};
use std::{
    collections::{BTreeMap, btree_map},
    ops::Bound,
};

/// Lazy cursor over index entries in ascending key order.
pub type IndexRange<'a> = btree_map::Range<'a, IndexKey, String>;

///
/// IndexStore
///
/// One ordered, non-unique secondary index: `(value, seq)` to primary key.
///

#[derive(Clone, Debug, Default)]
pub struct IndexStore {
    entries: BTreeMap<IndexKey, String>,
}

impl IndexStore {
    #[must_use]
    pub const fn new() -> Self {
        Self {
            entries: BTreeMap::new(),
        }
    }

    /// File `primary_key` under `key`; returns the displaced key, if any.
    pub fn insert(&mut self, key: IndexKey, primary_key: String) -> Option<String> {
        self.entries.insert(key, primary_key)
    }

    pub fn remove(&mut self, key: &IndexKey) -> Option<String> {
        self.entries.remove(key)
    }

    #[must_use]
    pub fn get(&self, key: &IndexKey) -> Option<&str> {
        self.entries.get(key).map(String::as_str)
    }

    /// Fresh cursor at the first entry whose value is `>= value`.
    #[must_use]
    pub fn range_from(&self, value: &Value) -> IndexRange<'_> {
        self.entries
            .range((IndexKey::seek(value.clone()), Bound::Unbounded))
    }

    /// Snapshot all entry pairs (diagnostics only).
    #[must_use]
    pub fn entries(&self) -> Vec<(IndexKey, String)> {
        self.entries
            .iter()
            .map(|(k, v)| (k.clone(), v.clone()))
            .collect()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
