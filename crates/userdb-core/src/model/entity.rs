use crate::{error::InternalError, model::index::IndexModel};
use std::collections::BTreeSet;

///
/// EntityModel
/// Minimal runtime model for one entity: its name, the field that holds the
/// unique primary key, and the secondary indexes maintained alongside it.
///

pub struct EntityModel<E: 'static> {
    /// Stable external name used in diagnostics.
    pub entity_name: &'static str,
    /// Field holding the unique primary key.
    pub primary_key: &'static str,
    /// Secondary index definitions; position is the index slot in a snapshot.
    pub indexes: &'static [IndexModel<E>],
}

impl<E: 'static> EntityModel<E> {
    /// Check the model once at startup.
    ///
    /// A store cannot be built over a model that fails here.
    pub fn validate(&self) -> Result<(), InternalError> {
        if self.entity_name.is_empty() {
            return Err(InternalError::schema_invariant("entity name is empty"));
        }
        if self.primary_key.is_empty() {
            return Err(InternalError::schema_invariant(format!(
                "entity '{}' has an empty primary key field",
                self.entity_name
            )));
        }
        if self.indexes.is_empty() {
            return Err(InternalError::schema_invariant(format!(
                "entity '{}' declares no secondary index",
                self.entity_name
            )));
        }

        let mut seen = BTreeSet::new();
        for index in self.indexes {
            if index.name.is_empty() || index.field.is_empty() {
                return Err(InternalError::schema_invariant(format!(
                    "entity '{}' declares an index with an empty name or field",
                    self.entity_name
                )));
            }
            if index.name == self.primary_key {
                return Err(InternalError::schema_invariant(format!(
                    "index '{}' on entity '{}' shadows the primary key",
                    index.name, self.entity_name
                )));
            }
            if !seen.insert(index.name) {
                return Err(InternalError::schema_invariant(format!(
                    "duplicate index '{}' on entity '{}'",
                    index.name, self.entity_name
                )));
            }
        }

        Ok(())
    }

    /// Slot of the named secondary index, if declared.
    #[must_use]
    pub fn index_slot(&self, name: &str) -> Option<usize> {
        self.indexes.iter().position(|index| index.name == name)
    }
}
