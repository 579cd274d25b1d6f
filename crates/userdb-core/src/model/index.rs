use crate::value::Value;
use std::fmt::{self, Display};

///
/// IndexModel
/// Runtime-only descriptor for one ordered, non-unique secondary index.
/// The primary key index is implicit and never listed here.
///

pub struct IndexModel<E> {
    pub name: &'static str,
    pub field: &'static str,
    /// Extracts the indexed value from an entity.
    pub value: fn(&E) -> Value,
}

impl<E> IndexModel<E> {
    #[must_use]
    pub const fn new(name: &'static str, field: &'static str, value: fn(&E) -> Value) -> Self {
        Self { name, field, value }
    }

    #[must_use]
    pub fn value_of(&self, entity: &E) -> Value {
        (self.value)(entity)
    }
}

// Manual Copy + Clone: the derive would demand `E: Copy`.
impl<E> Copy for IndexModel<E> {}

impl<E> Clone for IndexModel<E> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<E> fmt::Debug for IndexModel<E> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("IndexModel")
            .field("name", &self.name)
            .field("field", &self.field)
            .finish_non_exhaustive()
    }
}

impl<E> Display for IndexModel<E> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}({})", self.name, self.field)
    }
}
