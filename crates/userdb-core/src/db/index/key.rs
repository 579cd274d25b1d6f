use crate::value::Value;
use std::ops::Bound;

///
/// IndexKey
///
/// Ordered secondary-index key: the indexed value, then the insertion
/// sequence of the row. Equal values therefore keep insertion order.
///

#[derive(Clone, Debug, Eq, Hash, Ord, PartialEq, PartialOrd)]
pub struct IndexKey {
    pub value: Value,
    pub seq: u64,
}

impl IndexKey {
    #[must_use]
    pub const fn new(value: Value, seq: u64) -> Self {
        Self { value, seq }
    }

    /// Lower-bound seek key: sorts before every entry holding `value`.
    #[must_use]
    pub const fn seek(value: Value) -> Bound<Self> {
        Bound::Included(Self::new(value, u64::MIN))
    }
}
