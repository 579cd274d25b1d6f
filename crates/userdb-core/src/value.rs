use derive_more::Display;
use serde::{Deserialize, Serialize};

///
/// Value
///
/// Indexable field value extracted from an entity.
/// The derived order is the index order: variants compare by rank first,
/// so an index never interleaves ints and text.
///

#[derive(Clone, Debug, Deserialize, Display, Eq, Hash, Ord, PartialEq, PartialOrd, Serialize)]
pub enum Value {
    Int(i64),

    #[display("{_0:?}")]
    Text(String),
}

impl From<i64> for Value {
    fn from(v: i64) -> Self {
        Self::Int(v)
    }
}

impl From<i32> for Value {
    fn from(v: i32) -> Self {
        Self::Int(i64::from(v))
    }
}

impl From<&str> for Value {
    fn from(v: &str) -> Self {
        Self::Text(v.to_string())
    }
}

impl From<String> for Value {
    fn from(v: String) -> Self {
        Self::Text(v)
    }
}

///
/// TESTS
///
