//! Core runtime for userdb: an in-memory user store with an ordered age
//! index, snapshot-isolated transactions, the query layer, and the service
//! facade that maps query outcomes to status codes.
#![warn(unreachable_pub)]

// public exports are one module level down
pub mod config;
pub mod db;
pub mod error;
pub mod model;
pub mod obs;
pub mod query;
pub mod service;
pub mod traits;
pub mod types;
pub mod user;
pub mod value;

// test
#[cfg(test)]
pub(crate) mod test_fixtures;

///
/// Prelude
///
/// Prelude contains only domain vocabulary.
/// No stores, transactions, or metrics types are re-exported here.
///

pub mod prelude {
    pub use crate::{
        config::{DbConfig, WriteMode},
        error::{Error, InternalError},
        model::{entity::EntityModel, index::IndexModel},
        query::{AgeRange, QueryError},
        service::{StatusCode, UserService},
        traits::EntityKind,
        types::KeySupplier,
        user::User,
        value::Value,
    };
}
