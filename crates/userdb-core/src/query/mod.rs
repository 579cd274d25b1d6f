//! Module: query
//! Responsibility: the user operations (create, list, get, age range, name
//! search) expressed as exactly one transaction each.
//! Does not own: request/response shapes or status codes (service facade).
//! Boundary: validation failures become `QueryError`; everything else that
//! fails is an `InternalError` fault.


use crate::{
    db::Db,
    error::{Error, InternalError},
    obs::{ExecKind, MetricsEvent, PlanKind, sink::Span},
    types::KeySupplier,
    user::User,
    value::Value,
};
use serde::{Deserialize, Serialize};
use thiserror::Error as ThisError;

///
/// QueryError
/// Recoverable validation failure; no transaction is opened.
///

#[derive(Clone, Debug, Eq, PartialEq, ThisError)]
pub enum QueryError {
    #[error("field AgeRange{{From: int, ToIncluded: int}} missing")]
    MissingAgeRange,

    #[error("the From field must be lower or equal to ToIncluded (got {from} > {to_included})")]
    InvertedAgeRange { from: i32, to_included: i32 },

    #[error("query cannot be empty")]
    EmptyNameQuery,

    #[error("key cannot be empty")]
    EmptyKey,
}

///
/// AgeRange
/// Inclusive on both ends.
///

#[derive(Clone, Copy, Debug, Deserialize, Eq, PartialEq, Serialize)]
pub struct AgeRange {
    pub from: i32,
    pub to_included: i32,
}

impl AgeRange {
    #[must_use]
    pub const fn new(from: i32, to_included: i32) -> Self {
        Self { from, to_included }
    }

    pub const fn validate(self) -> Result<Self, QueryError> {
        if self.from > self.to_included {
            return Err(QueryError::InvertedAgeRange {
                from: self.from,
                to_included: self.to_included,
            });
        }

        Ok(self)
    }

    #[must_use]
    pub const fn contains(self, age: i32) -> bool {
        self.from <= age && age <= self.to_included
    }
}

///
/// UserQuery
///
/// Query layer over a borrowed user store. Every operation opens one
/// transaction and commits or releases it before returning, so results are
/// always materialized copies.
///

#[derive(Clone, Copy)]
pub struct UserQuery<'db> {
    db: &'db Db<User>,
}

impl<'db> UserQuery<'db> {
    #[must_use]
    pub const fn new(db: &'db Db<User>) -> Self {
        Self { db }
    }

    /// Store `user`, replacing any record under the same key. An empty key is
    /// filled from `keys`. Returns the record as stored.
    /// There is no validation path: any error is a fault.
    pub fn create(&self, keys: &dyn KeySupplier, mut user: User) -> Result<User, InternalError> {
        let mut span = Span::new(self.db.sink(), ExecKind::Create);

        if user.key.is_empty() {
            user.key = keys.next_key()?;
        }

        let mut txn = self.db.begin_write()?;
        let replaced = txn.put(user.clone())?;
        let version = txn.commit();

        tracing::debug!(
            key = %user.key,
            replaced = replaced.is_some(),
            version,
            "user stored"
        );
        span.set_rows(1);

        Ok(user)
    }

    /// Every record in primary-key order.
    pub fn list(&self) -> Result<Vec<User>, Error> {
        let mut span = Span::new(self.db.sink(), ExecKind::List);
        self.db.record(MetricsEvent::Plan {
            kind: PlanKind::FullScan,
        });

        let txn = self.db.begin_read();
        let users: Vec<User> = txn.iter_all().cloned().collect();
        txn.release();

        self.record_rows(&mut span, users.len(), users.len());

        Ok(users)
    }

    /// The record under `key`, if any.
    pub fn get(&self, key: &str) -> Result<Option<User>, Error> {
        let mut span = Span::new(self.db.sink(), ExecKind::Get);
        if key.is_empty() {
            return Err(QueryError::EmptyKey.into());
        }
        self.db.record(MetricsEvent::Plan {
            kind: PlanKind::Keys,
        });

        let txn = self.db.begin_read();
        let user = txn.get(key).cloned();
        txn.release();

        let found = usize::from(user.is_some());
        self.record_rows(&mut span, found, found);

        Ok(user)
    }

    /// Records with `from <= age <= to_included`, ascending by age.
    ///
    /// Seeks the age index at `from` and stops at the first entry past
    /// `to_included`, so only the matching entries plus one are visited.
    pub fn search_age(&self, range: Option<AgeRange>) -> Result<Vec<User>, Error> {
        let mut span = Span::new(self.db.sink(), ExecKind::SearchAge);
        let range = range.ok_or(QueryError::MissingAgeRange)?.validate()?;
        self.db.record(MetricsEvent::Plan {
            kind: PlanKind::Range,
        });

        let txn = self.db.begin_read();
        let mut users = Vec::new();
        let mut scanned = 0;
        for row in txn.iter_from(User::AGE_INDEX, &Value::from(range.from))? {
            let user = row?;
            scanned += 1;
            if user.age > range.to_included {
                break;
            }
            users.push(user.clone());
        }
        txn.release();

        self.record_rows(&mut span, scanned, users.len());

        Ok(users)
    }

    /// Records whose first or last name contains `query` (case-sensitive).
    /// There is no name index, so this walks every record.
    pub fn search_name(&self, query: &str) -> Result<Vec<User>, Error> {
        let mut span = Span::new(self.db.sink(), ExecKind::SearchName);
        if query.is_empty() {
            return Err(QueryError::EmptyNameQuery.into());
        }
        self.db.record(MetricsEvent::Plan {
            kind: PlanKind::FullScan,
        });

        let txn = self.db.begin_read();
        let scanned = txn.len();
        let users: Vec<User> = txn
            .iter_all()
            .filter(|user| user.name_contains(query))
            .cloned()
            .collect();
        txn.release();

        self.record_rows(&mut span, scanned, users.len());

        Ok(users)
    }

    fn record_rows(&self, span: &mut Span<'_>, scanned: usize, returned: usize) {
        self.db.record(MetricsEvent::RowsScanned {
            rows_scanned: scanned as u64,
        });
        span.set_rows(returned as u64);
    }
}
