//! Module: service
//! Responsibility: request/response shapes and the mapping from query
//! outcomes to status codes.
//! Does not own: transport framing; callers serialize the responses.
//! Boundary: validation failures become `INVALID_QUERY`; internal faults are
//! returned as `Err` and never encoded as a status.


use crate::{
    config::DbConfig,
    db::Db,
    error::{Error, InternalError},
    query::{AgeRange, UserQuery},
    types::{KeySupplier, UlidKeySupplier},
    user::User,
};
use serde::{Deserialize, Serialize};

///
/// StatusCode
///

#[derive(Clone, Copy, Debug, Deserialize, Eq, PartialEq, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum StatusCode {
    Success,
    InvalidQuery,
}

///
/// CreateReq
///

#[derive(Clone, Debug, Default, Deserialize, Eq, PartialEq, Serialize)]
pub struct CreateReq {
    pub user: User,
}

///
/// CreateResp
/// `key` is the stored key, generated when the request left it empty.
///

#[derive(Clone, Debug, Deserialize, Eq, PartialEq, Serialize)]
pub struct CreateResp {
    pub status: StatusCode,
    pub key: String,
}

///
/// GetReq
///

#[derive(Clone, Debug, Default, Deserialize, Eq, PartialEq, Serialize)]
pub struct GetReq {
    pub key: String,
}

///
/// SearchAgeReq
///

#[derive(Clone, Copy, Debug, Default, Deserialize, Eq, PartialEq, Serialize)]
pub struct SearchAgeReq {
    #[serde(default)]
    pub age_range: Option<AgeRange>,
}

///
/// SearchNameReq
///

#[derive(Clone, Debug, Default, Deserialize, Eq, PartialEq, Serialize)]
pub struct SearchNameReq {
    #[serde(default)]
    pub query: String,
}

///
/// RecordsResp
///
/// Shared response for every read operation. Empty results are a success
/// with no records; `message` is set only for `INVALID_QUERY`.
///

#[derive(Clone, Debug, Deserialize, Eq, PartialEq, Serialize)]
pub struct RecordsResp {
    pub status: StatusCode,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    pub records: Vec<User>,
}

impl RecordsResp {
    fn success(records: Vec<User>) -> Self {
        Self {
            status: StatusCode::Success,
            message: None,
            records,
        }
    }

    fn invalid(message: String) -> Self {
        Self {
            status: StatusCode::InvalidQuery,
            message: Some(message),
            records: Vec::new(),
        }
    }

    fn from_result(result: Result<Vec<User>, Error>) -> Result<Self, InternalError> {
        match result {
            Ok(records) => Ok(Self::success(records)),
            Err(Error::Query(err)) => {
                tracing::debug!(error = %err, "invalid query");
                Ok(Self::invalid(err.to_string()))
            }
            Err(Error::Internal(err)) => {
                tracing::error!(error = %err.display_with_class(), "query failed");
                Err(err)
            }
        }
    }
}

///
/// UserService
///
/// Owns the user store and the key supplier; the entry point a transport
/// collaborator calls into.
///

pub struct UserService {
    db: Db<User>,
    keys: Box<dyn KeySupplier>,
}

impl UserService {
    /// Build a service with ULID keys.
    pub fn new(config: DbConfig) -> Result<Self, InternalError> {
        Self::with_key_supplier(config, Box::new(UlidKeySupplier::new()))
    }

    pub fn with_key_supplier(
        config: DbConfig,
        keys: Box<dyn KeySupplier>,
    ) -> Result<Self, InternalError> {
        Ok(Self {
            db: Db::new(config)?,
            keys,
        })
    }

    /// The underlying store, for metrics and direct transactions.
    #[must_use]
    pub const fn db(&self) -> &Db<User> {
        &self.db
    }

    const fn query(&self) -> UserQuery<'_> {
        UserQuery::new(&self.db)
    }

    pub fn create(&self, req: CreateReq) -> Result<CreateResp, InternalError> {
        let user = self
            .query()
            .create(self.keys.as_ref(), req.user)
            .inspect_err(|err| {
                tracing::error!(error = %err.display_with_class(), "create failed");
            })?;

        Ok(CreateResp {
            status: StatusCode::Success,
            key: user.key,
        })
    }

    pub fn list(&self) -> Result<RecordsResp, InternalError> {
        RecordsResp::from_result(self.query().list())
    }

    pub fn get(&self, req: &GetReq) -> Result<RecordsResp, InternalError> {
        RecordsResp::from_result(
            self.query()
                .get(&req.key)
                .map(|user| user.into_iter().collect()),
        )
    }

    pub fn search_age(&self, req: SearchAgeReq) -> Result<RecordsResp, InternalError> {
        RecordsResp::from_result(self.query().search_age(req.age_range))
    }

    pub fn search_name(&self, req: &SearchNameReq) -> Result<RecordsResp, InternalError> {
        RecordsResp::from_result(self.query().search_name(&req.query))
    }
}
