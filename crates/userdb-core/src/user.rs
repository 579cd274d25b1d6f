use crate::{
    model::{entity::EntityModel, index::IndexModel},
    traits::EntityKind,
    value::Value,
};
use serde::{Deserialize, Serialize};

///
/// User
///
/// The stored record. `key` is the primary key; an empty key on create asks
/// the key supplier for one. `age` is served by an ordered secondary index;
/// the name fields are only searched by scan.
///

#[derive(Clone, Debug, Default, Deserialize, Eq, Hash, PartialEq, Serialize)]
#[serde(default)]
pub struct User {
    pub key: String,
    pub age: i32,
    pub first_name: String,
    pub last_name: String,
}

impl User {
    /// Name of the secondary index on `age`.
    pub const AGE_INDEX: &'static str = "age";

    #[must_use]
    pub fn new(
        key: impl Into<String>,
        age: i32,
        first_name: impl Into<String>,
        last_name: impl Into<String>,
    ) -> Self {
        Self {
            key: key.into(),
            age,
            first_name: first_name.into(),
            last_name: last_name.into(),
        }
    }

    /// Case-sensitive, unanchored substring match on first or last name.
    #[must_use]
    pub fn name_contains(&self, query: &str) -> bool {
        self.first_name.contains(query) || self.last_name.contains(query)
    }
}

fn age_value(user: &User) -> Value {
    Value::from(user.age)
}

static USER_INDEXES: [IndexModel<User>; 1] = [IndexModel::new(User::AGE_INDEX, "age", age_value)];

static USER_MODEL: EntityModel<User> = EntityModel {
    entity_name: "user",
    primary_key: "key",
    indexes: &USER_INDEXES,
};

impl EntityKind for User {
    const MODEL: &'static EntityModel<Self> = &USER_MODEL;

    fn key(&self) -> &str {
        &self.key
    }
}

///
/// TESTS
///

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn name_contains_checks_both_fields() {
        let user = User::new("k", 30, "Anna", "Banner");

        assert!(user.name_contains("nna"));
        assert!(user.name_contains("ann"));
        assert!(user.name_contains("Ban"));
        assert!(!user.name_contains("ANN"));
        assert!(!User::new("k", 30, "Bob", "Smith").name_contains("ann"));
    }

    #[test]
    fn model_validates() {
        User::MODEL.validate().expect("user model is valid");
        assert_eq!(User::MODEL.index_slot(User::AGE_INDEX), Some(0));
    }

    #[test]
    fn missing_fields_deserialize_to_defaults() {
        let user: User = serde_json::from_str(r#"{"age":41,"first_name":"Ada"}"#).unwrap();

        assert_eq!(user, User::new("", 41, "Ada", ""));
    }
}
