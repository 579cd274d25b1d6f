use crate::error::InternalError;
use parking_lot::Mutex;
use ulid::Generator;

///
/// KeySupplier
///
/// Source of opaque primary keys for records created without one.
/// Every key returned must differ from every key returned before.
///

pub trait KeySupplier: Send + Sync {
    fn next_key(&self) -> Result<String, InternalError>;
}

///
/// UlidKeySupplier
///
/// Monotonic ULID generation; increments within the same millisecond so
/// generated keys sort in generation order. Keeps state behind a mutex.
///

pub struct UlidKeySupplier {
    generator: Mutex<Generator>,
}

impl UlidKeySupplier {
    #[must_use]
    pub fn new() -> Self {
        Self {
            generator: Mutex::new(Generator::new()),
        }
    }
}

impl Default for UlidKeySupplier {
    fn default() -> Self {
        Self::new()
    }
}

impl KeySupplier for UlidKeySupplier {
    fn next_key(&self) -> Result<String, InternalError> {
        let ulid = self.generator.lock().generate().map_err(|err| {
            InternalError::identity_internal(format!("ulid generator exhausted: {err}"))
        })?;

        Ok(ulid.to_string())
    }
}

///
/// TESTS
///
