//! Store configuration.
//!
//! Loading is the caller's concern; this module only defines the shape and
//! its defaults so any serde source can populate it.

use serde::{Deserialize, Serialize};

///
/// DbConfig
///

#[derive(Clone, Copy, Debug, Default, Deserialize, Eq, PartialEq, Serialize)]
#[serde(default)]
pub struct DbConfig {
    pub write_mode: WriteMode,
}

impl DbConfig {
    #[must_use]
    pub const fn with_write_mode(mut self, write_mode: WriteMode) -> Self {
        self.write_mode = write_mode;
        self
    }
}

///
/// WriteMode
///
/// What `begin_write` does when another write transaction holds the slot.
///

#[derive(Clone, Copy, Debug, Default, Deserialize, Eq, PartialEq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum WriteMode {
    /// Wait until the current writer commits or releases.
    #[default]
    Block,

    /// Return a conflict error immediately.
    FailFast,
}

///
/// TESTS
///
