//! Member type and related structures.
//!
//! Members are the people in the genealogy. Each member has:
//! - A stable unique identifier
//! - Display fields shown in the details panel (username, full name, ...)
//! - A free-form status string ("active" is highlighted)

use std::fmt;

use serde::{Deserialize, Serialize};

/// Stable member identifier.
///
/// Wraps a u32 for efficient storage and WebAssembly interop.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct MemberId(pub u32);

impl MemberId {
    /// Create a new MemberId from a raw u32.
    #[inline]
    pub fn new(id: u32) -> Self {
        Self(id)
    }

    /// Get the raw u32 value.
    #[inline]
    pub fn raw(self) -> u32 {
        self.0
    }
}

impl fmt::Display for MemberId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Member({})", self.0)
    }
}

impl From<u32> for MemberId {
    #[inline]
    fn from(id: u32) -> Self {
        Self(id)
    }
}

impl From<MemberId> for u32 {
    #[inline]
    fn from(id: MemberId) -> Self {
        id.0
    }
}

/// A person in the network.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct Member {
    /// External identifier from the source system.
    #[serde(alias = "distributor_id")]
    pub distributor_id: u32,
    /// Display name drawn inside the node box.
    pub username: String,
    #[serde(alias = "full_name")]
    pub full_name: String,
    pub status: String,
    pub product: String,
    pub category: String,
}

impl Member {
    /// Create a member with only a username set.
    pub fn named(username: impl Into<String>) -> Self {
        Self {
            username: username.into(),
            ..Self::default()
        }
    }

    /// Set the status, builder style.
    pub fn with_status(mut self, status: impl Into<String>) -> Self {
        self.status = status.into();
        self
    }

    /// Whether the status is exactly "active".
    pub fn is_active(&self) -> bool {
        self.status == "active"
    }
}
