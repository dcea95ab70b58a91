//! Wire DTOs for the todo store.
//!
//! # Design
//! These types mirror the store's document shape (`_id` / `todo`) but are
//! defined independently from the mock-server crate. Integration tests catch
//! any schema drift between the two.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Opaque, server-assigned identifier of a todo item.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TodoId(String);

impl TodoId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for TodoId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for TodoId {
    fn from(id: &str) -> Self {
        Self(id.to_string())
    }
}

/// A single todo item as returned by the store. Extra fields the store may
/// attach (timestamps, version counters) are ignored.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct TodoItem {
    #[serde(rename = "_id")]
    pub id: TodoId,
    #[serde(rename = "todo")]
    pub text: String,
}

/// Request payload for both create and update.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct TodoPayload {
    pub todo: String,
}
