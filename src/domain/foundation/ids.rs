//! Identifier newtypes.
//!
//! Wrapping raw platform identifiers in newtypes keeps chat ids and
//! collection ids from being mixed up with ordinary integers and strings.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Unique identifier of a chat session, as assigned by the chat platform.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ChatId(i64);

impl ChatId {
    /// Creates a ChatId from the platform's raw identifier.
    pub fn new(id: i64) -> Self {
        Self(id)
    }

    /// Returns the raw identifier.
    pub fn as_i64(&self) -> i64 {
        self.0
    }
}

impl fmt::Display for ChatId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Opaque identifier of an Unsplash collection.
///
/// The upstream API serves both legacy numeric ids and newer alphanumeric
/// ones, so the id is kept as an opaque string.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CollectionId(String);

impl CollectionId {
    /// Creates a CollectionId from the upstream identifier.
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Returns the identifier as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for CollectionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}
