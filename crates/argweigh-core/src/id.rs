//! String-backed identifier newtypes.
//!
//! Argument ids and category keys are both plain strings on the wire, but
//! keeping them as distinct newtypes stops a `CategoryKey` from being passed
//! where an `ArgumentId` is expected.

use std::borrow::Borrow;
use std::fmt;

use serde::{Deserialize, Serialize};

/// Unique, immutable identifier of an argument node.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ArgumentId(pub String);

/// Key of a configured argument category (e.g. `eco`, `env`).
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CategoryKey(pub String);

impl ArgumentId {
    pub fn new(id: impl Into<String>) -> Self {
        ArgumentId(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl CategoryKey {
    pub fn new(key: impl Into<String>) -> Self {
        CategoryKey(key.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

// Display implementations -- just print the inner value.

impl fmt::Display for ArgumentId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl fmt::Display for CategoryKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for ArgumentId {
    fn from(s: &str) -> Self {
        ArgumentId(s.to_string())
    }
}

impl From<String> for ArgumentId {
    fn from(s: String) -> Self {
        ArgumentId(s)
    }
}

impl From<&str> for CategoryKey {
    fn from(s: &str) -> Self {
        CategoryKey(s.to_string())
    }
}

impl From<String> for CategoryKey {
    fn from(s: String) -> Self {
        CategoryKey(s)
    }
}

// Allow map lookups by `&str`.

impl Borrow<str> for ArgumentId {
    fn borrow(&self) -> &str {
        &self.0
    }
}

impl Borrow<str> for CategoryKey {
    fn borrow(&self) -> &str {
        &self.0
    }
}
