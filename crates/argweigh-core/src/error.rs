//! Core error types for argweigh-core.
//!
//! Uses `thiserror` for structured, matchable error variants. Every mutating
//! graph operation validates fully before writing, so returning one of these
//! errors always leaves the graph untouched.

use thiserror::Error;

use crate::id::ArgumentId;

/// Errors produced by the argweigh-core crate.
#[derive(Debug, Error)]
pub enum CoreError {
    /// A required field is missing or empty, or holds a value the graph
    /// cannot accept (unknown category, changed id).
    #[error("invalid {field}: {reason}")]
    Validation { field: &'static str, reason: String },

    /// A node with this id already exists.
    #[error("duplicate argument id: '{id}'")]
    DuplicateId { id: ArgumentId },

    /// No node with this id exists.
    #[error("argument not found: '{id}'")]
    NotFound { id: ArgumentId },

    /// The attack relation is not symmetric.
    #[error("graph inconsistency: {reason}")]
    GraphInconsistency { reason: String },

    /// Snapshot JSON could not be parsed or written.
    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

impl CoreError {
    pub(crate) fn validation(field: &'static str, reason: impl Into<String>) -> Self {
        CoreError::Validation {
            field,
            reason: reason.into(),
        }
    }
}
