//! API request and response types.
//!
//! Snapshot documents and evaluations are served as-is from the core and
//! semantics crates; only request bodies and composite responses live here.

pub mod arguments;
pub mod weights;
