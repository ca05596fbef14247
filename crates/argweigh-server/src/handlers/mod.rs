//! HTTP handler modules for the argweigh API.
//!
//! Each sub-module implements thin handlers that parse requests, acquire the
//! service lock, delegate to [`ArgumentService`](crate::service::ArgumentService),
//! and return JSON responses. No business logic lives in handlers.

pub mod arguments;
pub mod graph;
pub mod weights;
