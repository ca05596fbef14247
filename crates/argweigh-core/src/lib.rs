//! Argument graph data model for argweigh.
//!
//! - [`graph`]: the graph-consistency store with its symmetric attack relation
//! - [`weights`]: category weight tables and the importance slider mapping
//! - [`snapshot`]: the JSON snapshot document used for import and export

pub mod category;
pub mod error;
pub mod graph;
pub mod id;
pub mod node;
pub mod snapshot;
pub mod weights;

// Re-export commonly used types
pub use category::{CategoryConfig, CategoryDef};
pub use error::CoreError;
pub use graph::{ArgumentGraph, AttackEdge, GraphSnapshot};
pub use id::{ArgumentId, CategoryKey};
pub use node::{ArgumentNode, NodeSpec};
pub use snapshot::{GlobalScores, ScoreMap, SnapshotDocument, SnapshotNode};
pub use weights::{SliderValue, WeightTable};
