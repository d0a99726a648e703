//! Domain layer: hierarchy construction and traversal
//!
//! This layer is independent of external concerns (no I/O, no CLI, no config loading).

pub mod arena;
pub mod builder;
pub mod error;
pub mod flatten;
pub mod key;
pub mod record;
pub mod tree_display;
pub mod validate;

pub use arena::{HierarchyArena, HierarchyNode};
pub use builder::HierarchyBuilder;
pub use error::{DomainError, DomainResult, HierarchyViolation};
pub use flatten::{LevelOrderFlattener, Traversal};
pub use key::NodeKey;
pub use record::{FieldNames, Record, DEFAULT_ID_FIELD, DEFAULT_PARENT_FIELD};
pub use tree_display::TreeDisplay;
pub use validate::{validate, ValidationMode};
