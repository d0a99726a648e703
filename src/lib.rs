//! Order hierarchical records so that every parent can be inserted before
//! its children.
//!
//! Records are flat JSON objects that carry an identifier and the identifier
//! of their parent (`null` for the root). They may arrive in any order:
//! [`domain::HierarchyBuilder`] assembles them into a tree in one pass,
//! tolerating children that precede their parents, and
//! [`domain::LevelOrderFlattener`] walks the tree breadth-first.
//!
//! ```
//! let ordered = insertorder::sort_for_insert(
//!     r#"[{"id": 2, "parent_id": 1}, {"id": 1, "parent_id": null}]"#,
//!     "id",
//!     "parent_id",
//! )
//! .unwrap();
//! assert_eq!(ordered, r#"[{"id":1,"parent_id":null},{"id":2,"parent_id":1}]"#);
//! ```

pub mod application;
pub mod cli;
pub mod config;
pub mod domain;
pub mod exitcode;
pub mod util;

use application::{ApplicationResult, SortOptions, SortService};

/// Reorder a JSON array of records for insertion.
///
/// The output is compact JSON with the same objects as the input, root
/// first and level by level after that. Input without a root record yields
/// `[]`.
pub fn sort_for_insert(
    input: &str,
    id_field: &str,
    parent_field: &str,
) -> ApplicationResult<String> {
    let options = SortOptions::default()
        .with_fields(id_field, parent_field)
        .with_pretty(false);
    SortService::new(options).sort_json(input)
}
