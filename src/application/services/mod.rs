//! Application services
//!
//! Concrete service implementations that orchestrate domain logic.

mod sorting;

pub use sorting::{SortOptions, SortService};
