//! Application layer: services and use cases
//!
//! This layer orchestrates domain logic and owns the JSON boundary.

pub mod codec;
pub mod error;
pub mod error_ext;
pub mod services;

pub use codec::{decode_records, encode_records, pretty_print};
pub use error::{ApplicationError, ApplicationResult};
pub use error_ext::IoResultExt;
pub use services::{SortOptions, SortService};
