//! Application layer: record files and forest services
//!
//! Loads records from disk, applies settings and drives the domain builder.

pub mod error;
pub mod error_ext;
pub mod records;
pub mod services;

pub use error::{ApplicationError, ApplicationResult};
pub use error_ext::IoResultExt;
pub use records::{Record, RecordKey, RecordSchema};
pub use services::ForestService;
