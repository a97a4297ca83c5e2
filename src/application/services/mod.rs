//! Application services
//!
//! Concrete services that orchestrate the domain builder with loaded settings.

mod forest;

pub use forest::ForestService;
