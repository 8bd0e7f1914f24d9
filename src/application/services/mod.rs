//! Application services
//!
//! Concrete service implementations that orchestrate domain logic.
//! Services depend on the `FileSystem` boundary trait but are themselves
//! concrete structs, not traits.

mod catalog;
mod installer;

pub use catalog::CatalogService;
pub use installer::{ConfigOutcome, InstallObserver, InstallReport, InstallService};
