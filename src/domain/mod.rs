//! Domain layer: install model and listing logic
//!
//! This layer is independent of external concerns (no I/O, no CLI, no config loading).

pub mod category;
pub mod error;
pub mod listing;
pub mod plan;
pub mod project_config;

pub use category::{
    categories_to_install, roots_to_walk, Category, InstallOptions, PARTIALS_DIR, PROMPT_SUFFIX,
    WORKFLOW_PROMPTS,
};
pub use error::DomainError;
pub use listing::{build_listing, PromptListing};
pub use plan::{plan, DestinationTree, InstallPlan, PlannedAction, SourceTree};
pub use project_config::ProjectConfig;

/// Expand `~`, `$VAR` and `${VAR}` in a path-like string.
///
/// Returns the input unchanged if expansion fails.
pub fn expand_env_vars(path: &str) -> String {
    shellexpand::full(path)
        .map(|s| s.into_owned())
        .unwrap_or_else(|_| path.to_string())
}
