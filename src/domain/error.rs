//! Domain-level errors (no external dependencies)

use std::path::PathBuf;
use thiserror::Error;

/// Domain errors represent violations of the install model itself.
/// These are independent of infrastructure concerns.
#[derive(Error, Debug)]
pub enum DomainError {
    #[error("template path escapes its category root: {0}")]
    PathOutsideRoot(PathBuf),

    #[error("invalid project config: {message}")]
    InvalidProjectConfig { message: String },
}
