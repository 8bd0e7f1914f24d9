//! CLI-level errors (wraps infrastructure errors)

use thiserror::Error;

use crate::application::ApplicationError;
use crate::infrastructure::InfraError;

/// CLI errors are the top-level error type.
/// These are what get displayed to the user.
#[derive(Error, Debug)]
pub enum CliError {
    #[error("{0}")]
    Infra(#[from] InfraError),

    #[error("{0}")]
    Usage(String),
}

impl From<ApplicationError> for CliError {
    fn from(e: ApplicationError) -> Self {
        CliError::Infra(InfraError::Application(e))
    }
}

/// Result type for CLI operations.
pub type CliResult<T> = Result<T, CliError>;

/// Closed set of failure kinds, for callers that must tell them apart.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// Unrecognized command
    Usage,
    /// Bundled templates not found
    MissingResource,
    /// Filesystem operation failed
    IoFailure,
    /// Tool settings could not be loaded
    Config,
    /// Template tree violates the install model
    Internal,
}

impl CliError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            CliError::Usage(_) => ErrorKind::Usage,
            CliError::Infra(InfraError::Io { .. }) => ErrorKind::IoFailure,
            CliError::Infra(InfraError::Application(e)) => match e {
                ApplicationError::MissingResource(_) => ErrorKind::MissingResource,
                ApplicationError::OperationFailed { .. } => ErrorKind::IoFailure,
                ApplicationError::Config { .. } => ErrorKind::Config,
                ApplicationError::Domain(_) => ErrorKind::Internal,
            },
        }
    }

    /// Get the appropriate exit code for this error.
    pub fn exit_code(&self) -> i32 {
        match self.kind() {
            ErrorKind::Usage => crate::exitcode::USAGE,
            ErrorKind::MissingResource => crate::exitcode::NOINPUT,
            ErrorKind::IoFailure => crate::exitcode::IOERR,
            ErrorKind::Config => crate::exitcode::CONFIG,
            ErrorKind::Internal => crate::exitcode::SOFTWARE,
        }
    }
}
