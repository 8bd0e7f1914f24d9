//! CLI layer: argument parsing, command dispatch and console output

pub mod args;
pub mod commands;
pub mod error;
pub mod help;
pub mod output;

pub use args::{parse_args, Cli, Command, Invocation};
pub use commands::{execute_command, run};
pub use error::{CliError, CliResult, ErrorKind};
pub use output::{Console, Severity};
