//! CLI argument definitions
//!
//! clap handles the process-level options (verbosity, project and templates
//! directories). The command and its flags are collected raw and interpreted
//! by [`parse_args`]: flags are matched by membership anywhere in the vector
//! and anything unrecognized is ignored. When clap rejects the argument
//! vector, the whole vector is treated as the command vector instead.

use std::path::PathBuf;

use clap::{ArgAction, Parser, ValueHint};

use crate::domain::InstallOptions;

/// Install Copilot workflow prompts, instructions and skills into a project
#[derive(Parser, Debug)]
#[command(name = "flowkit")]
#[command(author, version, about, long_about = None)]
#[command(disable_help_flag = true, disable_help_subcommand = true)]
pub struct Cli {
    /// Increase log verbosity (-v info, -vv debug, -vvv trace)
    #[arg(short, long, action = ArgAction::Count)]
    pub verbose: u8,

    /// Project directory (default: cwd)
    #[arg(short = 'C', long, value_hint = ValueHint::DirPath)]
    pub project_dir: Option<PathBuf>,

    /// Bundled templates directory (overrides config and FLOWKIT_TEMPLATES_DIR)
    #[arg(long, value_hint = ValueHint::DirPath)]
    pub templates_dir: Option<PathBuf>,

    /// Print help
    #[arg(short, long)]
    pub help: bool,

    /// Command followed by its flags
    #[arg(trailing_var_arg = true)]
    pub args: Vec<String>,
}

impl Cli {
    /// Parse process arguments, falling back to the raw vector on clap errors.
    ///
    /// `--version` is still answered by clap.
    pub fn parse_lenient() -> Self {
        Self::parse_lenient_from(std::env::args_os())
    }

    pub fn parse_lenient_from<I, T>(argv: I) -> Self
    where
        I: IntoIterator<Item = T>,
        T: Into<std::ffi::OsString> + Clone,
    {
        let argv: Vec<std::ffi::OsString> = argv.into_iter().map(Into::into).collect();
        match Self::try_parse_from(&argv) {
            Ok(cli) => cli,
            Err(e) if e.kind() == clap::error::ErrorKind::DisplayVersion => e.exit(),
            Err(e) => {
                tracing::debug!("parse_lenient: clap rejected arguments: {}", e.kind());
                Self::from_raw(
                    argv.iter()
                        .skip(1)
                        .map(|a| a.to_string_lossy().into_owned())
                        .collect(),
                )
            }
        }
    }

    /// Cli with default process options and the given command vector.
    pub fn from_raw(args: Vec<String>) -> Self {
        Self {
            verbose: 0,
            project_dir: None,
            templates_dir: None,
            help: false,
            args,
        }
    }

    /// Command and flags for this invocation.
    pub fn invocation(&self) -> Invocation {
        let mut invocation = parse_args(&self.args);
        if self.help {
            invocation.command = Command::Help;
        }
        invocation
    }
}

/// Command named by the first argument.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    Install,
    Update,
    List,
    Help,
    Unknown(String),
}

impl Command {
    fn from_token(token: Option<&str>) -> Self {
        match token {
            None | Some("help") | Some("--help") | Some("-h") => Command::Help,
            Some("install") => Command::Install,
            Some("update") => Command::Update,
            Some("list") => Command::List,
            Some(other) => Command::Unknown(other.to_string()),
        }
    }
}

/// Parsed command vector.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Invocation {
    pub command: Command,
    pub options: InstallOptions,
}

pub const FORCE_FLAGS: [&str; 2] = ["--force", "-f"];
pub const PROMPTS_ONLY_FLAG: &str = "--prompts-only";
pub const PARTIALS_ONLY_FLAG: &str = "--partials-only";
pub const INSTRUCTIONS_ONLY_FLAG: &str = "--instructions-only";
pub const SKILLS_ONLY_FLAG: &str = "--skills-only";
pub const DRY_RUN_FLAG: &str = "--dry-run";

/// Turn the raw command vector into a command and flag set.
///
/// The command is the first argument (`help` when empty). Flags are
/// independent booleans; combinations are not validated.
pub fn parse_args<S: AsRef<str>>(args: &[S]) -> Invocation {
    let has = |flag: &str| args.iter().any(|a| a.as_ref() == flag);

    let options = InstallOptions {
        force: FORCE_FLAGS.iter().any(|f| has(f)),
        prompts_only: has(PROMPTS_ONLY_FLAG),
        partials_only: has(PARTIALS_ONLY_FLAG),
        instructions_only: has(INSTRUCTIONS_ONLY_FLAG),
        skills_only: has(SKILLS_ONLY_FLAG),
        dry_run: has(DRY_RUN_FLAG),
    };

    Invocation {
        command: Command::from_token(args.first().map(|a| a.as_ref())),
        options,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case(&[], Command::Help)]
    #[case(&["help"], Command::Help)]
    #[case(&["--help"], Command::Help)]
    #[case(&["-h"], Command::Help)]
    #[case(&["install"], Command::Install)]
    #[case(&["update", "--dry-run"], Command::Update)]
    #[case(&["list"], Command::List)]
    #[case(&["foo", "--force"], Command::Unknown("foo".into()))]
    fn given_first_argument_when_parsing_then_command(
        #[case] args: &[&str],
        #[case] expected: Command,
    ) {
        assert_eq!(parse_args(args).command, expected);
    }

    #[test]
    fn given_flags_anywhere_when_parsing_then_membership_tested() {
        let inv = parse_args(&["install", "--dry-run", "--bogus", "-f", "--skills-only"]);

        assert_eq!(inv.command, Command::Install);
        assert_eq!(
            inv.options,
            InstallOptions {
                force: true,
                skills_only: true,
                dry_run: true,
                ..Default::default()
            }
        );
    }

    #[test]
    fn given_conflicting_only_flags_when_parsing_then_both_kept() {
        let inv = parse_args(&["install", "--prompts-only", "--partials-only"]);
        assert!(inv.options.prompts_only);
        assert!(inv.options.partials_only);
    }

    #[test]
    fn given_flag_with_suffix_when_parsing_then_not_matched() {
        let inv = parse_args(&["install", "--forced", "--dry-run=true"]);
        assert!(!inv.options.force);
        assert!(!inv.options.dry_run);
    }

    // https://docs.rs/clap/latest/clap/_derive/_tutorial/index.html#testing
    #[test]
    fn verify_cli() {
        use clap::CommandFactory;
        Cli::command().debug_assert();
    }

    #[test]
    fn given_flags_after_command_when_clap_parses_then_passed_through() {
        let cli = Cli::parse_lenient_from(["flowkit", "-v", "install", "--force", "-C", "x"]);
        assert_eq!(cli.verbose, 1);
        assert_eq!(cli.args, vec!["install", "--force", "-C", "x"]);
        assert!(cli.project_dir.is_none());
    }

    #[test]
    fn given_project_dir_before_command_when_parsing_then_process_option() {
        let cli = Cli::parse_lenient_from(["flowkit", "-C", "/tmp/p", "list"]);
        assert_eq!(cli.project_dir, Some(PathBuf::from("/tmp/p")));
        assert_eq!(cli.invocation().command, Command::List);
    }

    #[test]
    fn given_unknown_leading_flag_when_parsing_then_raw_vector_used() {
        let cli = Cli::parse_lenient_from(["flowkit", "--force", "install"]);
        assert_eq!(cli.args, vec!["--force", "install"]);
        assert_eq!(cli.invocation().command, Command::Unknown("--force".into()));
    }

    #[test]
    fn given_help_flag_when_parsing_then_help_command() {
        let cli = Cli::parse_lenient_from(["flowkit", "-h"]);
        assert_eq!(cli.invocation().command, Command::Help);
    }
}
