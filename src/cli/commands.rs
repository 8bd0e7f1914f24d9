//! Command dispatch
//!
//! Each invocation runs exactly one of install, update, list or help.
//! User-facing messages go to the [`Console`]; diagnostics go to tracing.

use tracing::{debug, instrument};

use crate::application::services::{ConfigOutcome, InstallReport, InstallService};
use crate::application::ApplicationError;
use crate::cli::args::{Command, Invocation};
use crate::cli::error::{CliError, CliResult};
use crate::cli::help::{help_text, workflow_chain};
use crate::cli::output::Console;
use crate::domain::{InstallOptions, PlannedAction, PromptListing};
use crate::exitcode;
use crate::infrastructure::di::ServiceContainer;

/// Run one invocation and return the process exit code.
pub fn run(invocation: &Invocation, container: &ServiceContainer, console: &mut Console) -> i32 {
    match execute_command(invocation, container, console) {
        Ok(()) => exitcode::OK,
        Err(e) => {
            console.error(&e);
            if let CliError::Usage(_) = e {
                console.info(&help_text());
            }
            e.exit_code()
        }
    }
}

pub fn execute_command(
    invocation: &Invocation,
    container: &ServiceContainer,
    console: &mut Console,
) -> CliResult<()> {
    debug!("execute_command: {:?}", invocation.command);
    match &invocation.command {
        Command::Install => _install(container, console, invocation.options),
        Command::Update => _install(container, console, invocation.options.forced()),
        Command::List => _list(container, console),
        Command::Help => {
            console.info(&help_text());
            Ok(())
        }
        Command::Unknown(name) => Err(CliError::Usage(format!("unknown command: {name}"))),
    }
}

#[instrument(skip(container, console))]
fn _install(
    container: &ServiceContainer,
    console: &mut Console,
    options: InstallOptions,
) -> CliResult<()> {
    let installer = container.installer();

    if options.dry_run {
        console.header(&format!(
            "Dry run: previewing install into {}",
            container.project_dir.display()
        ));
    } else {
        console.header(&format!(
            "Installing flowkit templates into {}",
            container.project_dir.display()
        ));
    }

    let report = {
        let mut observer = |action: &PlannedAction, dry_run: bool| {
            report_action(console, &installer, action, dry_run)
        };
        installer.install(&options, &mut observer)?
    };

    report_config(console, &installer, &report);
    report_summary(console, &report);
    Ok(())
}

fn report_action(
    console: &mut Console,
    installer: &InstallService,
    action: &PlannedAction,
    dry_run: bool,
) {
    match action {
        PlannedAction::Copy { to, overwrite, .. } => {
            let path = installer.display_path(to);
            match (dry_run, *overwrite) {
                (true, false) => console.info(&format!("Would copy: {path}")),
                (true, true) => console.info(&format!("Would overwrite: {path}")),
                (false, false) => console.success(&format!("Copied {path}")),
                (false, true) => console.success(&format!("Updated {path}")),
            }
        }
        PlannedAction::Skip(path) => {
            console.warning(&format!(
                "Skipping existing file: {}",
                installer.display_path(path)
            ));
        }
        PlannedAction::CreateDir(dir) => {
            debug!(
                "create dir {} (dry_run={})",
                installer.display_path(dir),
                dry_run
            );
        }
    }
}

fn report_config(console: &mut Console, installer: &InstallService, report: &InstallReport) {
    let path = installer.display_path(&report.config_path);
    match report.config {
        ConfigOutcome::Created => console.success(&format!("Created config file: {path}")),
        ConfigOutcome::WouldCreate => console.info(&format!("Would create config file: {path}")),
        ConfigOutcome::AlreadyPresent => {
            debug!("config file kept: {path}");
        }
    }
}

fn report_summary(console: &mut Console, report: &InstallReport) {
    let count = report.file_count();
    if report.dry_run {
        console.info(&format!("Dry run complete: {count} file(s) would be installed"));
        return;
    }

    if count > 0 {
        console.success(&format!("Installed {count} file(s)"));
        console.header("Next steps:");
        let config_name = report
            .config_path
            .file_name()
            .map(|n| n.to_string_lossy())
            .unwrap_or_default();
        console.detail(&format!(
            "1. Edit {config_name} with your Jira project key and branch settings"
        ));
        console.detail("2. Open Copilot Chat in agent mode");
        console.detail(&format!("3. Run the workflow prompts in order: {}", workflow_chain()));
    } else {
        console.warning("No files were installed (all files already exist)");
        console.detail("Use --force to overwrite existing files");
    }
}

#[instrument(skip(container, console))]
fn _list(container: &ServiceContainer, console: &mut Console) -> CliResult<()> {
    let listing = match container.catalog().list() {
        Ok(listing) => listing,
        Err(ApplicationError::MissingResource(path)) => {
            console.error(&format!("prompts directory not found: {}", path.display()));
            return Ok(());
        }
        Err(e) => return Err(e.into()),
    };
    print_listing(console, &listing);
    Ok(())
}

fn print_listing(console: &mut Console, listing: &PromptListing) {
    console.header("Workflow prompts:");
    for (i, id) in listing.workflow.iter().enumerate() {
        console.detail(&format!("{}. /{}", i + 1, id));
    }

    if !listing.utility.is_empty() {
        console.info("");
        console.header("Utility prompts:");
        for id in &listing.utility {
            console.detail(&format!("• /{id}"));
        }
    }

    if !listing.partials.is_empty() {
        console.info("");
        console.header("Partials:");
        for id in &listing.partials {
            console.detail(&format!("• {id}"));
        }
    }
}
