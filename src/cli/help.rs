//! Static usage text

use crate::domain::WORKFLOW_PROMPTS;

/// Workflow prompts as slash commands joined with arrows.
pub fn workflow_chain() -> String {
    WORKFLOW_PROMPTS
        .iter()
        .map(|p| format!("/{p}"))
        .collect::<Vec<_>>()
        .join(" → ")
}

/// Usage text printed by `help`, `--help`, `-h`, no arguments, and after an
/// unknown command.
pub fn help_text() -> String {
    let mut text = String::from(
        "flowkit - install Copilot workflow prompts into your project

USAGE:
    flowkit [-v] [-C <dir>] [--templates-dir <dir>] <command> [flags]

COMMANDS:
    install     Copy prompts, instructions and skills into .github/
    update      Same as install, overwriting existing files (implies --force)
    list        Show bundled prompts and partials
    help        Show this help

FLAGS (install, update):
    -f, --force             Overwrite existing files
    --prompts-only          Only install prompts (partials included)
    --partials-only         Only install prompt partials
    --instructions-only     Only install instructions
    --skills-only           Only install skills
    --dry-run               Show what would be installed without writing anything

",
    );

    text.push_str("WORKFLOW:\n");
    for (i, prompt) in WORKFLOW_PROMPTS.iter().enumerate() {
        text.push_str(&format!("    {}. /{}\n", i + 1, prompt));
    }

    text.push_str(
        "
EXAMPLES:
    flowkit install
    flowkit install --dry-run
    flowkit update --prompts-only
    flowkit list",
    );
    text
}
