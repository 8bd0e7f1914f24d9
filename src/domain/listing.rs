//! Grouping of bundled prompts for display

use itertools::Itertools;

use crate::domain::category::{PROMPT_SUFFIX, WORKFLOW_PROMPTS};

/// Bundled prompts grouped the way `list` shows them.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PromptListing {
    /// Workflow prompts present in the bundle, in canonical order
    pub workflow: Vec<String>,
    /// Every other prompt, sorted by name
    pub utility: Vec<String>,
    /// Partial identifiers, sorted, README excluded
    pub partials: Vec<String>,
}

/// Prompt identifier for a file name, if it is a prompt file.
pub fn prompt_id(file_name: &str) -> Option<&str> {
    file_name
        .strip_suffix(PROMPT_SUFFIX)
        .filter(|id| !id.is_empty())
}

/// Partial identifier: file name without its extension, README excluded.
pub fn partial_id(file_name: &str) -> Option<&str> {
    let stem = match file_name.rsplit_once('.') {
        Some((stem, _)) if !stem.is_empty() => stem,
        _ => file_name,
    };
    if stem.eq_ignore_ascii_case("readme") {
        None
    } else {
        Some(stem)
    }
}

/// Partition prompt and partial file names into a listing.
///
/// Workflow order is fixed by [`WORKFLOW_PROMPTS`], independent of the order
/// the names are given in.
pub fn build_listing<S: AsRef<str>>(prompt_files: &[S], partial_files: &[S]) -> PromptListing {
    let ids: Vec<&str> = prompt_files
        .iter()
        .filter_map(|f| prompt_id(f.as_ref()))
        .collect();

    let workflow = WORKFLOW_PROMPTS
        .iter()
        .filter(|w| ids.contains(*w))
        .map(|w| w.to_string())
        .collect();

    let utility = ids
        .iter()
        .filter(|id| !WORKFLOW_PROMPTS.contains(*id))
        .map(|id| id.to_string())
        .sorted()
        .dedup()
        .collect();

    let partials = partial_files
        .iter()
        .filter_map(|f| partial_id(f.as_ref()))
        .map(str::to_string)
        .sorted()
        .dedup()
        .collect();

    PromptListing {
        workflow,
        utility,
        partials,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn given_shuffled_files_when_listing_then_workflow_in_canonical_order() {
        let prompts = [
            "finalize.prompt.md",
            "review.prompt.md",
            "analyze.prompt.md",
            "work.prompt.md",
            "create-pr.prompt.md",
            "notes.txt",
        ];
        let listing = build_listing(&prompts, &[]);

        assert_eq!(listing.workflow, vec!["analyze", "work", "create-pr", "finalize"]);
        assert_eq!(listing.utility, vec!["review"]);
    }

    #[test]
    fn given_partials_with_readme_when_listing_then_readme_excluded() {
        let partials = ["README.md", "jira-context.md", "branch-naming.md"];
        let listing = build_listing::<&str>(&[], &partials);

        assert_eq!(listing.partials, vec!["branch-naming", "jira-context"]);
    }

    #[test]
    fn prompt_id_requires_suffix() {
        assert_eq!(prompt_id("plan.prompt.md"), Some("plan"));
        assert_eq!(prompt_id("plan.md"), None);
        assert_eq!(prompt_id(".prompt.md"), None);
    }
}
