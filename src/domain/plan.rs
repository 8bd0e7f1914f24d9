//! Install planning: pure mapping from source/destination snapshots to actions
//!
//! The plan is computed without touching the filesystem. A dry run is a plan
//! that is reported but never executed; a real run executes the same plan.

use std::collections::BTreeSet;
use std::path::{Component, Path, PathBuf};

use crate::domain::category::InstallOptions;
use crate::domain::error::DomainError;

/// Snapshot of one bundled category root.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SourceTree {
    /// Absolute source root inside the templates directory
    pub root: PathBuf,
    /// Absolute destination root the tree is mirrored into
    pub dest_root: PathBuf,
    /// Files relative to `root`
    pub files: Vec<PathBuf>,
}

/// Snapshot of what already exists under the destination config root.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DestinationTree {
    pub root: PathBuf,
    pub files: BTreeSet<PathBuf>,
    pub dirs: BTreeSet<PathBuf>,
}

impl DestinationTree {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self {
            root: root.into(),
            ..Default::default()
        }
    }

    pub fn with_file(mut self, path: impl Into<PathBuf>) -> Self {
        self.files.insert(path.into());
        self
    }

    pub fn with_dir(mut self, path: impl Into<PathBuf>) -> Self {
        self.dirs.insert(path.into());
        self
    }

    fn has_dir(&self, path: &Path) -> bool {
        self.dirs.contains(path) || !path.starts_with(&self.root)
    }
}

/// A single step of an install.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PlannedAction {
    /// Directory missing at the destination, created before its first copy
    CreateDir(PathBuf),
    /// Copy bytes verbatim; `overwrite` is set when the destination exists
    Copy {
        from: PathBuf,
        to: PathBuf,
        overwrite: bool,
    },
    /// Destination exists and `force` is off
    Skip(PathBuf),
}

/// Ordered list of actions for one invocation.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct InstallPlan {
    actions: Vec<PlannedAction>,
}

impl InstallPlan {
    pub fn actions(&self) -> &[PlannedAction] {
        &self.actions
    }

    pub fn copy_count(&self) -> usize {
        self.actions
            .iter()
            .filter(|a| matches!(a, PlannedAction::Copy { .. }))
            .count()
    }

    pub fn skip_count(&self) -> usize {
        self.actions
            .iter()
            .filter(|a| matches!(a, PlannedAction::Skip(_)))
            .count()
    }

    pub fn created_dirs(&self) -> impl Iterator<Item = &Path> {
        self.actions.iter().filter_map(|a| match a {
            PlannedAction::CreateDir(p) => Some(p.as_path()),
            _ => None,
        })
    }

    pub fn is_empty(&self) -> bool {
        self.actions.is_empty()
    }
}

/// Compute the install plan.
///
/// Files are planned in source order. Existing destinations are skipped
/// unless `force` is set, in which case they are overwritten. Missing
/// destination directories are created parents first, once each, and only
/// when a copy needs them.
pub fn plan(
    sources: &[SourceTree],
    destination: &DestinationTree,
    options: &InstallOptions,
) -> Result<InstallPlan, DomainError> {
    let mut actions = Vec::new();
    let mut planned_dirs: BTreeSet<PathBuf> = BTreeSet::new();

    for source in sources {
        for rel in &source.files {
            ensure_contained(rel)?;
            let from = source.root.join(rel);
            let to = source.dest_root.join(rel);

            let exists = destination.files.contains(&to);
            if exists && !options.force {
                actions.push(PlannedAction::Skip(to));
                continue;
            }

            if let Some(parent) = to.parent() {
                for dir in missing_dirs(parent, destination, &planned_dirs) {
                    planned_dirs.insert(dir.clone());
                    actions.push(PlannedAction::CreateDir(dir));
                }
            }

            actions.push(PlannedAction::Copy {
                from,
                to,
                overwrite: exists,
            });
        }
    }

    Ok(InstallPlan { actions })
}

/// Ancestors of `dir` (inclusive) that neither exist nor are already planned,
/// outermost first.
fn missing_dirs(
    dir: &Path,
    destination: &DestinationTree,
    planned: &BTreeSet<PathBuf>,
) -> Vec<PathBuf> {
    let mut missing: Vec<PathBuf> = dir
        .ancestors()
        .take_while(|p| !destination.has_dir(p) && !planned.contains(*p))
        .map(Path::to_path_buf)
        .collect();
    missing.reverse();
    missing
}

fn ensure_contained(rel: &Path) -> Result<(), DomainError> {
    let escapes = rel
        .components()
        .any(|c| !matches!(c, Component::Normal(_) | Component::CurDir));
    if escapes {
        return Err(DomainError::PathOutsideRoot(rel.to_path_buf()));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn prompts_tree(files: &[&str]) -> SourceTree {
        SourceTree {
            root: PathBuf::from("/tpl/prompts"),
            dest_root: PathBuf::from("/proj/.github/prompts"),
            files: files.iter().map(PathBuf::from).collect(),
        }
    }

    #[test]
    fn given_empty_destination_when_planning_then_dirs_precede_copies() {
        let source = prompts_tree(&["plan.prompt.md", "_partials/jira.md"]);
        let dest = DestinationTree::new("/proj/.github");

        let plan = plan(&[source], &dest, &InstallOptions::default()).unwrap();

        assert_eq!(
            plan.actions(),
            &[
                PlannedAction::CreateDir(PathBuf::from("/proj/.github")),
                PlannedAction::CreateDir(PathBuf::from("/proj/.github/prompts")),
                PlannedAction::Copy {
                    from: PathBuf::from("/tpl/prompts/plan.prompt.md"),
                    to: PathBuf::from("/proj/.github/prompts/plan.prompt.md"),
                    overwrite: false,
                },
                PlannedAction::CreateDir(PathBuf::from("/proj/.github/prompts/_partials")),
                PlannedAction::Copy {
                    from: PathBuf::from("/tpl/prompts/_partials/jira.md"),
                    to: PathBuf::from("/proj/.github/prompts/_partials/jira.md"),
                    overwrite: false,
                },
            ]
        );
        assert_eq!(plan.copy_count(), 2);
    }

    #[test]
    fn given_existing_file_without_force_when_planning_then_skip() {
        let source = prompts_tree(&["plan.prompt.md"]);
        let dest = DestinationTree::new("/proj/.github")
            .with_dir("/proj/.github")
            .with_dir("/proj/.github/prompts")
            .with_file("/proj/.github/prompts/plan.prompt.md");

        let plan = plan(&[source], &dest, &InstallOptions::default()).unwrap();

        assert_eq!(
            plan.actions(),
            &[PlannedAction::Skip(PathBuf::from(
                "/proj/.github/prompts/plan.prompt.md"
            ))]
        );
        assert_eq!(plan.copy_count(), 0);
        assert_eq!(plan.skip_count(), 1);
        assert_eq!(plan.created_dirs().count(), 0);
    }

    #[test]
    fn given_existing_file_with_force_when_planning_then_overwrite() {
        let source = prompts_tree(&["plan.prompt.md"]);
        let dest = DestinationTree::new("/proj/.github")
            .with_dir("/proj/.github")
            .with_dir("/proj/.github/prompts")
            .with_file("/proj/.github/prompts/plan.prompt.md");
        let options = InstallOptions {
            force: true,
            ..Default::default()
        };

        let plan = plan(&[source], &dest, &options).unwrap();

        assert!(matches!(
            plan.actions(),
            [PlannedAction::Copy { overwrite: true, .. }]
        ));
    }

    #[test]
    fn given_parent_traversal_when_planning_then_error() {
        let source = prompts_tree(&["../escape.md"]);
        let dest = DestinationTree::new("/proj/.github");

        let result = plan(&[source], &dest, &InstallOptions::default());

        assert!(matches!(result, Err(DomainError::PathOutsideRoot(_))));
    }

    #[test]
    fn given_no_sources_when_planning_then_empty() {
        let plan = plan(&[], &DestinationTree::new("/x"), &InstallOptions::default()).unwrap();
        assert!(plan.is_empty());
    }
}
