//! Template categories and flag-derived category gating

use std::collections::BTreeSet;
use std::fmt;
use std::path::{Path, PathBuf};

/// Prompts that form the main workflow, in the order they are meant to run.
///
/// Shared by the lister and the help text.
pub const WORKFLOW_PROMPTS: [&str; 6] = [
    "analyze",
    "plan",
    "work",
    "prepare",
    "create-pr",
    "finalize",
];

/// Filename suffix marking a prompt file.
pub const PROMPT_SUFFIX: &str = ".prompt.md";

/// Name of the partials subdirectory inside `prompts/`.
pub const PARTIALS_DIR: &str = "_partials";

/// An independently installable group of template files.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Category {
    Prompts,
    Partials,
    Instructions,
    Skills,
}

impl Category {
    pub const ALL: [Category; 4] = [
        Category::Prompts,
        Category::Partials,
        Category::Instructions,
        Category::Skills,
    ];

    /// Path of this category relative to the templates root.
    ///
    /// The destination mirrors the same relative path under the config root.
    pub fn relative_root(self) -> PathBuf {
        match self {
            Category::Prompts => PathBuf::from("prompts"),
            Category::Partials => Path::new("prompts").join(PARTIALS_DIR),
            Category::Instructions => PathBuf::from("instructions"),
            Category::Skills => PathBuf::from("skills"),
        }
    }

    /// Whether this category's tree is already part of `other`'s tree.
    pub fn is_nested_in(self, other: Category) -> bool {
        self == Category::Partials && other == Category::Prompts
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Category::Prompts => "prompts",
            Category::Partials => "partials",
            Category::Instructions => "instructions",
            Category::Skills => "skills",
        };
        f.write_str(name)
    }
}

/// Flag set for one install invocation.
///
/// Built once from the argument vector, never mutated afterwards.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct InstallOptions {
    pub force: bool,
    pub prompts_only: bool,
    pub partials_only: bool,
    pub instructions_only: bool,
    pub skills_only: bool,
    pub dry_run: bool,
}

impl InstallOptions {
    /// Same options with `force` set, as used by `update`.
    pub fn forced(self) -> Self {
        Self {
            force: true,
            ..self
        }
    }

    fn only_flag(&self, category: Category) -> bool {
        match category {
            Category::Prompts => self.prompts_only,
            Category::Partials => self.partials_only,
            Category::Instructions => self.instructions_only,
            Category::Skills => self.skills_only,
        }
    }

    /// True if any `*-only` flag narrows the install.
    pub fn is_restricted(&self) -> bool {
        Category::ALL.iter().any(|c| self.only_flag(*c))
    }
}

/// Categories selected by the flags.
///
/// With no `*-only` flag every category is installed; otherwise exactly the
/// union of the flagged categories. Conflicting flags are not rejected.
pub fn categories_to_install(options: &InstallOptions) -> BTreeSet<Category> {
    if !options.is_restricted() {
        return Category::ALL.into_iter().collect();
    }
    Category::ALL
        .into_iter()
        .filter(|c| options.only_flag(*c))
        .collect()
}

/// Category roots that must actually be walked for a selection.
///
/// A category nested inside another selected category is dropped so each
/// file is planned once.
pub fn roots_to_walk(selected: &BTreeSet<Category>) -> Vec<Category> {
    selected
        .iter()
        .copied()
        .filter(|c| !selected.iter().any(|other| c.is_nested_in(*other)))
        .collect()
}
