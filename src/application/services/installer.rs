//! Template installation service
//!
//! Scans the bundled category roots, plans the copy against what already
//! exists in the project, then either executes the plan or (dry run) only
//! reports it. Files are never deleted; existing files are replaced only
//! under `force`.

use std::path::{Path, PathBuf};
use std::sync::Arc;

use tracing::{debug, info};

use crate::application::{ApplicationResult, IoResultExt};
use crate::config::Settings;
use crate::domain::{
    categories_to_install, plan, roots_to_walk, DestinationTree, InstallOptions, InstallPlan,
    PlannedAction, ProjectConfig, SourceTree,
};
use crate::infrastructure::traits::FileSystem;

/// What happened to the project configuration file.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConfigOutcome {
    Created,
    AlreadyPresent,
    WouldCreate,
}

/// Outcome of one install invocation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InstallReport {
    /// Files actually written (always 0 for a dry run)
    pub copied: usize,
    /// Files a dry run would have written (always 0 for a real run)
    pub would_copy: usize,
    /// Existing files left untouched because `force` was off
    pub skipped: usize,
    pub dry_run: bool,
    pub config: ConfigOutcome,
    pub config_path: PathBuf,
}

impl InstallReport {
    /// Files copied, or that would be copied in a dry run.
    pub fn file_count(&self) -> usize {
        if self.dry_run {
            self.would_copy
        } else {
            self.copied
        }
    }
}

/// Receives each planned action as it is carried out (or, in a dry run,
/// as it would be).
pub trait InstallObserver {
    fn on_action(&mut self, action: &PlannedAction, dry_run: bool);
}

impl<F> InstallObserver for F
where
    F: FnMut(&PlannedAction, bool),
{
    fn on_action(&mut self, action: &PlannedAction, dry_run: bool) {
        self(action, dry_run)
    }
}

/// Installs bundled templates into a project.
pub struct InstallService {
    fs: Arc<dyn FileSystem>,
    settings: Arc<Settings>,
    project_dir: PathBuf,
}

impl InstallService {
    /// Create a new install service.
    ///
    /// # Arguments
    /// * `fs` - Filesystem abstraction
    /// * `settings` - Templates location and destination layout
    /// * `project_dir` - Target project root
    pub fn new(fs: Arc<dyn FileSystem>, settings: Arc<Settings>, project_dir: PathBuf) -> Self {
        Self {
            fs,
            settings,
            project_dir,
        }
    }

    /// Destination root inside the project (e.g. `<project>/.github`).
    pub fn config_root(&self) -> PathBuf {
        self.project_dir.join(&self.settings.config_root)
    }

    /// Path of the project configuration file.
    pub fn config_path(&self) -> PathBuf {
        self.project_dir.join(&self.settings.config_file)
    }

    /// Snapshot the bundled category roots selected by `options`.
    ///
    /// A missing category root contributes nothing.
    pub fn scan_sources(&self, options: &InstallOptions) -> ApplicationResult<Vec<SourceTree>> {
        let selected = categories_to_install(options);
        let mut sources = Vec::new();

        for category in roots_to_walk(&selected) {
            let rel = category.relative_root();
            let root = self.settings.templates_dir.join(&rel);
            if !self.fs.is_dir(&root) {
                debug!("scan_sources: {} not bundled at {}", category, root.display());
                continue;
            }
            let files = self
                .fs
                .walk_files(&root)
                .with_path_context("scan templates", &root)?;
            debug!("scan_sources: {} files={}", category, files.len());
            sources.push(SourceTree {
                root,
                dest_root: self.config_root().join(&rel),
                files,
            });
        }

        Ok(sources)
    }

    /// Probe the destination for every path the sources map onto.
    pub fn scan_destination(&self, sources: &[SourceTree]) -> DestinationTree {
        let root = self.config_root();
        let mut dest = DestinationTree::new(&root);

        for source in sources {
            for rel in &source.files {
                let to = source.dest_root.join(rel);
                if self.fs.is_file(&to) {
                    dest.files.insert(to.clone());
                }
                for dir in to.ancestors().skip(1) {
                    if !dir.starts_with(&root) || dest.dirs.contains(dir) {
                        break;
                    }
                    if self.fs.is_dir(dir) {
                        dest.dirs.insert(dir.to_path_buf());
                    }
                }
            }
        }

        dest
    }

    /// Compute the install plan without touching the destination.
    pub fn plan(&self, options: &InstallOptions) -> ApplicationResult<InstallPlan> {
        let sources = self.scan_sources(options)?;
        let destination = self.scan_destination(&sources);
        let plan = plan(&sources, &destination, options)?;
        debug!(
            "plan: copies={} skips={} dirs={}",
            plan.copy_count(),
            plan.skip_count(),
            plan.created_dirs().count()
        );
        Ok(plan)
    }

    /// Apply a plan in order. Returns the number of files copied.
    ///
    /// Stops at the first failure; files already copied stay in place.
    pub fn execute(
        &self,
        plan: &InstallPlan,
        observer: &mut dyn InstallObserver,
    ) -> ApplicationResult<usize> {
        let mut copied = 0;

        for action in plan.actions() {
            match action {
                PlannedAction::CreateDir(dir) => {
                    self.fs
                        .create_dir_all(dir)
                        .with_path_context("create directory", dir)?;
                }
                PlannedAction::Copy { from, to, .. } => {
                    self.fs.copy(from, to).with_copy_context(from, to)?;
                    copied += 1;
                }
                PlannedAction::Skip(_) => {}
            }
            observer.on_action(action, false);
        }

        Ok(copied)
    }

    /// Create the project configuration file if it does not exist.
    ///
    /// An existing file is never read, merged or overwritten, regardless of `force`.
    pub fn ensure_project_config(&self, dry_run: bool) -> ApplicationResult<ConfigOutcome> {
        let path = self.config_path();
        if self.fs.exists(&path) {
            debug!("ensure_project_config: present at {}", path.display());
            return Ok(ConfigOutcome::AlreadyPresent);
        }
        if dry_run {
            return Ok(ConfigOutcome::WouldCreate);
        }

        let content = ProjectConfig::default().to_json()?;
        if let Some(parent) = path.parent() {
            self.fs
                .create_dir_all(parent)
                .with_path_context("create directory", parent)?;
        }
        self.fs
            .write(&path, &content)
            .with_path_context("write project config", &path)?;
        info!("created project config {}", path.display());
        Ok(ConfigOutcome::Created)
    }

    /// Plan, execute (unless dry run) and create the project config.
    pub fn install(
        &self,
        options: &InstallOptions,
        observer: &mut dyn InstallObserver,
    ) -> ApplicationResult<InstallReport> {
        info!(
            "install: project={} templates={} force={} dry_run={}",
            self.project_dir.display(),
            self.settings.templates_dir.display(),
            options.force,
            options.dry_run
        );
        let plan = self.plan(options)?;

        let (copied, would_copy) = if options.dry_run {
            for action in plan.actions() {
                observer.on_action(action, true);
            }
            (0, plan.copy_count())
        } else {
            (self.execute(&plan, observer)?, 0)
        };

        let config = self.ensure_project_config(options.dry_run)?;

        Ok(InstallReport {
            copied,
            would_copy,
            skipped: plan.skip_count(),
            dry_run: options.dry_run,
            config,
            config_path: self.config_path(),
        })
    }

    /// Display form of a destination path, relative to the project when possible.
    pub fn display_path<'a>(&self, path: &'a Path) -> std::borrow::Cow<'a, str> {
        path.strip_prefix(&self.project_dir)
            .unwrap_or(path)
            .to_string_lossy()
    }
}
