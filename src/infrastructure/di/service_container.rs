//! Service container for dependency injection
//!
//! Wires up all services with their dependencies.

use std::path::PathBuf;
use std::sync::Arc;

use crate::application::services::{CatalogService, InstallService};
use crate::config::Settings;
use crate::infrastructure::traits::{FileSystem, RealFileSystem};

/// Container holding settings, the filesystem and the target project.
pub struct ServiceContainer {
    /// Application settings
    pub settings: Arc<Settings>,

    /// Filesystem abstraction
    pub fs: Arc<dyn FileSystem>,

    /// Project the templates are installed into
    pub project_dir: PathBuf,
}

impl ServiceContainer {
    /// Create a new service container with the real filesystem.
    pub fn new(settings: Settings, project_dir: PathBuf) -> Self {
        Self::with_deps(settings, project_dir, Arc::new(RealFileSystem))
    }

    /// Create a service container with custom dependencies (for testing).
    pub fn with_deps(settings: Settings, project_dir: PathBuf, fs: Arc<dyn FileSystem>) -> Self {
        Self {
            settings: Arc::new(settings),
            fs,
            project_dir,
        }
    }

    pub fn installer(&self) -> InstallService {
        InstallService::new(
            Arc::clone(&self.fs),
            Arc::clone(&self.settings),
            self.project_dir.clone(),
        )
    }

    pub fn catalog(&self) -> CatalogService {
        CatalogService::new(Arc::clone(&self.fs), Arc::clone(&self.settings))
    }
}
