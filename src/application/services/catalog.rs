//! Catalog of bundled prompts

use std::path::PathBuf;
use std::sync::Arc;

use tracing::debug;

use crate::application::{ApplicationError, ApplicationResult, IoResultExt};
use crate::config::Settings;
use crate::domain::{build_listing, Category, PromptListing};
use crate::infrastructure::traits::FileSystem;

/// Enumerates the prompts and partials shipped with flowkit.
pub struct CatalogService {
    fs: Arc<dyn FileSystem>,
    settings: Arc<Settings>,
}

impl CatalogService {
    pub fn new(fs: Arc<dyn FileSystem>, settings: Arc<Settings>) -> Self {
        Self { fs, settings }
    }

    pub fn prompts_dir(&self) -> PathBuf {
        self.settings
            .templates_dir
            .join(Category::Prompts.relative_root())
    }

    /// Group bundled prompts into workflow and utility prompts, plus partials.
    ///
    /// # Errors
    /// `MissingResource` if the bundled prompts directory does not exist.
    pub fn list(&self) -> ApplicationResult<PromptListing> {
        let prompts_dir = self.prompts_dir();
        if !self.fs.is_dir(&prompts_dir) {
            return Err(ApplicationError::MissingResource(prompts_dir));
        }

        let prompt_files = self
            .fs
            .file_names(&prompts_dir)
            .with_path_context("read prompts", &prompts_dir)?;

        let partials_dir = self
            .settings
            .templates_dir
            .join(Category::Partials.relative_root());
        let partial_files = if self.fs.is_dir(&partials_dir) {
            self.fs
                .file_names(&partials_dir)
                .with_path_context("read partials", &partials_dir)?
        } else {
            Vec::new()
        };

        debug!(
            "list: prompt_files={} partial_files={}",
            prompt_files.len(),
            partial_files.len()
        );
        Ok(build_listing(&prompt_files, &partial_files))
    }
}
