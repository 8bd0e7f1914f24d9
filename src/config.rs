//! Configuration management with layered loading
//!
//! Precedence (lowest to highest):
//! 1. Compiled defaults
//! 2. Global config: `$XDG_CONFIG_HOME/flowkit/flowkit.toml`
//! 3. Environment variables: `FLOWKIT_*` prefix
//! 4. Command line options (applied by the caller)
//!
//! These settings describe where flowkit finds its bundled templates and
//! where it installs them. They are unrelated to the per-project
//! `.flowkit.json` that installs create.

use std::path::{Component, Path, PathBuf};

use config::{Config, ConfigError, Environment, Map};
use directories::ProjectDirs;
use serde::Deserialize;
use tracing::debug;

use crate::application::ApplicationError;
use crate::domain::expand_env_vars;

/// Environment variable prefix for overrides.
pub const ENV_PREFIX: &str = "FLOWKIT";

/// Directory name of the bundled template tree.
pub const TEMPLATES_DIR_NAME: &str = "templates";

/// Unified configuration for flowkit.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Settings {
    /// Bundled template tree (prompts, instructions, skills)
    pub templates_dir: PathBuf,
    /// Install destination relative to the project (default: .github)
    pub config_root: PathBuf,
    /// Project configuration file created at the project root
    pub config_file: String,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            templates_dir: default_templates_dir(),
            config_root: PathBuf::from(".github"),
            config_file: ".flowkit.json".into(),
        }
    }
}

/// Raw settings for intermediate parsing (`None` means "not specified").
#[derive(Debug, Clone, Deserialize, Default)]
#[serde(default)]
pub struct RawSettings {
    pub templates_dir: Option<PathBuf>,
    pub config_root: Option<PathBuf>,
    pub config_file: Option<String>,
}

/// Locate the bundled templates.
///
/// Checked in order: `templates/` beside the executable,
/// `../share/flowkit/templates` relative to it (packaged installs), and the
/// crate's own `templates/` for builds run from the source tree.
fn default_templates_dir() -> PathBuf {
    let exe_dir = std::env::current_exe()
        .ok()
        .and_then(|exe| exe.parent().map(Path::to_path_buf));

    if let Some(dir) = exe_dir {
        let candidates = [
            dir.join(TEMPLATES_DIR_NAME),
            dir.join("..")
                .join("share")
                .join("flowkit")
                .join(TEMPLATES_DIR_NAME),
        ];
        if let Some(found) = candidates.into_iter().find(|c| c.is_dir()) {
            return found;
        }
    }

    PathBuf::from(env!("CARGO_MANIFEST_DIR")).join(TEMPLATES_DIR_NAME)
}

/// Get the XDG config directory for flowkit.
pub fn global_config_dir() -> Option<PathBuf> {
    ProjectDirs::from("", "", "flowkit").map(|dirs| dirs.config_dir().to_path_buf())
}

/// Get the path to the global config file.
pub fn global_config_path() -> Option<PathBuf> {
    global_config_dir().map(|dir| dir.join("flowkit.toml"))
}

/// Load a TOML file into RawSettings for manual merging.
fn load_raw_settings(path: &Path) -> Result<RawSettings, ApplicationError> {
    let content = std::fs::read_to_string(path).map_err(|e| ApplicationError::Config {
        message: format!("read {}: {}", path.display(), e),
    })?;
    toml::from_str(&content).map_err(|e| ApplicationError::Config {
        message: format!("parse {}: {}", path.display(), e),
    })
}

impl Settings {
    /// Expand shell variables and tilde in path-like fields.
    fn expand_paths(&mut self) {
        let expanded = expand_env_vars(self.templates_dir.to_string_lossy().as_ref());
        self.templates_dir = PathBuf::from(expanded);
    }

    /// Overlay wins for every field it specifies.
    fn merge_with(&self, overlay: &RawSettings) -> Self {
        Self {
            templates_dir: overlay
                .templates_dir
                .clone()
                .unwrap_or_else(|| self.templates_dir.clone()),
            config_root: overlay
                .config_root
                .clone()
                .unwrap_or_else(|| self.config_root.clone()),
            config_file: overlay
                .config_file
                .clone()
                .unwrap_or_else(|| self.config_file.clone()),
        }
    }

    /// Load settings with layered precedence.
    ///
    /// # Arguments
    /// * `global_path` - Global config file; `None` uses the XDG location
    pub fn load(global_path: Option<&Path>) -> Result<Self, ApplicationError> {
        Self::load_from(global_path, None)
    }

    /// Like [`Settings::load`], reading `FLOWKIT_*` variables from `env`
    /// instead of the process environment when given.
    pub fn load_from(
        global_path: Option<&Path>,
        env: Option<Map<String, String>>,
    ) -> Result<Self, ApplicationError> {
        let mut current = Self::default();

        let global_path = global_path
            .map(Path::to_path_buf)
            .or_else(global_config_path);
        if let Some(path) = global_path {
            if path.exists() {
                debug!("load: global config {}", path.display());
                let raw = load_raw_settings(&path)?;
                current = current.merge_with(&raw);
            }
        }

        current = Self::apply_env_overrides(current, env)?;
        current.expand_paths();
        current.validate()?;

        Ok(current)
    }

    /// Apply FLOWKIT_* environment variables as explicit overrides.
    ///
    /// `FLOWKIT_CONFIG_ROOT` maps to `config_root`; `__` separates nested keys.
    fn apply_env_overrides(
        mut settings: Self,
        env: Option<Map<String, String>>,
    ) -> Result<Self, ApplicationError> {
        let environment = Environment::with_prefix(ENV_PREFIX)
            .prefix_separator("_")
            .separator("__")
            .source(env);
        let config = Config::builder()
            .add_source(environment)
            .build()
            .map_err(config_err)?;

        if let Ok(val) = config.get_string("templates_dir") {
            settings.templates_dir = PathBuf::from(val);
        }
        if let Ok(val) = config.get_string("config_root") {
            settings.config_root = PathBuf::from(val);
        }
        if let Ok(val) = config.get_string("config_file") {
            settings.config_file = val;
        }

        Ok(settings)
    }

    /// Reject destinations that would land outside the project.
    fn validate(&self) -> Result<(), ApplicationError> {
        let escapes = self
            .config_root
            .components()
            .any(|c| !matches!(c, Component::Normal(_) | Component::CurDir));
        if escapes {
            return Err(ApplicationError::Config {
                message: format!(
                    "config_root must stay inside the project: {}",
                    self.config_root.display()
                ),
            });
        }
        if self.config_file.is_empty() || self.config_file.contains(['/', '\\']) {
            return Err(ApplicationError::Config {
                message: format!("config_file must be a plain file name: {:?}", self.config_file),
            });
        }
        Ok(())
    }
}

fn config_err(e: ConfigError) -> ApplicationError {
    ApplicationError::Config {
        message: e.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn given_defaults_when_created_then_installs_into_dot_github() {
        let settings = Settings::default();
        assert_eq!(settings.config_root, PathBuf::from(".github"));
        assert_eq!(settings.config_file, ".flowkit.json");
        assert!(settings.templates_dir.ends_with(TEMPLATES_DIR_NAME));
    }

    #[test]
    fn given_partial_overlay_when_merging_then_unspecified_fields_kept() {
        let base = Settings::default();
        let overlay = RawSettings {
            templates_dir: Some(PathBuf::from("/opt/tpl")),
            config_root: None,
            config_file: None,
        };

        let merged = base.merge_with(&overlay);

        assert_eq!(merged.templates_dir, PathBuf::from("/opt/tpl"));
        assert_eq!(merged.config_root, base.config_root);
        assert_eq!(merged.config_file, base.config_file);
    }

    #[test]
    fn given_tilde_in_templates_dir_when_expand_paths_then_expands_to_home() {
        let mut settings = Settings {
            templates_dir: PathBuf::from("~/tpl"),
            ..Default::default()
        };

        settings.expand_paths();

        let home = std::env::var("HOME").expect("HOME should be set");
        assert!(settings.templates_dir.to_string_lossy().starts_with(&home));
    }

    #[test]
    fn given_absolute_config_root_when_validating_then_config_error() {
        let settings = Settings {
            config_root: PathBuf::from("/etc"),
            ..Default::default()
        };
        assert!(matches!(
            settings.validate(),
            Err(ApplicationError::Config { .. })
        ));
    }

    #[test]
    fn given_parent_traversal_in_config_root_when_validating_then_config_error() {
        for root in ["../escaped", ".github/../../up"] {
            let settings = Settings {
                config_root: PathBuf::from(root),
                ..Default::default()
            };
            assert!(
                matches!(settings.validate(), Err(ApplicationError::Config { .. })),
                "{root} accepted"
            );
        }
    }

    #[test]
    fn given_nested_relative_config_root_when_validating_then_ok() {
        let settings = Settings {
            config_root: PathBuf::from("./config/.github"),
            ..Default::default()
        };
        assert!(settings.validate().is_ok());
    }

    #[test]
    fn given_nested_config_file_when_validating_then_config_error() {
        let settings = Settings {
            config_file: "sub/.flowkit.json".into(),
            ..Default::default()
        };
        assert!(settings.validate().is_err());
    }

    #[test]
    fn given_global_toml_when_loading_then_values_applied() {
        let dir = tempfile::TempDir::new().unwrap();
        let path = dir.path().join("flowkit.toml");
        std::fs::write(&path, "config_root = \".copilot\"\n").unwrap();

        let settings = Settings::load_from(Some(&path), Some(Map::new())).unwrap();

        assert_eq!(settings.config_root, PathBuf::from(".copilot"));
    }

    fn env(vars: &[(&str, &str)]) -> Option<Map<String, String>> {
        Some(
            vars.iter()
                .map(|(k, v)| (k.to_string(), v.to_string()))
                .collect(),
        )
    }

    #[test]
    fn given_flowkit_env_vars_when_loading_then_applied() {
        let dir = tempfile::TempDir::new().unwrap();
        let missing = dir.path().join("absent.toml");

        let settings = Settings::load_from(
            Some(&missing),
            env(&[
                ("FLOWKIT_CONFIG_ROOT", ".single"),
                ("FLOWKIT_TEMPLATES_DIR", "/opt/flowkit/templates"),
                ("FLOWKIT_CONFIG_FILE", "team.json"),
            ]),
        )
        .unwrap();

        assert_eq!(settings.config_root, PathBuf::from(".single"));
        assert_eq!(
            settings.templates_dir,
            PathBuf::from("/opt/flowkit/templates")
        );
        assert_eq!(settings.config_file, "team.json");
    }

    #[test]
    fn given_toml_and_env_when_loading_then_env_wins_over_toml_over_defaults() {
        let dir = tempfile::TempDir::new().unwrap();
        let path = dir.path().join("flowkit.toml");
        std::fs::write(
            &path,
            "config_root = \".copilot\"\nconfig_file = \"from-toml.json\"\n",
        )
        .unwrap();

        let settings = Settings::load_from(
            Some(&path),
            env(&[("FLOWKIT_CONFIG_ROOT", ".from-env")]),
        )
        .unwrap();

        assert_eq!(settings.config_root, PathBuf::from(".from-env"));
        assert_eq!(settings.config_file, "from-toml.json");
        assert!(settings.templates_dir.ends_with(TEMPLATES_DIR_NAME));
    }

    #[test]
    fn given_escaping_config_root_in_env_when_loading_then_config_error() {
        let dir = tempfile::TempDir::new().unwrap();
        let missing = dir.path().join("absent.toml");

        let result = Settings::load_from(
            Some(&missing),
            env(&[("FLOWKIT_CONFIG_ROOT", "../escaped")]),
        );

        assert!(matches!(result, Err(ApplicationError::Config { .. })));
    }
}
