//! Configuration management with layered loading
//!
//! Precedence (lowest to highest):
//! 1. Compiled defaults
//! 2. Global config: `$XDG_CONFIG_HOME/rsforest/rsforest.toml`
//! 3. Local config: `<dir>/.rsforest.toml` (next to the record file, or `--config-dir`)
//! 4. Environment variables: `RSFOREST_*` prefix

use std::path::{Path, PathBuf};

use config::{Config, ConfigError, Environment};
use directories::ProjectDirs;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::application::{ApplicationError, IoResultExt};
use crate::domain::DEFAULT_MAX_DEPTH;

/// Unified configuration for rsforest.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct Settings {
    /// Maximum tree depth before a build is aborted
    pub max_depth: usize,
    /// Record field holding the key
    pub key_field: String,
    /// Record field holding the parent key
    pub parent_field: String,
    /// Record field used as display label
    pub label_field: String,
    /// Colored terminal output
    pub color: bool,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            max_depth: DEFAULT_MAX_DEPTH,
            key_field: "id".into(),
            parent_field: "parent".into(),
            label_field: "name".into(),
            color: true,
        }
    }
}

/// Raw settings for intermediate parsing (Option to detect "not specified").
#[derive(Debug, Clone, Deserialize, Default)]
#[serde(default)]
pub struct RawSettings {
    pub max_depth: Option<usize>,
    pub key_field: Option<String>,
    pub parent_field: Option<String>,
    pub label_field: Option<String>,
    pub color: Option<bool>,
}

/// Get the XDG config directory for rsforest.
pub fn global_config_dir() -> Option<PathBuf> {
    ProjectDirs::from("", "", "rsforest").map(|dirs| dirs.config_dir().to_path_buf())
}

/// Get the path to the global config file.
pub fn global_config_path() -> Option<PathBuf> {
    global_config_dir().map(|dir| dir.join("rsforest.toml"))
}

/// Get the path to the local config file in a directory.
pub fn local_config_path(dir: &Path) -> PathBuf {
    dir.join(".rsforest.toml")
}

/// Load a TOML file into RawSettings for manual merging.
fn load_raw_settings(path: &Path) -> Result<RawSettings, ApplicationError> {
    let content = std::fs::read_to_string(path).with_config_context(path)?;
    toml::from_str(&content).map_err(|e| ApplicationError::Config {
        message: format!("parse {}: {}", path.display(), e),
    })
}

impl Settings {
    /// Overlay wins for every field it specifies.
    fn merge_with(&self, overlay: &RawSettings) -> Self {
        Self {
            max_depth: overlay.max_depth.unwrap_or(self.max_depth),
            key_field: overlay
                .key_field
                .clone()
                .unwrap_or_else(|| self.key_field.clone()),
            parent_field: overlay
                .parent_field
                .clone()
                .unwrap_or_else(|| self.parent_field.clone()),
            label_field: overlay
                .label_field
                .clone()
                .unwrap_or_else(|| self.label_field.clone()),
            color: overlay.color.unwrap_or(self.color),
        }
    }

    /// Load configuration with layered precedence.
    pub fn load(local_dir: Option<&Path>) -> Result<Self, ApplicationError> {
        Self::load_from(
            global_config_path().as_deref(),
            local_dir,
            Environment::with_prefix("RSFOREST"),
        )
    }

    /// Layered load with explicit sources.
    ///
    /// Missing config files are skipped; a file that exists but does not
    /// parse is an error.
    pub fn load_from(
        global_path: Option<&Path>,
        local_dir: Option<&Path>,
        env: Environment,
    ) -> Result<Self, ApplicationError> {
        // 1. Start with defaults
        let mut current = Self::default();

        // 2. Global config
        if let Some(global_path) = global_path {
            if global_path.exists() {
                debug!(path = %global_path.display(), "loading global config");
                current = current.merge_with(&load_raw_settings(global_path)?);
            }
        }

        // 3. Local config
        if let Some(dir) = local_dir {
            let local_path = local_config_path(dir);
            if local_path.exists() {
                debug!(path = %local_path.display(), "loading local config");
                current = current.merge_with(&load_raw_settings(&local_path)?);
            }
        }

        // 4. Environment variables (explicit override)
        current = Self::apply_env_overrides(current, env)?;

        current.validate()?;
        Ok(current)
    }

    /// Apply RSFOREST_* environment variables as explicit overrides.
    fn apply_env_overrides(mut settings: Self, env: Environment) -> Result<Self, ApplicationError> {
        let config = Config::builder()
            .add_source(env.prefix_separator("_").separator("__").try_parsing(true))
            .build()
            .map_err(config_err)?;

        if let Some(val) = env_value::<usize>(&config, "max_depth")? {
            settings.max_depth = val;
        }
        if let Some(val) = env_value::<String>(&config, "key_field")? {
            settings.key_field = val;
        }
        if let Some(val) = env_value::<String>(&config, "parent_field")? {
            settings.parent_field = val;
        }
        if let Some(val) = env_value::<String>(&config, "label_field")? {
            settings.label_field = val;
        }
        if let Some(val) = env_value::<bool>(&config, "color")? {
            settings.color = val;
        }

        Ok(settings)
    }

    fn validate(&self) -> Result<(), ApplicationError> {
        if self.max_depth == 0 {
            return Err(ApplicationError::Config {
                message: "max_depth must be at least 1".into(),
            });
        }
        for (name, value) in [
            ("key_field", &self.key_field),
            ("parent_field", &self.parent_field),
            ("label_field", &self.label_field),
        ] {
            if value.trim().is_empty() {
                return Err(ApplicationError::Config {
                    message: format!("{name} must not be empty"),
                });
            }
        }
        if self.key_field == self.parent_field {
            return Err(ApplicationError::Config {
                message: format!(
                    "key_field and parent_field must differ (both `{}`)",
                    self.key_field
                ),
            });
        }
        Ok(())
    }

    /// Show the effective configuration as TOML.
    pub fn to_toml(&self) -> Result<String, ApplicationError> {
        toml::to_string_pretty(self).map_err(|e| ApplicationError::Config {
            message: format!("serialize config: {e}"),
        })
    }

    /// Generate a template config file.
    pub fn template() -> String {
        format!(
            r#"# rsforest configuration
#
# Locations (by precedence, lowest to highest):
#   Global: ~/.config/rsforest/rsforest.toml
#   Local:  <record dir>/.rsforest.toml
#   Env:    RSFOREST_* environment variables

# Abort builds deeper than this many levels (root included)
# max_depth = {DEFAULT_MAX_DEPTH}

# Record fields
# key_field = "id"
# parent_field = "parent"
# label_field = "name"

# Colored output (NO_COLOR is honored as well)
# color = true
"#
        )
    }
}

/// Unset variables are `None`; a value that does not parse is an error.
fn env_value<T: DeserializeOwned>(
    config: &Config,
    key: &str,
) -> Result<Option<T>, ApplicationError> {
    match config.get::<T>(key) {
        Ok(val) => Ok(Some(val)),
        Err(ConfigError::NotFound(_)) => Ok(None),
        Err(e) => Err(config_err(e)),
    }
}

fn config_err(e: ConfigError) -> ApplicationError {
    ApplicationError::Config {
        message: e.to_string(),
    }
}
