//! Configuration management with layered loading
//!
//! Precedence (lowest to highest):
//! 1. Compiled defaults
//! 2. Global config: `$XDG_CONFIG_HOME/insertorder/insertorder.toml`
//! 3. Local config: `<dir>/.insertorder.toml`
//! 4. Environment variables: `INSERTORDER_*` prefix
//!
//! Command line flags are applied on top by the CLI layer.

use std::path::{Path, PathBuf};

use config::{Config, ConfigError, Environment};
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};

use crate::application::{ApplicationError, SortOptions};
use crate::domain::{FieldNames, Traversal, ValidationMode, DEFAULT_ID_FIELD, DEFAULT_PARENT_FIELD};

pub const ENV_PREFIX: &str = "INSERTORDER";
pub const GLOBAL_CONFIG_FILE: &str = "insertorder.toml";
pub const LOCAL_CONFIG_FILE: &str = ".insertorder.toml";

/// Unified configuration for insertorder.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct Settings {
    /// Name of the identifier field (default: "id")
    pub id_field: String,
    /// Name of the parent-identifier field (default: "parent_id")
    pub parent_field: String,
    /// Queue discipline used when flattening
    pub traversal: Traversal,
    /// Whether malformed hierarchies are rejected
    pub validation: ValidationMode,
    /// Pretty-print the reordered output
    pub pretty: bool,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            id_field: DEFAULT_ID_FIELD.to_string(),
            parent_field: DEFAULT_PARENT_FIELD.to_string(),
            traversal: Traversal::default(),
            validation: ValidationMode::default(),
            pretty: true,
        }
    }
}

/// Raw settings for intermediate parsing (`None` means "not specified").
#[derive(Debug, Clone, Deserialize, Default)]
#[serde(default)]
pub struct RawSettings {
    pub id_field: Option<String>,
    pub parent_field: Option<String>,
    pub traversal: Option<Traversal>,
    pub validation: Option<ValidationMode>,
    pub pretty: Option<bool>,
}

/// Get the XDG config directory for insertorder.
pub fn global_config_dir() -> Option<PathBuf> {
    ProjectDirs::from("", "", "insertorder").map(|dirs| dirs.config_dir().to_path_buf())
}

/// Get the path to the global config file.
pub fn global_config_path() -> Option<PathBuf> {
    global_config_dir().map(|dir| dir.join(GLOBAL_CONFIG_FILE))
}

/// Get the path to the local config file in a directory.
pub fn local_config_path(dir: &Path) -> PathBuf {
    dir.join(LOCAL_CONFIG_FILE)
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
    /// Overlay wins where it specifies a value.
    fn merge_with(&self, overlay: &RawSettings) -> Self {
        Self {
            id_field: overlay
                .id_field
                .clone()
                .unwrap_or_else(|| self.id_field.clone()),
            parent_field: overlay
                .parent_field
                .clone()
                .unwrap_or_else(|| self.parent_field.clone()),
            traversal: overlay.traversal.unwrap_or(self.traversal),
            validation: overlay.validation.unwrap_or(self.validation),
            pretty: overlay.pretty.unwrap_or(self.pretty),
        }
    }

    /// Load settings with layered precedence.
    ///
    /// # Arguments
    /// * `local_dir` - Optional directory searched for `.insertorder.toml`
    pub fn load(local_dir: Option<&Path>) -> Result<Self, ApplicationError> {
        let mut current = Self::default();

        if let Some(global_path) = global_config_path() {
            if global_path.exists() {
                current = current.merge_with(&load_raw_settings(&global_path)?);
            }
        }

        if let Some(dir) = local_dir {
            let local_path = local_config_path(dir);
            if local_path.exists() {
                current = current.merge_with(&load_raw_settings(&local_path)?);
            }
        }

        current = Self::apply_env_overrides(current)?;
        current.validate()?;
        Ok(current)
    }

    /// Load settings from exactly one file on top of the defaults.
    ///
    /// Used for an explicitly supplied `--config-file` path, which must exist.
    pub fn load_file(path: &Path) -> Result<Self, ApplicationError> {
        let settings = Self::default().merge_with(&load_raw_settings(path)?);
        let settings = Self::apply_env_overrides(settings)?;
        settings.validate()?;
        Ok(settings)
    }

    /// Apply INSERTORDER_* environment variables as explicit overrides.
    fn apply_env_overrides(mut settings: Self) -> Result<Self, ApplicationError> {
        // Use config crate just for env var parsing
        let config = Config::builder()
            .add_source(
                Environment::with_prefix(ENV_PREFIX)
                    .prefix_separator("_")
                    .separator("__"),
            )
            .build()
            .map_err(config_err)?;

        if let Ok(val) = config.get_string("id_field") {
            settings.id_field = val;
        }
        if let Ok(val) = config.get_string("parent_field") {
            settings.parent_field = val;
        }
        if let Ok(val) = config.get_string("traversal") {
            settings.traversal = val
                .parse()
                .map_err(|message| ApplicationError::Config { message })?;
        }
        if let Ok(val) = config.get_string("validation") {
            settings.validation = match val.trim().to_ascii_lowercase().as_str() {
                "strict" => ValidationMode::Strict,
                "lenient" => ValidationMode::Lenient,
                other => {
                    return Err(ApplicationError::Config {
                        message: format!("unknown validation mode '{other}'"),
                    })
                }
            };
        }
        if let Ok(val) = config.get_bool("pretty") {
            settings.pretty = val;
        }

        Ok(settings)
    }

    fn validate(&self) -> Result<(), ApplicationError> {
        if self.id_field.is_empty() || self.parent_field.is_empty() {
            return Err(ApplicationError::Config {
                message: "id_field and parent_field must not be empty".to_string(),
            });
        }
        if self.id_field == self.parent_field {
            return Err(ApplicationError::Config {
                message: format!(
                    "id_field and parent_field must differ (both '{}')",
                    self.id_field
                ),
            });
        }
        Ok(())
    }

    pub fn fields(&self) -> FieldNames {
        FieldNames::new(self.id_field.clone(), self.parent_field.clone())
    }

    /// Options for the sort service derived from these settings.
    pub fn sort_options(&self) -> SortOptions {
        SortOptions {
            fields: self.fields(),
            traversal: self.traversal,
            validation: self.validation,
            pretty: self.pretty,
        }
    }

    /// Show the effective configuration as TOML.
    pub fn to_toml(&self) -> Result<String, ApplicationError> {
        toml::to_string_pretty(self).map_err(|e| ApplicationError::Config {
            message: format!("serialize config: {e}"),
        })
    }

    /// Generate a template config file.
    pub fn template() -> String {
        r#"# insertorder configuration
#
# Locations (by precedence, lowest to highest):
#   Global: ~/.config/insertorder/insertorder.toml
#   Local:  ./.insertorder.toml (or the directory given with -C)
#   Env:    INSERTORDER_* environment variables (e.g. INSERTORDER_ID_FIELD)
#   Flags:  command line options always win

# Field holding the record identifier
# id_field = "id"

# Field holding the parent identifier (null marks the root)
# parent_field = "parent_id"

# Queue discipline: "level-order" (breadth-first) or "stack" (legacy order)
# traversal = "level-order"

# "lenient" orders whatever is reachable from the root,
# "strict" rejects duplicate ids, multiple roots, orphans and cycles
# validation = "lenient"

# Pretty-print the reordered output
# pretty = true
"#
        .to_string()
    }
}

fn config_err(e: ConfigError) -> ApplicationError {
    ApplicationError::Config {
        message: e.to_string(),
    }
}
