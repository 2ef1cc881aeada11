//! Configuration management with layered loading
//!
//! Precedence (lowest to highest):
//! 1. Compiled defaults
//! 2. Global config: `$XDG_CONFIG_HOME/famgraph/famgraph.toml`
//! 3. Local config: explicit file passed by the caller (e.g. `--config`)
//! 4. Environment variables: `FAMGRAPH_*` prefix, `__` between nested keys
//!    (`FAMGRAPH_LAYOUT__NODE_SPACING=40`)

use std::path::{Path, PathBuf};
use std::time::Duration;

use config::{Config, ConfigError, Environment, File, FileFormat};
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};

use crate::application::ApplicationError;
use crate::domain::NodeSizing;
use crate::infrastructure::LayoutOptions;

/// Unified configuration for famgraph.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct Settings {
    /// Layered layout defaults, overridable per call
    pub layout: LayoutOptions,
    /// Node footprints shared by layout and bounds computation
    pub sizing: NodeSizing,
    /// Upper bound for one layout run in milliseconds; 0 disables the limit
    pub timeout_ms: u64,
    /// Fail the orchestrator on dangling edges instead of laying them out
    pub validate_graph: bool,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            layout: LayoutOptions::default(),
            sizing: NodeSizing::default(),
            timeout_ms: 5_000,
            validate_graph: false,
        }
    }
}

/// Get the XDG config directory for famgraph.
pub fn global_config_dir() -> Option<PathBuf> {
    ProjectDirs::from("", "", "famgraph").map(|dirs| dirs.config_dir().to_path_buf())
}

/// Get the path to the global config file.
pub fn global_config_path() -> Option<PathBuf> {
    global_config_dir().map(|dir| dir.join("famgraph.toml"))
}

fn config_err(e: ConfigError) -> ApplicationError {
    ApplicationError::Config {
        message: e.to_string(),
    }
}

impl Settings {
    /// Layout timeout, `None` when disabled.
    pub fn timeout(&self) -> Option<Duration> {
        (self.timeout_ms > 0).then(|| Duration::from_millis(self.timeout_ms))
    }

    /// Load settings with layered precedence.
    ///
    /// # Arguments
    /// * `local` - Optional config file; must exist when given
    pub fn load(local: Option<&Path>) -> Result<Self, ApplicationError> {
        Self::load_from(global_config_path().as_deref(), local)
    }

    /// Same as [`Settings::load`] with an explicit global file location.
    pub fn load_from(global: Option<&Path>, local: Option<&Path>) -> Result<Self, ApplicationError> {
        let defaults = Config::try_from(&Settings::default()).map_err(config_err)?;
        let mut builder = Config::builder().add_source(defaults);

        if let Some(global_path) = global {
            if global_path.exists() {
                builder = builder.add_source(
                    File::from(global_path)
                        .format(FileFormat::Toml)
                        .required(false),
                );
            }
        }

        if let Some(local_path) = local {
            if !local_path.is_file() {
                return Err(ApplicationError::Config {
                    message: format!("config file not found: {}", local_path.display()),
                });
            }
            builder = builder.add_source(File::from(local_path).format(FileFormat::Toml));
        }

        builder = builder.add_source(
            Environment::with_prefix("FAMGRAPH")
                .prefix_separator("_")
                .separator("__")
                .try_parsing(true),
        );

        let config = builder.build().map_err(config_err)?;
        let settings: Self = config.try_deserialize().map_err(config_err)?;
        settings.check()?;
        Ok(settings)
    }

    /// Reject values the layout engine would refuse anyway.
    fn check(&self) -> Result<(), ApplicationError> {
        let spacings = [
            ("layout.node_spacing", self.layout.node_spacing),
            ("layout.layer_spacing", self.layout.layer_spacing),
        ];
        for (key, value) in spacings {
            if !value.is_finite() || value < 0.0 {
                return Err(ApplicationError::Config {
                    message: format!("{} must be a non-negative number, got {}", key, value),
                });
            }
        }
        let sizes = [
            ("sizing.person", self.sizing.person),
            ("sizing.union", self.sizing.union),
        ];
        for (key, size) in sizes {
            if !(size.width > 0.0 && size.height > 0.0) {
                return Err(ApplicationError::Config {
                    message: format!("{} must have a positive width and height", key),
                });
            }
        }
        Ok(())
    }

    /// Render as TOML, e.g. for `famgraph config show`.
    pub fn to_toml(&self) -> Result<String, ApplicationError> {
        toml::to_string_pretty(self).map_err(|e| ApplicationError::Config {
            message: format!("serialize settings: {}", e),
        })
    }
}
