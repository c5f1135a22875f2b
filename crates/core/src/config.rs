//! Application configuration layered from defaults, an optional file and the environment.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use config::{Config, Environment, File};
use serde::{Deserialize, Serialize};

/// Directory under the user's config dir holding `config.toml`.
pub const CONFIG_DIR_NAME: &str = "skyport";
/// Prefix for environment overrides, e.g. `SKYPORT_LOG_DIR`.
pub const ENV_PREFIX: &str = "SKYPORT";

/// Runtime settings for the console.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    /// Directory receiving `skyport.log`. Defaults to `./logs`.
    pub log_dir: Option<PathBuf>,
    /// Colour error and success lines when stdout is a terminal.
    pub color: bool,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            log_dir: None,
            color: true,
        }
    }
}

impl AppConfig {
    /// Load from the default config file location, if present.
    pub fn load() -> Result<Self> {
        Self::load_from(default_config_path())
    }

    /// Load from `path`; a missing file leaves the defaults in place.
    pub fn load_from(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let settings = Config::builder()
            .add_source(File::from(path.to_path_buf()).required(false))
            .add_source(
                Environment::with_prefix(ENV_PREFIX)
                    .prefix_separator("_")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()
            .with_context(|| format!("failed to read configuration {}", path.display()))?;

        settings
            .try_deserialize()
            .with_context(|| format!("failed to parse configuration {}", path.display()))
    }

    /// Resolved log directory.
    pub fn log_dir(&self) -> PathBuf {
        self.log_dir
            .clone()
            .unwrap_or_else(|| PathBuf::from("logs"))
    }
}

/// `~/.config/skyport/config.toml` or the platform equivalent.
pub fn default_config_path() -> PathBuf {
    dirs::config_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join(CONFIG_DIR_NAME)
        .join("config.toml")
}
