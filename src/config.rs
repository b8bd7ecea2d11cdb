//! Application configuration management.
//!
//! Settings are layered with `figment`:
//!
//! 1. Built-in defaults
//! 2. TOML config file (platform config dir, or `--config PATH`)
//! 3. `BADGELOG_*` environment variables
//! 4. CLI flags (applied by [`Config::merge_cli`])

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use directories::ProjectDirs;
use figment::providers::{Env, Format, Serialized, Toml};
use figment::Figment;
use serde::{Deserialize, Serialize};

use crate::cli::Cli;

/// Environment variable prefix for configuration overrides.
pub const ENV_PREFIX: &str = "BADGELOG_";

/// Application configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Directory holding the store and the export.
    pub data_dir: PathBuf,
    /// Binary store file name, relative to `data_dir`.
    pub store_file: PathBuf,
    /// JSON export file name, relative to `data_dir`.
    pub export_file: PathBuf,
    /// Colored terminal output.
    pub color: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            data_dir: PathBuf::from("data"),
            store_file: PathBuf::from("attendance.bin"),
            export_file: PathBuf::from("attendance.json"),
            color: true,
        }
    }
}

impl Config {
    /// Load from the default platform-specific path.
    ///
    /// Errors are logged and defaults are used.
    #[must_use]
    pub fn load() -> Self {
        match Self::default_path() {
            Ok(path) => Self::load_from_path(path),
            Err(e) => {
                log::debug!("No config directory available, using defaults: {}", e);
                Self::load_layers(None)
            }
        }
    }

    /// Load using a specific config file path.
    ///
    /// A missing file is skipped. An invalid file is logged and defaults
    /// are used.
    #[must_use]
    pub fn load_from_path(path: impl AsRef<Path>) -> Self {
        Self::load_layers(Some(path.as_ref()))
    }

    fn load_layers(path: Option<&Path>) -> Self {
        let mut figment = Figment::from(Serialized::defaults(Self::default()));
        if let Some(path) = path {
            if path.exists() {
                log::debug!("Loading config from {}", path.display());
                figment = figment.merge(Toml::file(path));
            }
        }
        figment = figment.merge(Env::prefixed(ENV_PREFIX));

        match figment.extract() {
            Ok(config) => config,
            Err(e) => {
                log::warn!("Invalid configuration, using defaults: {}", e);
                Self::default()
            }
        }
    }

    /// Apply CLI flags on top of file and environment settings.
    pub fn merge_cli(&mut self, cli: &Cli) {
        if let Some(dir) = &cli.data_dir {
            self.data_dir = dir.clone();
        }
        if cli.no_color {
            self.color = false;
        }
    }

    /// Write the configuration as TOML to `path`.
    ///
    /// # Errors
    ///
    /// Returns an error if the parent directory or file cannot be written.
    pub fn save_to(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create {}", parent.display()))?;
        }
        let content = toml::to_string_pretty(self).context("Failed to serialize config")?;
        fs::write(path, content)
            .with_context(|| format!("Failed to write config to {}", path.display()))?;
        Ok(())
    }

    /// Default platform-specific configuration path.
    ///
    /// # Errors
    ///
    /// Returns an error if no home directory can be determined.
    pub fn default_path() -> Result<PathBuf> {
        let project_dirs = ProjectDirs::from("com", "badgelog", "badgelog")
            .ok_or_else(|| anyhow::anyhow!("Failed to determine project directories"))?;
        Ok(project_dirs.config_dir().join("config.toml"))
    }
}
