use anyhow::Context;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

/// Application configuration
#[derive(Serialize, Deserialize, Clone, Debug, Default)]
#[serde(default)]
pub struct Config {
    pub general: GeneralConfig,
    pub listing: ListingConfig,
    pub operations: OperationsConfig,
}

/// Session startup
#[derive(Serialize, Deserialize, Clone, Debug, Default)]
#[serde(default)]
pub struct GeneralConfig {
    /// Directory to start in; the home directory when unset
    pub start_dir: Option<PathBuf>,
}

/// How directory contents are listed
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
#[serde(default)]
pub struct ListingConfig {
    /// Include dot files
    pub show_hidden: bool,
    /// Entry order: "name" or "none" (whatever the OS returns)
    pub sort_by: SortBy,
    /// Show directories before files
    pub dirs_first: bool,
}

#[derive(Serialize, Deserialize, Clone, Copy, Debug, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum SortBy {
    Name,
    None,
}

/// Copy, move and delete behavior
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
#[serde(default)]
pub struct OperationsConfig {
    /// Send deleted items to the system trash
    pub use_trash: bool,
    /// Keep timestamps on copied files
    pub preserve_metadata: bool,
    /// Ask before deleting the selection
    pub confirm_delete: bool,
}

impl Default for ListingConfig {
    fn default() -> Self {
        ListingConfig {
            show_hidden: true,
            sort_by: SortBy::Name,
            dirs_first: false,
        }
    }
}

impl Default for OperationsConfig {
    fn default() -> Self {
        OperationsConfig {
            use_trash: false,
            preserve_metadata: true,
            confirm_delete: true,
        }
    }
}

impl Config {
    /// Get the path to the config file
    pub fn config_path() -> Option<PathBuf> {
        directories::ProjectDirs::from("", "", "fmgr")
            .map(|proj_dirs| proj_dirs.config_dir().join("config.toml"))
    }

    /// Load configuration from `path` (or the default location), falling
    /// back to defaults when the file is missing or broken
    pub fn load(path: Option<&Path>) -> Self {
        let Some(path) = path.map(Path::to_path_buf).or_else(Self::config_path) else {
            return Config::default();
        };
        if !path.exists() {
            tracing::debug!("No config file at {:?}, using defaults", path);
            return Config::default();
        }

        match Self::read(&path) {
            Ok(config) => {
                tracing::info!("Config loaded from {:?}", path);
                config
            }
            Err(e) => {
                tracing::warn!("{:#}; using default configuration", e);
                Config::default()
            }
        }
    }

    fn read(path: &Path) -> anyhow::Result<Self> {
        let contents = fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file {}", path.display()))?;
        toml::from_str(&contents)
            .with_context(|| format!("Failed to parse config file {}", path.display()))
    }

    /// Save configuration to `path`
    pub fn save(&self, path: &Path) -> anyhow::Result<()> {
        // Create config directory if it doesn't exist
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }

        let contents = toml::to_string_pretty(self)?;
        fs::write(path, contents)?;
        Ok(())
    }

    /// Write a default config file unless one exists; returns where it lives
    pub fn create_default(path: Option<&Path>) -> anyhow::Result<PathBuf> {
        let path = path
            .map(Path::to_path_buf)
            .or_else(Self::config_path)
            .context("Could not determine config directory")?;
        if !path.exists() {
            Config::default().save(&path)?;
        }
        Ok(path)
    }
}
