//! Config persistence.
//!
//! The config lives in a single TOML file. A file that is missing, does not
//! parse, or was written with a different format version is treated as
//! absent by [`ConfigStore::load_or_default`], so a configure run always
//! starts from a usable baseline.

use crate::reporter::Reporter;
use freeze_schema::{CONFIG_VERSION, Config};
use std::path::{Path, PathBuf};
use thiserror::Error;
use tokio::fs;

/// Errors raised while reading or writing the config file.
#[derive(Error, Debug)]
pub enum StoreError {
    #[error("Config file not found: {0}")]
    NotFound(PathBuf),

    #[error("IO error on config file: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to parse config file: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("Failed to serialize config: {0}")]
    Serialize(#[from] toml::ser::Error),

    #[error("Config format version {found} is not supported (expected {expected})")]
    Version { found: u32, expected: u32 },
}

/// Reads and writes one config file.
#[derive(Debug, Clone)]
pub struct ConfigStore {
    path: PathBuf,
}

impl ConfigStore {
    /// Create a store backed by `path`. Nothing is read until [`load`](Self::load).
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Location of the config file.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Load the config, failing on any problem.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::NotFound`] if the file does not exist,
    /// [`StoreError::Parse`] if it is not valid TOML for the schema, and
    /// [`StoreError::Version`] if it was written in another format version.
    pub async fn load(&self) -> Result<Config, StoreError> {
        if !fs::try_exists(&self.path).await? {
            return Err(StoreError::NotFound(self.path.clone()));
        }

        let content = fs::read_to_string(&self.path).await?;
        let config: Config = toml::from_str(&content)?;

        if config.version != CONFIG_VERSION {
            return Err(StoreError::Version {
                found: config.version,
                expected: CONFIG_VERSION,
            });
        }

        Ok(config)
    }

    /// Load the previous config, falling back to defaults.
    ///
    /// A config that exists but cannot be used is reported as a warning.
    pub async fn load_or_default(&self, reporter: &dyn Reporter) -> Config {
        match self.load().await {
            Ok(config) => {
                tracing::info!("read old config from {}", self.path.display());
                config
            }
            Err(StoreError::NotFound(_)) => {
                tracing::debug!("no previous config at {}", self.path.display());
                Config::default()
            }
            Err(e) => {
                tracing::warn!("ignoring previous config {}: {e}", self.path.display());
                reporter.warning(&format!("ignoring previous config: {e}"));
                Config::default()
            }
        }
    }

    /// Atomically persist the config.
    ///
    /// The file is first written next to its final location and then renamed
    /// so that readers never observe a partially written config.
    ///
    /// # Errors
    ///
    /// Returns an error if serialization, directory creation, writing, or the
    /// rename fails.
    pub async fn save(&self, config: &Config) -> Result<(), StoreError> {
        let content = toml::to_string_pretty(config)?;

        if let Some(parent) = self.path.parent()
            && !parent.as_os_str().is_empty()
        {
            fs::create_dir_all(parent).await?;
        }

        // Atomic write: write to temp file, then rename
        let temp_path = self.path.with_extension("toml.tmp");
        fs::write(&temp_path, &content).await?;
        fs::rename(&temp_path, &self.path).await?;

        Ok(())
    }
}
