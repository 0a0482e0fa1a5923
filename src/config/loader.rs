use std::path::{Path, PathBuf};

use tracing::debug;

use crate::error::{Result, TreeGuardError};

use super::Config;
use super::model::CONFIG_VERSION;
use super::validation::validate_config_semantics;

/// Trait for loading rule files from various sources.
pub trait ConfigLoader {
    /// Load the rule file from the default location.
    ///
    /// Returns `None` when no rule file exists there.
    ///
    /// # Errors
    /// Returns an error if the file exists but cannot be read, parsed, or validated.
    fn load(&self) -> Result<Option<Config>>;

    /// Load the rule file at a specific path.
    ///
    /// # Errors
    /// Returns an error if the file cannot be read, parsed, or validated.
    fn load_from_path(&self, path: &Path) -> Result<Config>;
}

/// Name of the rule file looked up in the current directory.
pub const LOCAL_CONFIG_NAME: &str = ".tree-guard.toml";

/// Validate config version. Returns an error if version is unsupported.
fn validate_config_version(config: &Config) -> Result<()> {
    match &config.version {
        None => Ok(()),
        Some(v) if v == CONFIG_VERSION => Ok(()),
        Some(v) => Err(TreeGuardError::Config(format!(
            "Unsupported rule file version '{v}'. Only version '{CONFIG_VERSION}' is supported."
        ))),
    }
}

/// Trait for filesystem operations (for testability).
pub trait FileSystem {
    /// Read file contents as a string.
    ///
    /// # Errors
    /// Returns an error if the file cannot be read.
    fn read_to_string(&self, path: &Path) -> std::io::Result<String>;

    /// Check if a path exists.
    fn exists(&self, path: &Path) -> bool;

    /// Get the current working directory.
    ///
    /// # Errors
    /// Returns an error if the current directory cannot be determined.
    fn current_dir(&self) -> std::io::Result<PathBuf>;
}

/// Real filesystem implementation.
#[derive(Debug, Default, Clone, Copy)]
pub struct RealFileSystem;

impl FileSystem for RealFileSystem {
    fn read_to_string(&self, path: &Path) -> std::io::Result<String> {
        std::fs::read_to_string(path)
    }

    fn exists(&self, path: &Path) -> bool {
        path.exists()
    }

    fn current_dir(&self) -> std::io::Result<PathBuf> {
        std::env::current_dir()
    }
}

/// Loads rule files from the filesystem.
///
/// The default location is `.tree-guard.toml` in the current directory.
#[derive(Debug)]
pub struct FileConfigLoader<F: FileSystem = RealFileSystem> {
    fs: F,
}

impl Default for FileConfigLoader<RealFileSystem> {
    fn default() -> Self {
        Self::new()
    }
}

impl FileConfigLoader<RealFileSystem> {
    #[must_use]
    pub const fn new() -> Self {
        Self { fs: RealFileSystem }
    }
}

impl<F: FileSystem> FileConfigLoader<F> {
    #[must_use]
    pub const fn with_fs(fs: F) -> Self {
        Self { fs }
    }

    fn local_config_path(&self) -> Option<PathBuf> {
        self.fs
            .current_dir()
            .ok()
            .map(|dir| dir.join(LOCAL_CONFIG_NAME))
    }

    /// Parse and validate rule file text.
    ///
    /// # Errors
    /// Returns an error if the text is not valid TOML, has an unsupported
    /// version, or fails semantic validation.
    pub fn parse_config(content: &str) -> Result<Config> {
        let config: Config = toml::from_str(content).map_err(TreeGuardError::from)?;
        validate_config_version(&config)?;
        validate_config_semantics(&config)?;
        Ok(config)
    }
}

impl<F: FileSystem> ConfigLoader for FileConfigLoader<F> {
    fn load(&self) -> Result<Option<Config>> {
        let Some(path) = self.local_config_path() else {
            return Ok(None);
        };
        if !self.fs.exists(&path) {
            debug!(path = %path.display(), "no rule file found");
            return Ok(None);
        }
        self.load_from_path(&path).map(Some)
    }

    fn load_from_path(&self, path: &Path) -> Result<Config> {
        let content = self
            .fs
            .read_to_string(path)
            .map_err(|source| TreeGuardError::FileRead {
                path: path.to_path_buf(),
                source,
            })?;
        let config = Self::parse_config(&content)?;
        debug!(path = %path.display(), rules = config.rules.len(), "loaded rule file");
        Ok(config)
    }
}

#[cfg(test)]
#[path = "loader_tests.rs"]
mod tests;
