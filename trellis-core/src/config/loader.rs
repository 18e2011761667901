//! Configuration loading and validation.
//!
//! [`ConfigLoader`] locates, parses, and validates the [`CoreConfig`] for the
//! framework. A missing configuration file is not an error: the defaults are
//! used, so the framework comes up even when never configured.

use crate::config::CoreConfig;
use crate::error::{ConfigError, CoreError};
use crate::utils::fs as core_fs;
use crate::utils::paths::{get_app_config_dir, get_app_state_dir};
use std::path::{Path, PathBuf};

const CONFIG_FILE_NAME: &str = "config.toml";

const VALID_LOG_LEVELS: &[&str] = &["trace", "debug", "info", "warn", "error"];
const VALID_LOG_FORMATS: &[&str] = &["text", "json"];

/// Namespace struct for configuration loading logic.
pub struct ConfigLoader;

impl ConfigLoader {
    /// Loads and validates the `CoreConfig` from the application's XDG
    /// configuration directory (`config.toml`).
    ///
    /// A missing file yields the default configuration. Read failures other
    /// than not-found, parse failures, and validation failures are returned
    /// as [`CoreError::Config`] variants.
    pub fn load() -> Result<CoreConfig, CoreError> {
        let path = get_app_config_dir()?.join(CONFIG_FILE_NAME);
        if !path.exists() {
            tracing::debug!(path = %path.display(), "No configuration file found, using defaults");
            let mut config = CoreConfig::default();
            Self::validate_config(&mut config)?;
            Self::resolve_log_path(&mut config)?;
            return Ok(config);
        }
        let mut config = Self::load_from_path(&path)?;
        Self::resolve_log_path(&mut config)?;
        Ok(config)
    }

    /// Loads and validates the `CoreConfig` from an explicit file path.
    ///
    /// Unlike [`ConfigLoader::load`], a missing file here is an error, and
    /// relative log file paths are left untouched.
    pub fn load_from_path(path: &Path) -> Result<CoreConfig, CoreError> {
        let content = match core_fs::read_file_to_string(path) {
            Ok(content) => content,
            Err(CoreError::Filesystem { path, source, .. }) => {
                return Err(CoreError::Config(ConfigError::ReadError { path, source }));
            }
            Err(other) => return Err(other),
        };

        let mut config: CoreConfig =
            toml::from_str(&content).map_err(|e| CoreError::Config(ConfigError::ParseError(e)))?;
        Self::validate_config(&mut config)?;
        Ok(config)
    }

    /// Normalizes and validates the configuration in place.
    ///
    /// Log level and format strings are lowercased; values outside the
    /// accepted sets fail with [`ConfigError::ValidationError`].
    fn validate_config(config: &mut CoreConfig) -> Result<(), CoreError> {
        config.logging.level = config.logging.level.to_lowercase();
        if !VALID_LOG_LEVELS.contains(&config.logging.level.as_str()) {
            return Err(CoreError::Config(ConfigError::ValidationError(format!(
                "Invalid log level '{}'. Expected one of: {}",
                config.logging.level,
                VALID_LOG_LEVELS.join(", ")
            ))));
        }

        config.logging.format = config.logging.format.to_lowercase();
        if !VALID_LOG_FORMATS.contains(&config.logging.format.as_str()) {
            return Err(CoreError::Config(ConfigError::ValidationError(format!(
                "Invalid log format '{}'. Expected one of: {}",
                config.logging.format,
                VALID_LOG_FORMATS.join(", ")
            ))));
        }

        Ok(())
    }

    /// Resolves a relative log file path against the application state
    /// directory and ensures its parent directory exists.
    fn resolve_log_path(config: &mut CoreConfig) -> Result<(), CoreError> {
        if let Some(file_path) = config.logging.file_path.take() {
            let resolved: PathBuf = if file_path.is_relative() {
                get_app_state_dir()?.join(file_path)
            } else {
                file_path
            };
            if let Some(parent) = resolved.parent() {
                if !parent.as_os_str().is_empty() {
                    core_fs::ensure_dir_exists(parent)?;
                }
            }
            config.logging.file_path = Some(resolved);
        }
        Ok(())
    }
}
