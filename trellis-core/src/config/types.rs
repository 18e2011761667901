//! Configuration data structures for the Trellis core layer.
//!
//! These structs are populated by deserializing a TOML configuration file.
//! Missing fields fall back to the defaults in [`super::defaults`], and
//! unknown fields are rejected via `#[serde(deny_unknown_fields)]`.

use super::defaults;
use crate::types::BindingMode;
use serde::Deserialize;
use std::path::PathBuf;

/// Configuration settings for the logging subsystem.
///
/// # Examples
///
/// ```
/// use trellis_core::config::LoggingConfig;
/// use std::path::PathBuf;
///
/// let default_log_config = LoggingConfig::default();
/// assert_eq!(default_log_config.level, "info");
/// assert_eq!(default_log_config.file_path, None);
/// assert_eq!(default_log_config.format, "text");
///
/// let toml_str = r#"
/// level = "debug"
/// file_path = "/var/log/trellis.log"
/// format = "json"
/// "#;
/// let log_config: LoggingConfig = toml::from_str(toml_str).unwrap();
/// assert_eq!(log_config.level, "debug");
/// assert_eq!(log_config.file_path, Some(PathBuf::from("/var/log/trellis.log")));
/// assert_eq!(log_config.format, "json");
/// ```
#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct LoggingConfig {
    /// The minimum log level to record.
    /// Valid values (case-insensitive): "trace", "debug", "info", "warn", "error".
    #[serde(default = "defaults::default_log_level")]
    pub level: String,
    /// Optional path to a file where logs should be written.
    /// If `None`, file logging is disabled.
    #[serde(default = "defaults::default_log_file_path")]
    pub file_path: Option<PathBuf>,
    /// The format for log messages. Valid values: "text", "json".
    #[serde(default = "defaults::default_log_format")]
    pub format: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: defaults::default_log_level(),
            file_path: defaults::default_log_file_path(),
            format: defaults::default_log_format(),
        }
    }
}

/// Configuration for the change-notification engine.
///
/// Entities constructed without an explicit mode pick up
/// [`BindingConfig::default_mode`].
#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct BindingConfig {
    /// The framework-wide default notification batching policy.
    #[serde(default = "defaults::default_binding_mode")]
    pub default_mode: BindingMode,
}

impl Default for BindingConfig {
    fn default() -> Self {
        Self {
            default_mode: defaults::default_binding_mode(),
        }
    }
}

/// Root configuration structure for the Trellis core layer.
///
/// # Examples
///
/// ```
/// use trellis_core::config::CoreConfig;
/// use trellis_core::types::BindingMode;
///
/// let toml_str = r#"
/// [logging]
/// level = "warn"
///
/// [binding]
/// default_mode = "coalesced"
/// "#;
/// let config: CoreConfig = toml::from_str(toml_str).unwrap();
/// assert_eq!(config.logging.level, "warn");
/// assert_eq!(config.binding.default_mode, BindingMode::Coalesced);
/// ```
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct CoreConfig {
    /// Configuration for the logging subsystem.
    #[serde(default)]
    pub logging: LoggingConfig,
    /// Configuration for the change-notification engine.
    #[serde(default)]
    pub binding: BindingConfig,
}
