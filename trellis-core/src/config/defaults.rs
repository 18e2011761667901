//! Default configuration values.
//!
//! These functions back `serde`'s `default` attributes in the configuration
//! structures, providing sensible values when fields are absent from the
//! configuration file.

use crate::types::BindingMode;
use std::path::PathBuf;

/// Returns the default log level string (`"info"`).
pub(super) fn default_log_level() -> String {
    "info".to_string()
}

/// Returns the default log file path (`None`; file logging disabled).
pub(super) fn default_log_file_path() -> Option<PathBuf> {
    None
}

/// Returns the default log format string (`"text"`).
pub(super) fn default_log_format() -> String {
    "text".to_string()
}

/// Returns the default notification batching policy.
pub(super) fn default_binding_mode() -> BindingMode {
    BindingMode::PerProperty
}
