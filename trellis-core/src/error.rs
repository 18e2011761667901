//! Error handling for the Trellis core layer.
//!
//! This module defines the error types used throughout the core layer,
//! built on the `thiserror` crate. The main error type is [`CoreError`],
//! which wraps the more specific [`ConfigError`] and [`LoggingError`].

use std::io;
use std::path::PathBuf;
use thiserror::Error;

/// Core error type for the Trellis framework.
///
/// This enum represents all possible errors that can occur in the core
/// layer. Higher layers wrap it rather than re-declaring its variants.
#[derive(Debug, Error)]
pub enum CoreError {
    /// Errors related to configuration loading, parsing, or validation.
    /// Wraps a [`ConfigError`].
    #[error("Configuration Error: {0}")]
    Config(#[from] ConfigError),

    /// Errors that occur while setting up the logging system.
    /// Wraps a [`LoggingError`].
    #[error("Logging Error: {0}")]
    Logging(#[from] LoggingError),

    /// Errors related to filesystem operations that are not covered by
    /// more specific configuration or logging I/O errors.
    #[error("Filesystem Error: {message} (Path: {path:?})")]
    Filesystem {
        message: String,
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// General I/O errors not covered by other specific variants.
    #[error("I/O Error: {0}")]
    Io(#[from] std::io::Error),

    /// Errors due to invalid input provided to a function or method.
    /// Raised for example when an entity identity is constructed from an
    /// empty or all-whitespace key.
    #[error("Invalid Input: {0}")]
    InvalidInput(String),

    /// Catch-all for unexpected internal errors within the core library.
    #[error("An unexpected internal error occurred: {0}")]
    Internal(String),
}

/// Error type for configuration-related operations.
///
/// Typically wrapped by [`CoreError::Config`].
#[derive(Debug, Error)]
pub enum ConfigError {
    /// An error occurred while attempting to read a configuration file.
    #[error("Failed to read configuration file from {path:?}")]
    ReadError {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// An error occurred while parsing a configuration file.
    #[error("Failed to parse configuration file: {0}")]
    ParseError(#[from] toml::de::Error),

    /// The configuration parsed but contained invalid values.
    #[error("Configuration validation failed: {0}")]
    ValidationError(String),

    /// A required base directory (e.g. the XDG config home) could not be
    /// determined.
    #[error("Could not determine base directory for {dir_type}")]
    DirectoryUnavailable { dir_type: String },
}

/// Error type for logging-related operations.
#[derive(Error, Debug)]
pub enum LoggingError {
    /// Failed to initialize the logging system, e.g. because a global
    /// subscriber was already installed.
    #[error("Failed to initialize logging: {0}")]
    InitializationFailure(String),

    /// An I/O error occurred during logging setup, such as failing to
    /// create the log directory.
    #[error("Logging I/O error: {0}")]
    IoError(#[from] io::Error),
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::error::Error;
    use std::io::{Error as IoError, ErrorKind};

    #[test]
    fn core_error_config_variant_carries_source() {
        let core_err = CoreError::Config(ConfigError::ValidationError("bad level".to_string()));

        assert_eq!(
            format!("{}", core_err),
            "Configuration Error: Configuration validation failed: bad level"
        );
        assert!(core_err.source().is_some());
        match core_err.source().unwrap().downcast_ref::<ConfigError>() {
            Some(ConfigError::ValidationError(msg)) => assert_eq!(msg, "bad level"),
            _ => panic!("Incorrect source for CoreError::Config"),
        }
    }

    #[test]
    fn core_error_filesystem_variant() {
        let path = PathBuf::from("/tmp/test.log");
        let core_err = CoreError::Filesystem {
            message: "File operation failed".to_string(),
            path: path.clone(),
            source: IoError::new(ErrorKind::PermissionDenied, "denied"),
        };

        assert_eq!(
            format!("{}", core_err),
            format!("Filesystem Error: File operation failed (Path: {:?})", path)
        );
        assert_eq!(
            core_err
                .source()
                .unwrap()
                .downcast_ref::<IoError>()
                .unwrap()
                .kind(),
            ErrorKind::PermissionDenied
        );
    }

    #[test]
    fn core_error_invalid_input_variant() {
        let core_err = CoreError::InvalidInput("key must not be empty".to_string());
        assert_eq!(format!("{}", core_err), "Invalid Input: key must not be empty");
        assert!(core_err.source().is_none());
    }

    #[test]
    fn config_error_parse_error_from_toml() {
        let toml_err: toml::de::Error = toml::from_str::<toml::Value>("not = valid = toml").unwrap_err();
        let display = format!("{}", toml_err);
        let config_err = ConfigError::ParseError(toml_err);

        assert_eq!(
            format!("{}", config_err),
            format!("Failed to parse configuration file: {}", display)
        );
        assert!(config_err.source().unwrap().is::<toml::de::Error>());
    }

    #[test]
    fn config_error_directory_unavailable_variant() {
        let config_err = ConfigError::DirectoryUnavailable {
            dir_type: "XDG_CONFIG_HOME".to_string(),
        };
        assert_eq!(
            format!("{}", config_err),
            "Could not determine base directory for XDG_CONFIG_HOME"
        );
    }

    #[test]
    fn logging_error_io_error_variant() {
        let log_err = LoggingError::IoError(IoError::new(ErrorKind::BrokenPipe, "pipe broken"));
        assert_eq!(format!("{}", log_err), "Logging I/O error: pipe broken");
        assert!(log_err.source().is_some());
    }
}
