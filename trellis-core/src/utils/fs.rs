//! Filesystem helpers used by the configuration and logging subsystems.

use crate::error::CoreError;
use std::fs;
use std::path::Path;

/// Ensures that a directory exists at the given path.
///
/// If the path does not exist it is created, including any necessary parent
/// directories. If the path exists but is not a directory, an error is
/// returned.
pub fn ensure_dir_exists(path: &Path) -> Result<(), CoreError> {
    if path.exists() {
        if !path.is_dir() {
            return Err(CoreError::Filesystem {
                message: "Path exists but is not a directory".to_string(),
                path: path.to_path_buf(),
                source: std::io::Error::new(
                    std::io::ErrorKind::AlreadyExists,
                    "Path exists but is not a directory",
                ),
            });
        }
        return Ok(());
    }
    fs::create_dir_all(path).map_err(|source| CoreError::Filesystem {
        message: "Failed to create directory".to_string(),
        path: path.to_path_buf(),
        source,
    })
}

/// Reads the entire contents of a file into a string.
pub fn read_file_to_string(path: &Path) -> Result<String, CoreError> {
    fs::read_to_string(path).map_err(|source| CoreError::Filesystem {
        message: "Failed to read file".to_string(),
        path: path.to_path_buf(),
        source,
    })
}
