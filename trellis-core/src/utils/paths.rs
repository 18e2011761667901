//! XDG base-directory resolution for Trellis, via `directories-next`.

use crate::error::{ConfigError, CoreError};
use directories::ProjectDirs;
use std::path::PathBuf;

const QUALIFIER: &str = "org";
const ORGANIZATION: &str = "Trellis";
const APPLICATION: &str = "Trellis";

fn project_dirs() -> Result<ProjectDirs, CoreError> {
    ProjectDirs::from(QUALIFIER, ORGANIZATION, APPLICATION).ok_or_else(|| {
        CoreError::Config(ConfigError::DirectoryUnavailable {
            dir_type: "project directories (HOME not set?)".to_string(),
        })
    })
}

/// Returns the application-specific configuration directory
/// (e.g. `~/.config/trellis` on Linux).
pub fn get_app_config_dir() -> Result<PathBuf, CoreError> {
    Ok(project_dirs()?.config_dir().to_path_buf())
}

/// Returns the application-specific state directory, used for resolving
/// relative log file paths. Falls back to the data directory on platforms
/// without a state directory concept.
pub fn get_app_state_dir() -> Result<PathBuf, CoreError> {
    let dirs = project_dirs()?;
    Ok(dirs
        .state_dir()
        .map(|p| p.to_path_buf())
        .unwrap_or_else(|| dirs.data_dir().to_path_buf()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn app_dirs_resolve_on_test_host() {
        // Both lookups either resolve or report DirectoryUnavailable;
        // on a normal test host with HOME set they resolve.
        if let Ok(dir) = get_app_config_dir() {
            assert!(dir.to_string_lossy().to_lowercase().contains("trellis"));
        }
        if let Ok(dir) = get_app_state_dir() {
            assert!(dir.to_string_lossy().to_lowercase().contains("trellis"));
        }
    }
}
