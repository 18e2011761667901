//! Utility helpers for the Trellis core layer.

pub mod fs;
pub mod paths;

pub use fs::{ensure_dir_exists, read_file_to_string};
pub use paths::{get_app_config_dir, get_app_state_dir};
