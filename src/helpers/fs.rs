//! File System Utilities
//!
//! Platform directories for the config file and rolling logs.

use crate::error::{Error, Result};
use directories::ProjectDirs;
use std::fs;
use std::path::PathBuf;

fn project_dirs() -> Result<ProjectDirs> {
    ProjectDirs::from("com", "rubiks", "switch-relay").ok_or_else(|| Error::Invalid {
        message: "Could not determine project directories".to_string(),
    })
}

/// Get the application's configuration directory (not created)
///
/// Platform-specific locations:
/// - **Linux**: `~/.config/switch-relay/` or `$XDG_CONFIG_HOME/switch-relay/`
/// - **macOS**: `~/Library/Application Support/com.rubiks.switch-relay/`
/// - **Windows**: `C:\Users\<User>\AppData\Roaming\rubiks\switch-relay\config\`
pub fn config_dir() -> Result<PathBuf> {
    Ok(project_dirs()?.config_dir().to_path_buf())
}

/// Get or create the data directory used for rolling log files
///
/// Platform-specific locations:
/// - **Linux**: `~/.local/share/switch-relay/`
/// - **macOS**: `~/Library/Application Support/com.rubiks.switch-relay/`
/// - **Windows**: `C:\Users\<User>\AppData\Roaming\rubiks\switch-relay\data\`
pub fn get_or_create_data_dir() -> Result<PathBuf> {
    let project_dirs = project_dirs()?;
    let data_dir = project_dirs.data_dir();

    if !data_dir.exists() {
        fs::create_dir_all(data_dir)?;
    }

    Ok(data_dir.to_path_buf())
}
