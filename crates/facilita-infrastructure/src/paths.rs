//! Unified path management for Facilita files.
//!
//! ```text
//! ~/.config/facilita/          # Config directory
//! └── config.toml              # Application configuration
//!
//! ~/.local/share/facilita/     # Data directory (default)
//! ├── facilita_user.json       # Session record
//! └── facilita_*.json          # Entity families
//! ```

use std::path::PathBuf;

const APP_DIR: &str = "facilita";

/// Errors that can occur during path resolution.
#[derive(Debug)]
pub enum PathError {
    /// Home directory could not be determined.
    HomeDirNotFound,
}

impl std::fmt::Display for PathError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            PathError::HomeDirNotFound => write!(f, "Cannot find home directory"),
        }
    }
}

impl std::error::Error for PathError {}

impl From<PathError> for facilita_core::FacilitaError {
    fn from(e: PathError) -> Self {
        facilita_core::FacilitaError::config(e.to_string())
    }
}

/// Platform-specific locations (XDG on Linux, Application Support on macOS).
pub struct FacilitaPaths;

impl FacilitaPaths {
    /// Returns the configuration directory (e.g. `~/.config/facilita/`).
    pub fn config_dir() -> Result<PathBuf, PathError> {
        dirs::config_dir()
            .map(|dir| dir.join(APP_DIR))
            .ok_or(PathError::HomeDirNotFound)
    }

    /// Returns the default data directory (e.g. `~/.local/share/facilita/`).
    pub fn data_dir() -> Result<PathBuf, PathError> {
        dirs::data_dir()
            .map(|dir| dir.join(APP_DIR))
            .ok_or(PathError::HomeDirNotFound)
    }

    /// Returns the path to the main configuration file.
    pub fn config_file() -> Result<PathBuf, PathError> {
        Ok(Self::config_dir()?.join("config.toml"))
    }
}
