//! Application configuration loaded from `config.toml`.

use crate::paths::FacilitaPaths;
use facilita_core::error::Result;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

/// Settings read at startup. Every field has a default, so a missing or
/// partial file is valid.
///
/// ```toml
/// data_dir = "/var/lib/facilita"
/// seed_catalog = true
/// default_payment_method = "Dinheiro"
/// log_level = "info"
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FacilitaConfig {
    /// Directory holding the JSON documents. `None` means the platform data dir.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data_dir: Option<PathBuf>,
    /// Load the demo service catalog when no services are stored.
    pub seed_catalog: bool,
    /// Method label recorded on payments requested by providers.
    pub default_payment_method: String,
    /// Default tracing filter when `RUST_LOG` is unset.
    pub log_level: String,
}

impl Default for FacilitaConfig {
    fn default() -> Self {
        Self {
            data_dir: None,
            seed_catalog: true,
            default_payment_method: "Dinheiro".to_string(),
            log_level: "info".to_string(),
        }
    }
}

impl FacilitaConfig {
    /// Loads the config at `path`, or defaults when the file is absent.
    ///
    /// # Errors
    ///
    /// Returns an error if the file exists but cannot be read or parsed.
    pub fn load_from(path: &Path) -> Result<Self> {
        if !path.exists() {
            tracing::debug!("No config at {:?}, using defaults", path);
            return Ok(Self::default());
        }
        let content = fs::read_to_string(path)?;
        let config: Self = toml::from_str(&content)?;
        tracing::debug!("Loaded config from {:?}", path);
        Ok(config)
    }

    /// Loads from the platform config file (`~/.config/facilita/config.toml`).
    pub fn load_default() -> Result<Self> {
        Self::load_from(&FacilitaPaths::config_file()?)
    }

    /// The configured data directory, falling back to the platform default.
    pub fn resolve_data_dir(&self) -> Result<PathBuf> {
        match &self.data_dir {
            Some(dir) => Ok(dir.clone()),
            None => Ok(FacilitaPaths::data_dir()?),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_missing_file_gives_defaults() {
        let temp_dir = TempDir::new().unwrap();
        let config = FacilitaConfig::load_from(&temp_dir.path().join("config.toml")).unwrap();
        assert_eq!(config, FacilitaConfig::default());
        assert!(config.seed_catalog);
        assert_eq!(config.default_payment_method, "Dinheiro");
    }

    #[test]
    fn test_partial_file_keeps_other_defaults() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("config.toml");
        fs::write(&path, "seed_catalog = false\ndata_dir = \"/tmp/facilita\"\n").unwrap();

        let config = FacilitaConfig::load_from(&path).unwrap();

        assert!(!config.seed_catalog);
        assert_eq!(config.data_dir, Some(PathBuf::from("/tmp/facilita")));
        assert_eq!(config.log_level, "info");
        assert_eq!(
            config.resolve_data_dir().unwrap(),
            PathBuf::from("/tmp/facilita")
        );
    }

    #[test]
    fn test_invalid_toml_is_an_error() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("config.toml");
        fs::write(&path, "seed_catalog = [").unwrap();

        let err = FacilitaConfig::load_from(&path).unwrap_err();
        assert!(err.is_serialization());
    }
}
