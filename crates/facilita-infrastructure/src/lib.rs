//! File-system adapters for Facilita Hub: JSON document storage, platform
//! paths and the TOML configuration file.

pub mod config;
pub mod paths;
pub mod storage;

pub use crate::config::FacilitaConfig;
pub use crate::paths::FacilitaPaths;
pub use crate::storage::JsonFileStorage;
