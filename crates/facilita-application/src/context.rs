//! Application context.
//!
//! Owns the session store and the data store for one running instance and
//! hands them to the use-case services.

use anyhow::{Context, Result};
use facilita_core::FacilitaError;
use facilita_core::auth::{AcceptAllVerifier, CredentialVerifier, SessionStore};
use facilita_core::data::DataStore;
use facilita_core::storage::{InMemoryStorage, KeyValueStorage};
use facilita_core::user::{User, UserRole};
use facilita_infrastructure::{FacilitaConfig, JsonFileStorage};
use std::sync::Arc;
use tokio::sync::RwLock;

/// Settings the use cases read at runtime.
#[derive(Debug, Clone, PartialEq)]
pub struct MarketplaceSettings {
    /// Method label recorded on payments requested by providers.
    pub default_payment_method: String,
}

impl Default for MarketplaceSettings {
    fn default() -> Self {
        Self {
            default_payment_method: "Dinheiro".to_string(),
        }
    }
}

impl From<&FacilitaConfig> for MarketplaceSettings {
    fn from(config: &FacilitaConfig) -> Self {
        Self {
            default_payment_method: config.default_payment_method.clone(),
        }
    }
}

/// The session and data stores of one instance.
///
/// Locks are always taken session first, then data.
pub struct AppContext {
    session: RwLock<SessionStore>,
    data: RwLock<DataStore>,
    settings: MarketplaceSettings,
}

impl AppContext {
    /// Builds a context over `storage`, restoring any persisted session and
    /// loading every entity family.
    pub fn new(
        storage: Arc<dyn KeyValueStorage>,
        verifier: Arc<dyn CredentialVerifier>,
        settings: MarketplaceSettings,
        seed_catalog: bool,
    ) -> Self {
        let mut session = SessionStore::new(storage.clone(), verifier);
        session.initialize();
        let data = DataStore::load(storage, seed_catalog);
        Self {
            session: RwLock::new(session),
            data: RwLock::new(data),
            settings,
        }
    }

    /// Opens the file-backed context described by `config`.
    pub fn open(config: &FacilitaConfig) -> Result<Self> {
        let data_dir = config.resolve_data_dir()?;
        let storage = JsonFileStorage::new(&data_dir)
            .with_context(|| format!("Failed to open data directory {:?}", data_dir))?;
        tracing::info!("Opened data directory {:?}", data_dir);
        Ok(Self::new(
            Arc::new(storage),
            Arc::new(AcceptAllVerifier),
            MarketplaceSettings::from(config),
            config.seed_catalog,
        ))
    }

    /// An ephemeral context with the demo catalog.
    pub fn in_memory() -> Self {
        Self::new(
            Arc::new(InMemoryStorage::new()),
            Arc::new(AcceptAllVerifier),
            MarketplaceSettings::default(),
            true,
        )
    }

    pub fn session(&self) -> &RwLock<SessionStore> {
        &self.session
    }

    pub fn data(&self) -> &RwLock<DataStore> {
        &self.data
    }

    pub fn settings(&self) -> &MarketplaceSettings {
        &self.settings
    }

    /// Clones the current user when their role is in `allowed` (any role
    /// when empty).
    pub async fn require_user(
        &self,
        allowed: &[UserRole],
    ) -> std::result::Result<User, FacilitaError> {
        self.session.read().await.require_role(allowed).cloned()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[tokio::test]
    async fn test_open_restores_session_from_data_dir() {
        let temp_dir = TempDir::new().unwrap();
        let config = FacilitaConfig {
            data_dir: Some(temp_dir.path().to_path_buf()),
            default_payment_method: "Pix".to_string(),
            ..FacilitaConfig::default()
        };

        {
            let ctx = AppContext::open(&config).unwrap();
            ctx.session()
                .write()
                .await
                .login("ana@example.com", "123456", UserRole::Customer)
                .await
                .unwrap();
        }

        let ctx = AppContext::open(&config).unwrap();
        let user = ctx.require_user(&[UserRole::Customer]).await.unwrap();
        assert_eq!(user.email, "ana@example.com");
        assert_eq!(ctx.settings().default_payment_method, "Pix");
        assert_eq!(ctx.data().read().await.services().len(), 3);
    }

    #[tokio::test]
    async fn test_in_memory_starts_signed_out() {
        let ctx = AppContext::in_memory();
        let err = ctx.require_user(&[]).await.unwrap_err();
        assert_eq!(err, FacilitaError::Unauthenticated);
    }
}
