//! The session store.

use super::validation::{Credentials, SignupForm, format_phone};
use super::verifier::CredentialVerifier;
use crate::error::{FacilitaError, Result};
use crate::storage::{KeyValueStorage, StorageKey};
use crate::user::{User, UserRole};
use std::sync::Arc;

/// Authentication state of the running instance.
///
/// ```text
/// Uninitialized ──initialize──► Loading ──► Authenticated(User) | Unauthenticated
/// ```
///
/// `login` moves any state to `Authenticated`; `logout` moves to
/// `Unauthenticated`.
#[derive(Debug, Clone, PartialEq, Default)]
pub enum SessionState {
    #[default]
    Uninitialized,
    Loading,
    Authenticated(User),
    Unauthenticated,
}

/// Holds zero or one authenticated user and persists it across restarts.
pub struct SessionStore {
    storage: Arc<dyn KeyValueStorage>,
    verifier: Arc<dyn CredentialVerifier>,
    state: SessionState,
}

impl SessionStore {
    /// Creates an uninitialised store. Call [`initialize`](Self::initialize)
    /// to restore a persisted session.
    pub fn new(storage: Arc<dyn KeyValueStorage>, verifier: Arc<dyn CredentialVerifier>) -> Self {
        Self {
            storage,
            verifier,
            state: SessionState::Uninitialized,
        }
    }

    /// Restores the persisted user, if any.
    ///
    /// An absent, unreadable or corrupt record leaves the session
    /// unauthenticated; there is no retry.
    pub fn initialize(&mut self) -> &SessionState {
        self.state = SessionState::Loading;

        self.state = match self.storage.get(StorageKey::User) {
            Ok(Some(raw)) => match serde_json::from_str::<User>(&raw) {
                Ok(user) => {
                    tracing::info!("Restored session for {} ({})", user.email, user.role);
                    SessionState::Authenticated(user)
                }
                Err(e) => {
                    tracing::warn!("Ignoring corrupt session record: {}", e);
                    SessionState::Unauthenticated
                }
            },
            Ok(None) => SessionState::Unauthenticated,
            Err(e) => {
                tracing::warn!("Failed to read session record: {}", e);
                SessionState::Unauthenticated
            }
        };
        &self.state
    }

    /// Authenticates with the configured verifier and persists the user.
    ///
    /// # Errors
    ///
    /// `Validation` when the email or password is malformed, or whatever the
    /// verifier rejects the credentials with. The previous state is kept on
    /// error.
    pub async fn login(&mut self, email: &str, password: &str, role: UserRole) -> Result<User> {
        let credentials = Credentials::new(email, password, role);
        credentials.validate()?;
        let user = self.verifier.verify(&credentials).await?;
        self.authenticate(user.clone());
        Ok(user)
    }

    /// Validates a signup form, then logs in and stores the supplied name and phone.
    pub async fn signup(&mut self, form: &SignupForm) -> Result<User> {
        form.validate()?;
        let credentials = form.credentials()?;
        let mut user = self.verifier.verify(&credentials).await?;
        user.name = form.name.trim().to_string();
        user.phone = Some(format_phone(&form.phone));
        self.authenticate(user.clone());
        Ok(user)
    }

    /// Clears the persisted session.
    pub fn logout(&mut self) {
        if let Err(e) = self.storage.remove(StorageKey::User) {
            tracing::warn!("Failed to clear session record: {}", e);
        }
        if let Some(user) = self.current_user() {
            tracing::info!("Logged out {}", user.email);
        }
        self.state = SessionState::Unauthenticated;
    }

    /// Replaces the stored user's fields and re-persists them.
    ///
    /// # Errors
    ///
    /// `Unauthenticated` when no session is active.
    pub fn update_user(&mut self, user: User) -> Result<()> {
        if !self.is_authenticated() {
            return Err(FacilitaError::Unauthenticated);
        }
        self.persist(&user);
        self.state = SessionState::Authenticated(user);
        Ok(())
    }

    pub fn state(&self) -> &SessionState {
        &self.state
    }

    pub fn current_user(&self) -> Option<&User> {
        match &self.state {
            SessionState::Authenticated(user) => Some(user),
            _ => None,
        }
    }

    pub fn is_authenticated(&self) -> bool {
        matches!(self.state, SessionState::Authenticated(_))
    }

    /// True until the initial load has finished.
    pub fn is_loading(&self) -> bool {
        matches!(
            self.state,
            SessionState::Uninitialized | SessionState::Loading
        )
    }

    /// Gates access by role.
    ///
    /// Returns the current user when their role is in `allowed`. An empty
    /// `allowed` slice admits any authenticated user.
    ///
    /// # Errors
    ///
    /// `Unauthenticated` without a session, `Forbidden` for other roles.
    pub fn require_role(&self, allowed: &[UserRole]) -> Result<&User> {
        let user = self.current_user().ok_or(FacilitaError::Unauthenticated)?;
        if allowed.is_empty() || allowed.contains(&user.role) {
            Ok(user)
        } else {
            Err(FacilitaError::forbidden(user.role))
        }
    }

    fn authenticate(&mut self, user: User) {
        self.persist(&user);
        tracing::info!("Logged in {} as {}", user.email, user.role);
        self.state = SessionState::Authenticated(user);
    }

    fn persist(&self, user: &User) {
        let result = serde_json::to_string(user)
            .map_err(FacilitaError::from)
            .and_then(|json| self.storage.set(StorageKey::User, &json));
        if let Err(e) = result {
            tracing::warn!("Failed to persist session record: {}", e);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::auth::AcceptAllVerifier;
    use crate::storage::InMemoryStorage;

    // Verifier that rejects every login
    struct DenyAllVerifier;

    #[async_trait::async_trait]
    impl CredentialVerifier for DenyAllVerifier {
        async fn verify(&self, _credentials: &Credentials) -> Result<User> {
            Err(FacilitaError::Unauthenticated)
        }
    }

    fn session_with(storage: Arc<InMemoryStorage>) -> SessionStore {
        SessionStore::new(storage, Arc::new(AcceptAllVerifier))
    }

    #[tokio::test]
    async fn test_login_authenticates_customer() {
        let mut session = session_with(Arc::new(InMemoryStorage::new()));
        session.initialize();

        let user = session
            .login("a@b.com", "secret", UserRole::Customer)
            .await
            .unwrap();

        assert!(session.is_authenticated());
        assert_eq!(user.role, UserRole::Customer);
        assert_eq!(session.current_user().unwrap().email, "a@b.com");
    }

    #[tokio::test]
    async fn test_login_from_uninitialized_state() {
        let mut session = session_with(Arc::new(InMemoryStorage::new()));
        assert_eq!(session.state(), &SessionState::Uninitialized);
        assert!(session.is_loading());

        session
            .login("a@b.com", "x", UserRole::Provider)
            .await
            .unwrap();
        assert!(session.is_authenticated());
        assert!(!session.is_loading());
    }

    #[tokio::test]
    async fn test_session_survives_restart() {
        let storage = Arc::new(InMemoryStorage::new());
        let mut session = session_with(storage.clone());
        let user = session
            .login("maria@example.com", "x", UserRole::Provider)
            .await
            .unwrap();

        let mut restarted = session_with(storage);
        restarted.initialize();

        assert_eq!(restarted.current_user(), Some(&user));
    }

    #[tokio::test]
    async fn test_logout_clears_persisted_record() {
        let storage = Arc::new(InMemoryStorage::new());
        let mut session = session_with(storage.clone());
        session
            .login("a@b.com", "x", UserRole::Customer)
            .await
            .unwrap();

        session.logout();

        assert_eq!(session.state(), &SessionState::Unauthenticated);
        assert!(storage.get(StorageKey::User).unwrap().is_none());
    }

    #[test]
    fn test_corrupt_record_is_no_session() {
        let storage = Arc::new(InMemoryStorage::new());
        storage.set(StorageKey::User, "{\"id\":").unwrap();
        let mut session = session_with(storage);

        assert_eq!(session.initialize(), &SessionState::Unauthenticated);
    }

    #[test]
    fn test_absent_record_is_no_session() {
        let mut session = session_with(Arc::new(InMemoryStorage::new()));
        assert_eq!(session.initialize(), &SessionState::Unauthenticated);
    }

    #[tokio::test]
    async fn test_invalid_email_keeps_state() {
        let mut session = session_with(Arc::new(InMemoryStorage::new()));
        session.initialize();

        let err = session
            .login("not-an-email", "x", UserRole::Customer)
            .await
            .unwrap_err();

        assert!(err.is_validation());
        assert_eq!(session.state(), &SessionState::Unauthenticated);
    }

    #[tokio::test]
    async fn test_rejecting_verifier() {
        let mut session =
            SessionStore::new(Arc::new(InMemoryStorage::new()), Arc::new(DenyAllVerifier));
        session.initialize();

        let err = session
            .login("a@b.com", "x", UserRole::Customer)
            .await
            .unwrap_err();

        assert_eq!(err, FacilitaError::Unauthenticated);
        assert!(!session.is_authenticated());
    }

    #[tokio::test]
    async fn test_signup_stores_name_and_phone() {
        let mut session = session_with(Arc::new(InMemoryStorage::new()));
        let form = SignupForm {
            name: " Maria Silva ".to_string(),
            email: "maria@example.com".to_string(),
            phone: "11987654321".to_string(),
            password: "segredo".to_string(),
            confirm_password: "segredo".to_string(),
            role: Some(UserRole::Provider),
            accept_terms: true,
        };

        let user = session.signup(&form).await.unwrap();

        assert_eq!(user.name, "Maria Silva");
        assert_eq!(user.phone.as_deref(), Some("(11) 98765-4321"));
        assert_eq!(user.role, UserRole::Provider);
        assert!(session.is_authenticated());
    }

    #[tokio::test]
    async fn test_update_user_requires_session() {
        let storage = Arc::new(InMemoryStorage::new());
        let mut session = session_with(storage.clone());
        session.initialize();

        let ghost = AcceptAllVerifier
            .verify(&Credentials::new("g@h.com", "x", UserRole::Customer))
            .await
            .unwrap();
        assert_eq!(
            session.update_user(ghost).unwrap_err(),
            FacilitaError::Unauthenticated
        );

        let mut user = session
            .login("a@b.com", "x", UserRole::Customer)
            .await
            .unwrap();
        user.name = "Ana Paula".to_string();
        session.update_user(user.clone()).unwrap();

        let mut restarted = session_with(storage);
        restarted.initialize();
        assert_eq!(restarted.current_user().unwrap().name, "Ana Paula");
    }

    #[tokio::test]
    async fn test_require_role() {
        let mut session = session_with(Arc::new(InMemoryStorage::new()));
        session.initialize();
        assert_eq!(
            session.require_role(&[UserRole::Customer]).unwrap_err(),
            FacilitaError::Unauthenticated
        );

        session
            .login("p@b.com", "x", UserRole::Provider)
            .await
            .unwrap();

        assert!(session.require_role(&[UserRole::Provider]).is_ok());
        assert!(session.require_role(&[]).is_ok());
        let err = session.require_role(&[UserRole::Administrator]).unwrap_err();
        assert_eq!(err, FacilitaError::forbidden("provider"));
    }
}
