//! Credential verification seam.

use super::validation::Credentials;
use crate::error::Result;
use crate::ids::{USER_PREFIX, new_id, now_timestamp};
use crate::user::User;

/// Turns login credentials into an authenticated user.
///
/// This trait abstracts identity verification so the session store does not
/// care whether users are checked against a remote identity provider, a
/// local password file, or nothing at all.
#[async_trait::async_trait]
pub trait CredentialVerifier: Send + Sync {
    /// Verifies `credentials` and returns the user they identify.
    ///
    /// # Errors
    ///
    /// Implementations return `FacilitaError::Unauthenticated` for rejected
    /// credentials and propagate transport or storage failures.
    async fn verify(&self, credentials: &Credentials) -> Result<User>;
}

/// Verifier that accepts any well-formed credentials.
///
/// Every call synthesises a brand-new user with a fresh id, the supplied
/// email and role, and the email's local part as display name. Suitable for
/// demos and development; there is no password check.
///
/// # Example
///
/// ```
/// use facilita_core::auth::{AcceptAllVerifier, CredentialVerifier, Credentials};
/// use facilita_core::user::UserRole;
///
/// # #[tokio::main(flavor = "current_thread")]
/// # async fn main() {
/// let verifier = AcceptAllVerifier;
/// let user = verifier
///     .verify(&Credentials::new("ana@example.com", "x", UserRole::Customer))
///     .await
///     .unwrap();
/// assert_eq!(user.name, "ana");
/// # }
/// ```
#[derive(Debug, Clone, Copy, Default)]
pub struct AcceptAllVerifier;

#[async_trait::async_trait]
impl CredentialVerifier for AcceptAllVerifier {
    async fn verify(&self, credentials: &Credentials) -> Result<User> {
        Ok(User {
            id: new_id(USER_PREFIX),
            email: credentials.email.clone(),
            name: User::name_from_email(&credentials.email),
            phone: None,
            role: credentials.role,
            avatar: None,
            created_at: now_timestamp(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::user::UserRole;

    #[tokio::test]
    async fn test_accept_all_synthesises_user() {
        let credentials = Credentials::new("joao@example.com", "123", UserRole::Provider);
        let first = AcceptAllVerifier.verify(&credentials).await.unwrap();
        let second = AcceptAllVerifier.verify(&credentials).await.unwrap();

        assert_eq!(first.email, "joao@example.com");
        assert_eq!(first.name, "joao");
        assert_eq!(first.role, UserRole::Provider);
        assert!(first.id.starts_with("usr_"));
        assert_ne!(first.id, second.id);
    }
}
