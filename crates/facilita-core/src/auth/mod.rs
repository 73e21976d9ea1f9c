//! Authentication and session domain module.
//!
//! # Module Structure
//!
//! - `session`: [`SessionStore`] and its [`SessionState`] machine
//! - `verifier`: the [`CredentialVerifier`] seam and [`AcceptAllVerifier`]
//! - `validation`: login/signup form checks and phone formatting
//!
//! # Usage
//!
//! ```ignore
//! use facilita_core::auth::{AcceptAllVerifier, SessionStore};
//!
//! let mut session = SessionStore::new(storage, Arc::new(AcceptAllVerifier));
//! session.initialize();
//! session.login("ana@example.com", "secret", UserRole::Customer).await?;
//! ```

mod session;
pub mod validation;
mod verifier;

// Re-export public API
pub use session::{SessionState, SessionStore};
pub use validation::{Credentials, SignupForm};
pub use verifier::{AcceptAllVerifier, CredentialVerifier};
