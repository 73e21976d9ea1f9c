//! Error types for Facilita Hub.

use thiserror::Error;

/// A shared error type for the whole marketplace layer.
///
/// Domain failures (unknown ids, forbidden transitions, validation) and
/// infrastructure failures (I/O, serialization) share one enum so callers
/// can propagate with `?` across crate boundaries.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum FacilitaError {
    /// Entity not found error with type information
    #[error("Entity not found: {entity_type} '{id}'")]
    NotFound {
        entity_type: &'static str,
        id: String,
    },

    /// User input rejected before reaching the store
    #[error("Validation error: {0}")]
    Validation(String),

    /// A request or payment status change outside the allowed transitions
    #[error("Invalid status transition: {from} -> {to}")]
    InvalidTransition { from: String, to: String },

    /// A uniqueness rule would be violated
    #[error("Conflict: {0}")]
    Conflict(String),

    /// No authenticated session
    #[error("Not authenticated")]
    Unauthenticated,

    /// Authenticated, but the role may not perform the operation
    #[error("Forbidden for role '{role}'")]
    Forbidden { role: String },

    /// IO error (file system operations)
    #[error("IO error: {message}")]
    Io { message: String },

    /// Serialization/deserialization error
    #[error("Serialization error: {format} - {message}")]
    Serialization { format: String, message: String },

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),

    /// Internal error (should not happen in normal operation)
    #[error("Internal error: {0}")]
    Internal(String),
}

impl FacilitaError {
    // ============================================================================
    // Constructor helpers
    // ============================================================================

    /// Creates a NotFound error
    pub fn not_found(entity_type: &'static str, id: impl Into<String>) -> Self {
        Self::NotFound {
            entity_type,
            id: id.into(),
        }
    }

    /// Creates a Validation error
    pub fn validation(message: impl Into<String>) -> Self {
        Self::Validation(message.into())
    }

    /// Creates an InvalidTransition error from any two displayable statuses
    pub fn invalid_transition(from: impl ToString, to: impl ToString) -> Self {
        Self::InvalidTransition {
            from: from.to_string(),
            to: to.to_string(),
        }
    }

    /// Creates a Conflict error
    pub fn conflict(message: impl Into<String>) -> Self {
        Self::Conflict(message.into())
    }

    /// Creates a Forbidden error
    pub fn forbidden(role: impl ToString) -> Self {
        Self::Forbidden {
            role: role.to_string(),
        }
    }

    /// Creates an IO error
    pub fn io(message: impl Into<String>) -> Self {
        Self::Io {
            message: message.into(),
        }
    }

    /// Creates a Config error
    pub fn config(message: impl Into<String>) -> Self {
        Self::Config(message.into())
    }

    /// Creates an Internal error
    pub fn internal(message: impl Into<String>) -> Self {
        Self::Internal(message.into())
    }

    // ============================================================================
    // Type checking methods
    // ============================================================================

    /// Check if this is a NotFound error
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound { .. })
    }

    /// Check if this is a Validation error
    pub fn is_validation(&self) -> bool {
        matches!(self, Self::Validation(_))
    }

    /// Check if this is an InvalidTransition error
    pub fn is_invalid_transition(&self) -> bool {
        matches!(self, Self::InvalidTransition { .. })
    }

    /// Check if this error comes from role gating (no session or wrong role)
    pub fn is_access_denied(&self) -> bool {
        matches!(self, Self::Unauthenticated | Self::Forbidden { .. })
    }

    /// Check if this is a serialization error
    pub fn is_serialization(&self) -> bool {
        matches!(self, Self::Serialization { .. })
    }
}

// ============================================================================
// From implementations for automatic conversion
// ============================================================================

impl From<std::io::Error> for FacilitaError {
    fn from(err: std::io::Error) -> Self {
        Self::Io {
            message: format!("{} (kind: {:?})", err, err.kind()),
        }
    }
}

impl From<serde_json::Error> for FacilitaError {
    fn from(err: serde_json::Error) -> Self {
        Self::Serialization {
            format: "JSON".to_string(),
            message: err.to_string(),
        }
    }
}

impl From<toml::de::Error> for FacilitaError {
    fn from(err: toml::de::Error) -> Self {
        Self::Serialization {
            format: "TOML".to_string(),
            message: err.to_string(),
        }
    }
}

impl From<toml::ser::Error> for FacilitaError {
    fn from(err: toml::ser::Error) -> Self {
        Self::Serialization {
            format: "TOML".to_string(),
            message: err.to_string(),
        }
    }
}

/// Conversion from anyhow::Error (used by verifier implementations)
impl From<anyhow::Error> for FacilitaError {
    fn from(err: anyhow::Error) -> Self {
        Self::Internal(err.to_string())
    }
}

/// A type alias for `Result<T, FacilitaError>`.
pub type Result<T> = std::result::Result<T, FacilitaError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_not_found_display() {
        let err = FacilitaError::not_found("request", "req_1");
        assert_eq!(err.to_string(), "Entity not found: request 'req_1'");
        assert!(err.is_not_found());
    }

    #[test]
    fn test_access_denied_predicate() {
        assert!(FacilitaError::Unauthenticated.is_access_denied());
        assert!(FacilitaError::forbidden("customer").is_access_denied());
        assert!(!FacilitaError::validation("x").is_access_denied());
    }

    #[test]
    fn test_json_error_conversion() {
        let err: FacilitaError = serde_json::from_str::<Vec<u32>>("{oops")
            .unwrap_err()
            .into();
        assert!(err.is_serialization());
    }
}
