//! User domain model.

use serde::{Deserialize, Serialize};
use strum::{Display, EnumString};

/// Role of a marketplace user.
///
/// The role decides which operations and which slice of the data a user may
/// reach. Records written by the first generation of the app used Portuguese
/// role names; they are still accepted on load and on the command line.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Display, EnumString,
)]
#[serde(rename_all = "snake_case")]
pub enum UserRole {
    #[serde(alias = "cliente")]
    #[strum(to_string = "customer", serialize = "cliente")]
    Customer,
    #[serde(alias = "prestador")]
    #[strum(to_string = "provider", serialize = "prestador")]
    Provider,
    #[serde(alias = "administrador", alias = "admin")]
    #[strum(to_string = "administrator", serialize = "administrador", serialize = "admin")]
    Administrator,
}

/// The authenticated user held by the session store.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct User {
    pub id: String,
    pub email: String,
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
    pub role: UserRole,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub avatar: Option<String>,
    pub created_at: String,
}

impl User {
    /// Display name derived from an email address: its local part.
    pub fn name_from_email(email: &str) -> String {
        email.split('@').next().unwrap_or(email).to_string()
    }

    pub fn is_administrator(&self) -> bool {
        self.role == UserRole::Administrator
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    #[test]
    fn test_role_accepts_legacy_names() {
        let role: UserRole = serde_json::from_str("\"prestador\"").unwrap();
        assert_eq!(role, UserRole::Provider);
        assert_eq!(UserRole::from_str("cliente").unwrap(), UserRole::Customer);
        assert_eq!(UserRole::from_str("admin").unwrap(), UserRole::Administrator);
    }

    #[test]
    fn test_role_serializes_canonical_name() {
        assert_eq!(
            serde_json::to_string(&UserRole::Administrator).unwrap(),
            "\"administrator\""
        );
        assert_eq!(UserRole::Customer.to_string(), "customer");
    }

    #[test]
    fn test_user_wire_format_is_camel_case() {
        let user = User {
            id: "usr_1".to_string(),
            email: "ana@example.com".to_string(),
            name: "ana".to_string(),
            phone: None,
            role: UserRole::Customer,
            avatar: None,
            created_at: "2024-01-01T00:00:00.000Z".to_string(),
        };
        let json = serde_json::to_value(&user).unwrap();
        assert_eq!(json["createdAt"], "2024-01-01T00:00:00.000Z");
        assert!(json.get("phone").is_none());
    }

    #[test]
    fn test_name_from_email() {
        assert_eq!(User::name_from_email("maria.silva@mail.com"), "maria.silva");
        assert_eq!(User::name_from_email("plain"), "plain");
    }
}
