//! Service domain model.

use serde::{Deserialize, Serialize};

/// A service offered by one provider.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Service {
    pub id: String,
    pub provider_id: String,
    pub name: String,
    pub description: String,
    pub category: String,
    /// Price in currency units (BRL in the shipped catalog).
    pub price: f64,
    pub duration_minutes: u32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image_url: Option<String>,
    pub is_active: bool,
}

/// Search filter over the catalog.
///
/// An empty `text` matches every name; `category: None` matches every category.
/// Inactive services never match.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ServiceQuery {
    pub text: String,
    pub category: Option<String>,
}

impl ServiceQuery {
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            category: None,
        }
    }

    pub fn with_category(mut self, category: impl Into<String>) -> Self {
        self.category = Some(category.into());
        self
    }

    /// Case-insensitive name substring match, restricted to active services.
    pub fn matches(&self, service: &Service) -> bool {
        if !service.is_active {
            return false;
        }
        let name_matches = service
            .name
            .to_lowercase()
            .contains(&self.text.trim().to_lowercase());
        let category_matches = self
            .category
            .as_deref()
            .is_none_or(|category| service.category == category);
        name_matches && category_matches
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn service(name: &str, category: &str, is_active: bool) -> Service {
        Service {
            id: "s1".to_string(),
            provider_id: "p1".to_string(),
            name: name.to_string(),
            description: String::new(),
            category: category.to_string(),
            price: 100.0,
            duration_minutes: 60,
            image_url: None,
            is_active,
        }
    }

    #[test]
    fn test_query_matches_name_case_insensitively() {
        let query = ServiceQuery::new("LIMPEZA");
        assert!(query.matches(&service("Limpeza Residencial", "Limpeza", true)));
        assert!(!query.matches(&service("Reparo Hidráulico", "Hidráulica", true)));
    }

    #[test]
    fn test_query_filters_category_and_inactive() {
        let query = ServiceQuery::new("").with_category("Elétrica");
        assert!(query.matches(&service("Instalação", "Elétrica", true)));
        assert!(!query.matches(&service("Instalação", "Limpeza", true)));
        assert!(!query.matches(&service("Instalação", "Elétrica", false)));
    }
}
