//! Catalog used when nothing has been persisted yet.

use super::model::Service;

/// The three demo services the app starts with.
pub fn default_catalog() -> Vec<Service> {
    vec![
        Service {
            id: "1".to_string(),
            provider_id: "provider1".to_string(),
            name: "Limpeza Residencial Completa".to_string(),
            description: "Limpeza completa de residências incluindo todos os cômodos".to_string(),
            category: "Limpeza".to_string(),
            price: 150.0,
            duration_minutes: 180,
            image_url: Some(
                "https://images.unsplash.com/photo-1581578731548-c64695cc6952?w=400".to_string(),
            ),
            is_active: true,
        },
        Service {
            id: "2".to_string(),
            provider_id: "provider2".to_string(),
            name: "Instalação Elétrica".to_string(),
            description: "Serviços de instalação e manutenção elétrica".to_string(),
            category: "Elétrica".to_string(),
            price: 200.0,
            duration_minutes: 120,
            image_url: Some(
                "https://images.unsplash.com/photo-1621905251918-48416bd8575a?w=400".to_string(),
            ),
            is_active: true,
        },
        Service {
            id: "3".to_string(),
            provider_id: "provider1".to_string(),
            name: "Reparo Hidráulico".to_string(),
            description: "Conserto de vazamentos, torneiras e encanamentos".to_string(),
            category: "Hidráulica".to_string(),
            price: 180.0,
            duration_minutes: 90,
            image_url: Some(
                "https://images.unsplash.com/photo-1607472586893-edb57bdc0e39?w=400".to_string(),
            ),
            is_active: true,
        },
    ]
}
