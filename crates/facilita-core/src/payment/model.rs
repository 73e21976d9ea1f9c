//! Payment domain model.

use serde::{Deserialize, Serialize};
use strum::{Display, EnumString};

#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Display, EnumString,
)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum PaymentStatus {
    Pending,
    Paid,
    Failed,
}

impl PaymentStatus {
    /// A payment settles exactly once: `pending` to `paid` or `failed`.
    pub fn can_transition_to(self, next: PaymentStatus) -> bool {
        self == PaymentStatus::Pending && next != PaymentStatus::Pending
    }
}

/// A payment requested by a provider for a completed request.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Payment {
    pub id: String,
    pub request_id: String,
    pub amount: f64,
    pub status: PaymentStatus,
    /// Free-form method label, e.g. "Dinheiro" or "Pix".
    pub payment_method: String,
    pub created_at: String,
}
