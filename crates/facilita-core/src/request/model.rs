//! Request domain model.

use serde::{Deserialize, Serialize};
use strum::{Display, EnumString};

/// Lifecycle status of a request.
///
/// ```text
/// pending ──► accepted ──► in_progress ──► completed
///    │            │              │
///    └────────────┴──────────────┴──► cancelled
/// ```
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Display, EnumString,
)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum RequestStatus {
    Pending,
    Accepted,
    InProgress,
    Completed,
    Cancelled,
}

impl RequestStatus {
    /// All statuses in lifecycle order.
    pub const ALL: [RequestStatus; 5] = [
        RequestStatus::Pending,
        RequestStatus::Accepted,
        RequestStatus::InProgress,
        RequestStatus::Completed,
        RequestStatus::Cancelled,
    ];

    pub fn is_terminal(self) -> bool {
        matches!(self, RequestStatus::Completed | RequestStatus::Cancelled)
    }

    /// Whether moving from `self` to `next` follows the lifecycle.
    pub fn can_transition_to(self, next: RequestStatus) -> bool {
        use RequestStatus::*;
        matches!(
            (self, next),
            (Pending, Accepted)
                | (Accepted, InProgress)
                | (InProgress, Completed)
                | (Pending | Accepted | InProgress, Cancelled)
        )
    }
}

/// A customer's booking of a provider's service.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Request {
    pub id: String,
    pub customer_id: String,
    pub provider_id: String,
    pub service_id: String,
    pub status: RequestStatus,
    pub address: String,
    pub scheduled_date: String,
    pub scheduled_time: String,
    pub description: String,
    pub value: f64,
    pub created_at: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub provider_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub customer_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub service_name: Option<String>,
}

impl Request {
    /// Whether `user_id` is the customer or the provider of this request.
    pub fn involves(&self, user_id: &str) -> bool {
        self.customer_id == user_id || self.provider_id == user_id
    }

    /// The other party of the request as seen from `user_id`.
    pub fn counterpart_of(&self, user_id: &str) -> &str {
        if self.customer_id == user_id {
            &self.provider_id
        } else {
            &self.customer_id
        }
    }
}

/// Fields a caller supplies when creating a request; id, status and
/// creation time are allocated by the store.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct NewRequest {
    pub customer_id: String,
    pub provider_id: String,
    pub service_id: String,
    pub address: String,
    pub scheduled_date: String,
    pub scheduled_time: String,
    pub description: String,
    pub value: f64,
    pub provider_name: Option<String>,
    pub customer_name: Option<String>,
    pub service_name: Option<String>,
}

impl NewRequest {
    pub(crate) fn into_request(self, id: String, created_at: String) -> Request {
        Request {
            id,
            customer_id: self.customer_id,
            provider_id: self.provider_id,
            service_id: self.service_id,
            status: RequestStatus::Pending,
            address: self.address,
            scheduled_date: self.scheduled_date,
            scheduled_time: self.scheduled_time,
            description: self.description,
            value: self.value,
            created_at,
            provider_name: self.provider_name,
            customer_name: self.customer_name,
            service_name: self.service_name,
        }
    }
}

/// Partial update merged into an existing request. `None` leaves a field untouched.
///
/// Identity fields (id, customer, provider, service, creation time) are not
/// part of the update.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RequestUpdate {
    pub status: Option<RequestStatus>,
    pub address: Option<String>,
    pub scheduled_date: Option<String>,
    pub scheduled_time: Option<String>,
    pub description: Option<String>,
    pub value: Option<f64>,
    pub provider_name: Option<String>,
    pub customer_name: Option<String>,
    pub service_name: Option<String>,
}

impl RequestUpdate {
    pub fn status(status: RequestStatus) -> Self {
        Self {
            status: Some(status),
            ..Self::default()
        }
    }

    /// Copies every supplied field onto `request`.
    pub(crate) fn apply_to(self, request: &mut Request) {
        if let Some(status) = self.status {
            request.status = status;
        }
        if let Some(address) = self.address {
            request.address = address;
        }
        if let Some(date) = self.scheduled_date {
            request.scheduled_date = date;
        }
        if let Some(time) = self.scheduled_time {
            request.scheduled_time = time;
        }
        if let Some(description) = self.description {
            request.description = description;
        }
        if let Some(value) = self.value {
            request.value = value;
        }
        if let Some(name) = self.provider_name {
            request.provider_name = Some(name);
        }
        if let Some(name) = self.customer_name {
            request.customer_name = Some(name);
        }
        if let Some(name) = self.service_name {
            request.service_name = Some(name);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    #[test]
    fn test_forward_transitions() {
        use RequestStatus::*;
        assert!(Pending.can_transition_to(Accepted));
        assert!(Accepted.can_transition_to(InProgress));
        assert!(InProgress.can_transition_to(Completed));
        assert!(!Pending.can_transition_to(Completed));
        assert!(!Accepted.can_transition_to(Pending));
    }

    #[test]
    fn test_cancellation_only_from_open_states() {
        use RequestStatus::*;
        for status in [Pending, Accepted, InProgress] {
            assert!(status.can_transition_to(Cancelled));
        }
        assert!(!Completed.can_transition_to(Cancelled));
        assert!(!Cancelled.can_transition_to(Cancelled));
        assert!(Completed.is_terminal() && Cancelled.is_terminal());
    }

    #[test]
    fn test_status_names() {
        assert_eq!(RequestStatus::InProgress.to_string(), "in_progress");
        assert_eq!(
            RequestStatus::from_str("in_progress").unwrap(),
            RequestStatus::InProgress
        );
        assert_eq!(
            serde_json::to_string(&RequestStatus::InProgress).unwrap(),
            "\"in_progress\""
        );
    }

    #[test]
    fn test_counterpart() {
        let request = NewRequest {
            customer_id: "c1".to_string(),
            provider_id: "p1".to_string(),
            ..NewRequest::default()
        }
        .into_request("req_1".to_string(), "t".to_string());
        assert_eq!(request.counterpart_of("c1"), "p1");
        assert_eq!(request.counterpart_of("p1"), "c1");
        assert!(request.involves("p1"));
        assert!(!request.involves("x"));
    }
}
