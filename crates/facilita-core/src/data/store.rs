//! The domain data store.

use super::collection::Collection;
use super::stats::{MarketplaceStats, average};
use crate::conversation::{Conversation, Message};
use crate::error::{FacilitaError, Result};
use crate::ids::{
    CONVERSATION_PREFIX, MESSAGE_PREFIX, PAYMENT_PREFIX, REQUEST_PREFIX, REVIEW_PREFIX, new_id,
    now_timestamp,
};
use crate::payment::{Payment, PaymentStatus};
use crate::request::{NewRequest, Request, RequestUpdate};
use crate::review::{NewReview, Review};
use crate::service::{Service, ServiceQuery, seed};
use crate::storage::{KeyValueStorage, StorageKey};
use crate::user::UserRole;
use std::sync::Arc;

/// Owns every marketplace entity family and persists each family after it
/// changes.
///
/// All operations are synchronous and complete before returning. The store
/// never consults the session; callers pass the acting user's id and role.
///
/// # Example
///
/// ```
/// use facilita_core::data::DataStore;
/// use facilita_core::request::NewRequest;
/// use facilita_core::storage::InMemoryStorage;
/// use std::sync::Arc;
///
/// let mut store = DataStore::load(Arc::new(InMemoryStorage::new()), true);
/// let request = store.create_request(NewRequest {
///     customer_id: "c1".into(),
///     provider_id: "provider1".into(),
///     service_id: "1".into(),
///     ..NewRequest::default()
/// });
/// assert!(store.get_request_by_id(&request.id).is_some());
/// ```
pub struct DataStore {
    storage: Arc<dyn KeyValueStorage>,
    services: Collection<Service>,
    requests: Collection<Request>,
    conversations: Collection<Conversation>,
    messages: Collection<Message>,
    payments: Collection<Payment>,
    reviews: Collection<Review>,
}

impl DataStore {
    /// Loads every entity family from `storage`.
    ///
    /// Missing or corrupt families start empty. When `seed_catalog` is set,
    /// a missing service family starts with [`seed::default_catalog`].
    pub fn load(storage: Arc<dyn KeyValueStorage>, seed_catalog: bool) -> Self {
        let backend = storage.as_ref();
        let services = Collection::load(backend, StorageKey::Services, || {
            if seed_catalog {
                seed::default_catalog()
            } else {
                Vec::new()
            }
        });
        let requests = Collection::load(backend, StorageKey::Requests, Vec::new);
        let conversations = Collection::load(backend, StorageKey::Conversations, Vec::new);
        let messages = Collection::load(backend, StorageKey::Messages, Vec::new);
        let payments = Collection::load(backend, StorageKey::Payments, Vec::new);
        let reviews = Collection::load(backend, StorageKey::Reviews, Vec::new);

        let store = Self {
            storage,
            services,
            requests,
            conversations,
            messages,
            payments,
            reviews,
        };
        // The catalog is written back so a seeded store reloads identically.
        store.services.persist(store.storage.as_ref());
        store
    }

    // ============================================================================
    // Collections
    // ============================================================================

    pub fn services(&self) -> &[Service] {
        self.services.items()
    }

    pub fn requests(&self) -> &[Request] {
        self.requests.items()
    }

    pub fn conversations(&self) -> &[Conversation] {
        self.conversations.items()
    }

    pub fn messages(&self) -> &[Message] {
        self.messages.items()
    }

    pub fn payments(&self) -> &[Payment] {
        self.payments.items()
    }

    pub fn reviews(&self) -> &[Review] {
        self.reviews.items()
    }

    // ============================================================================
    // Requests
    // ============================================================================

    /// Creates a request in `pending` status with a fresh id and timestamp.
    pub fn create_request(&mut self, fields: NewRequest) -> Request {
        let request = fields.into_request(new_id(REQUEST_PREFIX), now_timestamp());
        self.requests.push(request.clone());
        self.requests.persist(self.storage.as_ref());
        tracing::info!(
            "Created request {} (customer={}, provider={}, service={})",
            request.id,
            request.customer_id,
            request.provider_id,
            request.service_id
        );
        request
    }

    /// Merges `update` into the request with `id`.
    ///
    /// A status change must follow [`RequestStatus::can_transition_to`];
    /// re-applying the current status is accepted. On any error the
    /// collection is left untouched.
    ///
    /// [`RequestStatus::can_transition_to`]: crate::request::RequestStatus::can_transition_to
    pub fn update_request(&mut self, id: &str, update: RequestUpdate) -> Result<Request> {
        let current = self
            .requests
            .find_mut(|r| r.id == id)
            .ok_or_else(|| FacilitaError::not_found("request", id))?;

        if let Some(next) = update.status {
            if next != current.status && !current.status.can_transition_to(next) {
                return Err(FacilitaError::invalid_transition(current.status, next));
            }
            if next != current.status {
                tracing::info!("Request {}: {} -> {}", id, current.status, next);
            }
        }

        update.apply_to(current);
        let updated = current.clone();
        self.requests.persist(self.storage.as_ref());
        Ok(updated)
    }

    pub fn get_request_by_id(&self, id: &str) -> Option<&Request> {
        self.requests.find(|r| r.id == id)
    }

    /// Requests visible to a user in the given role.
    ///
    /// Customers see requests they placed, providers see requests addressed
    /// to them, administrators see everything.
    pub fn get_requests_by_user_id(&self, user_id: &str, role: UserRole) -> Vec<&Request> {
        match role {
            UserRole::Customer => self.requests.filter(|r| r.customer_id == user_id),
            UserRole::Provider => self.requests.filter(|r| r.provider_id == user_id),
            UserRole::Administrator => self.requests.items().iter().collect(),
        }
    }

    // ============================================================================
    // Services
    // ============================================================================

    pub fn get_service_by_id(&self, id: &str) -> Option<&Service> {
        self.services.find(|s| s.id == id)
    }

    pub fn get_services_by_provider(&self, provider_id: &str) -> Vec<&Service> {
        self.services.filter(|s| s.provider_id == provider_id)
    }

    pub fn search_services(&self, query: &ServiceQuery) -> Vec<&Service> {
        self.services.filter(|s| query.matches(s))
    }

    /// Distinct categories of active services, in catalog order.
    pub fn categories(&self) -> Vec<&str> {
        let mut categories: Vec<&str> = Vec::new();
        for service in self.services.items().iter().filter(|s| s.is_active) {
            if !categories.contains(&service.category.as_str()) {
                categories.push(&service.category);
            }
        }
        categories
    }

    // ============================================================================
    // Conversations and messages
    // ============================================================================

    /// Returns the conversation of `request_id`, creating it on first use.
    ///
    /// At most one conversation exists per request: a second call returns
    /// the existing thread and ignores `participants`.
    pub fn create_conversation(
        &mut self,
        request_id: &str,
        participants: Vec<String>,
    ) -> Conversation {
        if let Some(existing) = self.get_conversation_by_request_id(request_id) {
            tracing::debug!(
                "Conversation for request {} already exists: {}",
                request_id,
                existing.id
            );
            return existing.clone();
        }

        let conversation = Conversation {
            id: new_id(CONVERSATION_PREFIX),
            request_id: request_id.to_string(),
            participants,
            last_message: None,
            last_message_at: None,
            last_sender_id: None,
            unread_count: 0,
        };
        self.conversations.push(conversation.clone());
        self.conversations.persist(self.storage.as_ref());
        tracing::debug!(
            "Created conversation {} for request {}",
            conversation.id,
            request_id
        );
        conversation
    }

    pub fn get_conversation_by_request_id(&self, request_id: &str) -> Option<&Conversation> {
        self.conversations.find(|c| c.request_id == request_id)
    }

    pub fn get_conversation_by_id(&self, id: &str) -> Option<&Conversation> {
        self.conversations.find(|c| c.id == id)
    }

    /// Conversations the user takes part in, most recently active first.
    pub fn get_conversations_for_user(&self, user_id: &str) -> Vec<&Conversation> {
        let mut conversations = self.conversations.filter(|c| c.has_participant(user_id));
        // RFC 3339 UTC timestamps order lexicographically; threads without
        // messages sort last.
        conversations.sort_by(|a, b| b.last_message_at.cmp(&a.last_message_at));
        conversations
    }

    /// Appends a message and refreshes the parent conversation's snapshot.
    pub fn send_message(
        &mut self,
        conversation_id: &str,
        sender_id: &str,
        content: &str,
    ) -> Result<Message> {
        let conversation = self
            .conversations
            .find_mut(|c| c.id == conversation_id)
            .ok_or_else(|| FacilitaError::not_found("conversation", conversation_id))?;

        let message = Message {
            id: new_id(MESSAGE_PREFIX),
            conversation_id: conversation_id.to_string(),
            sender_id: sender_id.to_string(),
            content: content.to_string(),
            created_at: now_timestamp(),
        };
        conversation.record_message(&message);

        self.messages.push(message.clone());
        self.messages.persist(self.storage.as_ref());
        self.conversations.persist(self.storage.as_ref());
        Ok(message)
    }

    /// Clears the unread counter of a conversation.
    pub fn mark_conversation_read(&mut self, conversation_id: &str) -> Result<()> {
        let conversation = self
            .conversations
            .find_mut(|c| c.id == conversation_id)
            .ok_or_else(|| FacilitaError::not_found("conversation", conversation_id))?;
        if conversation.unread_count > 0 {
            conversation.unread_count = 0;
            self.conversations.persist(self.storage.as_ref());
        }
        Ok(())
    }

    /// Messages of a conversation in the order they were sent.
    pub fn get_messages_by_conversation_id(&self, conversation_id: &str) -> Vec<&Message> {
        self.messages.filter(|m| m.conversation_id == conversation_id)
    }

    // ============================================================================
    // Payments
    // ============================================================================

    /// Records a pending payment for a request.
    pub fn create_payment(&mut self, request_id: &str, amount: f64, method: &str) -> Payment {
        let payment = Payment {
            id: new_id(PAYMENT_PREFIX),
            request_id: request_id.to_string(),
            amount,
            status: PaymentStatus::Pending,
            payment_method: method.to_string(),
            created_at: now_timestamp(),
        };
        self.payments.push(payment.clone());
        self.payments.persist(self.storage.as_ref());
        tracing::info!(
            "Payment {} requested for {}: {:.2} ({})",
            payment.id,
            request_id,
            amount,
            method
        );
        payment
    }

    /// Settles a pending payment as paid or failed.
    pub fn update_payment_status(
        &mut self,
        payment_id: &str,
        status: PaymentStatus,
    ) -> Result<Payment> {
        let payment = self
            .payments
            .find_mut(|p| p.id == payment_id)
            .ok_or_else(|| FacilitaError::not_found("payment", payment_id))?;
        if !payment.status.can_transition_to(status) {
            return Err(FacilitaError::invalid_transition(payment.status, status));
        }
        payment.status = status;
        let updated = payment.clone();
        self.payments.persist(self.storage.as_ref());
        tracing::info!("Payment {} settled as {}", payment_id, status);
        Ok(updated)
    }

    pub fn get_payment_by_id(&self, id: &str) -> Option<&Payment> {
        self.payments.find(|p| p.id == id)
    }

    pub fn get_payments_by_request_id(&self, request_id: &str) -> Vec<&Payment> {
        self.payments.filter(|p| p.request_id == request_id)
    }

    // ============================================================================
    // Reviews
    // ============================================================================

    /// Records a review. One reviewer may review a request only once.
    pub fn create_review(&mut self, fields: NewReview) -> Result<Review> {
        let duplicate = self
            .reviews
            .find(|r| r.request_id == fields.request_id && r.reviewer_id == fields.reviewer_id)
            .is_some();
        if duplicate {
            return Err(FacilitaError::conflict(format!(
                "request '{}' already reviewed by '{}'",
                fields.request_id, fields.reviewer_id
            )));
        }

        let review = fields.into_review(new_id(REVIEW_PREFIX), now_timestamp());
        self.reviews.push(review.clone());
        self.reviews.persist(self.storage.as_ref());
        Ok(review)
    }

    /// Reviews written about `user_id`.
    pub fn get_reviews_for_user(&self, user_id: &str) -> Vec<&Review> {
        self.reviews.filter(|r| r.reviewed_id == user_id)
    }

    pub fn get_reviews_by_request_id(&self, request_id: &str) -> Vec<&Review> {
        self.reviews.filter(|r| r.request_id == request_id)
    }

    pub fn average_rating_for(&self, user_id: &str) -> Option<f64> {
        let ratings: Vec<u8> = self
            .get_reviews_for_user(user_id)
            .iter()
            .map(|r| r.rating.value())
            .collect();
        average(&ratings)
    }

    // ============================================================================
    // Statistics
    // ============================================================================

    /// Platform-wide figures.
    pub fn stats(&self) -> MarketplaceStats {
        MarketplaceStats::collect(
            self.requests.items(),
            self.services.items(),
            self.payments.items(),
            self.reviews.items(),
        )
    }

    /// Figures restricted to one provider's services, requests, payments and reviews.
    pub fn provider_stats(&self, provider_id: &str) -> MarketplaceStats {
        let requests = self.get_requests_by_user_id(provider_id, UserRole::Provider);
        let payments = self
            .payments
            .filter(|p| requests.iter().any(|r| r.id == p.request_id));
        MarketplaceStats::collect(
            requests.iter().copied(),
            self.get_services_by_provider(provider_id),
            payments,
            self.get_reviews_for_user(provider_id),
        )
    }
}
