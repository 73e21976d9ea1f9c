//! Request lifecycle, payments and reviews.

use crate::context::AppContext;
use facilita_core::data::DataStore;
use facilita_core::error::{FacilitaError, Result};
use facilita_core::payment::{Payment, PaymentStatus};
use facilita_core::request::{NewRequest, Request, RequestStatus, RequestUpdate};
use facilita_core::review::{NewReview, Rating, Review};
use facilita_core::service::{Service, ServiceQuery};
use facilita_core::user::{User, UserRole};
use std::sync::Arc;

/// What a customer fills in to book a service.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RequestForm {
    pub service_id: String,
    pub address: String,
    pub scheduled_date: String,
    pub scheduled_time: String,
    pub description: String,
}

impl RequestForm {
    fn validate(&self) -> Result<()> {
        let required = [
            ("address", &self.address),
            ("scheduled date", &self.scheduled_date),
            ("scheduled time", &self.scheduled_time),
            ("description", &self.description),
        ];
        for (field, value) in required {
            if value.trim().is_empty() {
                return Err(FacilitaError::validation(format!("{} is required", field)));
            }
        }
        Ok(())
    }
}

/// Use cases around service requests.
///
/// Every operation checks the caller's role against the session and, for
/// lifecycle changes, that the caller is the party owning that step.
pub struct MarketplaceService {
    ctx: Arc<AppContext>,
}

impl MarketplaceService {
    pub fn new(ctx: Arc<AppContext>) -> Self {
        Self { ctx }
    }

    /// Active services matching `query`. Does not require a session.
    pub async fn browse(&self, query: &ServiceQuery) -> Vec<Service> {
        let data = self.ctx.data().read().await;
        data.search_services(query).into_iter().cloned().collect()
    }

    /// Categories of the active catalog, in catalog order.
    pub async fn categories(&self) -> Vec<String> {
        let data = self.ctx.data().read().await;
        data.categories().into_iter().map(str::to_string).collect()
    }

    /// Books a service for the signed-in customer and opens the request's
    /// conversation with the provider.
    pub async fn submit_request(&self, form: RequestForm) -> Result<Request> {
        let customer = self.ctx.require_user(&[UserRole::Customer]).await?;
        form.validate()?;

        let mut data = self.ctx.data().write().await;
        let service = data
            .get_service_by_id(&form.service_id)
            .filter(|s| s.is_active)
            .cloned()
            .ok_or_else(|| FacilitaError::not_found("service", &form.service_id))?;

        let request = data.create_request(NewRequest {
            customer_id: customer.id.clone(),
            provider_id: service.provider_id.clone(),
            service_id: service.id.clone(),
            address: form.address.trim().to_string(),
            scheduled_date: form.scheduled_date,
            scheduled_time: form.scheduled_time,
            description: form.description.trim().to_string(),
            value: service.price,
            provider_name: None,
            customer_name: Some(customer.name.clone()),
            service_name: Some(service.name.clone()),
        });
        data.create_conversation(&request.id, vec![customer.id, service.provider_id]);
        Ok(request)
    }

    /// Requests visible to the signed-in user, newest first.
    pub async fn my_requests(&self) -> Result<Vec<Request>> {
        let user = self.ctx.require_user(&[]).await?;
        let data = self.ctx.data().read().await;
        let mut requests: Vec<Request> = data
            .get_requests_by_user_id(&user.id, user.role)
            .into_iter()
            .cloned()
            .collect();
        requests.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        Ok(requests)
    }

    /// One request, visible to its two parties and to administrators.
    pub async fn request_details(&self, request_id: &str) -> Result<Request> {
        let user = self.ctx.require_user(&[]).await?;
        let data = self.ctx.data().read().await;
        let request = data
            .get_request_by_id(request_id)
            .ok_or_else(|| FacilitaError::not_found("request", request_id))?;
        if !user.is_administrator() && !request.involves(&user.id) {
            return Err(FacilitaError::forbidden(user.role));
        }
        Ok(request.clone())
    }

    /// Reviews left on a request, with the same visibility as the request.
    pub async fn request_reviews(&self, request_id: &str) -> Result<Vec<Review>> {
        self.request_details(request_id).await?;
        let data = self.ctx.data().read().await;
        Ok(data
            .get_reviews_by_request_id(request_id)
            .into_iter()
            .cloned()
            .collect())
    }

    pub async fn accept(&self, request_id: &str) -> Result<Request> {
        self.provider_transition(request_id, RequestStatus::Accepted)
            .await
    }

    /// Declines a pending request; it ends up cancelled.
    ///
    /// # Errors
    ///
    /// `InvalidTransition` once the request has been accepted.
    pub async fn reject(&self, request_id: &str) -> Result<Request> {
        self.provider_transition(request_id, RequestStatus::Cancelled)
            .await
    }

    pub async fn start(&self, request_id: &str) -> Result<Request> {
        self.provider_transition(request_id, RequestStatus::InProgress)
            .await
    }

    pub async fn complete(&self, request_id: &str) -> Result<Request> {
        self.provider_transition(request_id, RequestStatus::Completed)
            .await
    }

    /// Cancels one of the signed-in customer's own requests.
    pub async fn cancel(&self, request_id: &str) -> Result<Request> {
        let customer = self.ctx.require_user(&[UserRole::Customer]).await?;
        let mut data = self.ctx.data().write().await;
        let request = owned_request(&data, request_id, &customer)?;
        if request.status == RequestStatus::Cancelled {
            return Err(FacilitaError::invalid_transition(
                request.status,
                RequestStatus::Cancelled,
            ));
        }
        data.update_request(request_id, RequestUpdate::status(RequestStatus::Cancelled))
    }

    /// Asks the customer to pay for a completed request.
    ///
    /// The amount is the request value; the method is the configured default.
    ///
    /// # Errors
    ///
    /// `Validation` unless the request is completed, `Conflict` when an open
    /// or settled payment already exists.
    pub async fn request_payment(&self, request_id: &str) -> Result<Payment> {
        let provider = self.ctx.require_user(&[UserRole::Provider]).await?;
        let mut data = self.ctx.data().write().await;
        let request = owned_request(&data, request_id, &provider)?;
        if request.status != RequestStatus::Completed {
            return Err(FacilitaError::validation(format!(
                "payment can only be requested for a completed request (status: {})",
                request.status
            )));
        }
        let outstanding = data
            .get_payments_by_request_id(request_id)
            .iter()
            .any(|p| p.status != PaymentStatus::Failed);
        if outstanding {
            return Err(FacilitaError::conflict(format!(
                "request '{}' already has a payment",
                request_id
            )));
        }
        let method = self.ctx.settings().default_payment_method.clone();
        Ok(data.create_payment(request_id, request.value, &method))
    }

    /// Marks a pending payment as paid or failed. Only the paying customer
    /// may settle it.
    pub async fn settle_payment(&self, payment_id: &str, paid: bool) -> Result<Payment> {
        let customer = self.ctx.require_user(&[UserRole::Customer]).await?;
        let mut data = self.ctx.data().write().await;
        let request_id = data
            .get_payment_by_id(payment_id)
            .map(|p| p.request_id.clone())
            .ok_or_else(|| FacilitaError::not_found("payment", payment_id))?;
        owned_request(&data, &request_id, &customer)?;

        let status = if paid {
            PaymentStatus::Paid
        } else {
            PaymentStatus::Failed
        };
        data.update_payment_status(payment_id, status)
    }

    /// Rates the provider of one of the customer's completed requests.
    pub async fn review(&self, request_id: &str, rating: u8, comment: &str) -> Result<Review> {
        let customer = self.ctx.require_user(&[UserRole::Customer]).await?;
        let rating = Rating::new(rating)?;
        let mut data = self.ctx.data().write().await;
        let request = owned_request(&data, request_id, &customer)?;
        if request.status != RequestStatus::Completed {
            return Err(FacilitaError::validation(
                "only completed requests can be reviewed",
            ));
        }
        data.create_review(NewReview {
            request_id: request.id,
            reviewer_id: customer.id,
            reviewed_id: request.provider_id,
            rating,
            comment: comment.trim().to_string(),
        })
    }

    async fn provider_transition(&self, request_id: &str, next: RequestStatus) -> Result<Request> {
        let provider = self.ctx.require_user(&[UserRole::Provider]).await?;
        let mut data = self.ctx.data().write().await;
        let request = owned_request(&data, request_id, &provider)?;
        // Repeating the current status would be a silent no-op in the store
        if request.status == next {
            return Err(FacilitaError::invalid_transition(request.status, next));
        }
        // A provider may only decline work not yet accepted
        if next == RequestStatus::Cancelled && request.status != RequestStatus::Pending {
            return Err(FacilitaError::invalid_transition(request.status, next));
        }
        data.update_request(request_id, RequestUpdate::status(next))
    }
}

/// Looks up a request the user takes part in as customer or provider,
/// matching the side given by their role.
fn owned_request(
    data: &DataStore,
    request_id: &str,
    user: &User,
) -> Result<Request> {
    let request = data
        .get_request_by_id(request_id)
        .ok_or_else(|| FacilitaError::not_found("request", request_id))?;
    let owner = match user.role {
        UserRole::Customer => &request.customer_id,
        UserRole::Provider => &request.provider_id,
        UserRole::Administrator => return Err(FacilitaError::forbidden(user.role)),
    };
    if owner != &user.id {
        return Err(FacilitaError::forbidden(user.role));
    }
    Ok(request.clone())
}
