//! Aggregate figures for the provider and administrator dashboards.

use crate::payment::{Payment, PaymentStatus};
use crate::request::{Request, RequestStatus};
use crate::review::Review;
use crate::service::Service;
use std::collections::HashSet;

/// Counts and sums over a slice of the marketplace.
#[derive(Debug, Clone, PartialEq)]
pub struct MarketplaceStats {
    /// Request count per status, in lifecycle order.
    pub status_counts: Vec<(RequestStatus, usize)>,
    pub total_requests: usize,
    pub active_services: usize,
    pub distinct_customers: usize,
    pub distinct_providers: usize,
    pub paid_revenue: f64,
    pub pending_revenue: f64,
    pub review_count: usize,
    pub average_rating: Option<f64>,
}

impl MarketplaceStats {
    pub fn collect<'a>(
        requests: impl IntoIterator<Item = &'a Request>,
        services: impl IntoIterator<Item = &'a Service>,
        payments: impl IntoIterator<Item = &'a Payment>,
        reviews: impl IntoIterator<Item = &'a Review>,
    ) -> Self {
        let requests: Vec<&Request> = requests.into_iter().collect();
        let services: Vec<&Service> = services.into_iter().collect();

        let status_counts = RequestStatus::ALL
            .iter()
            .map(|status| {
                let count = requests.iter().filter(|r| r.status == *status).count();
                (*status, count)
            })
            .collect();

        let customers: HashSet<&str> = requests.iter().map(|r| r.customer_id.as_str()).collect();
        let providers: HashSet<&str> = requests
            .iter()
            .map(|r| r.provider_id.as_str())
            .chain(services.iter().map(|s| s.provider_id.as_str()))
            .collect();

        let (mut paid_revenue, mut pending_revenue) = (0.0, 0.0);
        for payment in payments {
            match payment.status {
                PaymentStatus::Paid => paid_revenue += payment.amount,
                PaymentStatus::Pending => pending_revenue += payment.amount,
                PaymentStatus::Failed => {}
            }
        }

        let ratings: Vec<u8> = reviews.into_iter().map(|r| r.rating.value()).collect();
        let average_rating = average(&ratings);

        Self {
            status_counts,
            total_requests: requests.len(),
            active_services: services.iter().filter(|s| s.is_active).count(),
            distinct_customers: customers.len(),
            distinct_providers: providers.len(),
            paid_revenue,
            pending_revenue,
            review_count: ratings.len(),
            average_rating,
        }
    }

    /// Number of requests currently in `status`.
    pub fn count(&self, status: RequestStatus) -> usize {
        self.status_counts
            .iter()
            .find(|(s, _)| *s == status)
            .map(|(_, count)| *count)
            .unwrap_or(0)
    }
}

pub(crate) fn average(ratings: &[u8]) -> Option<f64> {
    if ratings.is_empty() {
        return None;
    }
    let sum: u32 = ratings.iter().map(|r| u32::from(*r)).sum();
    Some(f64::from(sum) / ratings.len() as f64)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_average() {
        assert_eq!(average(&[]), None);
        assert_eq!(average(&[4, 5]), Some(4.5));
    }

    #[test]
    fn test_empty_stats() {
        let stats = MarketplaceStats::collect([], [], [], []);
        assert_eq!(stats.total_requests, 0);
        assert_eq!(stats.count(RequestStatus::Pending), 0);
        assert_eq!(stats.status_counts.len(), 5);
        assert!(stats.average_rating.is_none());
    }
}
