//! Review domain model.

use crate::error::{FacilitaError, Result};
use serde::{Deserialize, Serialize};
use std::fmt;

/// A star rating between 1 and 5 inclusive.
///
/// Out-of-range values are rejected both at construction and on deserialization.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "u8", into = "u8")]
pub struct Rating(u8);

impl Rating {
    pub const MIN: u8 = 1;
    pub const MAX: u8 = 5;

    pub fn new(value: u8) -> Result<Self> {
        if (Self::MIN..=Self::MAX).contains(&value) {
            Ok(Self(value))
        } else {
            Err(FacilitaError::validation(format!(
                "rating must be between {} and {}, got {}",
                Self::MIN,
                Self::MAX,
                value
            )))
        }
    }

    pub fn value(self) -> u8 {
        self.0
    }
}

impl TryFrom<u8> for Rating {
    type Error = FacilitaError;

    fn try_from(value: u8) -> Result<Self> {
        Self::new(value)
    }
}

impl From<Rating> for u8 {
    fn from(rating: Rating) -> Self {
        rating.0
    }
}

impl fmt::Display for Rating {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.0, Self::MAX)
    }
}

/// A review of the work done on one request.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Review {
    pub id: String,
    pub request_id: String,
    pub reviewer_id: String,
    /// The reviewed party; the provider when written by the customer.
    pub reviewed_id: String,
    pub rating: Rating,
    pub comment: String,
    pub created_at: String,
}

/// Fields a caller supplies when creating a review.
#[derive(Debug, Clone, PartialEq)]
pub struct NewReview {
    pub request_id: String,
    pub reviewer_id: String,
    pub reviewed_id: String,
    pub rating: Rating,
    pub comment: String,
}

impl NewReview {
    pub(crate) fn into_review(self, id: String, created_at: String) -> Review {
        Review {
            id,
            request_id: self.request_id,
            reviewer_id: self.reviewer_id,
            reviewed_id: self.reviewed_id,
            rating: self.rating,
            comment: self.comment,
            created_at,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rating_bounds() {
        assert!(Rating::new(0).is_err());
        assert_eq!(Rating::new(1).unwrap().value(), 1);
        assert_eq!(Rating::new(5).unwrap().value(), 5);
        assert!(Rating::new(6).unwrap_err().is_validation());
    }

    #[test]
    fn test_rating_rejected_on_deserialize() {
        assert!(serde_json::from_str::<Rating>("7").is_err());
        assert_eq!(serde_json::from_str::<Rating>("4").unwrap().value(), 4);
        assert_eq!(serde_json::to_string(&Rating::new(3).unwrap()).unwrap(), "3");
    }
}
