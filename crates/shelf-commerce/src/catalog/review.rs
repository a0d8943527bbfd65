//! Product reviews.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::error::CommerceError;
use crate::ids::{ProductId, ReviewId, UserId};

/// A star rating between 1 and 5.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "i64", into = "u8")]
pub struct Rating(u8);

impl Rating {
    pub const MIN: u8 = 1;
    pub const MAX: u8 = 5;

    /// Validate a rating.
    pub fn new(value: i64) -> Result<Self, CommerceError> {
        if (i64::from(Self::MIN)..=i64::from(Self::MAX)).contains(&value) {
            Ok(Self(value as u8))
        } else {
            Err(CommerceError::InvalidRating(value))
        }
    }

    pub fn get(self) -> u8 {
        self.0
    }
}

impl TryFrom<i64> for Rating {
    type Error = CommerceError;

    fn try_from(value: i64) -> Result<Self, Self::Error> {
        Rating::new(value)
    }
}

impl From<Rating> for u8 {
    fn from(rating: Rating) -> Self {
        rating.0
    }
}

/// A customer review of a product.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Review {
    pub id: ReviewId,
    pub user_id: UserId,
    pub product_id: ProductId,
    pub rating: Rating,
    pub comment: Option<String>,
    pub created_at: DateTime<Utc>,
}

/// Fields needed to create a review.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct NewReview {
    pub user_id: UserId,
    pub product_id: ProductId,
    pub rating: Rating,
    #[serde(default)]
    pub comment: Option<String>,
}

impl NewReview {
    /// Attach the id and creation time assigned by the store.
    pub fn with_id(self, id: ReviewId, created_at: DateTime<Utc>) -> Review {
        Review {
            id,
            user_id: self.user_id,
            product_id: self.product_id,
            rating: self.rating,
            comment: self.comment,
            created_at,
        }
    }
}

/// Body of a review submission; the product comes from the URL.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ReviewSubmission {
    pub user_id: UserId,
    pub rating: Rating,
    #[serde(default)]
    pub comment: Option<String>,
}

impl ReviewSubmission {
    pub fn for_product(self, product_id: ProductId) -> NewReview {
        NewReview {
            user_id: self.user_id,
            product_id,
            rating: self.rating,
            comment: self.comment,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rating_bounds() {
        assert!(Rating::new(1).is_ok());
        assert!(Rating::new(5).is_ok());
        assert_eq!(Rating::new(0), Err(CommerceError::InvalidRating(0)));
        assert_eq!(Rating::new(6), Err(CommerceError::InvalidRating(6)));
    }

    #[test]
    fn test_rating_deserialize_rejects_out_of_range() {
        assert!(serde_json::from_str::<Rating>("4").is_ok());
        assert!(serde_json::from_str::<Rating>("9").is_err());
    }

    #[test]
    fn test_new_review_from_json() {
        let review: NewReview =
            serde_json::from_str(r#"{"userId":1,"productId":7,"rating":4}"#).unwrap();
        assert_eq!(review.product_id, ProductId::new(7));
        assert_eq!(review.rating.get(), 4);
        assert!(review.comment.is_none());
    }

    #[test]
    fn test_submission_takes_product_from_caller() {
        let submission: ReviewSubmission =
            serde_json::from_str(r#"{"userId":1,"rating":5,"comment":"Great"}"#).unwrap();
        let review = submission.for_product(ProductId::new(3));
        assert_eq!(review.product_id, ProductId::new(3));
        assert_eq!(review.comment.as_deref(), Some("Great"));
    }
}
