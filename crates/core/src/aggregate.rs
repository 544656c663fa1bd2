//! Pure derivation of a product's rating aggregates from its review list.

use crate::product::Review;

/// Derived rating aggregates for a review list.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RatingSummary {
    /// Arithmetic mean of the review ratings; `0.0` for an empty list.
    pub ratings: f64,
    /// Number of reviews.
    pub num_of_reviews: u32,
}

/// Compute the rating aggregates for a review list.
///
/// Malformed ratings never reach this function; range checking happens
/// in the review service before any review is stored.
#[must_use]
pub fn rating_summary(reviews: &[Review]) -> RatingSummary {
    let num_of_reviews = u32::try_from(reviews.len()).unwrap_or(u32::MAX);
    if reviews.is_empty() {
        return RatingSummary {
            ratings: 0.0,
            num_of_reviews,
        };
    }

    let total: f64 = reviews.iter().map(|r| f64::from(r.rating)).sum();
    RatingSummary {
        ratings: total / reviews.len() as f64,
        num_of_reviews,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{ReviewId, UserId};

    const EPSILON: f64 = 1e-9;

    fn review(rating: u8) -> Review {
        Review {
            id: ReviewId::generate(),
            user: UserId::new("u-1"),
            name: "Reviewer".into(),
            rating,
            comment: "fine".into(),
        }
    }

    #[test]
    fn empty_list_yields_zero() {
        let summary = rating_summary(&[]);
        assert_eq!(summary.ratings, 0.0);
        assert_eq!(summary.num_of_reviews, 0);
    }

    #[test]
    fn mean_of_four_and_two_is_three() {
        let summary = rating_summary(&[review(4), review(2)]);
        assert!((summary.ratings - 3.0).abs() < EPSILON);
        assert_eq!(summary.num_of_reviews, 2);
    }

    #[test]
    fn mean_is_fractional_when_not_divisible() {
        let summary = rating_summary(&[review(5), review(4), review(4)]);
        assert!((summary.ratings - 13.0 / 3.0).abs() < EPSILON);
        assert_eq!(summary.num_of_reviews, 3);
    }

    #[test]
    fn single_review_is_its_own_mean() {
        let summary = rating_summary(&[review(2)]);
        assert!((summary.ratings - 2.0).abs() < EPSILON);
        assert_eq!(summary.num_of_reviews, 1);
    }
}
