//! Rating aggregation: star values, averages, and the rounded star count shown
//! next to a product.

use serde::{Deserialize, Serialize};

use briolka_core::{DomainError, DomainResult, ValidationFailure, ValueObject};

use crate::review::Review;

/// A single star rating in 1..=5.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "i64", into = "u8")]
pub struct Rating(u8);

impl Rating {
    pub const MIN: u8 = 1;
    pub const MAX: u8 = 5;

    /// Rating preselected in a fresh review form.
    pub const DEFAULT: Rating = Rating(5);

    pub fn new(stars: u8) -> DomainResult<Self> {
        Self::try_from(i64::from(stars))
    }

    pub fn stars(self) -> u8 {
        self.0
    }
}

impl Default for Rating {
    fn default() -> Self {
        Self::DEFAULT
    }
}

impl TryFrom<i64> for Rating {
    type Error = DomainError;

    fn try_from(value: i64) -> Result<Self, Self::Error> {
        if (i64::from(Self::MIN)..=i64::from(Self::MAX)).contains(&value) {
            Ok(Self(value as u8))
        } else {
            Err(DomainError::validation(ValidationFailure::InvalidRating(value)))
        }
    }
}

impl From<Rating> for u8 {
    fn from(value: Rating) -> Self {
        value.0
    }
}

impl core::fmt::Display for Rating {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        write!(f, "{}/5", self.0)
    }
}

impl ValueObject for Rating {}

/// Arithmetic mean of the review ratings; `0.0` when there are no reviews.
pub fn compute_average(reviews: &[Review]) -> f64 {
    if reviews.is_empty() {
        return 0.0;
    }
    let total: u32 = reviews.iter().map(|r| u32::from(r.rating().stars())).sum();
    f64::from(total) / reviews.len() as f64
}

/// Number of filled stars to draw for an average, rounding half up.
///
/// `4.5` draws 5 stars, `4.4` draws 4. Non-finite or non-positive input draws
/// none; anything past 5 is capped.
pub fn round_to_stars(average: f64) -> u8 {
    if !average.is_finite() || average <= 0.0 {
        return 0;
    }
    // `f64::round` rounds half away from zero, i.e. half up for positive input.
    average.round().min(f64::from(Rating::MAX)) as u8
}

/// Display summary for a product's rating block.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct RatingSummary {
    pub average: f64,
    pub stars: u8,
    pub review_count: usize,
}

pub fn summarize(reviews: &[Review]) -> RatingSummary {
    let average = compute_average(reviews);
    RatingSummary {
        average,
        stars: round_to_stars(average),
        review_count: reviews.len(),
    }
}
