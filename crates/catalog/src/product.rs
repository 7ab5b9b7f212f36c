use std::collections::HashSet;

use serde::{Deserialize, Serialize};

use briolka_core::{DomainError, DomainResult, Entity, ProductId};

use crate::rating::{self, RatingSummary};
use crate::review::Review;

/// A catalog bracelet.
///
/// `average_rating` is a cache over `reviews`, filled in by the constructor and
/// never settable on its own, so it cannot drift from the reviews it summarizes.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Product {
    id: ProductId,
    name: String,
    stone_type: String,
    /// Whole currency units.
    price: u64,
    image_ref: String,
    description: String,
    reviews: Vec<Review>,
    average_rating: f64,
}

/// Unvalidated product input (catalog seed or JSON file).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewProduct {
    pub id: ProductId,
    pub name: String,
    pub stone_type: String,
    pub price: u64,
    pub image_ref: String,
    pub description: String,
    #[serde(default)]
    pub reviews: Vec<Review>,
}

impl Product {
    pub fn create(input: NewProduct) -> DomainResult<Self> {
        if input.name.trim().is_empty() {
            return Err(DomainError::invariant(format!(
                "product {}: name cannot be empty",
                input.id
            )));
        }

        let mut seen = HashSet::with_capacity(input.reviews.len());
        for review in &input.reviews {
            if !seen.insert(review.id_typed()) {
                return Err(DomainError::invariant(format!(
                    "product {}: duplicate review id {}",
                    input.id,
                    review.id_typed()
                )));
            }
        }

        let average_rating = rating::compute_average(&input.reviews);

        Ok(Self {
            id: input.id,
            name: input.name,
            stone_type: input.stone_type,
            price: input.price,
            image_ref: input.image_ref,
            description: input.description,
            reviews: input.reviews,
            average_rating,
        })
    }

    pub fn id_typed(&self) -> ProductId {
        self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn stone_type(&self) -> &str {
        &self.stone_type
    }

    pub fn price(&self) -> u64 {
        self.price
    }

    pub fn image_ref(&self) -> &str {
        &self.image_ref
    }

    pub fn description(&self) -> &str {
        &self.description
    }

    /// Reviews in display order.
    pub fn reviews(&self) -> &[Review] {
        &self.reviews
    }

    pub fn average_rating(&self) -> f64 {
        self.average_rating
    }

    pub fn rating_summary(&self) -> RatingSummary {
        RatingSummary {
            average: self.average_rating,
            stars: rating::round_to_stars(self.average_rating),
            review_count: self.reviews.len(),
        }
    }
}

impl Entity for Product {
    type Id = ProductId;

    fn id(&self) -> &Self::Id {
        &self.id
    }
}
