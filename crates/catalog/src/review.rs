use serde::{Deserialize, Serialize};

use briolka_core::{DomainError, DomainResult, Entity, ReviewId, ValidationFailure};

use crate::rating::Rating;

/// A published customer review of a product.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "NewReview")]
pub struct Review {
    id: ReviewId,
    author: String,
    rating: Rating,
    text: String,
    /// Display string; never parsed.
    date: String,
}

impl Review {
    pub fn new(
        id: ReviewId,
        author: impl Into<String>,
        rating: Rating,
        text: impl Into<String>,
        date: impl Into<String>,
    ) -> DomainResult<Self> {
        let author = author.into();
        if author.trim().is_empty() {
            return Err(DomainError::validation(ValidationFailure::EmptyAuthor));
        }
        Ok(Self {
            id,
            author,
            rating,
            text: text.into(),
            date: date.into(),
        })
    }

    pub fn id_typed(&self) -> ReviewId {
        self.id
    }

    pub fn author(&self) -> &str {
        &self.author
    }

    pub fn rating(&self) -> Rating {
        self.rating
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn date(&self) -> &str {
        &self.date
    }
}

impl Entity for Review {
    type Id = ReviewId;

    fn id(&self) -> &Self::Id {
        &self.id
    }
}

/// Unvalidated review input (catalog seed or JSON file).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewReview {
    pub id: ReviewId,
    pub author: String,
    pub rating: Rating,
    pub text: String,
    pub date: String,
}

impl TryFrom<NewReview> for Review {
    type Error = DomainError;

    fn try_from(value: NewReview) -> Result<Self, Self::Error> {
        Review::new(value.id, value.author, value.rating, value.text, value.date)
    }
}
