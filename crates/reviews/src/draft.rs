use serde::{Deserialize, Serialize};

use briolka_catalog::Rating;
use briolka_core::{DomainError, DomainResult, ProductId, ValidationFailure, ValueObject};

/// Draft lifecycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DraftState {
    /// Fields hold their defaults.
    Idle,
    /// The visitor has started filling the form.
    Composing,
}

/// Free-text fields of the review form.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DraftField {
    Author,
    Body,
}

/// In-progress review form contents.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize)]
pub struct ReviewDraft {
    author: String,
    rating: Rating,
    text: String,
}

impl ReviewDraft {
    pub fn author(&self) -> &str {
        &self.author
    }

    pub fn rating(&self) -> Rating {
        self.rating
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    fn validate(&self) -> DomainResult<()> {
        if self.author.trim().is_empty() {
            return Err(DomainError::validation(ValidationFailure::EmptyAuthor));
        }
        if self.text.trim().is_empty() {
            return Err(DomainError::validation(ValidationFailure::EmptyBody));
        }
        Ok(())
    }
}

impl ValueObject for ReviewDraft {}

/// A validated review handed back by a successful submit.
///
/// It is not added to the product's reviews.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReviewSubmission {
    pub product_id: ProductId,
    pub author: String,
    pub rating: Rating,
    pub text: String,
}

/// Owns the review form of whichever product detail view is open.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReviewDraftController {
    bound: Option<ProductId>,
    state: DraftState,
    draft: ReviewDraft,
}

impl Default for ReviewDraftController {
    fn default() -> Self {
        Self::new()
    }
}

impl ReviewDraftController {
    pub fn new() -> Self {
        Self {
            bound: None,
            state: DraftState::Idle,
            draft: ReviewDraft::default(),
        }
    }

    pub fn state(&self) -> DraftState {
        self.state
    }

    pub fn draft(&self) -> &ReviewDraft {
        &self.draft
    }

    /// Product whose detail view currently owns the form.
    pub fn bound_product(&self) -> Option<ProductId> {
        self.bound
    }

    /// A detail view opened: fresh form bound to `product_id`.
    pub fn open(&mut self, product_id: ProductId) {
        self.bound = Some(product_id);
        self.draft = ReviewDraft::default();
        self.state = DraftState::Composing;
    }

    /// The detail view closed: form discarded.
    pub fn close(&mut self) {
        self.bound = None;
        self.draft = ReviewDraft::default();
        self.state = DraftState::Idle;
    }

    pub fn set_author(&mut self, author: impl Into<String>) -> DomainResult<()> {
        self.set_field(DraftField::Author, author)
    }

    pub fn set_body(&mut self, text: impl Into<String>) -> DomainResult<()> {
        self.set_field(DraftField::Body, text)
    }

    pub fn set_field(&mut self, field: DraftField, value: impl Into<String>) -> DomainResult<()> {
        self.ensure_open()?;
        let value = value.into();
        match field {
            DraftField::Author => self.draft.author = value,
            DraftField::Body => self.draft.text = value,
        }
        self.state = DraftState::Composing;
        Ok(())
    }

    /// Select a star; only 1..=5 is accepted, anything else leaves the draft as is.
    pub fn set_rating(&mut self, star: i64) -> DomainResult<()> {
        self.ensure_open()?;
        self.draft.rating = Rating::try_from(star)?;
        self.state = DraftState::Composing;
        Ok(())
    }

    /// Validate and hand back the review, resetting the form.
    ///
    /// An invalid draft is returned as an error and kept untouched so the
    /// visitor can correct it.
    pub fn submit(&mut self, product_id: ProductId) -> DomainResult<ReviewSubmission> {
        self.ensure_bound_to(product_id)?;
        self.draft.validate()?;

        let draft = std::mem::take(&mut self.draft);
        self.state = DraftState::Idle;

        Ok(ReviewSubmission {
            product_id,
            author: draft.author.trim().to_string(),
            rating: draft.rating,
            text: draft.text.trim().to_string(),
        })
    }

    fn ensure_open(&self) -> DomainResult<ProductId> {
        self.bound
            .ok_or_else(|| DomainError::conflict("no product detail view is open"))
    }

    fn ensure_bound_to(&self, product_id: ProductId) -> DomainResult<()> {
        let bound = self.ensure_open()?;
        if bound != product_id {
            return Err(DomainError::conflict(format!(
                "review form belongs to product {bound}, not {product_id}"
            )));
        }
        Ok(())
    }
}
