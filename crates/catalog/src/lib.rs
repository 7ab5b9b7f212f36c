//! Catalog domain module.
//!
//! The fixed set of bracelets offered in a session, their reviews, and the
//! rating aggregation derived from those reviews. Read-only once built; pure
//! domain logic (no IO beyond the optional JSON loader).

pub mod product;
pub mod rating;
pub mod repository;
pub mod review;
pub mod seed;

pub use product::{NewProduct, Product};
pub use rating::{Rating, RatingSummary, compute_average, round_to_stars, summarize};
pub use repository::{CatalogLoadError, CatalogRepository, InMemoryCatalog};
pub use review::{NewReview, Review};
