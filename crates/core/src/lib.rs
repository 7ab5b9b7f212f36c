//! `briolka-core` — domain foundation building blocks for the storefront.
//!
//! This crate contains **pure domain** primitives (no IO, no rendering).

pub mod aggregate;
pub mod entity;
pub mod error;
pub mod id;
pub mod value_object;

pub use aggregate::{Aggregate, AggregateRoot};
pub use entity::Entity;
pub use error::{DomainError, DomainResult, ValidationFailure};
pub use id::{ProductId, ReviewId, SessionId};
pub use value_object::ValueObject;
