//! Value object trait: equality by value, not identity.
//!
//! Value objects have **no identity**. A star rating of 4 is the same as any
//! other star rating of 4; a cart line for product 2 with quantity 3 is equal to
//! any other such line.

/// Marker trait for value objects.
///
/// Value objects are immutable from the outside and compared by value. To
/// "modify" one, build a new one.
///
/// ```ignore
/// #[derive(Debug, Clone, Copy, PartialEq, Eq)]
/// struct Rating(u8);
///
/// impl ValueObject for Rating {}
///
/// assert_eq!(Rating(4), Rating(4));
/// ```
pub trait ValueObject: Clone + PartialEq + core::fmt::Debug {}
