//! Shopping cart domain module.
//!
//! Business rules for the session cart, implemented as deterministic
//! command → event logic (no IO, no rendering). Lines reference catalog
//! products by id only; prices are resolved through the catalog when totals
//! are computed.

pub mod cart;

pub use cart::{
    AddItem, Cart, CartCommand, CartEvent, CartLine, CartTotals, LineAdded, LineRemoved,
    QuantityChanged, QuantityPolicy, RemoveItem, SetQuantity,
};
