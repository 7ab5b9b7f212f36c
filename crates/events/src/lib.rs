//! Storefront events: the `Event` contract and an in-process pub/sub bus.
//!
//! The presentation layer subscribes to the bus to learn about accepted
//! mutations (cart changed, cart panel should open, review submitted) without
//! polling session state.

pub mod bus;
pub mod event;
pub mod handler;
pub mod in_memory_bus;

pub use bus::{EventBus, Subscription};
pub use event::Event;
pub use handler::execute;
pub use in_memory_bus::{InMemoryBusError, InMemoryEventBus};
