//! `briolka-storefront` — the session state object behind the storefront UI.
//!
//! The presentation layer calls the operations on [`Storefront`] and renders
//! what they return; everything it needs to react to is also published as a
//! [`StorefrontEvent`].

pub mod config;
pub mod events;
pub mod section;
pub mod session;

pub use config::{ConfigError, StorefrontConfig};
pub use events::StorefrontEvent;
pub use section::{ParseSectionError, Section};
pub use session::Storefront;
