//! Notifications published by the session after each accepted action.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use briolka_cart::CartEvent;
use briolka_core::ProductId;
use briolka_events::Event;
use briolka_reviews::ReviewSubmission;

use crate::section::Section;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum StorefrontEvent {
    /// A cart line changed.
    Cart { event: CartEvent },
    /// The cart panel should become visible (emitted on every add to cart).
    CartPanelOpened { occurred_at: DateTime<Utc> },
    ProductDetailOpened {
        product_id: ProductId,
        occurred_at: DateTime<Utc>,
    },
    ProductDetailClosed {
        product_id: ProductId,
        occurred_at: DateTime<Utc>,
    },
    /// A valid review was submitted (and not persisted).
    ReviewSubmitted {
        submission: ReviewSubmission,
        occurred_at: DateTime<Utc>,
    },
    SectionChanged {
        from: Section,
        to: Section,
        occurred_at: DateTime<Utc>,
    },
}

impl From<CartEvent> for StorefrontEvent {
    fn from(event: CartEvent) -> Self {
        StorefrontEvent::Cart { event }
    }
}

impl Event for StorefrontEvent {
    fn event_type(&self) -> &'static str {
        match self {
            StorefrontEvent::Cart { event } => event.event_type(),
            StorefrontEvent::CartPanelOpened { .. } => "storefront.cart_panel.opened",
            StorefrontEvent::ProductDetailOpened { .. } => "storefront.product_detail.opened",
            StorefrontEvent::ProductDetailClosed { .. } => "storefront.product_detail.closed",
            StorefrontEvent::ReviewSubmitted { .. } => "reviews.review.submitted",
            StorefrontEvent::SectionChanged { .. } => "storefront.section.changed",
        }
    }

    fn version(&self) -> u32 {
        1
    }

    fn occurred_at(&self) -> DateTime<Utc> {
        match self {
            StorefrontEvent::Cart { event } => event.occurred_at(),
            StorefrontEvent::CartPanelOpened { occurred_at }
            | StorefrontEvent::ProductDetailOpened { occurred_at, .. }
            | StorefrontEvent::ProductDetailClosed { occurred_at, .. }
            | StorefrontEvent::ReviewSubmitted { occurred_at, .. }
            | StorefrontEvent::SectionChanged { occurred_at, .. } => *occurred_at,
        }
    }
}
