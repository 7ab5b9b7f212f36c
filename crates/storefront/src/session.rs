//! The storefront session: one explicit state object instead of scattered UI
//! state.
//!
//! Every operation runs to completion before returning. A rejected action
//! returns an error and leaves the session exactly as it was; an accepted one
//! updates state and then publishes [`StorefrontEvent`]s.

use std::sync::Arc;

use chrono::Utc;

use briolka_cart::{
    AddItem, Cart, CartCommand, CartEvent, CartTotals, QuantityPolicy, RemoveItem, SetQuantity,
};
use briolka_catalog::{CatalogRepository, InMemoryCatalog, Product, RatingSummary};
use briolka_core::{DomainResult, ProductId, SessionId};
use briolka_events::{EventBus, InMemoryEventBus, Subscription, execute};
use briolka_reviews::{DraftField, ReviewDraft, ReviewDraftController, ReviewSubmission};

use crate::config::{ConfigError, StorefrontConfig};
use crate::events::StorefrontEvent;
use crate::section::Section;

pub struct Storefront<C = InMemoryCatalog> {
    id: SessionId,
    catalog: Arc<C>,
    cart: Cart,
    reviews: ReviewDraftController,
    section: Section,
    selected: Option<ProductId>,
    cart_panel_open: bool,
    mobile_menu_open: bool,
    bus: Arc<InMemoryEventBus<StorefrontEvent>>,
}

impl Storefront<InMemoryCatalog> {
    /// Start a session from configuration: the JSON catalog if one is
    /// configured, the built-in collection otherwise.
    pub fn from_config(config: &StorefrontConfig) -> Result<Self, ConfigError> {
        let catalog = match &config.catalog_path {
            Some(path) => InMemoryCatalog::from_json_file(path)?,
            None => InMemoryCatalog::seed()?,
        };
        Ok(Self::new(Arc::new(catalog), config.quantity_policy()?))
    }
}

impl<C> Storefront<C>
where
    C: CatalogRepository,
{
    pub fn new(catalog: Arc<C>, policy: QuantityPolicy) -> Self {
        Self::with_session_id(SessionId::new(), catalog, policy)
    }

    pub fn with_session_id(id: SessionId, catalog: Arc<C>, policy: QuantityPolicy) -> Self {
        tracing::info!(
            session_id = %id,
            products = catalog.all().len(),
            max_per_line = policy.max_per_line(),
            "storefront session started"
        );
        Self {
            id,
            catalog,
            cart: Cart::new(id, policy),
            reviews: ReviewDraftController::new(),
            section: Section::default(),
            selected: None,
            cart_panel_open: false,
            mobile_menu_open: false,
            bus: Arc::new(InMemoryEventBus::new()),
        }
    }

    pub fn session_id(&self) -> SessionId {
        self.id
    }

    pub fn catalog(&self) -> &C {
        &self.catalog
    }

    pub fn products(&self) -> &[Product] {
        self.catalog.all()
    }

    pub fn product(&self, id: ProductId) -> DomainResult<&Product> {
        self.catalog.lookup(id)
    }

    pub fn rating_summary(&self, id: ProductId) -> DomainResult<RatingSummary> {
        Ok(self.catalog.lookup(id)?.rating_summary())
    }

    pub fn cart(&self) -> &Cart {
        &self.cart
    }

    pub fn draft(&self) -> &ReviewDraft {
        self.reviews.draft()
    }

    pub fn review_form(&self) -> &ReviewDraftController {
        &self.reviews
    }

    pub fn section(&self) -> Section {
        self.section
    }

    /// Product whose detail view is open, if any.
    pub fn selected_product(&self) -> Option<&Product> {
        self.selected.and_then(|id| self.catalog.lookup(id).ok())
    }

    pub fn is_cart_panel_open(&self) -> bool {
        self.cart_panel_open
    }

    pub fn is_mobile_menu_open(&self) -> bool {
        self.mobile_menu_open
    }

    /// Receive every event published from now on.
    pub fn subscribe(&self) -> Subscription<StorefrontEvent> {
        self.bus.subscribe()
    }

    // --- cart -------------------------------------------------------------

    /// Add one unit of a product and reveal the cart panel.
    pub fn add_to_cart(&mut self, product_id: ProductId) -> DomainResult<()> {
        self.catalog
            .lookup(product_id)
            .inspect_err(|err| tracing::warn!(%err, "add to cart rejected"))?;

        let now = Utc::now();
        self.dispatch_cart(CartCommand::AddItem(AddItem {
            cart_id: self.id,
            product_id,
            occurred_at: now,
        }))?;

        self.cart_panel_open = true;
        self.publish(StorefrontEvent::CartPanelOpened { occurred_at: now });
        Ok(())
    }

    pub fn remove_from_cart(&mut self, product_id: ProductId) -> DomainResult<()> {
        self.catalog
            .lookup(product_id)
            .inspect_err(|err| tracing::warn!(%err, "remove from cart rejected"))?;

        self.dispatch_cart(CartCommand::RemoveItem(RemoveItem {
            cart_id: self.id,
            product_id,
            occurred_at: Utc::now(),
        }))?;
        Ok(())
    }

    /// Set a line's quantity; `0` removes the line.
    pub fn set_cart_quantity(&mut self, product_id: ProductId, quantity: i64) -> DomainResult<()> {
        self.catalog
            .lookup(product_id)
            .inspect_err(|err| tracing::warn!(%err, "set quantity rejected"))?;

        self.dispatch_cart(CartCommand::SetQuantity(SetQuantity {
            cart_id: self.id,
            product_id,
            quantity,
            occurred_at: Utc::now(),
        }))?;
        Ok(())
    }

    /// The cart panel's "+" button.
    pub fn increment_quantity(&mut self, product_id: ProductId) -> DomainResult<()> {
        match self.cart.quantity_of(product_id) {
            0 => self.set_cart_quantity(product_id, 0),
            q => self.set_cart_quantity(product_id, i64::from(q) + 1),
        }
    }

    /// The cart panel's "-" button; going below 1 removes the line.
    pub fn decrement_quantity(&mut self, product_id: ProductId) -> DomainResult<()> {
        let q = self.cart.quantity_of(product_id);
        self.set_cart_quantity(product_id, i64::from(q.saturating_sub(1)))
    }

    pub fn cart_totals(&self) -> DomainResult<CartTotals> {
        self.cart.totals(self.catalog.as_ref())
    }

    pub fn set_cart_panel_open(&mut self, open: bool) {
        self.cart_panel_open = open;
    }

    // --- product detail & review draft --------------------------------------

    /// Open a product's detail view with a fresh review form.
    pub fn open_product_detail(&mut self, product_id: ProductId) -> DomainResult<()> {
        self.catalog
            .lookup(product_id)
            .inspect_err(|err| tracing::warn!(%err, "open product detail rejected"))?;

        self.selected = Some(product_id);
        self.reviews.open(product_id);
        tracing::debug!(%product_id, "product detail opened");
        self.publish(StorefrontEvent::ProductDetailOpened {
            product_id,
            occurred_at: Utc::now(),
        });
        Ok(())
    }

    /// Close the detail view, discarding the review form. No-op when closed.
    pub fn close_product_detail(&mut self) {
        let Some(product_id) = self.selected.take() else {
            return;
        };
        self.reviews.close();
        tracing::debug!(%product_id, "product detail closed");
        self.publish(StorefrontEvent::ProductDetailClosed {
            product_id,
            occurred_at: Utc::now(),
        });
    }

    pub fn set_draft_field(&mut self, field: DraftField, value: impl Into<String>) -> DomainResult<()> {
        self.reviews
            .set_field(field, value)
            .inspect_err(|err| tracing::warn!(%err, ?field, "draft update rejected"))
    }

    pub fn select_draft_rating(&mut self, star: i64) -> DomainResult<()> {
        self.reviews
            .set_rating(star)
            .inspect_err(|err| tracing::warn!(%err, star, "rating selection rejected"))
    }

    /// Validate the draft for `product_id` and reset the form.
    ///
    /// The product's reviews and average rating are left as they are.
    pub fn submit_review(&mut self, product_id: ProductId) -> DomainResult<ReviewSubmission> {
        self.catalog
            .lookup(product_id)
            .inspect_err(|err| tracing::warn!(%err, "review submission rejected"))?;

        let submission = self
            .reviews
            .submit(product_id)
            .inspect_err(|err| tracing::warn!(%err, %product_id, "review submission rejected"))?;

        tracing::info!(
            %product_id,
            rating = submission.rating.stars(),
            "review submitted"
        );
        self.publish(StorefrontEvent::ReviewSubmitted {
            submission: submission.clone(),
            occurred_at: Utc::now(),
        });
        Ok(submission)
    }

    // --- navigation ---------------------------------------------------------

    /// Switch section; the mobile menu always closes.
    pub fn navigate(&mut self, section: Section) {
        self.mobile_menu_open = false;
        if self.section == section {
            return;
        }
        let from = std::mem::replace(&mut self.section, section);
        tracing::debug!(%from, to = %section, "section changed");
        self.publish(StorefrontEvent::SectionChanged {
            from,
            to: section,
            occurred_at: Utc::now(),
        });
    }

    pub fn toggle_mobile_menu(&mut self) {
        self.mobile_menu_open = !self.mobile_menu_open;
    }

    // --- internals ----------------------------------------------------------

    fn dispatch_cart(&mut self, command: CartCommand) -> DomainResult<Vec<CartEvent>> {
        let events = execute(&mut self.cart, &command)
            .inspect_err(|err| tracing::warn!(%err, ?command, "cart command rejected"))?;

        if events.is_empty() {
            tracing::debug!(?command, "cart command changed nothing");
        }
        for event in &events {
            tracing::info!(
                session_id = %self.id,
                product_id = %event.product_id(),
                event_type = briolka_events::Event::event_type(event),
                total_items = self.cart.total_items(),
                "cart updated"
            );
            self.publish(event.clone().into());
        }
        Ok(events)
    }

    fn publish(&self, event: StorefrontEvent) {
        if let Err(err) = self.bus.publish(event) {
            tracing::error!(?err, "failed to publish storefront event");
        }
    }
}
