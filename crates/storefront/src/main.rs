//! Scripted walk through a storefront session, logging each step.
//!
//! Configuration comes from `BRIOLKA_*` environment variables; log filtering
//! from `RUST_LOG`.

use anyhow::Context;

use briolka_catalog::CatalogRepository;
use briolka_core::ProductId;
use briolka_events::Event;
use briolka_reviews::DraftField;
use briolka_storefront::{Section, Storefront, StorefrontConfig};

fn main() -> anyhow::Result<()> {
    let config = StorefrontConfig::from_env().context("failed to read configuration")?;
    briolka_observability::init(config.log_format);

    let mut storefront = Storefront::from_config(&config).context("failed to start session")?;
    let events = storefront.subscribe();

    storefront.navigate(Section::Catalog);
    for product in storefront.catalog().all() {
        let rating = product.rating_summary();
        tracing::info!(
            id = %product.id_typed(),
            name = product.name(),
            stone = product.stone_type(),
            price = product.price(),
            average_rating = rating.average,
            stars = rating.stars,
            reviews = rating.review_count,
            "catalog entry"
        );
    }

    let first = ProductId::new(1);
    let second = ProductId::new(2);
    storefront.add_to_cart(first)?;
    storefront.add_to_cart(first)?;
    storefront.add_to_cart(second)?;
    storefront.set_cart_quantity(first, 0)?;

    storefront.open_product_detail(second)?;
    storefront.set_draft_field(DraftField::Author, "Мария С.")?;
    storefront.select_draft_rating(5)?;
    storefront.set_draft_field(DraftField::Body, "Очень нежный и красивый.")?;
    storefront.submit_review(second)?;
    storefront.close_product_detail();

    for event in events.drain() {
        tracing::info!(event_type = event.event_type(), at = %event.occurred_at(), "event");
    }

    let totals = storefront.cart_totals()?;
    println!("{}", serde_json::to_string_pretty(&totals)?);
    Ok(())
}
