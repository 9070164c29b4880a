//! The promotion sweep and the seasonal category price rewriter.
//!
//! A sweep is an explicit batch operation: callers (the server at startup, a
//! periodic task, an admin endpoint, a test) decide when it runs and which day
//! counts as "today".
//!
//! # Partial failure
//!
//! There is no transaction around a sweep. The first store error aborts the
//! remaining work and is returned; every flag and price written before it
//! stays committed.
//!
//! # Compounding
//!
//! Seasonal discounts rewrite the stored price in place. Running the sweep
//! again while the same seasonal promotion is active applies the discount
//! again: `100 -> 80 -> 64` for a 20 % promotion.

use chrono::NaiveDate;
use tracing::{debug, info};

use crate::{
  Error, Result,
  pricing::apply_discount,
  promotion::{Promotion, PromotionKind},
  store::CatalogStore,
};

/// Refresh every promotion's `is_active` flag for `today`, apply each active
/// seasonal promotion to its category, and return all promotions that are
/// now active (of any kind).
pub async fn sweep<S>(store: &S, today: NaiveDate) -> Result<Vec<Promotion>>
where
  S: CatalogStore,
{
  let promotions = store.list_promotions().await.map_err(Error::store)?;
  info!(count = promotions.len(), %today, "refreshing promotion status");

  let mut refreshed = Vec::with_capacity(promotions.len());
  for mut promotion in promotions {
    let was_active = promotion.is_active;
    let is_active = promotion.refresh(today);
    if was_active != is_active {
      debug!(
        promotion_id = %promotion.promotion_id,
        is_active,
        status = ?promotion.status_on(today),
        "promotion status changed"
      );
    }
    refreshed.push(store.save_promotion(promotion).await.map_err(Error::store)?);
  }

  for promotion in refreshed
    .iter()
    .filter(|p| p.is_active && p.kind == PromotionKind::Seasonal)
  {
    apply_seasonal_discount(store, promotion).await?;
  }

  refreshed.retain(|p| p.is_active);
  info!(active = refreshed.len(), "promotion sweep finished");
  Ok(refreshed)
}

/// Permanently multiply the price of every product in the promotion's
/// category by `1 - discount`. Returns the number of products rewritten.
pub async fn apply_seasonal_discount<S>(
  store: &S,
  promotion: &Promotion,
) -> Result<usize>
where
  S: CatalogStore,
{
  let products = store
    .products_in_category(promotion.category_id)
    .await
    .map_err(Error::store)?;

  let count = products.len();
  for mut product in products {
    let old_price = product.price;
    product.price = apply_discount(old_price, promotion.discount);
    debug!(
      product_id = %product.product_id,
      %old_price,
      new_price = %product.price,
      "seasonal price rewrite"
    );
    store.save_product(product).await.map_err(Error::store)?;
  }

  info!(
    promotion_id = %promotion.promotion_id,
    category_id = %promotion.category_id,
    discount = %promotion.discount,
    products = count,
    "applied seasonal discount"
  );
  Ok(count)
}
