//! Checkout pricing for a single product line or a whole cart.
//!
//! Prices always come from the store. Any name, description or price a client
//! attaches to a cart line is display data and is ignored.

use std::collections::HashMap;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use tracing::{debug, info};
use uuid::Uuid;

use crate::{
  Error, Result,
  catalog::get_product,
  pricing::discounted_unit_price,
  product::Product,
  promotion::Promotion,
  store::CatalogStore,
};

/// One product + quantity pair in a checkout cart.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CartLine {
  pub product_id:  Uuid,
  pub quantity:    u32,
  /// Advisory; never read by the pricing logic.
  #[serde(default)]
  pub name:        Option<String>,
  /// Advisory; never read by the pricing logic.
  #[serde(default)]
  pub description: Option<String>,
  /// Advisory; never read by the pricing logic.
  #[serde(default)]
  pub price:       Option<Decimal>,
}

impl CartLine {
  pub fn new(product_id: Uuid, quantity: u32) -> Self {
    Self { product_id, quantity, name: None, description: None, price: None }
  }
}

/// A priced cart line. `total_price` and `total_weight` cover the whole line.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PricedLine {
  pub product_id:    Uuid,
  pub name:          String,
  pub description:   Option<String>,
  pub quantity:      u32,
  /// Unit price after any volume discount.
  pub unit_price:    Decimal,
  /// `unit_price * quantity`
  pub total_price:   Decimal,
  pub category_id:   Uuid,
  /// `weight * quantity`
  pub total_weight:  Decimal,
  pub current_stock: u32,
  pub min_stock:     u32,
}

impl PricedLine {
  fn new(product: Product, unit_price: Decimal, quantity: u32) -> Result<Self> {
    let qty = Decimal::from(quantity);
    let overflow = || Error::InvalidArgument("line total overflows".into());
    let total_price = unit_price.checked_mul(qty).ok_or_else(overflow)?;
    let total_weight = product.weight.checked_mul(qty).ok_or_else(overflow)?;
    Ok(Self {
      product_id: product.product_id,
      name: product.name,
      description: product.description,
      quantity,
      unit_price,
      total_price,
      category_id: product.category_id,
      total_weight,
      current_stock: product.current_stock,
      min_stock: product.min_stock,
    })
  }
}

fn check_quantity(quantity: u32) -> Result<()> {
  if quantity == 0 {
    return Err(Error::InvalidArgument("quantity must be positive".into()));
  }
  Ok(())
}

/// The unit price to charge for `quantity` units of a product.
pub async fn price_line<S>(
  store: &S,
  product_id: Uuid,
  quantity: u32,
) -> Result<Decimal>
where
  S: CatalogStore,
{
  check_quantity(quantity)?;
  let product = get_product(store, product_id).await?;
  let promotion = store
    .active_promotion_for_category(product.category_id)
    .await
    .map_err(Error::store)?;

  let unit_price = discounted_unit_price(product.price, promotion.as_ref(), quantity);
  info!(%product_id, quantity, %unit_price, "priced checkout line");
  Ok(unit_price)
}

/// Price every line of a cart, preserving input order.
///
/// A missing product aborts the whole cart; no partial result is returned.
pub async fn price_cart<S>(store: &S, lines: &[CartLine]) -> Result<Vec<PricedLine>>
where
  S: CatalogStore,
{
  info!(lines = lines.len(), "pricing cart");

  // Several lines often share a category; look each one up once.
  let mut promotions: HashMap<Uuid, Option<Promotion>> = HashMap::new();
  let mut priced = Vec::with_capacity(lines.len());

  for line in lines {
    check_quantity(line.quantity)?;
    let product = get_product(store, line.product_id).await?;

    let promotion = match promotions.get(&product.category_id) {
      Some(p) => p.clone(),
      None => {
        let p = store
          .active_promotion_for_category(product.category_id)
          .await
          .map_err(Error::store)?;
        promotions.insert(product.category_id, p.clone());
        p
      }
    };

    let unit_price =
      discounted_unit_price(product.price, promotion.as_ref(), line.quantity);
    debug!(
      product_id = %product.product_id,
      quantity = line.quantity,
      %unit_price,
      "priced cart line"
    );
    priced.push(PricedLine::new(product, unit_price, line.quantity)?);
  }

  Ok(priced)
}
