//! Product: a sellable catalog item.
//!
//! Price is the only field the promotion engine rewrites. Every other field
//! changes through validated catalog writes (see [`crate::catalog`]).

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Product {
  pub product_id:    Uuid,
  pub name:          String,
  pub description:   Option<String>,
  /// Unit price.
  pub price:         Decimal,
  pub category_id:   Uuid,
  /// Unit weight.
  pub weight:        Decimal,
  pub current_stock: u32,
  pub min_stock:     u32,
}

/// Input to [`crate::store::CatalogStore::add_product`], and the full
/// replacement body for product updates. The id is always assigned by the
/// store.
#[derive(Debug, Clone, Deserialize)]
pub struct NewProduct {
  pub name:          String,
  #[serde(default)]
  pub description:   Option<String>,
  pub price:         Decimal,
  pub category_id:   Uuid,
  pub weight:        Decimal,
  pub current_stock: u32,
  pub min_stock:     u32,
}

impl Product {
  /// Overwrite every caller-editable field with the values from `input`.
  pub fn apply(&mut self, input: NewProduct) {
    self.name = input.name;
    self.description = input.description;
    self.price = input.price;
    self.category_id = input.category_id;
    self.weight = input.weight;
    self.current_stock = input.current_stock;
    self.min_stock = input.min_stock;
  }
}
