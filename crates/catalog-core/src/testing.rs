//! In-memory [`CatalogStore`] used by the unit tests in this crate.

use std::sync::{
  Mutex,
  atomic::{AtomicUsize, Ordering},
};

use chrono::Utc;
use rust_decimal::Decimal;
use thiserror::Error;
use uuid::Uuid;

use crate::{
  category::{Category, NewCategory},
  product::{NewProduct, Product},
  promotion::{NewPromotion, Promotion},
  store::CatalogStore,
};

#[derive(Debug, Error)]
pub enum MemoryError {
  #[error("record not found: {0}")]
  Missing(Uuid),
  #[error("injected write failure")]
  Injected,
}

#[derive(Default)]
struct Tables {
  categories: Vec<Category>,
  products:   Vec<Product>,
  promotions: Vec<Promotion>,
}

#[derive(Default)]
pub struct MemoryStore {
  tables:              Mutex<Tables>,
  /// Number of product saves allowed before every further save fails.
  product_save_budget: Mutex<Option<usize>>,
  pub product_saves: AtomicUsize,
}

impl MemoryStore {
  pub fn new() -> Self { Self::default() }

  pub fn fail_product_saves_after(&self, n: usize) {
    *self.product_save_budget.lock().unwrap() = Some(n);
  }

  pub fn category(&self, name: &str) -> Category {
    let category = Category { category_id: Uuid::new_v4(), name: name.into() };
    self.tables.lock().unwrap().categories.push(category.clone());
    category
  }

  pub fn product(&self, category_id: Uuid, name: &str, price: &str) -> Product {
    let product = Product {
      product_id: Uuid::new_v4(),
      name: name.into(),
      description: Some(format!("{name} description")),
      price: price.parse().unwrap(),
      category_id,
      weight: Decimal::new(15, 1),
      current_stock: 10,
      min_stock: 2,
    };
    self.tables.lock().unwrap().products.push(product.clone());
    product
  }

  pub fn insert_promotion(&self, promotion: Promotion) -> Promotion {
    self.tables.lock().unwrap().promotions.push(promotion.clone());
    promotion
  }

  pub fn price_of(&self, id: Uuid) -> Decimal {
    self
      .tables
      .lock()
      .unwrap()
      .products
      .iter()
      .find(|p| p.product_id == id)
      .map(|p| p.price)
      .unwrap()
  }

  pub fn promotion(&self, id: Uuid) -> Promotion {
    self
      .tables
      .lock()
      .unwrap()
      .promotions
      .iter()
      .find(|p| p.promotion_id == id)
      .cloned()
      .unwrap()
  }
}

impl CatalogStore for MemoryStore {
  type Error = MemoryError;

  async fn add_category(&self, input: NewCategory) -> Result<Category, MemoryError> {
    let category = Category { category_id: Uuid::new_v4(), name: input.name };
    self.tables.lock().unwrap().categories.push(category.clone());
    Ok(category)
  }

  async fn get_category(&self, id: Uuid) -> Result<Option<Category>, MemoryError> {
    let t = self.tables.lock().unwrap();
    Ok(t.categories.iter().find(|c| c.category_id == id).cloned())
  }

  async fn list_categories(&self) -> Result<Vec<Category>, MemoryError> {
    Ok(self.tables.lock().unwrap().categories.clone())
  }

  async fn delete_category(&self, id: Uuid) -> Result<bool, MemoryError> {
    let mut t = self.tables.lock().unwrap();
    let before = t.categories.len();
    t.categories.retain(|c| c.category_id != id);
    Ok(t.categories.len() != before)
  }

  async fn add_product(&self, input: NewProduct) -> Result<Product, MemoryError> {
    let product = Product {
      product_id:    Uuid::new_v4(),
      name:          input.name,
      description:   input.description,
      price:         input.price,
      category_id:   input.category_id,
      weight:        input.weight,
      current_stock: input.current_stock,
      min_stock:     input.min_stock,
    };
    self.tables.lock().unwrap().products.push(product.clone());
    Ok(product)
  }

  async fn get_product(&self, id: Uuid) -> Result<Option<Product>, MemoryError> {
    let t = self.tables.lock().unwrap();
    Ok(t.products.iter().find(|p| p.product_id == id).cloned())
  }

  async fn list_products(&self) -> Result<Vec<Product>, MemoryError> {
    Ok(self.tables.lock().unwrap().products.clone())
  }

  async fn products_by_ids(&self, ids: &[Uuid]) -> Result<Vec<Product>, MemoryError> {
    let t = self.tables.lock().unwrap();
    Ok(
      t.products
        .iter()
        .filter(|p| ids.contains(&p.product_id))
        .cloned()
        .collect(),
    )
  }

  async fn products_in_category(
    &self,
    category_id: Uuid,
  ) -> Result<Vec<Product>, MemoryError> {
    let t = self.tables.lock().unwrap();
    Ok(
      t.products
        .iter()
        .filter(|p| p.category_id == category_id)
        .cloned()
        .collect(),
    )
  }

  async fn products_in_category_with_prefix(
    &self,
    category_id: Uuid,
    prefix: &str,
  ) -> Result<Vec<Product>, MemoryError> {
    let t = self.tables.lock().unwrap();
    Ok(
      t.products
        .iter()
        .filter(|p| p.category_id == category_id && p.name.starts_with(prefix))
        .cloned()
        .collect(),
    )
  }

  async fn save_product(&self, product: Product) -> Result<Product, MemoryError> {
    {
      let mut budget = self.product_save_budget.lock().unwrap();
      if let Some(remaining) = budget.as_mut() {
        if *remaining == 0 {
          return Err(MemoryError::Injected);
        }
        *remaining -= 1;
      }
    }
    let mut t = self.tables.lock().unwrap();
    let slot = t
      .products
      .iter_mut()
      .find(|p| p.product_id == product.product_id)
      .ok_or(MemoryError::Missing(product.product_id))?;
    *slot = product.clone();
    self.product_saves.fetch_add(1, Ordering::SeqCst);
    Ok(product)
  }

  async fn delete_product(&self, id: Uuid) -> Result<bool, MemoryError> {
    let mut t = self.tables.lock().unwrap();
    let before = t.products.len();
    t.products.retain(|p| p.product_id != id);
    Ok(t.products.len() != before)
  }

  async fn add_promotion(
    &self,
    input: NewPromotion,
    is_active: bool,
  ) -> Result<Promotion, MemoryError> {
    let promotion = Promotion {
      promotion_id:     Uuid::new_v4(),
      category_id:      input.category_id,
      discount:         input.discount,
      kind:             input.kind,
      volume_threshold: input.volume_threshold,
      start_date:       input.start_date,
      end_date:         input.end_date,
      is_active,
      created_at:       Utc::now(),
    };
    self.tables.lock().unwrap().promotions.push(promotion.clone());
    Ok(promotion)
  }

  async fn get_promotion(&self, id: Uuid) -> Result<Option<Promotion>, MemoryError> {
    let t = self.tables.lock().unwrap();
    Ok(t.promotions.iter().find(|p| p.promotion_id == id).cloned())
  }

  async fn list_promotions(&self) -> Result<Vec<Promotion>, MemoryError> {
    Ok(self.tables.lock().unwrap().promotions.clone())
  }

  async fn promotions_in_category(
    &self,
    category_id: Uuid,
  ) -> Result<Vec<Promotion>, MemoryError> {
    let t = self.tables.lock().unwrap();
    Ok(
      t.promotions
        .iter()
        .filter(|p| p.category_id == category_id)
        .cloned()
        .collect(),
    )
  }

  async fn active_promotion_for_category(
    &self,
    category_id: Uuid,
  ) -> Result<Option<Promotion>, MemoryError> {
    let t = self.tables.lock().unwrap();
    Ok(
      t.promotions
        .iter()
        .filter(|p| p.category_id == category_id && p.is_active)
        .max_by_key(|p| p.created_at)
        .cloned(),
    )
  }

  async fn save_promotion(&self, promotion: Promotion) -> Result<Promotion, MemoryError> {
    let mut t = self.tables.lock().unwrap();
    let slot = t
      .promotions
      .iter_mut()
      .find(|p| p.promotion_id == promotion.promotion_id)
      .ok_or(MemoryError::Missing(promotion.promotion_id))?;
    *slot = promotion.clone();
    Ok(promotion)
  }

  async fn delete_promotion(&self, id: Uuid) -> Result<bool, MemoryError> {
    let mut t = self.tables.lock().unwrap();
    let before = t.promotions.len();
    t.promotions.retain(|p| p.promotion_id != id);
    Ok(t.promotions.len() != before)
  }
}
