//! Catalog maintenance: validated create/read/update/delete for categories,
//! products and promotions, plus stock and price adjustments.
//!
//! Every function here turns a missing record into the matching not-found
//! [`Error`] variant so that callers never have to inspect `Option`s.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use tracing::{info, warn};
use uuid::Uuid;

use crate::{
  Error, Result,
  category::{Category, NewCategory},
  product::{NewProduct, Product},
  promotion::{NewPromotion, Promotion},
  store::CatalogStore,
  validate::{
    normalize_name_prefix, validate_category, validate_price, validate_product,
    validate_promotion,
  },
};

// ─── Categories ──────────────────────────────────────────────────────────────

pub async fn get_category<S: CatalogStore>(store: &S, id: Uuid) -> Result<Category> {
  store
    .get_category(id)
    .await
    .map_err(Error::store)?
    .ok_or(Error::CategoryNotFound(id))
}

pub async fn create_category<S: CatalogStore>(
  store: &S,
  input: NewCategory,
) -> Result<Category> {
  validate_category(&input)?;
  let category = store.add_category(input).await.map_err(Error::store)?;
  info!(category_id = %category.category_id, name = %category.name, "created category");
  Ok(category)
}

/// Delete a category that no product or promotion references.
pub async fn delete_category<S: CatalogStore>(store: &S, id: Uuid) -> Result<()> {
  get_category(store, id).await?;

  if !store.products_in_category(id).await.map_err(Error::store)?.is_empty() {
    return Err(Error::Conflict(format!(
      "category {id} is referenced by products"
    )));
  }
  if !store.promotions_in_category(id).await.map_err(Error::store)?.is_empty() {
    return Err(Error::Conflict(format!(
      "category {id} is referenced by promotions"
    )));
  }

  store.delete_category(id).await.map_err(Error::store)?;
  info!(category_id = %id, "deleted category");
  Ok(())
}

/// All products in a category. An empty category is reported as not found.
pub async fn category_products<S: CatalogStore>(
  store: &S,
  category_id: Uuid,
) -> Result<Vec<Product>> {
  let products = store
    .products_in_category(category_id)
    .await
    .map_err(Error::store)?;
  if products.is_empty() {
    warn!(%category_id, "no products in category");
    return Err(Error::NoMatchingProducts { category_id, prefix: None });
  }
  Ok(products)
}

/// Products in a category whose name starts with `name`, after normalising
/// `name` with [`normalize_name_prefix`].
pub async fn search_category_products<S: CatalogStore>(
  store: &S,
  category_id: Uuid,
  name: &str,
) -> Result<Vec<Product>> {
  let prefix = normalize_name_prefix(name)?;
  let products = store
    .products_in_category_with_prefix(category_id, &prefix)
    .await
    .map_err(Error::store)?;
  if products.is_empty() {
    warn!(%category_id, %prefix, "no products match prefix");
    return Err(Error::NoMatchingProducts { category_id, prefix: Some(prefix) });
  }
  Ok(products)
}

// ─── Products ────────────────────────────────────────────────────────────────

pub async fn get_product<S: CatalogStore>(store: &S, id: Uuid) -> Result<Product> {
  store
    .get_product(id)
    .await
    .map_err(Error::store)?
    .ok_or_else(|| {
      warn!(product_id = %id, "product not found");
      Error::ProductNotFound(id)
    })
}

pub async fn create_product<S: CatalogStore>(
  store: &S,
  input: NewProduct,
) -> Result<Product> {
  validate_product(&input)?;
  get_category(store, input.category_id).await?;
  let product = store.add_product(input).await.map_err(Error::store)?;
  info!(product_id = %product.product_id, name = %product.name, "created product");
  Ok(product)
}

/// Replace every editable field of an existing product.
pub async fn update_product<S: CatalogStore>(
  store: &S,
  id: Uuid,
  input: NewProduct,
) -> Result<Product> {
  validate_product(&input)?;
  let mut product = get_product(store, id).await?;
  if product.category_id != input.category_id {
    get_category(store, input.category_id).await?;
  }
  product.apply(input);
  let product = store.save_product(product).await.map_err(Error::store)?;
  info!(product_id = %id, "updated product");
  Ok(product)
}

pub async fn delete_product<S: CatalogStore>(store: &S, id: Uuid) -> Result<()> {
  if !store.delete_product(id).await.map_err(Error::store)? {
    return Err(Error::ProductNotFound(id));
  }
  info!(product_id = %id, "deleted product");
  Ok(())
}

pub async fn set_product_price<S: CatalogStore>(
  store: &S,
  id: Uuid,
  price: Decimal,
) -> Result<Product> {
  validate_price(price)?;
  let mut product = get_product(store, id).await?;
  product.price = price;
  let product = store.save_product(product).await.map_err(Error::store)?;
  info!(product_id = %id, %price, "set product price");
  Ok(product)
}

/// Add `delta` (which may be negative) to the product's current stock.
pub async fn adjust_stock<S: CatalogStore>(
  store: &S,
  id: Uuid,
  delta: i64,
) -> Result<Product> {
  let mut product = get_product(store, id).await?;
  let too_large = || Error::InvalidArgument("stock exceeds the supported maximum".into());
  let new_stock = i64::from(product.current_stock)
    .checked_add(delta)
    .ok_or_else(too_large)?;
  if new_stock < 0 {
    warn!(product_id = %id, delta, "insufficient stock");
    return Err(Error::InvalidArgument(format!(
      "insufficient stock to decrement by {}",
      delta.unsigned_abs()
    )));
  }
  product.current_stock = u32::try_from(new_stock).map_err(|_| too_large())?;
  let product = store.save_product(product).await.map_err(Error::store)?;
  info!(product_id = %id, stock = product.current_stock, "adjusted stock");
  Ok(product)
}

/// Look up products by id, in the order requested (duplicates collapsed).
/// Fails with every missing id if any is absent.
pub async fn products_by_ids<S: CatalogStore>(
  store: &S,
  ids: &[Uuid],
) -> Result<Vec<Product>> {
  let mut wanted: Vec<Uuid> = Vec::with_capacity(ids.len());
  for id in ids {
    if !wanted.contains(id) {
      wanted.push(*id);
    }
  }

  let mut found = store.products_by_ids(&wanted).await.map_err(Error::store)?;

  let missing: Vec<Uuid> = wanted
    .iter()
    .filter(|id| !found.iter().any(|p| p.product_id == **id))
    .copied()
    .collect();
  if !missing.is_empty() {
    warn!(?missing, "products not found");
    return Err(Error::ProductsNotFound(missing));
  }

  found.sort_by_key(|p| wanted.iter().position(|id| *id == p.product_id));
  Ok(found)
}

// ─── Promotions ──────────────────────────────────────────────────────────────

pub async fn get_promotion<S: CatalogStore>(store: &S, id: Uuid) -> Result<Promotion> {
  store
    .get_promotion(id)
    .await
    .map_err(Error::store)?
    .ok_or(Error::PromotionNotFound(id))
}

/// Create a promotion. Its active flag is evaluated against `today`; seasonal
/// prices are only rewritten by the next sweep.
pub async fn create_promotion<S: CatalogStore>(
  store: &S,
  input: NewPromotion,
  today: NaiveDate,
) -> Result<Promotion> {
  validate_promotion(&input)?;
  get_category(store, input.category_id).await?;
  let is_active = input.is_active_on(today);
  let promotion = store
    .add_promotion(input, is_active)
    .await
    .map_err(Error::store)?;
  info!(
    promotion_id = %promotion.promotion_id,
    kind = %promotion.kind,
    is_active,
    "created promotion"
  );
  Ok(promotion)
}

pub async fn update_promotion<S: CatalogStore>(
  store: &S,
  id: Uuid,
  input: NewPromotion,
  today: NaiveDate,
) -> Result<Promotion> {
  validate_promotion(&input)?;
  let mut promotion = get_promotion(store, id).await?;
  if promotion.category_id != input.category_id {
    get_category(store, input.category_id).await?;
  }
  promotion.apply(input);
  promotion.refresh(today);
  let promotion = store.save_promotion(promotion).await.map_err(Error::store)?;
  info!(promotion_id = %id, is_active = promotion.is_active, "updated promotion");
  Ok(promotion)
}

pub async fn delete_promotion<S: CatalogStore>(store: &S, id: Uuid) -> Result<()> {
  if !store.delete_promotion(id).await.map_err(Error::store)? {
    return Err(Error::PromotionNotFound(id));
  }
  info!(promotion_id = %id, "deleted promotion");
  Ok(())
}

/// Promotions whose stored flag is set, as of the last refresh.
pub async fn active_promotions<S: CatalogStore>(store: &S) -> Result<Vec<Promotion>> {
  let mut promotions = store.list_promotions().await.map_err(Error::store)?;
  promotions.retain(|p| p.is_active);
  Ok(promotions)
}
