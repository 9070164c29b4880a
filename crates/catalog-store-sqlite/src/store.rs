//! [`SqliteStore`], the SQLite implementation of [`CatalogStore`].

use std::path::Path;

use chrono::Utc;
use rusqlite::OptionalExtension as _;
use tracing::debug;
use uuid::Uuid;

use catalog_core::{
  category::{Category, NewCategory},
  product::{NewProduct, Product},
  promotion::{NewPromotion, Promotion},
  store::CatalogStore,
};

use crate::{
  Error, Result,
  encode::{
    PRODUCT_COLUMNS, PROMOTION_COLUMNS, RawCategory, RawProduct, RawPromotion,
    encode_date, encode_decimal, encode_dt, encode_uuid,
  },
  schema::SCHEMA,
};

// ─── Store ───────────────────────────────────────────────────────────────────

/// A product catalog backed by a single SQLite file.
///
/// Cloning is cheap; the inner connection is reference-counted.
#[derive(Clone)]
pub struct SqliteStore {
  conn: tokio_rusqlite::Connection,
}

impl SqliteStore {
  /// Open (or create) a store at `path` and run schema initialisation.
  pub async fn open(path: impl AsRef<Path>) -> Result<Self> {
    let conn = tokio_rusqlite::Connection::open(path).await?;
    let store = Self { conn };
    store.init_schema().await?;
    Ok(store)
  }

  /// Open an in-memory store, mostly for tests.
  pub async fn open_in_memory() -> Result<Self> {
    let conn = tokio_rusqlite::Connection::open_in_memory().await?;
    let store = Self { conn };
    store.init_schema().await?;
    Ok(store)
  }

  async fn init_schema(&self) -> Result<()> {
    self
      .conn
      .call(|conn| {
        conn.execute_batch(SCHEMA)?;
        Ok(())
      })
      .await?;
    Ok(())
  }

  /// Run a product query with positional text parameters.
  async fn query_products(&self, sql: String, params: Vec<String>) -> Result<Vec<Product>> {
    let raws: Vec<RawProduct> = self
      .conn
      .call(move |conn| {
        let mut stmt = conn.prepare(&sql)?;
        let rows = stmt
          .query_map(rusqlite::params_from_iter(params.iter()), RawProduct::from_row)?
          .collect::<rusqlite::Result<Vec<_>>>()?;
        Ok(rows)
      })
      .await?;

    raws.into_iter().map(RawProduct::into_product).collect()
  }

  async fn query_promotions(
    &self,
    sql: String,
    params: Vec<String>,
  ) -> Result<Vec<Promotion>> {
    let raws: Vec<RawPromotion> = self
      .conn
      .call(move |conn| {
        let mut stmt = conn.prepare(&sql)?;
        let rows = stmt
          .query_map(rusqlite::params_from_iter(params.iter()), RawPromotion::from_row)?
          .collect::<rusqlite::Result<Vec<_>>>()?;
        Ok(rows)
      })
      .await?;

    raws.into_iter().map(RawPromotion::into_promotion).collect()
  }

  /// Delete a single row by primary key. Returns whether a row was removed.
  async fn delete_by_id(&self, sql: &'static str, id: Uuid) -> Result<bool> {
    let id_str = encode_uuid(id);
    let changed = self
      .conn
      .call(move |conn| Ok(conn.execute(sql, rusqlite::params![id_str])?))
      .await?;
    Ok(changed > 0)
  }
}

// ─── CatalogStore impl ───────────────────────────────────────────────────────

impl CatalogStore for SqliteStore {
  type Error = Error;

  // ── Categories ────────────────────────────────────────────────────────────

  async fn add_category(&self, input: NewCategory) -> Result<Category> {
    let category = Category { category_id: Uuid::new_v4(), name: input.name };

    let id_str = encode_uuid(category.category_id);
    let name   = category.name.clone();

    self
      .conn
      .call(move |conn| {
        conn.execute(
          "INSERT INTO categories (category_id, name) VALUES (?1, ?2)",
          rusqlite::params![id_str, name],
        )?;
        Ok(())
      })
      .await?;

    Ok(category)
  }

  async fn get_category(&self, id: Uuid) -> Result<Option<Category>> {
    let id_str = encode_uuid(id);

    let raw: Option<RawCategory> = self
      .conn
      .call(move |conn| {
        Ok(
          conn
            .query_row(
              "SELECT category_id, name FROM categories WHERE category_id = ?1",
              rusqlite::params![id_str],
              RawCategory::from_row,
            )
            .optional()?,
        )
      })
      .await?;

    raw.map(RawCategory::into_category).transpose()
  }

  async fn list_categories(&self) -> Result<Vec<Category>> {
    let raws: Vec<RawCategory> = self
      .conn
      .call(|conn| {
        let mut stmt =
          conn.prepare("SELECT category_id, name FROM categories ORDER BY name, rowid")?;
        let rows = stmt
          .query_map([], RawCategory::from_row)?
          .collect::<rusqlite::Result<Vec<_>>>()?;
        Ok(rows)
      })
      .await?;

    raws.into_iter().map(RawCategory::into_category).collect()
  }

  async fn delete_category(&self, id: Uuid) -> Result<bool> {
    self
      .delete_by_id("DELETE FROM categories WHERE category_id = ?1", id)
      .await
  }

  // ── Products ──────────────────────────────────────────────────────────────

  async fn add_product(&self, input: NewProduct) -> Result<Product> {
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

    let id_str       = encode_uuid(product.product_id);
    let name         = product.name.clone();
    let description  = product.description.clone();
    let price_str    = encode_decimal(product.price);
    let category_str = encode_uuid(product.category_id);
    let weight_str   = encode_decimal(product.weight);
    let stock        = product.current_stock;
    let min_stock    = product.min_stock;

    self
      .conn
      .call(move |conn| {
        conn.execute(
          "INSERT INTO products (
             product_id, name, description, price, category_id,
             weight, current_stock, min_stock
           ) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8)",
          rusqlite::params![
            id_str,
            name,
            description,
            price_str,
            category_str,
            weight_str,
            stock,
            min_stock,
          ],
        )?;
        Ok(())
      })
      .await?;

    Ok(product)
  }

  async fn get_product(&self, id: Uuid) -> Result<Option<Product>> {
    let sql = format!("SELECT {PRODUCT_COLUMNS} FROM products WHERE product_id = ?1");
    let mut found = self.query_products(sql, vec![encode_uuid(id)]).await?;
    Ok(found.pop())
  }

  async fn list_products(&self) -> Result<Vec<Product>> {
    let sql = format!("SELECT {PRODUCT_COLUMNS} FROM products ORDER BY name, rowid");
    self.query_products(sql, Vec::new()).await
  }

  async fn products_by_ids(&self, ids: &[Uuid]) -> Result<Vec<Product>> {
    if ids.is_empty() {
      return Ok(Vec::new());
    }
    let placeholders = vec!["?"; ids.len()].join(", ");
    let sql = format!(
      "SELECT {PRODUCT_COLUMNS} FROM products WHERE product_id IN ({placeholders})"
    );
    let params = ids.iter().copied().map(encode_uuid).collect();
    self.query_products(sql, params).await
  }

  async fn products_in_category(&self, category_id: Uuid) -> Result<Vec<Product>> {
    let sql = format!(
      "SELECT {PRODUCT_COLUMNS} FROM products WHERE category_id = ?1 ORDER BY name, rowid"
    );
    self.query_products(sql, vec![encode_uuid(category_id)]).await
  }

  async fn products_in_category_with_prefix(
    &self,
    category_id: Uuid,
    prefix: &str,
  ) -> Result<Vec<Product>> {
    // substr keeps the match case-sensitive, unlike LIKE.
    let sql = format!(
      "SELECT {PRODUCT_COLUMNS} FROM products
       WHERE category_id = ?1 AND substr(name, 1, length(?2)) = ?2
       ORDER BY name, rowid"
    );
    self
      .query_products(sql, vec![encode_uuid(category_id), prefix.to_owned()])
      .await
  }

  async fn save_product(&self, product: Product) -> Result<Product> {
    let id_str       = encode_uuid(product.product_id);
    let name         = product.name.clone();
    let description  = product.description.clone();
    let price_str    = encode_decimal(product.price);
    let category_str = encode_uuid(product.category_id);
    let weight_str   = encode_decimal(product.weight);
    let stock        = product.current_stock;
    let min_stock    = product.min_stock;

    let changed = self
      .conn
      .call(move |conn| {
        Ok(conn.execute(
          "UPDATE products SET
             name = ?2, description = ?3, price = ?4, category_id = ?5,
             weight = ?6, current_stock = ?7, min_stock = ?8
           WHERE product_id = ?1",
          rusqlite::params![
            id_str,
            name,
            description,
            price_str,
            category_str,
            weight_str,
            stock,
            min_stock,
          ],
        )?)
      })
      .await?;

    if changed == 0 {
      return Err(Error::ProductNotFound(product.product_id));
    }
    debug!(product_id = %product.product_id, "product saved");
    Ok(product)
  }

  async fn delete_product(&self, id: Uuid) -> Result<bool> {
    self
      .delete_by_id("DELETE FROM products WHERE product_id = ?1", id)
      .await
  }

  // ── Promotions ────────────────────────────────────────────────────────────

  async fn add_promotion(&self, input: NewPromotion, is_active: bool) -> Result<Promotion> {
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

    let id_str       = encode_uuid(promotion.promotion_id);
    let category_str = encode_uuid(promotion.category_id);
    let discount_str = encode_decimal(promotion.discount);
    let kind_str     = promotion.kind.as_str().to_owned();
    let threshold    = promotion.volume_threshold;
    let start_str    = encode_date(promotion.start_date);
    let end_str      = encode_date(promotion.end_date);
    let created_str  = encode_dt(promotion.created_at);

    self
      .conn
      .call(move |conn| {
        conn.execute(
          "INSERT INTO promotions (
             promotion_id, category_id, discount, kind, volume_threshold,
             start_date, end_date, is_active, created_at
           ) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9)",
          rusqlite::params![
            id_str,
            category_str,
            discount_str,
            kind_str,
            threshold,
            start_str,
            end_str,
            is_active,
            created_str,
          ],
        )?;
        Ok(())
      })
      .await?;

    Ok(promotion)
  }

  async fn get_promotion(&self, id: Uuid) -> Result<Option<Promotion>> {
    let sql =
      format!("SELECT {PROMOTION_COLUMNS} FROM promotions WHERE promotion_id = ?1");
    let mut found = self.query_promotions(sql, vec![encode_uuid(id)]).await?;
    Ok(found.pop())
  }

  async fn list_promotions(&self) -> Result<Vec<Promotion>> {
    let sql = format!(
      "SELECT {PROMOTION_COLUMNS} FROM promotions ORDER BY created_at, rowid"
    );
    self.query_promotions(sql, Vec::new()).await
  }

  async fn promotions_in_category(&self, category_id: Uuid) -> Result<Vec<Promotion>> {
    let sql = format!(
      "SELECT {PROMOTION_COLUMNS} FROM promotions
       WHERE category_id = ?1 ORDER BY created_at, rowid"
    );
    self
      .query_promotions(sql, vec![encode_uuid(category_id)])
      .await
  }

  async fn active_promotion_for_category(
    &self,
    category_id: Uuid,
  ) -> Result<Option<Promotion>> {
    let sql = format!(
      "SELECT {PROMOTION_COLUMNS} FROM promotions
       WHERE category_id = ?1 AND is_active = 1
       ORDER BY created_at DESC, rowid DESC
       LIMIT 1"
    );
    let mut found = self
      .query_promotions(sql, vec![encode_uuid(category_id)])
      .await?;
    Ok(found.pop())
  }

  async fn save_promotion(&self, promotion: Promotion) -> Result<Promotion> {
    let id_str       = encode_uuid(promotion.promotion_id);
    let category_str = encode_uuid(promotion.category_id);
    let discount_str = encode_decimal(promotion.discount);
    let kind_str     = promotion.kind.as_str().to_owned();
    let threshold    = promotion.volume_threshold;
    let start_str    = encode_date(promotion.start_date);
    let end_str      = encode_date(promotion.end_date);
    let is_active    = promotion.is_active;

    // created_at is fixed at insert time.
    let changed = self
      .conn
      .call(move |conn| {
        Ok(conn.execute(
          "UPDATE promotions SET
             category_id = ?2, discount = ?3, kind = ?4, volume_threshold = ?5,
             start_date = ?6, end_date = ?7, is_active = ?8
           WHERE promotion_id = ?1",
          rusqlite::params![
            id_str,
            category_str,
            discount_str,
            kind_str,
            threshold,
            start_str,
            end_str,
            is_active,
          ],
        )?)
      })
      .await?;

    if changed == 0 {
      return Err(Error::PromotionNotFound(promotion.promotion_id));
    }
    Ok(promotion)
  }

  async fn delete_promotion(&self, id: Uuid) -> Result<bool> {
    self
      .delete_by_id("DELETE FROM promotions WHERE promotion_id = ?1", id)
      .await
  }
}
