//! The `CatalogStore` trait.
//!
//! The trait is implemented by storage backends (e.g. `catalog-store-sqlite`).
//! The promotion engine and the HTTP layer depend on this abstraction, not on
//! any concrete backend.

use std::future::Future;

use uuid::Uuid;

use crate::{
  category::{Category, NewCategory},
  product::{NewProduct, Product},
  promotion::{NewPromotion, Promotion},
};

/// Abstraction over a catalog storage backend.
///
/// Lookups return `Ok(None)` (or an empty list) for missing records; turning
/// that into a not-found error is the caller's decision. Saves overwrite the
/// whole record (last writer wins).
///
/// All methods return `Send` futures so the trait can be used in multi-threaded
/// async runtimes (e.g. tokio with `axum`).
pub trait CatalogStore: Send + Sync {
  type Error: std::error::Error + Send + Sync + 'static;

  // ── Categories ────────────────────────────────────────────────────────

  /// Create and persist a new category with a store-assigned id.
  fn add_category(
    &self,
    input: NewCategory,
  ) -> impl Future<Output = Result<Category, Self::Error>> + Send + '_;

  fn get_category(
    &self,
    id: Uuid,
  ) -> impl Future<Output = Result<Option<Category>, Self::Error>> + Send + '_;

  fn list_categories(
    &self,
  ) -> impl Future<Output = Result<Vec<Category>, Self::Error>> + Send + '_;

  /// Delete a category. Returns `false` if it did not exist.
  fn delete_category(
    &self,
    id: Uuid,
  ) -> impl Future<Output = Result<bool, Self::Error>> + Send + '_;

  // ── Products ──────────────────────────────────────────────────────────

  /// Create and persist a new product with a store-assigned id.
  fn add_product(
    &self,
    input: NewProduct,
  ) -> impl Future<Output = Result<Product, Self::Error>> + Send + '_;

  fn get_product(
    &self,
    id: Uuid,
  ) -> impl Future<Output = Result<Option<Product>, Self::Error>> + Send + '_;

  fn list_products(
    &self,
  ) -> impl Future<Output = Result<Vec<Product>, Self::Error>> + Send + '_;

  /// Return every product whose id is in `ids`. Missing ids are skipped; the
  /// order of the result is unspecified.
  fn products_by_ids<'a>(
    &'a self,
    ids: &'a [Uuid],
  ) -> impl Future<Output = Result<Vec<Product>, Self::Error>> + Send + 'a;

  /// All products in a category (possibly empty).
  fn products_in_category(
    &self,
    category_id: Uuid,
  ) -> impl Future<Output = Result<Vec<Product>, Self::Error>> + Send + '_;

  /// Products in a category whose name starts with `prefix` (case-sensitive).
  fn products_in_category_with_prefix<'a>(
    &'a self,
    category_id: Uuid,
    prefix: &'a str,
  ) -> impl Future<Output = Result<Vec<Product>, Self::Error>> + Send + 'a;

  /// Overwrite an existing product. Errors if the product does not exist.
  fn save_product(
    &self,
    product: Product,
  ) -> impl Future<Output = Result<Product, Self::Error>> + Send + '_;

  /// Delete a product. Returns `false` if it did not exist.
  fn delete_product(
    &self,
    id: Uuid,
  ) -> impl Future<Output = Result<bool, Self::Error>> + Send + '_;

  // ── Promotions ────────────────────────────────────────────────────────

  /// Create and persist a new promotion. The id and `created_at` are set by
  /// the store; `is_active` is the caller's freshly evaluated flag.
  fn add_promotion(
    &self,
    input: NewPromotion,
    is_active: bool,
  ) -> impl Future<Output = Result<Promotion, Self::Error>> + Send + '_;

  fn get_promotion(
    &self,
    id: Uuid,
  ) -> impl Future<Output = Result<Option<Promotion>, Self::Error>> + Send + '_;

  fn list_promotions(
    &self,
  ) -> impl Future<Output = Result<Vec<Promotion>, Self::Error>> + Send + '_;

  fn promotions_in_category(
    &self,
    category_id: Uuid,
  ) -> impl Future<Output = Result<Vec<Promotion>, Self::Error>> + Send + '_;

  /// "The" active promotion for a category: among promotions whose stored
  /// `is_active` flag is set, the one created most recently. Returns `None`
  /// when the category has no active promotion.
  fn active_promotion_for_category(
    &self,
    category_id: Uuid,
  ) -> impl Future<Output = Result<Option<Promotion>, Self::Error>> + Send + '_;

  /// Overwrite an existing promotion. Errors if the promotion does not exist.
  fn save_promotion(
    &self,
    promotion: Promotion,
  ) -> impl Future<Output = Result<Promotion, Self::Error>> + Send + '_;

  /// Delete a promotion. Returns `false` if it did not exist.
  fn delete_promotion(
    &self,
    id: Uuid,
  ) -> impl Future<Output = Result<bool, Self::Error>> + Send + '_;
}
