//! JSON REST API for the product catalog.
//!
//! Exposes an axum [`Router`] backed by any [`catalog_core::store::CatalogStore`].
//! Auth, TLS, and transport concerns are the caller's responsibility.
//!
//! # Mounting
//!
//! ```rust,ignore
//! .nest("/api", catalog_api::api_router(store.clone()))
//! ```

pub mod categories;
pub mod checkout;
pub mod error;
pub mod products;
pub mod promotions;

use std::sync::Arc;

use axum::{
  Router,
  routing::{get, patch, post},
};
use catalog_core::store::CatalogStore;

pub use error::ApiError;

/// Build a fully-materialised API router for `store`.
///
/// The returned `Router<()>` can be nested into any parent router regardless
/// of its own state type.
pub fn api_router<S>(store: Arc<S>) -> Router<()>
where
  S: CatalogStore + 'static,
{
  Router::new()
    // Products
    .route("/products", get(products::list::<S>).post(products::create::<S>))
    .route("/products/by-ids", post(products::by_ids::<S>))
    .route(
      "/products/{id}",
      get(products::get_one::<S>)
        .put(products::update::<S>)
        .delete(products::delete::<S>),
    )
    .route("/products/{id}/price", patch(products::set_price::<S>))
    .route("/products/{id}/stock", patch(products::adjust_stock::<S>))
    .route("/products/{id}/checkout-price", get(checkout::line::<S>))
    // Checkout
    .route("/checkout/price", post(checkout::cart::<S>))
    // Categories
    .route("/categories", get(categories::list::<S>).post(categories::create::<S>))
    .route(
      "/categories/{id}",
      get(categories::get_one::<S>).delete(categories::delete::<S>),
    )
    .route("/categories/{id}/products", get(categories::products::<S>))
    // Promotions
    .route("/promotions", get(promotions::list::<S>).post(promotions::create::<S>))
    .route("/promotions/sweep", post(promotions::run_sweep::<S>))
    .route(
      "/promotions/{id}",
      get(promotions::get_one::<S>)
        .put(promotions::update::<S>)
        .delete(promotions::delete::<S>),
    )
    .with_state(store)
}
