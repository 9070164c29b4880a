//! Handlers for `/categories` endpoints.
//!
//! Deleting a category that still has products or promotions is a `409`.
//! `GET /categories/:id/products` reports an empty result as `404`.

use std::sync::Arc;

use axum::{
  Json,
  extract::{Path, Query, State},
  http::StatusCode,
  response::IntoResponse,
};
use catalog_core::{
  catalog,
  category::{Category, NewCategory},
  product::Product,
  store::CatalogStore,
};
use serde::Deserialize;
use uuid::Uuid;

use crate::error::ApiError;

/// `GET /categories`
pub async fn list<S: CatalogStore>(
  State(store): State<Arc<S>>,
) -> Result<Json<Vec<Category>>, ApiError> {
  let categories = store
    .list_categories()
    .await
    .map_err(|e| ApiError::Store(Box::new(e)))?;
  Ok(Json(categories))
}

/// `POST /categories`, body: `{"name":"Garden"}`
pub async fn create<S: CatalogStore>(
  State(store): State<Arc<S>>,
  Json(body): Json<NewCategory>,
) -> Result<impl IntoResponse, ApiError> {
  let category = catalog::create_category(store.as_ref(), body).await?;
  Ok((StatusCode::CREATED, Json(category)))
}

/// `GET /categories/:id`
pub async fn get_one<S: CatalogStore>(
  State(store): State<Arc<S>>,
  Path(id): Path<Uuid>,
) -> Result<Json<Category>, ApiError> {
  Ok(Json(catalog::get_category(store.as_ref(), id).await?))
}

/// `DELETE /categories/:id`
pub async fn delete<S: CatalogStore>(
  State(store): State<Arc<S>>,
  Path(id): Path<Uuid>,
) -> Result<StatusCode, ApiError> {
  catalog::delete_category(store.as_ref(), id).await?;
  Ok(StatusCode::NO_CONTENT)
}

#[derive(Debug, Deserialize)]
pub struct ProductsParams {
  /// Name prefix; matched after capitalisation is normalised.
  pub name: Option<String>,
}

/// `GET /categories/:id/products[?name=<prefix>]`
pub async fn products<S: CatalogStore>(
  State(store): State<Arc<S>>,
  Path(id): Path<Uuid>,
  Query(params): Query<ProductsParams>,
) -> Result<Json<Vec<Product>>, ApiError> {
  let products = match params.name {
    Some(name) => catalog::search_category_products(store.as_ref(), id, &name).await?,
    None => catalog::category_products(store.as_ref(), id).await?,
  };
  Ok(Json(products))
}
