//! Handlers for `/products` endpoints.
//!
//! | Method   | Path | Notes |
//! |----------|------|-------|
//! | `GET`    | `/products` | |
//! | `POST`   | `/products` | Body: [`NewProduct`] |
//! | `GET`    | `/products/:id` | 404 if not found |
//! | `PUT`    | `/products/:id` | Body: [`NewProduct`], replaces every field |
//! | `DELETE` | `/products/:id` | |
//! | `PATCH`  | `/products/:id/price` | Body: `{"price":"12.50"}` |
//! | `PATCH`  | `/products/:id/stock` | Body: `{"delta":-3}` |
//! | `POST`   | `/products/by-ids` | Body: `["<uuid>", ...]` |

use std::sync::Arc;

use axum::{
  Json,
  extract::{Path, State},
  http::StatusCode,
  response::IntoResponse,
};
use catalog_core::{
  catalog,
  product::{NewProduct, Product},
  store::CatalogStore,
};
use rust_decimal::Decimal;
use serde::Deserialize;
use uuid::Uuid;

use crate::error::ApiError;

/// `GET /products`
pub async fn list<S: CatalogStore>(
  State(store): State<Arc<S>>,
) -> Result<Json<Vec<Product>>, ApiError> {
  let products = store
    .list_products()
    .await
    .map_err(|e| ApiError::Store(Box::new(e)))?;
  Ok(Json(products))
}

/// `POST /products`
pub async fn create<S: CatalogStore>(
  State(store): State<Arc<S>>,
  Json(body): Json<NewProduct>,
) -> Result<impl IntoResponse, ApiError> {
  let product = catalog::create_product(store.as_ref(), body).await?;
  Ok((StatusCode::CREATED, Json(product)))
}

/// `GET /products/:id`
pub async fn get_one<S: CatalogStore>(
  State(store): State<Arc<S>>,
  Path(id): Path<Uuid>,
) -> Result<Json<Product>, ApiError> {
  Ok(Json(catalog::get_product(store.as_ref(), id).await?))
}

/// `PUT /products/:id`
pub async fn update<S: CatalogStore>(
  State(store): State<Arc<S>>,
  Path(id): Path<Uuid>,
  Json(body): Json<NewProduct>,
) -> Result<Json<Product>, ApiError> {
  Ok(Json(catalog::update_product(store.as_ref(), id, body).await?))
}

/// `DELETE /products/:id`
pub async fn delete<S: CatalogStore>(
  State(store): State<Arc<S>>,
  Path(id): Path<Uuid>,
) -> Result<StatusCode, ApiError> {
  catalog::delete_product(store.as_ref(), id).await?;
  Ok(StatusCode::NO_CONTENT)
}

#[derive(Debug, Deserialize)]
pub struct PriceBody {
  pub price: Decimal,
}

/// `PATCH /products/:id/price`
pub async fn set_price<S: CatalogStore>(
  State(store): State<Arc<S>>,
  Path(id): Path<Uuid>,
  Json(body): Json<PriceBody>,
) -> Result<Json<Product>, ApiError> {
  Ok(Json(catalog::set_product_price(store.as_ref(), id, body.price).await?))
}

#[derive(Debug, Deserialize)]
pub struct StockBody {
  pub delta: i64,
}

/// `PATCH /products/:id/stock`
pub async fn adjust_stock<S: CatalogStore>(
  State(store): State<Arc<S>>,
  Path(id): Path<Uuid>,
  Json(body): Json<StockBody>,
) -> Result<Json<Product>, ApiError> {
  Ok(Json(catalog::adjust_stock(store.as_ref(), id, body.delta).await?))
}

/// `POST /products/by-ids`
pub async fn by_ids<S: CatalogStore>(
  State(store): State<Arc<S>>,
  Json(ids): Json<Vec<Uuid>>,
) -> Result<Json<Vec<Product>>, ApiError> {
  Ok(Json(catalog::products_by_ids(store.as_ref(), &ids).await?))
}
