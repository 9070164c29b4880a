//! Handlers for checkout pricing. Both endpoints are read-only.

use std::sync::Arc;

use axum::{
  Json,
  extract::{Path, Query, State},
};
use catalog_core::{
  checkout::{self, CartLine, PricedLine},
  store::CatalogStore,
};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::error::ApiError;

#[derive(Debug, Deserialize)]
pub struct LineParams {
  pub quantity: u32,
}

#[derive(Debug, Serialize)]
#[cfg_attr(test, derive(Deserialize))]
pub struct LinePrice {
  pub product_id: Uuid,
  pub quantity:   u32,
  pub unit_price: Decimal,
}

/// `GET /products/:id/checkout-price?quantity=<n>`
pub async fn line<S: CatalogStore>(
  State(store): State<Arc<S>>,
  Path(product_id): Path<Uuid>,
  Query(params): Query<LineParams>,
) -> Result<Json<LinePrice>, ApiError> {
  let unit_price = checkout::price_line(store.as_ref(), product_id, params.quantity).await?;
  Ok(Json(LinePrice { product_id, quantity: params.quantity, unit_price }))
}

/// `POST /checkout/price`, body: `[{"product_id":"…","quantity":2}, …]`
pub async fn cart<S: CatalogStore>(
  State(store): State<Arc<S>>,
  Json(lines): Json<Vec<CartLine>>,
) -> Result<Json<Vec<PricedLine>>, ApiError> {
  Ok(Json(checkout::price_cart(store.as_ref(), &lines).await?))
}
