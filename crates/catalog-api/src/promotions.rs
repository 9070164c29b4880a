//! Handlers for `/promotions` endpoints.
//!
//! `is_active` is never read from request bodies. Create and update evaluate
//! it against the server's local date; `POST /promotions/sweep` refreshes it
//! for every promotion and applies active seasonal discounts.

use std::sync::Arc;

use axum::{
  Json,
  extract::{Path, Query, State},
  http::StatusCode,
  response::IntoResponse,
};
use catalog_core::{
  catalog,
  promotion::{NewPromotion, Promotion},
  store::CatalogStore,
  sweep,
};
use chrono::{Local, NaiveDate};
use serde::Deserialize;
use uuid::Uuid;

use crate::error::ApiError;

fn today() -> NaiveDate { Local::now().date_naive() }

#[derive(Debug, Deserialize)]
pub struct ListParams {
  /// Only promotions whose flag was set by the last refresh.
  #[serde(default)]
  pub active: bool,
}

/// `GET /promotions[?active=true]`
pub async fn list<S: CatalogStore>(
  State(store): State<Arc<S>>,
  Query(params): Query<ListParams>,
) -> Result<Json<Vec<Promotion>>, ApiError> {
  let promotions = if params.active {
    catalog::active_promotions(store.as_ref()).await?
  } else {
    store
      .list_promotions()
      .await
      .map_err(|e| ApiError::Store(Box::new(e)))?
  };
  Ok(Json(promotions))
}

/// `POST /promotions`
pub async fn create<S: CatalogStore>(
  State(store): State<Arc<S>>,
  Json(body): Json<NewPromotion>,
) -> Result<impl IntoResponse, ApiError> {
  let promotion = catalog::create_promotion(store.as_ref(), body, today()).await?;
  Ok((StatusCode::CREATED, Json(promotion)))
}

/// `GET /promotions/:id`
pub async fn get_one<S: CatalogStore>(
  State(store): State<Arc<S>>,
  Path(id): Path<Uuid>,
) -> Result<Json<Promotion>, ApiError> {
  Ok(Json(catalog::get_promotion(store.as_ref(), id).await?))
}

/// `PUT /promotions/:id`
pub async fn update<S: CatalogStore>(
  State(store): State<Arc<S>>,
  Path(id): Path<Uuid>,
  Json(body): Json<NewPromotion>,
) -> Result<Json<Promotion>, ApiError> {
  Ok(Json(catalog::update_promotion(store.as_ref(), id, body, today()).await?))
}

/// `DELETE /promotions/:id`
pub async fn delete<S: CatalogStore>(
  State(store): State<Arc<S>>,
  Path(id): Path<Uuid>,
) -> Result<StatusCode, ApiError> {
  catalog::delete_promotion(store.as_ref(), id).await?;
  Ok(StatusCode::NO_CONTENT)
}

/// `POST /promotions/sweep`. Returns the promotions active after the sweep.
pub async fn run_sweep<S: CatalogStore>(
  State(store): State<Arc<S>>,
) -> Result<Json<Vec<Promotion>>, ApiError> {
  Ok(Json(sweep::sweep(store.as_ref(), today()).await?))
}
