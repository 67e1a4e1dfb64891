//! Handler for `GET /owners/{owner_id}/autogenerate`.

use std::sync::Arc;

use axum::{
  Json,
  extract::{Path, Query, State},
};
use restock_core::{forecast, store::ItemStore, time};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::error::ApiError;

#[derive(Debug, Deserialize, Default)]
pub struct ForecastParams {
  /// Reference date (ISO 8601); omitted means now. Any offset is stripped.
  pub date: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct ForecastResponse {
  /// Names of all due items, in item iteration order.
  pub generated_list: Vec<String>,
}

/// `GET /owners/{owner_id}/autogenerate[?date=2024-01-31]`
pub async fn autogenerate<S>(
  State(store): State<Arc<S>>,
  Path(owner_id): Path<Uuid>,
  Query(params): Query<ForecastParams>,
) -> Result<Json<ForecastResponse>, ApiError>
where
  S: ItemStore,
  S::Error: std::error::Error + Send + Sync + 'static,
{
  let as_of = match params.date.as_deref() {
    Some(s) => {
      time::normalize_timestamp(s).map_err(|e| ApiError::BadRequest(e.to_string()))?
    }
    None => time::now_naive(),
  };

  let generated_list = forecast::forecast(&*store, owner_id, as_of)
    .await
    .map_err(|e| ApiError::Store(Box::new(e)))?;
  Ok(Json(ForecastResponse { generated_list }))
}
