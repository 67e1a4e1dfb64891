//! Handlers for the two purchase-recording endpoints.
//!
//! Submitting a weekly shopping list and confirming accepted predictions are
//! the same operation over different inputs; both funnel through
//! [`restock_core::ledger::record_purchases`].

use std::sync::Arc;

use axum::{
  Json,
  extract::{Path, State},
};
use restock_core::{ledger, store::ItemStore, time};
use serde::Deserialize;
use serde_json::{Value, json};
use uuid::Uuid;

use crate::error::ApiError;

/// Parse an optional caller-supplied date, 400 on garbage.
fn parse_date(date: Option<&str>) -> Result<Option<chrono::NaiveDateTime>, ApiError> {
  date
    .map(|s| {
      time::normalize_timestamp(s)
        .map_err(|e| ApiError::BadRequest(e.to_string()))
    })
    .transpose()
}

// ─── Weekly submission ────────────────────────────────────────────────────────

#[derive(Debug, Deserialize)]
pub struct WeeklyItem {
  pub name: String,
}

#[derive(Debug, Deserialize)]
pub struct WeeklyBody {
  /// ISO 8601; omitted means now. Any offset is stripped.
  pub date:  Option<String>,
  pub items: Vec<WeeklyItem>,
}

/// `POST /owners/{owner_id}/items/weekly`
/// Body: `{"date":"2024-01-05","items":[{"name":"Milk"},...]}`
pub async fn submit_weekly<S>(
  State(store): State<Arc<S>>,
  Path(owner_id): Path<Uuid>,
  Json(body): Json<WeeklyBody>,
) -> Result<Json<Value>, ApiError>
where
  S: ItemStore,
  S::Error: std::error::Error + Send + Sync + 'static,
{
  let date = parse_date(body.date.as_deref())?;
  let names = body.items.into_iter().map(|i| i.name);

  ledger::record_purchases(&*store, owner_id, names, date)
    .await
    .map_err(|e| ApiError::Store(Box::new(e)))?;
  Ok(Json(json!({ "message": "weekly list submitted" })))
}

// ─── Confirmation ─────────────────────────────────────────────────────────────

#[derive(Debug, Deserialize)]
pub struct ConfirmBody {
  /// ISO 8601; omitted means now. Any offset is stripped.
  pub date:  Option<String>,
  pub items: Vec<String>,
}

/// `POST /owners/{owner_id}/items/confirm`
/// Body: `{"date":"2024-01-05","items":["Milk","Eggs"]}`
pub async fn confirm<S>(
  State(store): State<Arc<S>>,
  Path(owner_id): Path<Uuid>,
  Json(body): Json<ConfirmBody>,
) -> Result<Json<Value>, ApiError>
where
  S: ItemStore,
  S::Error: std::error::Error + Send + Sync + 'static,
{
  let date = parse_date(body.date.as_deref())?;

  ledger::record_purchases(&*store, owner_id, body.items, date)
    .await
    .map_err(|e| ApiError::Store(Box::new(e)))?;
  Ok(Json(json!({ "message": "purchases confirmed" })))
}
