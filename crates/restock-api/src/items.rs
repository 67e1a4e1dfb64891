//! Handlers for `/owners/{owner_id}/items` CRUD endpoints.
//!
//! | Method | Path | Notes |
//! |--------|------|-------|
//! | `GET`  | `/owners/{owner_id}/items` | Full ledgers included |
//! | `POST` | `/owners/{owner_id}/items` | Body: `{"name":"Milk"}`; 409 if taken |

use std::sync::Arc;

use axum::{
  Json,
  extract::{Path, State},
  http::StatusCode,
  response::IntoResponse,
};
use restock_core::{
  item::{Item, NewItem},
  store::ItemStore,
};
use serde::Deserialize;
use uuid::Uuid;

use crate::error::ApiError;

// ─── List ─────────────────────────────────────────────────────────────────────

/// `GET /owners/{owner_id}/items`
pub async fn list<S>(
  State(store): State<Arc<S>>,
  Path(owner_id): Path<Uuid>,
) -> Result<Json<Vec<Item>>, ApiError>
where
  S: ItemStore,
  S::Error: std::error::Error + Send + Sync + 'static,
{
  let items = store
    .list_items(owner_id)
    .await
    .map_err(|e| ApiError::Store(Box::new(e)))?;
  Ok(Json(items))
}

// ─── Create ───────────────────────────────────────────────────────────────────

#[derive(Debug, Deserialize)]
pub struct CreateBody {
  pub name: String,
}

/// `POST /owners/{owner_id}/items` — body: `{"name":"Milk"}`
///
/// Creates an item with an empty ledger; purchases are recorded separately
/// via the weekly or confirm endpoints.
pub async fn create<S>(
  State(store): State<Arc<S>>,
  Path(owner_id): Path<Uuid>,
  Json(body): Json<CreateBody>,
) -> Result<impl IntoResponse, ApiError>
where
  S: ItemStore,
  S::Error: std::error::Error + Send + Sync + 'static,
{
  if body.name.is_empty() {
    return Err(ApiError::BadRequest("item name must not be empty".into()));
  }

  let taken = store
    .find_item(owner_id, &body.name)
    .await
    .map_err(|e| ApiError::Store(Box::new(e)))?
    .is_some();
  if taken {
    return Err(ApiError::Conflict(format!(
      "item {:?} is already tracked",
      body.name
    )));
  }

  let item = store
    .insert_item(NewItem::empty(owner_id, body.name))
    .await
    .map_err(|e| ApiError::Store(Box::new(e)))?;
  Ok((StatusCode::CREATED, Json(item)))
}
