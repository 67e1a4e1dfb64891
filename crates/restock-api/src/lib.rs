//! JSON REST API for Restock.
//!
//! Exposes an axum [`Router`] backed by any [`restock_core::store::ItemStore`].
//! Auth, TLS, and transport concerns are the caller's responsibility; the
//! owner is an explicit path parameter, never ambient request state.
//!
//! # Mounting
//!
//! ```rust,ignore
//! .merge(restock_api::api_router(store.clone()))
//! ```

pub mod error;
pub mod forecast;
pub mod items;
pub mod ledger;

use std::sync::Arc;

use axum::{
  Router,
  routing::{get, post},
};
use restock_core::store::ItemStore;

pub use error::ApiError;

/// Build a fully-materialised API router for `store`.
///
/// The returned `Router<()>` can be nested into any parent router regardless
/// of its own state type.
pub fn api_router<S>(store: Arc<S>) -> Router<()>
where
  S: ItemStore + Clone + Send + Sync + 'static,
  S::Error: std::error::Error + Send + Sync + 'static,
{
  Router::new()
    // Items
    .route(
      "/owners/{owner_id}/items",
      get(items::list::<S>).post(items::create::<S>),
    )
    // Ledger writes — both funnel into the same core operation
    .route("/owners/{owner_id}/items/weekly", post(ledger::submit_weekly::<S>))
    .route("/owners/{owner_id}/items/confirm", post(ledger::confirm::<S>))
    // Forecast
    .route("/owners/{owner_id}/autogenerate", get(forecast::autogenerate::<S>))
    .with_state(store)
}

// ─── Integration tests ────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
  use axum::{
    body::Body,
    http::{Request, StatusCode, header},
  };
  use restock_store_sqlite::SqliteStore;
  use serde_json::{Value, json};
  use tower::ServiceExt as _;
  use uuid::Uuid;

  use super::*;

  async fn app() -> Router {
    let store = SqliteStore::open_in_memory().await.unwrap();
    api_router(Arc::new(store))
  }

  async fn send(
    app: &Router,
    method: &str,
    uri: &str,
    body: Option<Value>,
  ) -> (StatusCode, Value) {
    let builder = Request::builder().method(method).uri(uri);
    let req = match body {
      Some(v) => builder
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(v.to_string()))
        .unwrap(),
      None => builder.body(Body::empty()).unwrap(),
    };
    let resp = app.clone().oneshot(req).await.unwrap();
    let status = resp.status();
    let bytes = axum::body::to_bytes(resp.into_body(), usize::MAX)
      .await
      .unwrap();
    let value = if bytes.is_empty() {
      Value::Null
    } else {
      serde_json::from_slice(&bytes).unwrap()
    };
    (status, value)
  }

  // ── Items ───────────────────────────────────────────────────────────────────

  #[tokio::test]
  async fn create_then_list_items() {
    let app = app().await;
    let owner = Uuid::new_v4();

    let (status, body) = send(
      &app,
      "POST",
      &format!("/owners/{owner}/items"),
      Some(json!({ "name": "Milk" })),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(body["name"], "Milk");
    assert_eq!(body["history"], json!([]));

    let (status, body) =
      send(&app, "GET", &format!("/owners/{owner}/items"), None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body.as_array().unwrap().len(), 1);
  }

  #[tokio::test]
  async fn create_duplicate_returns_409() {
    let app = app().await;
    let owner = Uuid::new_v4();
    let uri = format!("/owners/{owner}/items");

    let (status, _) = send(&app, "POST", &uri, Some(json!({ "name": "Milk" }))).await;
    assert_eq!(status, StatusCode::CREATED);
    let (status, body) = send(&app, "POST", &uri, Some(json!({ "name": "Milk" }))).await;
    assert_eq!(status, StatusCode::CONFLICT);
    assert!(body["error"].as_str().unwrap().contains("Milk"));
  }

  #[tokio::test]
  async fn create_empty_name_returns_400() {
    let app = app().await;
    let owner = Uuid::new_v4();
    let (status, _) = send(
      &app,
      "POST",
      &format!("/owners/{owner}/items"),
      Some(json!({ "name": "" })),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
  }

  #[tokio::test]
  async fn items_are_scoped_per_owner() {
    let app = app().await;
    let alice = Uuid::new_v4();
    let bob = Uuid::new_v4();

    send(
      &app,
      "POST",
      &format!("/owners/{alice}/items/weekly"),
      Some(json!({ "date": "2024-01-01", "items": [{ "name": "Milk" }] })),
    )
    .await;

    let (status, body) = send(&app, "GET", &format!("/owners/{bob}/items"), None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!([]));
  }

  // ── Weekly submission → forecast ────────────────────────────────────────────

  #[tokio::test]
  async fn weekly_submissions_then_autogenerate() {
    let app = app().await;
    let owner = Uuid::new_v4();
    let weekly = format!("/owners/{owner}/items/weekly");

    for date in ["2024-01-01", "2024-01-11", "2024-01-21"] {
      let (status, _) = send(
        &app,
        "POST",
        &weekly,
        Some(json!({ "date": date, "items": [{ "name": "Milk" }] })),
      )
      .await;
      assert_eq!(status, StatusCode::OK);
    }

    // gaps = [10, 10] → cadence 10; 9 days elapsed is not due yet.
    let (status, body) = send(
      &app,
      "GET",
      &format!("/owners/{owner}/autogenerate?date=2024-01-30"),
      None,
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["generated_list"], json!([]));

    // Exactly on cadence counts as due.
    let (_, body) = send(
      &app,
      "GET",
      &format!("/owners/{owner}/autogenerate?date=2024-01-31"),
      None,
    )
    .await;
    assert_eq!(body["generated_list"], json!(["Milk"]));
  }

  #[tokio::test]
  async fn confirm_funnels_through_the_same_ledger() {
    let app = app().await;
    let owner = Uuid::new_v4();
    let confirm = format!("/owners/{owner}/items/confirm");

    // Confirming an unknown name creates the item, same as a weekly submit.
    let (status, _) = send(
      &app,
      "POST",
      &confirm,
      Some(json!({ "date": "2024-01-01", "items": ["Eggs"] })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    let (status, _) = send(
      &app,
      "POST",
      &confirm,
      Some(json!({ "date": "2024-01-08", "items": ["Eggs"] })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);

    let (_, body) = send(&app, "GET", &format!("/owners/{owner}/items"), None).await;
    let items = body.as_array().unwrap();
    assert_eq!(items.len(), 1, "no duplicate item: {items:?}");
    assert_eq!(items[0]["history"].as_array().unwrap().len(), 2);

    // gap = 7 → due exactly 7 days after the last purchase.
    let (_, body) = send(
      &app,
      "GET",
      &format!("/owners/{owner}/autogenerate?date=2024-01-15"),
      None,
    )
    .await;
    assert_eq!(body["generated_list"], json!(["Eggs"]));
  }

  #[tokio::test]
  async fn item_with_no_purchases_is_never_due() {
    let app = app().await;
    let owner = Uuid::new_v4();

    send(
      &app,
      "POST",
      &format!("/owners/{owner}/items"),
      Some(json!({ "name": "Caviar" })),
    )
    .await;

    let (_, body) = send(
      &app,
      "GET",
      &format!("/owners/{owner}/autogenerate?date=2099-01-01"),
      None,
    )
    .await;
    assert_eq!(body["generated_list"], json!([]));
  }

  // ── Bad dates ───────────────────────────────────────────────────────────────

  #[tokio::test]
  async fn unparsable_request_dates_return_400() {
    let app = app().await;
    let owner = Uuid::new_v4();

    let (status, _) = send(
      &app,
      "POST",
      &format!("/owners/{owner}/items/weekly"),
      Some(json!({ "date": "next tuesday", "items": [{ "name": "Milk" }] })),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let (status, _) = send(
      &app,
      "GET",
      &format!("/owners/{owner}/autogenerate?date=garbage"),
      None,
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
  }

  #[tokio::test]
  async fn offset_dates_are_normalised_to_wall_clock() {
    let app = app().await;
    let owner = Uuid::new_v4();

    let (status, _) = send(
      &app,
      "POST",
      &format!("/owners/{owner}/items/weekly"),
      Some(json!({
        "date": "2024-01-01T12:00:00+09:00",
        "items": [{ "name": "Milk" }]
      })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);

    let (_, body) = send(&app, "GET", &format!("/owners/{owner}/items"), None).await;
    let date = body[0]["history"][0]["date"].as_str().unwrap();
    assert!(date.starts_with("2024-01-01T12:00:00"), "got {date}");
  }
}
