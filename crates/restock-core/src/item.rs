//! Item — a tracked grocery item and its purchase ledger.
//!
//! The ledger is append-only: events are never edited or removed, only
//! appended, and are not guaranteed to arrive in chronological order (a
//! caller may report a past date). Consumers sort before use.

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// One entry in an item's purchase ledger.
///
/// `purchased` is always true in current flows; the field exists so future
/// non-purchase events (e.g. "skipped this week") can share the ledger.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PurchaseEvent {
  /// Timezone-naive calendar time; normalised at the API boundary
  /// (see [`crate::time`]) before storage or comparison.
  pub date:      NaiveDateTime,
  pub purchased: bool,
}

impl PurchaseEvent {
  /// A confirmed purchase on `date`.
  pub fn purchase(date: NaiveDateTime) -> Self {
    Self { date, purchased: true }
  }
}

/// A tracked grocery item owned by one user.
///
/// At most one item exists per `(owner_id, name)` pair; names are matched
/// case-sensitively ("Milk" and "milk" are distinct items).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Item {
  pub item_id:    Uuid,
  pub owner_id:   Uuid,
  pub name:       String,
  /// Server-assigned timestamp; never changes after creation.
  pub created_at: NaiveDateTime,
  /// Events in insertion order, not necessarily chronological order.
  pub history:    Vec<PurchaseEvent>,
}

/// Input to [`crate::store::ItemStore::insert_item`].
/// `item_id` and `created_at` are always assigned by the store.
#[derive(Debug, Clone)]
pub struct NewItem {
  pub owner_id: Uuid,
  pub name:     String,
  pub history:  Vec<PurchaseEvent>,
}

impl NewItem {
  /// An item tracked before any purchase has been recorded.
  pub fn empty(owner_id: Uuid, name: impl Into<String>) -> Self {
    Self { owner_id, name: name.into(), history: Vec::new() }
  }
}
