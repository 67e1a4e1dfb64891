//! Encoding and decoding helpers between Rust domain types and the plain-text
//! representations stored in SQLite columns.
//!
//! All timestamps are stored as naive ISO 8601 strings (no offset — they are
//! normalised before they reach this crate). UUIDs are stored as hyphenated
//! lowercase strings.

use chrono::NaiveDateTime;
use restock_core::item::{Item, PurchaseEvent};
use tracing::warn;
use uuid::Uuid;

use crate::{Error, Result};

// ─── Uuid ─────────────────────────────────────────────────────────────────────

pub fn encode_uuid(id: Uuid) -> String { id.hyphenated().to_string() }

pub fn decode_uuid(s: &str) -> Result<Uuid> { Ok(Uuid::parse_str(s)?) }

// ─── NaiveDateTime ───────────────────────────────────────────────────────────

pub fn encode_dt(dt: NaiveDateTime) -> String {
  dt.format("%Y-%m-%dT%H:%M:%S%.f").to_string()
}

pub fn decode_dt(s: &str) -> Result<NaiveDateTime> {
  s.parse::<NaiveDateTime>()
    .map_err(|e| Error::DateParse(format!("{s:?}: {e}")))
}

// ─── Row types ───────────────────────────────────────────────────────────────

/// Raw strings read directly from a `purchase_events` row.
pub struct RawEvent {
  pub date:      String,
  pub purchased: bool,
}

impl RawEvent {
  /// Decode one ledger row. An event whose stored date no longer parses is
  /// dropped with a warning rather than failing the item: one malformed
  /// event must not suppress the rest of the ledger.
  pub fn into_event(self, item_id: &str) -> Option<PurchaseEvent> {
    match decode_dt(&self.date) {
      Ok(date) => Some(PurchaseEvent { date, purchased: self.purchased }),
      Err(_) => {
        warn!(item_id, raw = %self.date, "dropping purchase event with unparsable date");
        None
      }
    }
  }
}

/// Raw strings read directly from an `items` row.
pub struct RawItem {
  pub item_id:    String,
  pub owner_id:   String,
  pub name:       String,
  pub created_at: String,
}

impl RawItem {
  pub fn into_item(self, events: Vec<RawEvent>) -> Result<Item> {
    let history = events
      .into_iter()
      .filter_map(|e| e.into_event(&self.item_id))
      .collect();

    Ok(Item {
      item_id:    decode_uuid(&self.item_id)?,
      owner_id:   decode_uuid(&self.owner_id)?,
      name:       self.name,
      created_at: decode_dt(&self.created_at)?,
      history,
    })
  }
}
