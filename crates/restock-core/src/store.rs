//! The `ItemStore` trait.
//!
//! The trait is implemented by storage backends (e.g. `restock-store-sqlite`).
//! Higher layers (`restock-api`) depend on this abstraction, not on any
//! concrete backend.

use std::future::Future;

use uuid::Uuid;

use crate::item::{Item, NewItem, PurchaseEvent};

/// Abstraction over a Restock item store backend.
///
/// Ledgers are append-only: there is no operation that edits or removes a
/// recorded event. Appending an event is expected to be atomic in the
/// backend; concurrent appends to the same item are serialised there, not
/// in the core.
///
/// All methods return `Send` futures so the trait can be used in
/// multi-threaded async runtimes (e.g. tokio with `axum`).
pub trait ItemStore: Send + Sync {
  type Error: std::error::Error + Send + Sync + 'static;

  /// Look up the item with this `(owner_id, name)` pair, if any.
  /// Names are matched case-sensitively.
  fn find_item<'a>(
    &'a self,
    owner_id: Uuid,
    name: &'a str,
  ) -> impl Future<Output = Result<Option<Item>, Self::Error>> + Send + 'a;

  /// Create and persist a new item, assigning its id and creation timestamp.
  ///
  /// Returns an error if the `(owner_id, name)` pair is already taken, so
  /// the one-item-per-name invariant holds even under racing inserts.
  fn insert_item(
    &self,
    input: NewItem,
  ) -> impl Future<Output = Result<Item, Self::Error>> + Send + '_;

  /// Atomically append one event to an item's ledger.
  /// Returns an error if the item does not exist.
  fn append_event(
    &self,
    item_id: Uuid,
    event: PurchaseEvent,
  ) -> impl Future<Output = Result<(), Self::Error>> + Send + '_;

  /// List all items belonging to `owner_id`, with their full ledgers in
  /// insertion order.
  fn list_items(
    &self,
    owner_id: Uuid,
  ) -> impl Future<Output = Result<Vec<Item>, Self::Error>> + Send + '_;
}
