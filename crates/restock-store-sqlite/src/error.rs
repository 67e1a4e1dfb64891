//! Error type for `restock-store-sqlite`.

use thiserror::Error;
use uuid::Uuid;

#[derive(Debug, Error)]
pub enum Error {
  #[error("database error: {0}")]
  Database(#[from] tokio_rusqlite::Error),

  #[error("uuid parse error: {0}")]
  Uuid(#[from] uuid::Error),

  #[error("date/time parse error: {0}")]
  DateParse(String),

  /// Attempted to append an event to an item that was not found.
  #[error("item not found: {0}")]
  ItemNotFound(Uuid),

  /// The `(owner_id, name)` pair is already taken.
  #[error("item {name:?} is already tracked for owner {owner_id}")]
  DuplicateItem { owner_id: Uuid, name: String },
}

pub type Result<T, E = Error> = std::result::Result<T, E>;
