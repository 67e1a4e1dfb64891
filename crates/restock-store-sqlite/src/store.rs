//! [`SqliteStore`] — the SQLite implementation of [`ItemStore`].

use std::path::Path;

use rusqlite::OptionalExtension as _;
use uuid::Uuid;

use restock_core::{
  item::{Item, NewItem, PurchaseEvent},
  store::ItemStore,
  time,
};

use crate::{
  encode::{RawEvent, RawItem, encode_dt, encode_uuid},
  schema::SCHEMA,
  Error, Result,
};

// ─── Store ───────────────────────────────────────────────────────────────────

/// A Restock item store backed by a single SQLite file.
///
/// Cloning is cheap — the inner connection is reference-counted. All writes
/// go through the one connection, which serialises concurrent appends to the
/// same item.
#[derive(Clone)]
pub struct SqliteStore {
  pub(crate) conn: tokio_rusqlite::Connection,
}

impl SqliteStore {
  /// Open (or create) a store at `path` and run schema initialisation.
  pub async fn open(path: impl AsRef<Path>) -> Result<Self> {
    let conn = tokio_rusqlite::Connection::open(path).await?;
    let store = Self { conn };
    store.init_schema().await?;
    Ok(store)
  }

  /// Open an in-memory store — useful for testing.
  pub async fn open_in_memory() -> Result<Self> {
    let conn = tokio_rusqlite::Connection::open_in_memory().await?;
    let store = Self { conn };
    store.init_schema().await?;
    Ok(store)
  }

  async fn init_schema(&self) -> Result<()> {
    self
      .conn
      .call(|conn| {
        conn.execute_batch(SCHEMA)?;
        Ok(())
      })
      .await?;
    Ok(())
  }
}

/// Load a single item's ledger rows in insertion (rowid) order.
fn load_events(
  conn: &rusqlite::Connection,
  item_id: &str,
) -> rusqlite::Result<Vec<RawEvent>> {
  let mut stmt = conn.prepare(
    "SELECT date, purchased FROM purchase_events WHERE item_id = ?1 ORDER BY rowid",
  )?;
  stmt
    .query_map(rusqlite::params![item_id], |row| {
      Ok(RawEvent { date: row.get(0)?, purchased: row.get(1)? })
    })?
    .collect()
}

/// Translate a UNIQUE-constraint failure on `(owner_id, name)` into
/// [`Error::DuplicateItem`]; pass every other failure through.
fn map_insert_err(err: tokio_rusqlite::Error, owner_id: Uuid, name: &str) -> Error {
  if let tokio_rusqlite::Error::Rusqlite(rusqlite::Error::SqliteFailure(code, _)) =
    &err
    && code.code == rusqlite::ErrorCode::ConstraintViolation
  {
    return Error::DuplicateItem { owner_id, name: name.to_owned() };
  }
  Error::Database(err)
}

// ─── ItemStore impl ──────────────────────────────────────────────────────────

impl ItemStore for SqliteStore {
  type Error = Error;

  async fn find_item(&self, owner_id: Uuid, name: &str) -> Result<Option<Item>> {
    let owner_str = encode_uuid(owner_id);
    let name_owned = name.to_owned();

    let raw: Option<(RawItem, Vec<RawEvent>)> = self
      .conn
      .call(move |conn| {
        let raw_item = conn
          .query_row(
            "SELECT item_id, owner_id, name, created_at
             FROM items WHERE owner_id = ?1 AND name = ?2",
            rusqlite::params![owner_str, name_owned],
            |row| {
              Ok(RawItem {
                item_id:    row.get(0)?,
                owner_id:   row.get(1)?,
                name:       row.get(2)?,
                created_at: row.get(3)?,
              })
            },
          )
          .optional()?;

        match raw_item {
          Some(item) => {
            let events = load_events(conn, &item.item_id)?;
            Ok(Some((item, events)))
          }
          None => Ok(None),
        }
      })
      .await?;

    raw
      .map(|(item, events)| item.into_item(events))
      .transpose()
  }

  async fn insert_item(&self, input: NewItem) -> Result<Item> {
    let item = Item {
      item_id:    Uuid::new_v4(),
      owner_id:   input.owner_id,
      name:       input.name,
      created_at: time::now_naive(),
      history:    input.history,
    };

    let item_id_str  = encode_uuid(item.item_id);
    let owner_id_str = encode_uuid(item.owner_id);
    let name         = item.name.clone();
    let at_str       = encode_dt(item.created_at);
    let events: Vec<(String, bool)> = item
      .history
      .iter()
      .map(|e| (encode_dt(e.date), e.purchased))
      .collect();

    self
      .conn
      .call(move |conn| {
        let tx = conn.transaction()?;
        tx.execute(
          "INSERT INTO items (item_id, owner_id, name, created_at)
           VALUES (?1, ?2, ?3, ?4)",
          rusqlite::params![item_id_str, owner_id_str, name, at_str],
        )?;
        for (date_str, purchased) in &events {
          tx.execute(
            "INSERT INTO purchase_events (item_id, date, purchased)
             VALUES (?1, ?2, ?3)",
            rusqlite::params![item_id_str, date_str, purchased],
          )?;
        }
        tx.commit()?;
        Ok(())
      })
      .await
      .map_err(|e| map_insert_err(e, item.owner_id, &item.name))?;

    Ok(item)
  }

  async fn append_event(&self, item_id: Uuid, event: PurchaseEvent) -> Result<()> {
    let item_id_str = encode_uuid(item_id);
    let date_str    = encode_dt(event.date);
    let purchased   = event.purchased;

    // Single INSERT..SELECT so the existence check and the append are one
    // atomic statement.
    let inserted: bool = self
      .conn
      .call(move |conn| {
        let n = conn.execute(
          "INSERT INTO purchase_events (item_id, date, purchased)
           SELECT ?1, ?2, ?3 WHERE EXISTS (SELECT 1 FROM items WHERE item_id = ?1)",
          rusqlite::params![item_id_str, date_str, purchased],
        )?;
        Ok(n > 0)
      })
      .await?;

    if !inserted {
      return Err(Error::ItemNotFound(item_id));
    }
    Ok(())
  }

  async fn list_items(&self, owner_id: Uuid) -> Result<Vec<Item>> {
    let owner_str = encode_uuid(owner_id);

    let raws: Vec<(RawItem, Vec<RawEvent>)> = self
      .conn
      .call(move |conn| {
        let mut stmt = conn.prepare(
          "SELECT item_id, owner_id, name, created_at
           FROM items WHERE owner_id = ?1 ORDER BY rowid",
        )?;
        let items = stmt
          .query_map(rusqlite::params![owner_str], |row| {
            Ok(RawItem {
              item_id:    row.get(0)?,
              owner_id:   row.get(1)?,
              name:       row.get(2)?,
              created_at: row.get(3)?,
            })
          })?
          .collect::<rusqlite::Result<Vec<_>>>()?;

        let mut out = Vec::with_capacity(items.len());
        for item in items {
          let events = load_events(conn, &item.item_id)?;
          out.push((item, events));
        }
        Ok(out)
      })
      .await?;

    raws
      .into_iter()
      .map(|(item, events)| item.into_item(events))
      .collect()
  }
}
