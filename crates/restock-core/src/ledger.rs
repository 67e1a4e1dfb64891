//! Purchase ledger updater.
//!
//! Both user-facing write paths — submitting a weekly shopping list and
//! confirming accepted predictions — funnel through [`record_purchases`], so
//! the two flows cannot drift apart in their history semantics.

use std::collections::HashSet;

use chrono::NaiveDateTime;
use tracing::debug;
use uuid::Uuid;

use crate::{
  item::{NewItem, PurchaseEvent},
  store::ItemStore,
  time,
};

/// Append one purchase event per distinct name to the owner's ledger.
///
/// - Duplicate names in the input collapse to a single update; matching is
///   case-sensitive, so "Milk" and "milk" are two distinct items.
/// - `date` of `None` means now; callers with an explicit date must have
///   normalised it to naive calendar time already (see [`crate::time`]).
/// - A name with no existing item creates one whose ledger holds exactly the
///   one event; an existing item gets the event appended.
/// - Each name is its own transaction boundary: a store failure propagates
///   immediately and leaves updates for earlier names applied.
pub async fn record_purchases<S>(
  store:    &S,
  owner_id: Uuid,
  names:    impl IntoIterator<Item = String>,
  date:     Option<NaiveDateTime>,
) -> Result<(), S::Error>
where
  S: ItemStore,
{
  let date = date.unwrap_or_else(time::now_naive);
  let distinct: HashSet<String> = names.into_iter().collect();

  for name in distinct {
    let event = PurchaseEvent::purchase(date);
    match store.find_item(owner_id, &name).await? {
      Some(item) => {
        debug!(%owner_id, %name, %date, "appending purchase to existing item");
        store.append_event(item.item_id, event).await?;
      }
      None => {
        debug!(%owner_id, %name, %date, "creating item on first purchase");
        store
          .insert_item(NewItem { owner_id, name, history: vec![event] })
          .await?;
      }
    }
  }

  Ok(())
}
