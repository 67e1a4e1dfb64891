//! Cadence forecaster — decides which items are due for repurchase.
//!
//! A pure projection over purchase ledgers: forecasting never mutates state.
//! Confirming a prediction is a separate call into [`crate::ledger`], not an
//! automatic effect of forecasting.

use chrono::NaiveDateTime;
use tracing::debug;
use uuid::Uuid;

use crate::{
  item::{Item, PurchaseEvent},
  store::ItemStore,
};

/// Estimated days between successive purchases, derived from the gaps in a
/// date-sorted history.
///
/// Defaults to 1 day when there are no gaps (zero or one purchase) or the
/// mean degenerates to NaN or exactly 0 — a zero cadence would leave an item
/// perpetually due, and a single-purchase item still needs a sane baseline.
fn average_cadence_days(dates: &[NaiveDateTime]) -> f64 {
  if dates.len() < 2 {
    return 1.0;
  }
  let gaps: Vec<i64> = dates
    .windows(2)
    .map(|pair| (pair[1] - pair[0]).num_days())
    .collect();
  let mean = gaps.iter().sum::<i64>() as f64 / gaps.len() as f64;
  if mean.is_nan() || mean == 0.0 { 1.0 } else { mean }
}

/// Whether an item with this ledger is due for repurchase as of `as_of`.
///
/// The ledger may arrive in any order; only events with `purchased == true`
/// count. An item with no confirmed purchase has no cadence and is never
/// due. The comparison is inclusive: exactly on cadence counts as due.
pub fn is_due(history: &[PurchaseEvent], as_of: NaiveDateTime) -> bool {
  let mut dates: Vec<NaiveDateTime> = history
    .iter()
    .filter(|event| event.purchased)
    .map(|event| event.date)
    .collect();
  dates.sort();

  let Some(&last) = dates.last() else {
    return false;
  };

  let cadence = average_cadence_days(&dates);
  let days_since_last = (as_of - last).num_days();
  days_since_last as f64 >= cadence
}

/// Names of all due items, preserving the input iteration order.
pub fn due_items(items: &[Item], as_of: NaiveDateTime) -> Vec<String> {
  items
    .iter()
    .filter(|item| is_due(&item.history, as_of))
    .map(|item| item.name.clone())
    .collect()
}

/// Batch entry point: fetch the owner's items and project the due set.
pub async fn forecast<S>(
  store:    &S,
  owner_id: Uuid,
  as_of:    NaiveDateTime,
) -> Result<Vec<String>, S::Error>
where
  S: ItemStore,
{
  let items = store.list_items(owner_id).await?;
  let due = due_items(&items, as_of);
  debug!(%owner_id, %as_of, due = due.len(), of = items.len(), "forecast complete");
  Ok(due)
}

#[cfg(test)]
mod tests {
  use chrono::NaiveDate;
  use uuid::Uuid;

  use super::*;

  fn date(y: i32, m: u32, d: u32) -> NaiveDateTime {
    NaiveDate::from_ymd_opt(y, m, d).unwrap().and_hms_opt(0, 0, 0).unwrap()
  }

  fn purchases(dates: &[NaiveDateTime]) -> Vec<PurchaseEvent> {
    dates.iter().map(|&d| PurchaseEvent::purchase(d)).collect()
  }

  fn item(name: &str, history: Vec<PurchaseEvent>) -> Item {
    Item {
      item_id:    Uuid::new_v4(),
      owner_id:   Uuid::new_v4(),
      name:       name.to_owned(),
      created_at: date(2024, 1, 1),
      history,
    }
  }

  #[test]
  fn empty_history_is_never_due() {
    assert!(!is_due(&[], date(2099, 1, 1)));
  }

  #[test]
  fn unpurchased_events_are_ignored() {
    let history = vec![PurchaseEvent { date: date(2024, 1, 1), purchased: false }];
    assert!(!is_due(&history, date(2099, 1, 1)));
  }

  #[test]
  fn single_purchase_defaults_to_one_day_cadence() {
    let history = purchases(&[date(2024, 1, 1)]);
    // Same day: 0 days since last, cadence 1 → not due.
    assert!(!is_due(&history, date(2024, 1, 1)));
    // Next day: exactly on cadence → due.
    assert!(is_due(&history, date(2024, 1, 2)));
  }

  #[test]
  fn ten_day_cadence_with_inclusive_boundary() {
    let history = purchases(&[date(2024, 1, 1), date(2024, 1, 11), date(2024, 1, 21)]);
    // gaps = [10, 10], cadence = 10
    assert!(!is_due(&history, date(2024, 1, 21))); // 0 days since last
    assert!(!is_due(&history, date(2024, 1, 30))); // 9 days
    assert!(is_due(&history, date(2024, 1, 31))); // exactly 10 days
    assert!(is_due(&history, date(2024, 2, 5)));
  }

  #[test]
  fn out_of_order_history_matches_sorted_equivalent() {
    let shuffled = purchases(&[date(2024, 1, 20), date(2024, 1, 1), date(2024, 1, 10)]);
    let sorted = purchases(&[date(2024, 1, 1), date(2024, 1, 10), date(2024, 1, 20)]);
    for day in 20..40 {
      let as_of = date(2024, 1, 1) + chrono::Duration::days(day);
      assert_eq!(is_due(&shuffled, as_of), is_due(&sorted, as_of), "day {day}");
    }
  }

  #[test]
  fn same_day_repeat_purchases_fall_back_to_one_day() {
    // Two purchases on the same day give a legitimate zero gap; the zero
    // mean is deliberately conflated with "no data" and defaults to 1 day.
    let history = purchases(&[date(2024, 3, 1), date(2024, 3, 1)]);
    assert!(!is_due(&history, date(2024, 3, 1)));
    assert!(is_due(&history, date(2024, 3, 2)));
  }

  #[test]
  fn uneven_gaps_use_the_arithmetic_mean() {
    let history = purchases(&[date(2024, 1, 1), date(2024, 1, 5), date(2024, 1, 13)]);
    // gaps = [4, 8], cadence = 6
    assert!(!is_due(&history, date(2024, 1, 18))); // 5 days since last
    assert!(is_due(&history, date(2024, 1, 19))); // 6 days
  }

  #[test]
  fn batch_returns_only_due_items_in_input_order() {
    let due_a = item("Apples", purchases(&[date(2024, 1, 1), date(2024, 1, 8)]));
    let fresh = item("Bread", purchases(&[date(2024, 1, 15)]));
    let never = item("Caviar", Vec::new());
    let due_d = item("Dates", purchases(&[date(2024, 1, 1), date(2024, 1, 5)]));

    let as_of = date(2024, 1, 15);
    let names = due_items(&[due_a, fresh, never, due_d], as_of);
    assert_eq!(names, ["Apples", "Dates"]);
  }
}
