//! Due-set selection.

use std::collections::HashMap;

use chrono::{DateTime, Utc};

use crate::algorithm::is_due;
use crate::types::{Item, ScheduleRecord};

/// Whether an item is due. Items without a schedule have never been reviewed
/// and are always due.
pub fn is_item_due(
    item_id: i64,
    schedules: &HashMap<i64, ScheduleRecord>,
    now: DateTime<Utc>,
) -> bool {
    schedules
        .get(&item_id)
        .map_or(true, |record| is_due(record.next_review_date, now))
}

/// Items that are due at `now`, in their original order.
pub fn due_items<'a>(
    items: &'a [Item],
    schedules: &HashMap<i64, ScheduleRecord>,
    now: DateTime<Utc>,
) -> Vec<&'a Item> {
    items
        .iter()
        .filter(|item| is_item_due(item.id, schedules, now))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::algorithm::initialize;
    use chrono::{Duration, TimeZone};

    fn now() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 3, 10, 8, 0, 0).unwrap()
    }

    fn scheduled(item_id: i64, next_review_date: DateTime<Utc>) -> (i64, ScheduleRecord) {
        let mut record = initialize(item_id, now());
        record.next_review_date = next_review_date;
        (item_id, record)
    }

    #[test]
    fn unreviewed_and_past_items_are_due_in_order() {
        let items = vec![
            Item::new(1, "never", "reviewed"),
            Item::new(2, "past", "due"),
            Item::new(3, "future", "not due"),
        ];
        let schedules: HashMap<_, _> = [
            scheduled(2, now() - Duration::days(1)),
            scheduled(3, now() + Duration::days(1)),
        ]
        .into_iter()
        .collect();

        let due: Vec<i64> = due_items(&items, &schedules, now()).iter().map(|i| i.id).collect();
        assert_eq!(due, vec![1, 2]);
    }

    #[test]
    fn order_follows_input_not_review_date() {
        let items = vec![Item::new(5, "a", "b"), Item::new(4, "c", "d")];
        let schedules: HashMap<_, _> = [
            scheduled(5, now() - Duration::days(1)),
            scheduled(4, now() - Duration::days(10)),
        ]
        .into_iter()
        .collect();

        let due: Vec<i64> = due_items(&items, &schedules, now()).iter().map(|i| i.id).collect();
        assert_eq!(due, vec![5, 4]);
    }

    #[test]
    fn review_date_equal_to_now_is_due() {
        let schedules: HashMap<_, _> = [scheduled(1, now())].into_iter().collect();
        assert!(is_item_due(1, &schedules, now()));
    }

    #[test]
    fn empty_input_yields_nothing() {
        assert!(due_items(&[], &HashMap::new(), now()).is_empty());
    }
}
