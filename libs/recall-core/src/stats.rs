//! Deck statistics.

use std::collections::{HashMap, HashSet};

use chrono::{DateTime, Utc};

use crate::due::due_items;
use crate::types::{AttemptRecord, DeckStats, Item, ScheduleRecord};

/// Summarise a deck: card and due counts plus attempt accuracy.
///
/// Attempts for items outside `items` are ignored. Accuracy is `0` when there
/// are no attempts.
pub fn deck_stats(
    items: &[Item],
    schedules: &HashMap<i64, ScheduleRecord>,
    attempts: &[AttemptRecord],
    now: DateTime<Utc>,
) -> DeckStats {
    let ids: HashSet<i64> = items.iter().map(|item| item.id).collect();
    let (total_attempts, correct_attempts) = attempts
        .iter()
        .filter(|attempt| ids.contains(&attempt.item_id))
        .fold((0, 0), |(total, correct), attempt| {
            (total + 1, correct + usize::from(attempt.correct))
        });

    DeckStats {
        total_cards: items.len(),
        due_cards: due_items(items, schedules, now).len(),
        total_attempts,
        correct_attempts,
        accuracy: accuracy(correct_attempts, total_attempts),
    }
}

fn accuracy(correct: usize, total: usize) -> u32 {
    if total == 0 {
        return 0;
    }
    (100.0 * correct as f64 / total as f64).round() as u32
}
