//! Preparing the ordered item list a session is started with.

use std::collections::HashMap;

use chrono::{DateTime, Utc};
use rand::seq::SliceRandom;
use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::due::is_item_due;
use crate::types::{Item, ScheduleRecord};

/// Filters applied before a session starts.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ItemFilter {
    /// Keep items carrying any of these tags. Empty keeps everything.
    #[serde(default)]
    pub tags: Vec<String>,
    /// Maximum number of items (quiz size).
    #[serde(default)]
    pub limit: Option<usize>,
    /// Keep only items that are due.
    #[serde(default)]
    pub due_only: bool,
}

/// Apply tag, due and size filters in that order, keeping the input order.
pub fn prepare_items(
    items: Vec<Item>,
    filter: &ItemFilter,
    schedules: &HashMap<i64, ScheduleRecord>,
    now: DateTime<Utc>,
) -> Vec<Item> {
    let limit = filter.limit.unwrap_or(usize::MAX);
    items
        .into_iter()
        .filter(|item| filter.tags.is_empty() || item.has_any_tag(&filter.tags))
        .filter(|item| !filter.due_only || is_item_due(item.id, schedules, now))
        .take(limit)
        .collect()
}

/// Shuffle items in place. Applied before `prepare_items` so that the
/// size limit draws a random subset.
pub fn shuffle_items<R: Rng + ?Sized>(items: &mut [Item], rng: &mut R) {
    items.shuffle(rng);
}
