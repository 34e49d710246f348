//! Schedule persistence and deck snapshots.

use std::collections::HashMap;

use recall_core::apply_outcome;

use crate::db::Database;
use crate::error::{ApiError, Result};
use crate::models::*;

/// Items of a deck together with their schedules, read at one point in time.
#[derive(Debug, Clone, Default)]
pub struct DeckSnapshot {
    pub items: Vec<Item>,
    pub schedules: HashMap<i64, ScheduleRecord>,
}

/// Load a deck's items and schedules. Fails with `NotFound` for unknown decks.
///
/// A stored schedule that fails validation is skipped, so its item reads as
/// never reviewed until the next attempt overwrites it.
pub async fn deck_snapshot(db: &Database, deck_id: i64) -> Result<DeckSnapshot> {
    ensure_deck(db, deck_id).await?;

    let items = db
        .list_items(deck_id)
        .await?
        .iter()
        .map(DbItem::to_core_item)
        .collect();

    let schedules = db
        .get_schedules_for_deck(deck_id)
        .await?
        .iter()
        .filter_map(|row| match row.to_core() {
            Ok(record) => Some((record.item_id, record)),
            Err(e) => {
                tracing::warn!(item_id = row.item_id, "ignoring invalid schedule: {}", e);
                None
            }
        })
        .collect();

    Ok(DeckSnapshot { items, schedules })
}

pub async fn ensure_deck(db: &Database, deck_id: i64) -> Result<DbDeck> {
    db.get_deck(deck_id)
        .await?
        .ok_or_else(|| ApiError::NotFound(format!("Deck {}", deck_id)))
}

/// Read the item's schedule, apply the outcome and write the result back.
///
/// Read and write are separate statements; an overlapping update for the same
/// item may be lost (last write wins).
pub async fn update_schedule(db: &Database, outcome: &ReviewOutcome) -> Result<ScheduleRecord> {
    let current = db
        .get_schedule(outcome.item_id)
        .await?
        .map(|row| row.to_core())
        .transpose()
        .map_err(|e| ApiError::Internal(format!("stored schedule for item {}: {}", outcome.item_id, e)))?;

    let next = apply_outcome(outcome.item_id, current.as_ref(), outcome.correct, outcome.reviewed_at)
        .map_err(|e| ApiError::Internal(e.to_string()))?;

    let row = DbSchedule::from_core(&next).map_err(|e| ApiError::Internal(e.to_string()))?;
    db.upsert_schedule(&row).await?;
    Ok(next)
}

/// Update the schedule and append to the attempt log, failing on either error.
pub async fn record_review(db: &Database, outcome: &ReviewOutcome) -> Result<ScheduleRecord> {
    let next = update_schedule(db, outcome).await?;
    db.insert_attempt(&outcome.to_attempt()).await?;

    tracing::debug!(
        item_id = outcome.item_id,
        correct = outcome.correct,
        interval_days = next.interval_days,
        "recorded review"
    );
    Ok(next)
}
