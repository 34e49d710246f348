//! Spaced repetition scheduling.
//!
//! The free functions use [`Sm2::default`]; build an [`Sm2`] directly to tune
//! the constants.

pub mod sm2;

pub use sm2::Sm2;

use crate::error::ScheduleError;
use crate::types::{ScheduleRecord, ScheduleState};
use chrono::{DateTime, Duration, NaiveTime, Utc};

/// Result of scheduling an item after one outcome.
#[derive(Debug, Clone, PartialEq)]
pub struct ScheduleUpdate {
    pub state: ScheduleState,
    pub next_review_date: DateTime<Utc>,
}

impl ScheduleUpdate {
    pub fn into_record(self, item_id: i64) -> ScheduleRecord {
        ScheduleRecord::from_state(item_id, self.state, self.next_review_date)
    }
}

/// Next schedule for an item given one remembered/forgotten outcome.
pub fn next_schedule(correct: bool, current: &ScheduleState, now: DateTime<Utc>) -> ScheduleUpdate {
    Sm2::default().next_schedule(correct, current, now)
}

/// Schedule for an item that has never been reviewed. Due immediately.
pub fn initialize(item_id: i64, now: DateTime<Utc>) -> ScheduleRecord {
    Sm2::default().initialize(item_id, now)
}

/// Read-modify-write step for persistence: a missing record starts from
/// [`initialize`], a stored one is validated first.
pub fn apply_outcome(
    item_id: i64,
    current: Option<&ScheduleRecord>,
    correct: bool,
    now: DateTime<Utc>,
) -> Result<ScheduleRecord, ScheduleError> {
    Sm2::default().apply_outcome(item_id, current, correct, now)
}

/// An item is due once its review date has been reached (inclusive).
pub fn is_due(next_review_date: DateTime<Utc>, now: DateTime<Utc>) -> bool {
    next_review_date <= now
}

/// UTC midnight of the day `interval_days` after `now`.
///
/// Review dates are whole calendar days, so the time of day of the review
/// never shifts when the item comes due. Dates past chrono's range saturate
/// to the latest representable instant.
pub fn next_review_date(now: DateTime<Utc>, interval_days: u32) -> DateTime<Utc> {
    start_of_day(now)
        .checked_add_signed(Duration::days(i64::from(interval_days)))
        .unwrap_or(DateTime::<Utc>::MAX_UTC)
}

fn start_of_day(now: DateTime<Utc>) -> DateTime<Utc> {
    now.date_naive().and_time(NaiveTime::MIN).and_utc()
}
