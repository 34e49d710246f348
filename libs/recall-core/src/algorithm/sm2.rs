//! Two-outcome SM-2 variant.
//!
//! Remembered items grow their interval 1, 6, then by the ease factor;
//! forgotten items restart at one day and lose some ease. Intervals are capped
//! at `maximum_interval` days.

use super::{next_review_date, ScheduleUpdate};
use crate::error::ScheduleError;
use crate::types::{ScheduleRecord, ScheduleState, INITIAL_EASE, MINIMUM_EASE};
use chrono::{DateTime, Utc};

/// SM-2 parameters.
#[derive(Debug, Clone)]
pub struct Sm2 {
    pub initial_ease: f64,
    pub minimum_ease: f64,
    pub lapse_penalty: f64,
    pub first_interval: u32,
    pub second_interval: u32,
    pub maximum_interval: u32,
}

impl Default for Sm2 {
    fn default() -> Self {
        Self {
            initial_ease: INITIAL_EASE,
            minimum_ease: MINIMUM_EASE,
            lapse_penalty: 0.2,
            first_interval: 1,
            second_interval: 6,
            maximum_interval: 36500,
        }
    }
}

impl Sm2 {
    pub fn initial_state(&self) -> ScheduleState {
        ScheduleState::from_parts(self.first_interval.max(1), self.initial_ease, 0)
    }

    pub fn initialize(&self, item_id: i64, now: DateTime<Utc>) -> ScheduleRecord {
        ScheduleRecord::from_state(item_id, self.initial_state(), now)
    }

    pub fn next_schedule(
        &self,
        correct: bool,
        current: &ScheduleState,
        now: DateTime<Utc>,
    ) -> ScheduleUpdate {
        let state = if correct {
            self.schedule_recall(current)
        } else {
            self.schedule_lapse(current)
        };

        ScheduleUpdate {
            next_review_date: next_review_date(now, state.interval_days()),
            state,
        }
    }

    pub fn apply_outcome(
        &self,
        item_id: i64,
        current: Option<&ScheduleRecord>,
        correct: bool,
        now: DateTime<Utc>,
    ) -> Result<ScheduleRecord, ScheduleError> {
        let state = match current {
            Some(record) => record.state()?,
            None => self.initial_state(),
        };
        Ok(self.next_schedule(correct, &state, now).into_record(item_id))
    }

    fn schedule_recall(&self, state: &ScheduleState) -> ScheduleState {
        let repetitions = state.repetitions().saturating_add(1);
        let interval = match repetitions {
            1 => self.first_interval,
            2 => self.second_interval,
            _ => (f64::from(state.interval_days()) * state.ease_factor()).round() as u32,
        };
        let interval = interval.clamp(1, self.maximum_interval.max(1));
        ScheduleState::from_parts(interval, state.ease_factor(), repetitions)
    }

    fn schedule_lapse(&self, state: &ScheduleState) -> ScheduleState {
        let ease = (state.ease_factor() - self.lapse_penalty).max(self.minimum_ease);
        ScheduleState::from_parts(1, ease, 0)
    }
}
