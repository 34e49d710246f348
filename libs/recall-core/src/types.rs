//! Core types shared by the engine and its callers.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::error::ScheduleError;

/// Ease factor given to an item that has never been reviewed.
pub const INITIAL_EASE: f64 = 2.5;

/// Lowest ease factor a schedule may carry.
pub const MINIMUM_EASE: f64 = 1.3;

/// A recall item with two faces.
///
/// Items are owned by the item repository; the engine only reads them.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Item {
    pub id: i64,
    pub front: String,
    pub back: String,
    #[serde(default)]
    pub tags: Vec<String>,
}

impl Item {
    pub fn new(id: i64, front: impl Into<String>, back: impl Into<String>) -> Self {
        Self {
            id,
            front: front.into(),
            back: back.into(),
            tags: Vec::new(),
        }
    }

    pub fn with_tags<I, S>(mut self, tags: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.tags = tags.into_iter().map(Into::into).collect();
        self
    }

    /// True if the item carries at least one of `tags`.
    pub fn has_any_tag(&self, tags: &[String]) -> bool {
        self.tags.iter().any(|t| tags.contains(t))
    }
}

/// Validated numeric part of a schedule.
///
/// Only constructible through [`ScheduleState::new`] (or the engine), so a value
/// of this type always satisfies `interval_days >= 1` and `ease_factor >= 1.3`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct ScheduleState {
    interval_days: u32,
    ease_factor: f64,
    repetitions: u32,
}

impl ScheduleState {
    pub fn new(interval_days: u32, ease_factor: f64, repetitions: u32) -> Result<Self, ScheduleError> {
        if interval_days < 1 {
            return Err(ScheduleError::InvalidInterval(interval_days as i64));
        }
        if !ease_factor.is_finite() || ease_factor < MINIMUM_EASE {
            return Err(ScheduleError::InvalidEase {
                value: ease_factor,
                minimum: MINIMUM_EASE,
            });
        }
        Ok(Self::from_parts(interval_days, ease_factor, repetitions))
    }

    /// Unchecked constructor for values the engine derived from a valid state.
    pub(crate) fn from_parts(interval_days: u32, ease_factor: f64, repetitions: u32) -> Self {
        Self {
            interval_days,
            ease_factor,
            repetitions,
        }
    }

    pub fn interval_days(&self) -> u32 {
        self.interval_days
    }

    pub fn ease_factor(&self) -> f64 {
        self.ease_factor
    }

    pub fn repetitions(&self) -> u32 {
        self.repetitions
    }
}

impl Default for ScheduleState {
    fn default() -> Self {
        Self::from_parts(1, INITIAL_EASE, 0)
    }
}

/// Persisted schedule for one item. Replaced wholesale on every attempt.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScheduleRecord {
    pub item_id: i64,
    pub interval_days: u32,
    pub ease_factor: f64,
    pub repetitions: u32,
    pub next_review_date: DateTime<Utc>,
}

impl ScheduleRecord {
    pub fn from_state(item_id: i64, state: ScheduleState, next_review_date: DateTime<Utc>) -> Self {
        Self {
            item_id,
            interval_days: state.interval_days,
            ease_factor: state.ease_factor,
            repetitions: state.repetitions,
            next_review_date,
        }
    }

    /// Validate the numeric fields before they enter the engine.
    pub fn state(&self) -> Result<ScheduleState, ScheduleError> {
        ScheduleState::new(self.interval_days, self.ease_factor, self.repetitions)
    }
}

/// One entry of the append-only attempt log.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AttemptRecord {
    pub item_id: i64,
    pub correct: bool,
    pub attempted_at: DateTime<Utc>,
}

/// Which face of an item is shown as the prompt.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Direction {
    /// Front is the prompt, back is the answer.
    Forward,
    /// Back is the prompt, front is the answer.
    Reverse,
}

/// How directions are chosen for a session.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DirectionPolicy {
    Forward,
    Reverse,
    RandomPerItem,
}

impl Default for DirectionPolicy {
    fn default() -> Self {
        Self::Forward
    }
}

/// Outcome handed to the persistence side after each recorded result.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReviewOutcome {
    pub item_id: i64,
    pub correct: bool,
    pub reviewed_at: DateTime<Utc>,
}

impl ReviewOutcome {
    pub fn to_attempt(&self) -> AttemptRecord {
        AttemptRecord {
            item_id: self.item_id,
            correct: self.correct,
            attempted_at: self.reviewed_at,
        }
    }
}

/// A single in-session result.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionResult {
    pub item_id: i64,
    pub correct: bool,
}

/// Running tally of a session.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionStats {
    pub total_cards: usize,
    pub correct_count: usize,
    pub missed_count: usize,
}

/// Summary of a deck's scheduling and attempt history.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DeckStats {
    pub total_cards: usize,
    pub due_cards: usize,
    pub total_attempts: usize,
    pub correct_attempts: usize,
    /// Percentage of correct attempts, rounded to the nearest integer.
    pub accuracy: u32,
}
