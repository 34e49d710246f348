//! Database models and API types

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

// Re-export shared types from recall-core
pub use recall_core::{
    AttemptRecord, DeckStats, Direction, DirectionPolicy, Item, ItemFilter, ReviewOutcome,
    ScheduleError, ScheduleRecord, SessionPhase, SessionStats, StudySession,
};

// === Database Entity Types ===

/// Deck stored in PostgreSQL
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct DbDeck {
    pub id: i64,
    pub name: String,
    pub description: Option<String>,
    pub created_at: DateTime<Utc>,
}

/// Item stored in PostgreSQL
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct DbItem {
    pub id: i64,
    pub deck_id: i64,
    pub front_text: String,
    pub back_text: String,
    pub tags: Vec<String>,
    pub created_at: DateTime<Utc>,
}

impl DbItem {
    /// Convert to recall-core Item
    pub fn to_core_item(&self) -> Item {
        Item {
            id: self.id,
            front: self.front_text.clone(),
            back: self.back_text.clone(),
            tags: self.tags.clone(),
        }
    }
}

/// Schedule row in PostgreSQL
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct DbSchedule {
    pub item_id: i64,
    pub interval_days: i32,
    pub ease_factor: f64,
    pub repetitions: i32,
    pub next_review_date: DateTime<Utc>,
}

impl DbSchedule {
    /// Create from recall-core ScheduleRecord, rejecting values the columns cannot hold
    pub fn from_core(record: &ScheduleRecord) -> Result<Self, ScheduleError> {
        Ok(Self {
            item_id: record.item_id,
            interval_days: i32::try_from(record.interval_days)
                .map_err(|_| ScheduleError::InvalidInterval(record.interval_days.into()))?,
            ease_factor: record.ease_factor,
            repetitions: i32::try_from(record.repetitions)
                .map_err(|_| ScheduleError::InvalidRepetitions(record.repetitions.into()))?,
            next_review_date: record.next_review_date,
        })
    }

    /// Convert to recall-core ScheduleRecord, rejecting out-of-range values
    pub fn to_core(&self) -> Result<ScheduleRecord, ScheduleError> {
        let interval_days = u32::try_from(self.interval_days)
            .map_err(|_| ScheduleError::InvalidInterval(self.interval_days.into()))?;
        let repetitions = u32::try_from(self.repetitions)
            .map_err(|_| ScheduleError::InvalidRepetitions(self.repetitions.into()))?;

        let record = ScheduleRecord {
            item_id: self.item_id,
            interval_days,
            ease_factor: self.ease_factor,
            repetitions,
            next_review_date: self.next_review_date,
        };
        record.state()?;
        Ok(record)
    }
}

/// Attempt log row
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct DbAttempt {
    pub id: i64,
    pub item_id: i64,
    pub correct: bool,
    pub attempted_at: DateTime<Utc>,
}

impl DbAttempt {
    pub fn to_core(&self) -> AttemptRecord {
        AttemptRecord {
            item_id: self.item_id,
            correct: self.correct,
            attempted_at: self.attempted_at,
        }
    }
}

/// Deck info with item count
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct DeckInfo {
    pub id: i64,
    pub name: String,
    pub description: Option<String>,
    pub item_count: i32,
}

// === API Request/Response Types ===

// Deck types
#[derive(Debug, Serialize, Deserialize)]
pub struct CreateDeckRequest {
    pub name: String,
    pub description: Option<String>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct DeckListResponse {
    pub decks: Vec<DeckInfo>,
}

// Item types
#[derive(Debug, Serialize, Deserialize)]
pub struct CreateItemRequest {
    pub front_text: String,
    pub back_text: String,
    #[serde(default)]
    pub tags: Vec<String>,
}

#[derive(Debug, Default, Serialize, Deserialize)]
pub struct ItemListQuery {
    /// Comma-separated tag list; items carrying any of them are returned.
    pub tags: Option<String>,
}

impl ItemListQuery {
    pub fn tag_list(&self) -> Vec<String> {
        self.tags
            .as_deref()
            .map(parse_tags)
            .unwrap_or_default()
    }
}

/// Split a comma-separated tag list, dropping blanks.
pub fn parse_tags(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(str::trim)
        .filter(|t| !t.is_empty())
        .map(str::to_string)
        .collect()
}

// Study types
#[derive(Debug, Serialize, Deserialize)]
pub struct SubmitReviewRequest {
    pub item_id: i64,
    pub correct: bool,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct SubmitReviewResponse {
    pub schedule: ScheduleRecord,
}

// Session types
#[derive(Debug, Serialize, Deserialize)]
pub struct StartSessionRequest {
    pub deck_id: i64,
    #[serde(default)]
    pub direction: DirectionPolicy,
    #[serde(flatten)]
    pub filter: ItemFilter,
    /// Shuffle the deck before filtering and truncating.
    #[serde(default)]
    pub shuffle: bool,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct RecordResultRequest {
    pub correct: bool,
}

/// Snapshot of a hosted session returned by every session endpoint.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SessionView {
    pub session_id: Uuid,
    pub phase: SessionPhase,
    pub position: usize,
    pub total: usize,
    pub item_id: Option<i64>,
    pub direction: Option<Direction>,
    pub prompt: Option<String>,
    pub answer: Option<String>,
    pub stats: SessionStats,
}

impl SessionView {
    pub fn new(session_id: Uuid, session: &StudySession) -> Self {
        Self {
            session_id,
            phase: session.phase(),
            position: session.position(),
            total: session.len(),
            item_id: session.current_item().map(|item| item.id),
            direction: session.direction(),
            prompt: session.prompt_text().map(str::to_string),
            answer: session.answer_text().map(str::to_string),
            stats: session.stats(),
        }
    }
}
