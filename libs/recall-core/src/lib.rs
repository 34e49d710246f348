//! Core spaced repetition engine shared by the backend and any other host.
//!
//! Provides:
//! - Two-outcome SM-2 scheduling
//! - Due-set selection and deck statistics
//! - Item preparation (tag filter, due filter, quiz size)
//! - The interactive study session state machine

pub mod algorithm;
pub mod due;
pub mod error;
pub mod selection;
pub mod session;
pub mod stats;
pub mod types;

pub use algorithm::{apply_outcome, initialize, is_due, next_schedule, ScheduleUpdate, Sm2};
pub use due::{due_items, is_item_due};
pub use error::{ScheduleError, SessionError};
pub use selection::{prepare_items, shuffle_items, ItemFilter};
pub use session::{NoopDispatcher, ReviewDispatcher, SessionPhase, StudySession};
pub use stats::deck_stats;
pub use types::{
    AttemptRecord, DeckStats, Direction, DirectionPolicy, Item, ReviewOutcome, ScheduleRecord,
    ScheduleState, SessionResult, SessionStats, INITIAL_EASE, MINIMUM_EASE,
};
