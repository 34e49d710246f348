//! Interactive practice session.
//!
//! A [`StudySession`] walks an ordered list of items once. Each recorded result
//! advances the run and is handed to a [`ReviewDispatcher`], which must not
//! block: persistence is best-effort and never affects session progress.

use std::sync::Arc;

use chrono::Utc;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use serde::{Deserialize, Serialize};

use crate::error::SessionError;
use crate::types::{Direction, DirectionPolicy, Item, ReviewOutcome, SessionResult, SessionStats};

/// Receives every recorded outcome.
///
/// Implementations return immediately. Anything slow (schedule update,
/// attempt log) runs detached and handles its own failures.
pub trait ReviewDispatcher: Send + Sync {
    fn dispatch(&self, outcome: ReviewOutcome);
}

/// Dispatcher that drops outcomes, for practice without persistence.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoopDispatcher;

impl ReviewDispatcher for NoopDispatcher {
    fn dispatch(&self, _outcome: ReviewOutcome) {}
}

/// Lifecycle of a session.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SessionPhase {
    Idle,
    InProgress,
    Complete,
}

struct Run {
    items: Vec<Item>,
    policy: DirectionPolicy,
    position: usize,
    /// Direction of the item at `position`.
    direction: Direction,
    results: Vec<SessionResult>,
}

impl Run {
    fn current(&self) -> Option<&Item> {
        self.items.get(self.position)
    }
}

pub struct StudySession {
    run: Option<Run>,
    dispatcher: Arc<dyn ReviewDispatcher>,
    rng: StdRng,
}

impl StudySession {
    pub fn new(dispatcher: Arc<dyn ReviewDispatcher>) -> Self {
        Self::with_rng(dispatcher, StdRng::from_entropy())
    }

    /// Session with a caller-provided generator, e.g. a seeded one in tests.
    pub fn with_rng(dispatcher: Arc<dyn ReviewDispatcher>, rng: StdRng) -> Self {
        Self {
            run: None,
            dispatcher,
            rng,
        }
    }

    /// Start a run over `items`, replacing any previous run.
    ///
    /// An empty list is rejected and leaves the session untouched.
    pub fn start(&mut self, items: Vec<Item>, policy: DirectionPolicy) -> Result<(), SessionError> {
        if items.is_empty() {
            return Err(SessionError::EmptyItems);
        }

        tracing::debug!(items = items.len(), ?policy, "starting study session");
        let results = Vec::with_capacity(items.len());
        self.run = Some(Run {
            direction: resolve_direction(policy, &mut self.rng),
            items,
            policy,
            position: 0,
            results,
        });
        Ok(())
    }

    pub fn phase(&self) -> SessionPhase {
        match &self.run {
            None => SessionPhase::Idle,
            Some(run) if run.current().is_some() => SessionPhase::InProgress,
            Some(_) => SessionPhase::Complete,
        }
    }

    pub fn current_item(&self) -> Option<&Item> {
        self.run.as_ref().and_then(Run::current)
    }

    /// Direction of the current item.
    pub fn direction(&self) -> Option<Direction> {
        self.run
            .as_ref()
            .filter(|run| run.current().is_some())
            .map(|run| run.direction)
    }

    pub fn prompt_text(&self) -> Option<&str> {
        let (item, direction) = self.current_item().zip(self.direction())?;
        Some(match direction {
            Direction::Forward => item.front.as_str(),
            Direction::Reverse => item.back.as_str(),
        })
    }

    pub fn answer_text(&self) -> Option<&str> {
        let (item, direction) = self.current_item().zip(self.direction())?;
        Some(match direction {
            Direction::Forward => item.back.as_str(),
            Direction::Reverse => item.front.as_str(),
        })
    }

    /// Record the learner's self-assessment for the current item.
    ///
    /// Does nothing when there is no current item, so a stale callback after
    /// completion (or before start) cannot disturb the run.
    pub fn record_result(&mut self, correct: bool) {
        let Some(run) = self.run.as_mut() else {
            tracing::debug!("ignoring result: no session started");
            return;
        };
        let Some(item_id) = run.current().map(|item| item.id) else {
            tracing::debug!("ignoring result: session already complete");
            return;
        };

        run.results.push(SessionResult { item_id, correct });
        run.position += 1;

        self.dispatcher.dispatch(ReviewOutcome {
            item_id,
            correct,
            reviewed_at: Utc::now(),
        });

        if run.policy == DirectionPolicy::RandomPerItem && run.current().is_some() {
            run.direction = resolve_direction(run.policy, &mut self.rng);
        }
    }

    /// True once every item of a started run has a result.
    pub fn is_complete(&self) -> bool {
        self.phase() == SessionPhase::Complete
    }

    /// Tally over the results recorded so far.
    pub fn stats(&self) -> SessionStats {
        let results = self.results();
        let correct_count = results.iter().filter(|r| r.correct).count();
        SessionStats {
            total_cards: results.len(),
            correct_count,
            missed_count: results.len() - correct_count,
        }
    }

    pub fn results(&self) -> &[SessionResult] {
        self.run
            .as_ref()
            .map(|run| run.results.as_slice())
            .unwrap_or_default()
    }

    pub fn position(&self) -> usize {
        self.run.as_ref().map_or(0, |run| run.position)
    }

    /// Number of items in the current run.
    pub fn len(&self) -> usize {
        self.run.as_ref().map_or(0, |run| run.items.len())
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn policy(&self) -> Option<DirectionPolicy> {
        self.run.as_ref().map(|run| run.policy)
    }

    /// Drop the current run and return to idle.
    pub fn reset(&mut self) {
        self.run = None;
    }
}

fn resolve_direction(policy: DirectionPolicy, rng: &mut StdRng) -> Direction {
    match policy {
        DirectionPolicy::Forward => Direction::Forward,
        DirectionPolicy::Reverse => Direction::Reverse,
        DirectionPolicy::RandomPerItem => {
            if rng.gen_bool(0.5) {
                Direction::Forward
            } else {
                Direction::Reverse
            }
        }
    }
}
