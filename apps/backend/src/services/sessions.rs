//! In-memory registry of hosted study sessions.

use std::collections::HashMap;
use std::sync::{Arc, Mutex, MutexGuard};

use chrono::{DateTime, Duration, Utc};
use recall_core::ReviewDispatcher;
use uuid::Uuid;

use crate::error::{ApiError, Result};
use crate::models::*;

struct HostedSession {
    session: StudySession,
    last_touched: DateTime<Utc>,
}

/// Sessions keyed by id. Each call holds the lock only for one synchronous
/// transition; persistence happens on the dispatcher's own tasks.
///
/// Sessions untouched for longer than `idle_ttl` are dropped whenever a new
/// session starts.
pub struct SessionRegistry {
    sessions: Mutex<HashMap<Uuid, HostedSession>>,
    dispatcher: Arc<dyn ReviewDispatcher>,
    idle_ttl: Duration,
}

impl SessionRegistry {
    pub fn new(dispatcher: Arc<dyn ReviewDispatcher>, idle_ttl: Duration) -> Self {
        Self {
            sessions: Mutex::new(HashMap::new()),
            dispatcher,
            idle_ttl,
        }
    }

    /// Start a new session over `items`.
    pub fn start(&self, items: Vec<Item>, policy: DirectionPolicy) -> Result<SessionView> {
        let mut session = StudySession::new(Arc::clone(&self.dispatcher));
        session.start(items, policy)?;

        let id = Uuid::new_v4();
        let view = SessionView::new(id, &session);
        let now = Utc::now();

        let mut sessions = self.lock()?;
        let evicted = sweep(&mut sessions, now - self.idle_ttl);
        sessions.insert(
            id,
            HostedSession {
                session,
                last_touched: now,
            },
        );

        tracing::info!(
            session_id = %id,
            items = view.total,
            ?policy,
            active = sessions.len(),
            evicted,
            "started session"
        );
        Ok(view)
    }

    pub fn view(&self, id: Uuid) -> Result<SessionView> {
        let sessions = self.lock()?;
        let hosted = sessions.get(&id).ok_or_else(|| not_found(id))?;
        Ok(SessionView::new(id, &hosted.session))
    }

    /// Record an outcome for the current item. A completed session is
    /// returned unchanged.
    pub fn record_result(&self, id: Uuid, correct: bool) -> Result<SessionView> {
        let mut sessions = self.lock()?;
        let hosted = sessions.get_mut(&id).ok_or_else(|| not_found(id))?;
        hosted.last_touched = Utc::now();

        let session = &mut hosted.session;
        session.record_result(correct);

        if session.is_complete() {
            let stats = session.stats();
            tracing::info!(
                session_id = %id,
                correct = stats.correct_count,
                missed = stats.missed_count,
                "session complete"
            );
        }
        Ok(SessionView::new(id, session))
    }

    /// Reset and drop a session.
    pub fn remove(&self, id: Uuid) -> Result<()> {
        let mut hosted = self.lock()?.remove(&id).ok_or_else(|| not_found(id))?;
        hosted.session.reset();
        Ok(())
    }

    /// Drop sessions last touched before `now - idle_ttl`. Returns how many.
    pub fn evict_idle(&self, now: DateTime<Utc>) -> Result<usize> {
        let mut sessions = self.lock()?;
        Ok(sweep(&mut sessions, now - self.idle_ttl))
    }

    fn lock(&self) -> Result<MutexGuard<'_, HashMap<Uuid, HostedSession>>> {
        self.sessions
            .lock()
            .map_err(|_| ApiError::Internal("session registry lock poisoned".to_string()))
    }
}

fn sweep(sessions: &mut HashMap<Uuid, HostedSession>, cutoff: DateTime<Utc>) -> usize {
    let before = sessions.len();
    sessions.retain(|_, hosted| hosted.last_touched >= cutoff);
    before - sessions.len()
}

fn not_found(id: Uuid) -> ApiError {
    ApiError::NotFound(format!("Session {}", id))
}
