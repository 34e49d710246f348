//! Background persistence of session outcomes.

use std::sync::Arc;

use recall_core::ReviewDispatcher;
use tokio::runtime::Handle;

use crate::db::Database;
use crate::models::ReviewOutcome;
use crate::services::study;

/// Persists each outcome on a spawned task.
///
/// `dispatch` never waits for the database. Failures are logged and dropped:
/// a lost update degrades scheduling but never the session that produced it.
pub struct PersistenceDispatcher {
    db: Arc<Database>,
    runtime: Handle,
}

impl PersistenceDispatcher {
    pub fn new(db: Arc<Database>, runtime: Handle) -> Self {
        Self { db, runtime }
    }
}

impl ReviewDispatcher for PersistenceDispatcher {
    fn dispatch(&self, outcome: ReviewOutcome) {
        let db = Arc::clone(&self.db);
        self.runtime.spawn(async move {
            if let Err(e) = study::update_schedule(&db, &outcome).await {
                tracing::warn!(item_id = outcome.item_id, "schedule update failed: {}", e);
            }
            if let Err(e) = db.insert_attempt(&outcome.to_attempt()).await {
                tracing::warn!(item_id = outcome.item_id, "attempt log append failed: {}", e);
            }
        });
    }
}
