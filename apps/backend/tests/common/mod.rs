//! Common test utilities and fixtures for integration tests.
//!
//! Tests marked `#[ignore = "requires database"]` need a PostgreSQL database
//! (set DATABASE_URL). Everything else runs against a lazily connected pool
//! that is never used.

pub mod fixtures;

use std::sync::Arc;
use std::time::Duration;

use axum::Router;
use axum_test::TestServer;
use sqlx::postgres::PgPoolOptions;

use recall_backend::db::Database;
use recall_backend::{router, AppState};

pub fn session_idle_ttl() -> chrono::Duration {
    chrono::Duration::hours(4)
}

/// Test context containing database connection and router.
pub struct TestContext {
    pub db: Arc<Database>,
    app: Router,
}

impl TestContext {
    /// Create a context backed by the database at DATABASE_URL.
    ///
    /// # Panics
    /// Panics if DATABASE_URL is not set or database connection fails.
    pub async fn new() -> Self {
        dotenvy::dotenv().ok();

        let database_url =
            std::env::var("DATABASE_URL").expect("DATABASE_URL must be set for integration tests");

        let db = Database::connect(&database_url, 5)
            .await
            .expect("Failed to connect to test database");

        db.run_migrations()
            .await
            .expect("Failed to run migrations");

        Self::with_database(db)
    }

    /// Create a context whose pool never connects.
    ///
    /// Every query fails quickly, so only routes that do not touch the
    /// database succeed.
    pub fn without_database() -> Self {
        let pool = PgPoolOptions::new()
            .acquire_timeout(Duration::from_millis(200))
            .connect_lazy("postgres://unused@127.0.0.1:1/unused")
            .expect("lazy pool");
        Self::with_database(Database::from_pool(pool))
    }

    fn with_database(db: Database) -> Self {
        let db = Arc::new(db);
        let app = router(AppState::new(db.clone(), session_idle_ttl()));
        Self { db, app }
    }

    pub fn server(&self) -> TestServer {
        TestServer::new(self.app.clone()).expect("test server")
    }

    /// Create a deck and return its id.
    pub async fn create_deck(&self, name: &str) -> i64 {
        self.db
            .create_deck(name, None)
            .await
            .expect("Failed to create test deck")
            .id
    }

    /// Create `count` items in a deck and return their ids in order.
    pub async fn create_items(&self, deck_id: i64, count: usize, tags: &[&str]) -> Vec<i64> {
        let tags: Vec<String> = tags.iter().map(|t| t.to_string()).collect();
        let mut ids = Vec::with_capacity(count);
        for i in 1..=count {
            let item = self
                .db
                .create_item(deck_id, &format!("Front {}", i), &format!("Back {}", i), &tags)
                .await
                .expect("Failed to create test item");
            ids.push(item.id);
        }
        ids
    }

    /// Remove a deck and everything under it.
    pub async fn cleanup_deck(&self, deck_id: i64) {
        let _ = self.db.delete_deck(deck_id).await;
    }
}
