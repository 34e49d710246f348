//! PostgreSQL database operations

use sqlx::{postgres::PgPoolOptions, PgPool};

use crate::error::{ApiError, Result};
use crate::models::*;

/// Database wrapper with connection pool
#[derive(Clone)]
pub struct Database {
    pool: PgPool,
}

impl Database {
    /// Connect to PostgreSQL and create connection pool
    pub async fn connect(database_url: &str, max_connections: u32) -> Result<Self> {
        let pool = PgPoolOptions::new()
            .max_connections(max_connections)
            .connect(database_url)
            .await?;

        Ok(Self { pool })
    }

    /// Wrap an existing pool (e.g. one created with `connect_lazy`)
    pub fn from_pool(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Run database migrations
    pub async fn run_migrations(&self) -> Result<()> {
        sqlx::migrate!("./migrations")
            .run(&self.pool)
            .await
            .map_err(|e| ApiError::Internal(format!("migration failed: {}", e)))?;
        Ok(())
    }

    // === Deck Repository ===

    pub async fn create_deck(&self, name: &str, description: Option<&str>) -> Result<DbDeck> {
        let deck = sqlx::query_as::<_, DbDeck>(
            r#"
            INSERT INTO decks (name, description)
            VALUES ($1, $2)
            RETURNING id, name, description, created_at
            "#,
        )
        .bind(name)
        .bind(description)
        .fetch_one(&self.pool)
        .await?;

        Ok(deck)
    }

    /// List decks with their item counts
    pub async fn list_decks(&self) -> Result<Vec<DeckInfo>> {
        let decks = sqlx::query_as::<_, DeckInfo>(
            r#"
            SELECT d.id, d.name, d.description, COUNT(i.id)::INT AS item_count
            FROM decks d
            LEFT JOIN items i ON i.deck_id = d.id
            GROUP BY d.id
            ORDER BY d.id
            "#,
        )
        .fetch_all(&self.pool)
        .await?;

        Ok(decks)
    }

    pub async fn get_deck(&self, deck_id: i64) -> Result<Option<DbDeck>> {
        let deck = sqlx::query_as::<_, DbDeck>(
            "SELECT id, name, description, created_at FROM decks WHERE id = $1",
        )
        .bind(deck_id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(deck)
    }

    /// Delete a deck; items, schedules and attempts cascade
    pub async fn delete_deck(&self, deck_id: i64) -> Result<bool> {
        let result = sqlx::query("DELETE FROM decks WHERE id = $1")
            .bind(deck_id)
            .execute(&self.pool)
            .await?;

        Ok(result.rows_affected() > 0)
    }

    // === Item Repository ===

    pub async fn create_item(
        &self,
        deck_id: i64,
        front_text: &str,
        back_text: &str,
        tags: &[String],
    ) -> Result<DbItem> {
        let item = sqlx::query_as::<_, DbItem>(
            r#"
            INSERT INTO items (deck_id, front_text, back_text, tags)
            VALUES ($1, $2, $3, $4)
            RETURNING id, deck_id, front_text, back_text, tags, created_at
            "#,
        )
        .bind(deck_id)
        .bind(front_text)
        .bind(back_text)
        .bind(tags)
        .fetch_one(&self.pool)
        .await?;

        Ok(item)
    }

    /// Items of a deck in creation order
    pub async fn list_items(&self, deck_id: i64) -> Result<Vec<DbItem>> {
        let items = sqlx::query_as::<_, DbItem>(
            r#"
            SELECT id, deck_id, front_text, back_text, tags, created_at
            FROM items
            WHERE deck_id = $1
            ORDER BY id
            "#,
        )
        .bind(deck_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(items)
    }

    pub async fn get_item(&self, item_id: i64) -> Result<Option<DbItem>> {
        let item = sqlx::query_as::<_, DbItem>(
            r#"
            SELECT id, deck_id, front_text, back_text, tags, created_at
            FROM items
            WHERE id = $1
            "#,
        )
        .bind(item_id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(item)
    }

    // === Schedule Repository ===

    pub async fn get_schedule(&self, item_id: i64) -> Result<Option<DbSchedule>> {
        let schedule = sqlx::query_as::<_, DbSchedule>(
            r#"
            SELECT item_id, interval_days, ease_factor, repetitions, next_review_date
            FROM schedules
            WHERE item_id = $1
            "#,
        )
        .bind(item_id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(schedule)
    }

    /// Replace an item's schedule. Concurrent writers: last write wins.
    pub async fn upsert_schedule(&self, schedule: &DbSchedule) -> Result<()> {
        sqlx::query(
            r#"
            INSERT INTO schedules (item_id, interval_days, ease_factor, repetitions, next_review_date)
            VALUES ($1, $2, $3, $4, $5)
            ON CONFLICT (item_id) DO UPDATE SET
                interval_days = EXCLUDED.interval_days,
                ease_factor = EXCLUDED.ease_factor,
                repetitions = EXCLUDED.repetitions,
                next_review_date = EXCLUDED.next_review_date,
                updated_at = NOW()
            "#,
        )
        .bind(schedule.item_id)
        .bind(schedule.interval_days)
        .bind(schedule.ease_factor)
        .bind(schedule.repetitions)
        .bind(schedule.next_review_date)
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    pub async fn get_schedules_for_deck(&self, deck_id: i64) -> Result<Vec<DbSchedule>> {
        let schedules = sqlx::query_as::<_, DbSchedule>(
            r#"
            SELECT s.item_id, s.interval_days, s.ease_factor, s.repetitions, s.next_review_date
            FROM schedules s
            JOIN items i ON i.id = s.item_id
            WHERE i.deck_id = $1
            "#,
        )
        .bind(deck_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(schedules)
    }

    // === Attempt Log ===

    pub async fn insert_attempt(&self, attempt: &AttemptRecord) -> Result<()> {
        sqlx::query(
            r#"
            INSERT INTO attempts (item_id, correct, attempted_at)
            VALUES ($1, $2, $3)
            "#,
        )
        .bind(attempt.item_id)
        .bind(attempt.correct)
        .bind(attempt.attempted_at)
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    pub async fn get_attempts_for_deck(&self, deck_id: i64) -> Result<Vec<DbAttempt>> {
        let attempts = sqlx::query_as::<_, DbAttempt>(
            r#"
            SELECT a.id, a.item_id, a.correct, a.attempted_at
            FROM attempts a
            JOIN items i ON i.id = a.item_id
            WHERE i.deck_id = $1
            ORDER BY a.attempted_at
            "#,
        )
        .bind(deck_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(attempts)
    }
}
