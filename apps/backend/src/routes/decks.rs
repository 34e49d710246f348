//! Deck endpoints

use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use chrono::Utc;
use recall_core::{deck_stats, due_items};

use crate::error::{ApiError, Result};
use crate::models::*;
use crate::services::study::deck_snapshot;
use crate::AppState;

/// GET /api/decks
pub async fn list(State(state): State<AppState>) -> Result<Json<DeckListResponse>> {
    let decks = state.db.list_decks().await?;
    Ok(Json(DeckListResponse { decks }))
}

/// POST /api/decks
pub async fn create(
    State(state): State<AppState>,
    Json(payload): Json<CreateDeckRequest>,
) -> Result<(StatusCode, Json<DbDeck>)> {
    let name = payload.name.trim();
    if name.is_empty() {
        return Err(ApiError::BadRequest("Deck name must not be empty".to_string()));
    }

    let deck = state
        .db
        .create_deck(name, payload.description.as_deref())
        .await?;
    tracing::info!(deck_id = deck.id, "created deck");
    Ok((StatusCode::CREATED, Json(deck)))
}

/// GET /api/decks/:id
pub async fn get(State(state): State<AppState>, Path(deck_id): Path<i64>) -> Result<Json<DbDeck>> {
    let deck = state
        .db
        .get_deck(deck_id)
        .await?
        .ok_or_else(|| ApiError::NotFound(format!("Deck {}", deck_id)))?;
    Ok(Json(deck))
}

/// DELETE /api/decks/:id
pub async fn delete(State(state): State<AppState>, Path(deck_id): Path<i64>) -> Result<StatusCode> {
    if !state.db.delete_deck(deck_id).await? {
        return Err(ApiError::NotFound(format!("Deck {}", deck_id)));
    }
    tracing::info!(deck_id, "deleted deck");
    Ok(StatusCode::NO_CONTENT)
}

/// GET /api/decks/:id/due
pub async fn due(State(state): State<AppState>, Path(deck_id): Path<i64>) -> Result<Json<Vec<Item>>> {
    let snapshot = deck_snapshot(&state.db, deck_id).await?;
    let due = due_items(&snapshot.items, &snapshot.schedules, Utc::now())
        .into_iter()
        .cloned()
        .collect();
    Ok(Json(due))
}

/// GET /api/decks/:id/stats
pub async fn stats(State(state): State<AppState>, Path(deck_id): Path<i64>) -> Result<Json<DeckStats>> {
    let snapshot = deck_snapshot(&state.db, deck_id).await?;
    let attempts: Vec<AttemptRecord> = state
        .db
        .get_attempts_for_deck(deck_id)
        .await?
        .iter()
        .map(DbAttempt::to_core)
        .collect();

    Ok(Json(deck_stats(
        &snapshot.items,
        &snapshot.schedules,
        &attempts,
        Utc::now(),
    )))
}
