//! Hosted study session endpoints

use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use chrono::Utc;
use recall_core::{prepare_items, shuffle_items};
use uuid::Uuid;

use crate::error::Result;
use crate::models::*;
use crate::services::study::deck_snapshot;
use crate::AppState;

/// POST /api/sessions
pub async fn start(
    State(state): State<AppState>,
    Json(payload): Json<StartSessionRequest>,
) -> Result<(StatusCode, Json<SessionView>)> {
    let mut snapshot = deck_snapshot(&state.db, payload.deck_id).await?;
    if payload.shuffle {
        shuffle_items(&mut snapshot.items, &mut rand::thread_rng());
    }

    let items = prepare_items(snapshot.items, &payload.filter, &snapshot.schedules, Utc::now());
    let view = state.sessions.start(items, payload.direction)?;
    Ok((StatusCode::CREATED, Json(view)))
}

/// GET /api/sessions/:id
pub async fn get(State(state): State<AppState>, Path(id): Path<Uuid>) -> Result<Json<SessionView>> {
    Ok(Json(state.sessions.view(id)?))
}

/// POST /api/sessions/:id/result
pub async fn record_result(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(payload): Json<RecordResultRequest>,
) -> Result<Json<SessionView>> {
    Ok(Json(state.sessions.record_result(id, payload.correct)?))
}

/// DELETE /api/sessions/:id
pub async fn delete(State(state): State<AppState>, Path(id): Path<Uuid>) -> Result<StatusCode> {
    state.sessions.remove(id)?;
    Ok(StatusCode::NO_CONTENT)
}
