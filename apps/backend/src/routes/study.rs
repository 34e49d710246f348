//! Study endpoints

use axum::{extract::State, Json};
use chrono::Utc;

use crate::error::{ApiError, Result};
use crate::models::*;
use crate::services::study::record_review;
use crate::AppState;

/// POST /api/study/review
///
/// Awaited counterpart of a session outcome, for clients that run their own
/// session loop. Persistence errors are returned to the caller.
pub async fn review(
    State(state): State<AppState>,
    Json(payload): Json<SubmitReviewRequest>,
) -> Result<Json<SubmitReviewResponse>> {
    state
        .db
        .get_item(payload.item_id)
        .await?
        .ok_or_else(|| ApiError::NotFound(format!("Item {}", payload.item_id)))?;

    let outcome = ReviewOutcome {
        item_id: payload.item_id,
        correct: payload.correct,
        reviewed_at: Utc::now(),
    };
    let schedule = record_review(&state.db, &outcome).await?;

    Ok(Json(SubmitReviewResponse { schedule }))
}
