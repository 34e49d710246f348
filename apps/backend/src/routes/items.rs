//! Item endpoints

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Json,
};

use crate::error::{ApiError, Result};
use crate::models::*;
use crate::services::study::ensure_deck;
use crate::AppState;

/// GET /api/decks/:id/items
pub async fn list(
    State(state): State<AppState>,
    Path(deck_id): Path<i64>,
    Query(query): Query<ItemListQuery>,
) -> Result<Json<Vec<Item>>> {
    ensure_deck(&state.db, deck_id).await?;

    let tags = query.tag_list();
    let items = state
        .db
        .list_items(deck_id)
        .await?
        .iter()
        .map(DbItem::to_core_item)
        .filter(|item| tags.is_empty() || item.has_any_tag(&tags))
        .collect();
    Ok(Json(items))
}

/// POST /api/decks/:id/items
pub async fn create(
    State(state): State<AppState>,
    Path(deck_id): Path<i64>,
    Json(payload): Json<CreateItemRequest>,
) -> Result<(StatusCode, Json<Item>)> {
    if payload.front_text.trim().is_empty() || payload.back_text.trim().is_empty() {
        return Err(ApiError::BadRequest(
            "Both front_text and back_text are required".to_string(),
        ));
    }
    ensure_deck(&state.db, deck_id).await?;

    let tags: Vec<String> = payload
        .tags
        .iter()
        .map(|t| t.trim().to_string())
        .filter(|t| !t.is_empty())
        .collect();
    let item = state
        .db
        .create_item(deck_id, &payload.front_text, &payload.back_text, &tags)
        .await?;
    Ok((StatusCode::CREATED, Json(item.to_core_item())))
}
