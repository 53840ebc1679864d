/**
 * Note Handlers
 *
 * REST surface for the per-board note. The note is created lazily on
 * first write (upsert) and never deleted. Note writes feed the activity
 * log but are not broadcast to board rooms.
 */

use axum::extract::{Path, State};
use axum::Json;
use uuid::Uuid;

use crate::backend::activity;
use crate::backend::error::BackendError;
use crate::backend::middleware::AuthUser;
use crate::backend::server::state::AppState;
use crate::shared::{EntityType, UpsertNote};

/// Fetch a board's note (GET /api/boards/{id}/note)
pub async fn get_note(
    State(state): State<AppState>,
    AuthUser(user): AuthUser,
    Path(board_id): Path<Uuid>,
) -> Result<Json<serde_json::Value>, BackendError> {
    let store = state.store.read().await;
    let board = store.board(board_id).ok_or_else(|| BackendError::not_found("board"))?;
    if !board.is_member(user.user_id) {
        return Err(BackendError::forbidden("not a board member"));
    }

    let note = store.note(board_id).ok_or_else(|| BackendError::not_found("note"))?;
    Ok(Json(serde_json::json!({ "note": note })))
}

/// Upsert a board's note (PUT /api/boards/{id}/note)
pub async fn put_note(
    State(state): State<AppState>,
    AuthUser(user): AuthUser,
    Path(board_id): Path<Uuid>,
    Json(payload): Json<UpsertNote>,
) -> Result<Json<serde_json::Value>, BackendError> {
    let note = {
        let mut store = state.store.write().await;
        let board = store.board(board_id).ok_or_else(|| BackendError::not_found("board"))?;
        if !board.is_member(user.user_id) {
            return Err(BackendError::forbidden("not a board member"));
        }
        store.upsert_note(board_id, payload.content)
    };
    state.mirror_note(note.clone());

    activity::record(
        &state,
        Some(board_id),
        user.user_id,
        "updated the board note",
        EntityType::Note,
        Some(note.id.to_string()),
    )
    .await;

    Ok(Json(serde_json::json!({ "note": note })))
}
