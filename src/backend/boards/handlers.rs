/**
 * Board Handlers
 *
 * REST surface for boards: create, list, and fetch. Board mutations are
 * not broadcast to rooms (a client opens a board before joining its
 * room); they do feed the workspace activity log.
 */

use axum::extract::{Path, State};
use axum::Json;
use uuid::Uuid;

use crate::backend::activity;
use crate::backend::error::BackendError;
use crate::backend::middleware::AuthUser;
use crate::backend::server::state::AppState;
use crate::shared::{Board, CreateBoard, EntityType};

/// Create a board (POST /api/boards)
///
/// The caller becomes the board owner and its only member; the board
/// starts with the default columns.
pub async fn create_board(
    State(state): State<AppState>,
    AuthUser(user): AuthUser,
    Json(payload): Json<CreateBoard>,
) -> Result<Json<serde_json::Value>, BackendError> {
    if payload.title.trim().is_empty() {
        return Err(BackendError::validation("title", "title cannot be empty"));
    }

    let board = Board::new(payload.title, payload.description, user.user_id);
    let board = state.store.write().await.insert_board(board);
    state.mirror_board(board.clone());

    activity::record(
        &state,
        Some(board.id),
        user.user_id,
        format!("created board \"{}\"", board.title),
        EntityType::Board,
        Some(board.id.to_string()),
    )
    .await;

    Ok(Json(serde_json::json!({ "board": board })))
}

/// List the caller's boards (GET /api/boards)
pub async fn list_boards(
    State(state): State<AppState>,
    AuthUser(user): AuthUser,
) -> Result<Json<serde_json::Value>, BackendError> {
    let store = state.store.read().await;
    let boards = store.boards_for_user(user.user_id);
    Ok(Json(serde_json::json!({ "boards": boards })))
}

/// Fetch a single board (GET /api/boards/{id})
pub async fn get_board(
    State(state): State<AppState>,
    AuthUser(user): AuthUser,
    Path(board_id): Path<Uuid>,
) -> Result<Json<serde_json::Value>, BackendError> {
    let store = state.store.read().await;
    let board = store.board(board_id).ok_or_else(|| BackendError::not_found("board"))?;

    if !board.is_member(user.user_id) {
        return Err(BackendError::forbidden("not a board member"));
    }

    Ok(Json(serde_json::json!({ "board": board })))
}
