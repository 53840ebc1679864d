/**
 * Card Handlers
 *
 * REST surface for card mutations. Every handler follows the same shape:
 * validate, commit the write to the store, publish the matching event to
 * the board's room, then record activity. The publish happens while the
 * store's write guard is still held: writers serialize on that guard, so
 * room delivery order always matches commit order, even when two
 * mutations of the same card race. A mutation that fails never
 * publishes.
 */

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::Json;
use uuid::Uuid;

use crate::backend::activity;
use crate::backend::error::BackendError;
use crate::backend::middleware::{AuthUser, Origin};
use crate::backend::server::state::AppState;
use crate::shared::{
    BoardEvent, Card, CardDeleted, CardMoved, CreateCard, EntityType, MoveCard, UpdateCard,
};

/// List a board's cards (GET /api/boards/{id}/cards)
pub async fn list_cards(
    State(state): State<AppState>,
    AuthUser(user): AuthUser,
    Path(board_id): Path<Uuid>,
) -> Result<Json<serde_json::Value>, BackendError> {
    let store = state.store.read().await;
    let board = store.board(board_id).ok_or_else(|| BackendError::not_found("board"))?;
    if !board.is_member(user.user_id) {
        return Err(BackendError::forbidden("not a board member"));
    }

    Ok(Json(serde_json::json!({ "cards": store.cards_for_board(board_id) })))
}

/// Create a card (POST /api/boards/{id}/cards)
///
/// Broadcasts `card:create` with the full card to the board's room after
/// the write commits.
pub async fn create_card(
    State(state): State<AppState>,
    AuthUser(user): AuthUser,
    Origin(origin): Origin,
    Path(board_id): Path<Uuid>,
    Json(payload): Json<CreateCard>,
) -> Result<(StatusCode, Json<serde_json::Value>), BackendError> {
    if payload.title.trim().is_empty() {
        return Err(BackendError::validation("title", "title cannot be empty"));
    }

    let card = {
        let mut store = state.store.write().await;
        let board = store.board(board_id).ok_or_else(|| BackendError::not_found("board"))?;
        if board.column(payload.column_id).is_none() {
            return Err(BackendError::validation("columnId", "no such column on this board"));
        }

        let mut card = Card::new(board_id, payload.column_id, payload.title);
        if let Some(description) = payload.description {
            card.description = description;
        }
        if let Some(tags) = payload.tags {
            card.tags = tags;
        }
        if let Some(order) = payload.order {
            card.order = order;
        }
        let card = store.insert_card(card);
        state
            .broadcaster
            .publish(board_id, BoardEvent::CardCreate(card.clone()), origin);
        card
    };
    state.mirror_card(card.clone());

    activity::record(
        &state,
        Some(board_id),
        user.user_id,
        format!("created card \"{}\"", card.title),
        EntityType::Card,
        Some(card.id.to_string()),
    )
    .await;

    Ok((StatusCode::CREATED, Json(serde_json::json!({ "card": card }))))
}

/// Update card fields (PATCH /api/cards/{id})
///
/// Broadcasts `card:update` with the full updated card. Column changes go
/// through the move operation instead.
pub async fn update_card(
    State(state): State<AppState>,
    AuthUser(user): AuthUser,
    Origin(origin): Origin,
    Path(card_id): Path<Uuid>,
    Json(payload): Json<UpdateCard>,
) -> Result<Json<serde_json::Value>, BackendError> {
    if let Some(title) = &payload.title {
        if title.trim().is_empty() {
            return Err(BackendError::validation("title", "title cannot be empty"));
        }
    }

    let card = {
        let mut store = state.store.write().await;
        let card = store
            .update_card(card_id, &payload)
            .ok_or_else(|| BackendError::not_found("card"))?;
        state
            .broadcaster
            .publish(card.board_id, BoardEvent::CardUpdate(card.clone()), origin);
        card
    };
    state.mirror_card(card.clone());

    activity::record(
        &state,
        Some(card.board_id),
        user.user_id,
        format!("updated card \"{}\"", card.title),
        EntityType::Card,
        Some(card.id.to_string()),
    )
    .await;

    Ok(Json(serde_json::json!({ "card": card })))
}

/// Delete a card (DELETE /api/cards/{id})
///
/// Broadcasts `card:delete` carrying only the id.
pub async fn delete_card(
    State(state): State<AppState>,
    AuthUser(user): AuthUser,
    Origin(origin): Origin,
    Path(card_id): Path<Uuid>,
) -> Result<Json<serde_json::Value>, BackendError> {
    let card = {
        let mut store = state.store.write().await;
        let card = store.delete_card(card_id).ok_or_else(|| BackendError::not_found("card"))?;
        state.broadcaster.publish(
            card.board_id,
            BoardEvent::CardDelete(CardDeleted { id: card.id }),
            origin,
        );
        card
    };
    state.mirror_card_delete(card.id);

    activity::record(
        &state,
        Some(card.board_id),
        user.user_id,
        format!("deleted card \"{}\"", card.title),
        EntityType::Card,
        Some(card.id.to_string()),
    )
    .await;

    Ok(Json(serde_json::json!({ "id": card.id })))
}

/// Move a card to another column (POST /api/cards/{id}/move)
///
/// Broadcasts `card:moved` with `{cardId, columnId}`; receivers rewrite
/// only the column membership of the card.
pub async fn move_card(
    State(state): State<AppState>,
    AuthUser(user): AuthUser,
    Origin(origin): Origin,
    Path(card_id): Path<Uuid>,
    Json(payload): Json<MoveCard>,
) -> Result<Json<serde_json::Value>, BackendError> {
    let card = {
        let mut store = state.store.write().await;
        let board_id = store
            .card(card_id)
            .map(|c| c.board_id)
            .ok_or_else(|| BackendError::not_found("card"))?;
        let board = store
            .board(board_id)
            .ok_or_else(|| BackendError::state("card references missing board"))?;
        if board.column(payload.column_id).is_none() {
            return Err(BackendError::validation("columnId", "no such column on this board"));
        }

        let card = store
            .move_card(card_id, &payload)
            .ok_or_else(|| BackendError::not_found("card"))?;
        state.broadcaster.publish(
            card.board_id,
            BoardEvent::CardMoved(CardMoved {
                card_id: card.id,
                column_id: card.column_id,
            }),
            origin,
        );
        card
    };
    state.mirror_card(card.clone());

    activity::record(
        &state,
        Some(card.board_id),
        user.user_id,
        format!("moved card \"{}\"", card.title),
        EntityType::Card,
        Some(card.id.to_string()),
    )
    .await;

    Ok(Json(serde_json::json!({ "card": card })))
}
