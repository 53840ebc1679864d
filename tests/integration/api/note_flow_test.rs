//! Board note integration tests

use axum::extract::{Path, State};
use axum::Json;
use uuid::Uuid;

use boardsync::backend::error::BackendError;
use boardsync::backend::notes::handlers::{get_note, put_note};
use boardsync::backend::server::AppState;
use boardsync::shared::UpsertNote;

use crate::common::{auth, join_room, seed_board};

#[tokio::test]
async fn test_note_requires_membership() {
    let state = AppState::for_tests();
    let owner = Uuid::new_v4();
    let board = seed_board(&state, owner).await;

    let result = put_note(
        State(state),
        auth(Uuid::new_v4()),
        Path(board.id),
        Json(UpsertNote {
            content: "intruder".to_string(),
        }),
    )
    .await;

    assert!(matches!(result, Err(BackendError::Forbidden { .. })));
}

#[tokio::test]
async fn test_note_update_is_not_broadcast_to_room() {
    let state = AppState::for_tests();
    let owner = Uuid::new_v4();
    let board = seed_board(&state, owner).await;
    let (_conn, mut rx) = join_room(&state, board.id);

    put_note(
        State(state.clone()),
        auth(owner),
        Path(board.id),
        Json(UpsertNote {
            content: "quiet".to_string(),
        }),
    )
    .await
    .unwrap();

    // Notes feed the activity log only; no room event
    assert!(rx.try_recv().is_err());
    let store = state.store.read().await;
    assert!(store
        .recent_activities(10)
        .iter()
        .any(|a| a.action.contains("board note")));
}

#[tokio::test]
async fn test_note_survives_for_later_readers() {
    let state = AppState::for_tests();
    let owner = Uuid::new_v4();
    let board = seed_board(&state, owner).await;

    put_note(
        State(state.clone()),
        auth(owner),
        Path(board.id),
        Json(UpsertNote {
            content: "remember this".to_string(),
        }),
    )
    .await
    .unwrap();

    let body = get_note(State(state), auth(owner), Path(board.id)).await.unwrap();
    assert_eq!(body.0["note"]["content"], "remember this");
}
