//! Board lifecycle integration tests

use axum::extract::{Path, State};
use axum::Json;
use uuid::Uuid;

use boardsync::backend::boards::handlers::{create_board, get_board, list_boards};
use boardsync::backend::error::BackendError;
use boardsync::backend::server::AppState;
use boardsync::shared::CreateBoard;

use crate::common::auth;

async fn create(state: &AppState, user: Uuid, title: &str) -> Uuid {
    let body = create_board(
        State(state.clone()),
        auth(user),
        Json(CreateBoard {
            title: title.to_string(),
            description: None,
        }),
    )
    .await
    .unwrap();
    serde_json::from_value(body.0["board"]["id"].clone()).unwrap()
}

#[tokio::test]
async fn test_listing_only_shows_member_boards() {
    let state = AppState::for_tests();
    let alice = Uuid::new_v4();
    let bob = Uuid::new_v4();

    create(&state, alice, "Alice's board").await;
    create(&state, bob, "Bob's board").await;

    let body = list_boards(State(state), auth(alice)).await.unwrap();
    let boards = body.0["boards"].as_array().unwrap().clone();
    assert_eq!(boards.len(), 1);
    assert_eq!(boards[0]["title"], "Alice's board");
}

#[tokio::test]
async fn test_non_member_cannot_fetch_board() {
    let state = AppState::for_tests();
    let owner = Uuid::new_v4();
    let board_id = create(&state, owner, "Private").await;

    let result = get_board(State(state), auth(Uuid::new_v4()), Path(board_id)).await;
    assert!(matches!(result, Err(BackendError::Forbidden { .. })));
}

#[tokio::test]
async fn test_unknown_board_is_not_found() {
    let state = AppState::for_tests();
    let result = get_board(State(state), auth(Uuid::new_v4()), Path(Uuid::new_v4())).await;
    assert!(matches!(result, Err(BackendError::NotFound { .. })));
}

#[tokio::test]
async fn test_new_board_starts_with_default_columns() {
    let state = AppState::for_tests();
    let owner = Uuid::new_v4();
    let board_id = create(&state, owner, "Sprint").await;

    let body = get_board(State(state), auth(owner), Path(board_id)).await.unwrap();
    let columns = body.0["board"]["columns"].as_array().unwrap().clone();
    assert_eq!(columns.len(), 3);
    assert_eq!(columns[0]["title"], "To Do");
    assert_eq!(columns[2]["title"], "Done");
}
