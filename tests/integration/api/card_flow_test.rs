//! Card mutation integration tests
//!
//! Exercises the full mutate-commit-broadcast pipeline: every committed
//! card write must reach room members as the matching event, with the
//! originating connection excluded.

use axum::extract::{Path, State};
use axum::Json;
use uuid::Uuid;

use boardsync::backend::cards::handlers::{create_card, delete_card, move_card, update_card};
use boardsync::backend::middleware::Origin;
use boardsync::backend::server::AppState;
use boardsync::shared::{BoardEvent, CreateCard, MoveCard, UpdateCard};

use crate::common::{auth, join_room, seed_board, seed_card};

#[tokio::test]
async fn test_full_card_lifecycle_reaches_room_in_order() {
    let state = AppState::for_tests();
    let user = Uuid::new_v4();
    let board = seed_board(&state, user).await;
    let (_conn, mut rx) = join_room(&state, board.id);

    let (_, body) = create_card(
        State(state.clone()),
        auth(user),
        Origin(None),
        Path(board.id),
        Json(CreateCard {
            title: "Task".to_string(),
            column_id: board.columns[0].id,
            description: None,
            tags: None,
            order: None,
        }),
    )
    .await
    .unwrap();
    let card_id: Uuid = serde_json::from_value(body.0["card"]["id"].clone()).unwrap();

    update_card(
        State(state.clone()),
        auth(user),
        Origin(None),
        Path(card_id),
        Json(UpdateCard {
            title: Some("Renamed".to_string()),
            ..Default::default()
        }),
    )
    .await
    .unwrap();

    move_card(
        State(state.clone()),
        auth(user),
        Origin(None),
        Path(card_id),
        Json(MoveCard {
            column_id: board.columns[1].id,
            order: None,
        }),
    )
    .await
    .unwrap();

    delete_card(State(state.clone()), auth(user), Origin(None), Path(card_id))
        .await
        .unwrap();

    // Delivery preserves mutation order
    assert!(matches!(rx.recv().await, Some(BoardEvent::CardCreate(_))));
    match rx.recv().await {
        Some(BoardEvent::CardUpdate(card)) => assert_eq!(card.title, "Renamed"),
        other => panic!("expected card:update, got {other:?}"),
    }
    match rx.recv().await {
        Some(BoardEvent::CardMoved(moved)) => {
            assert_eq!(moved.card_id, card_id);
            assert_eq!(moved.column_id, board.columns[1].id);
        }
        other => panic!("expected card:moved, got {other:?}"),
    }
    match rx.recv().await {
        Some(BoardEvent::CardDelete(deleted)) => assert_eq!(deleted.id, card_id),
        other => panic!("expected card:delete, got {other:?}"),
    }

    // The card is gone from the store
    assert!(state.store.read().await.card(card_id).is_none());
}

#[tokio::test]
async fn test_origin_connection_is_excluded_from_broadcast() {
    let state = AppState::for_tests();
    let user = Uuid::new_v4();
    let board = seed_board(&state, user).await;
    let card = seed_card(&state, &board, "Task").await;

    let (mutator, mut mutator_rx) = join_room(&state, board.id);
    let (_other, mut other_rx) = join_room(&state, board.id);

    move_card(
        State(state),
        auth(user),
        Origin(Some(mutator)),
        Path(card.id),
        Json(MoveCard {
            column_id: board.columns[1].id,
            order: None,
        }),
    )
    .await
    .unwrap();

    assert!(matches!(other_rx.recv().await, Some(BoardEvent::CardMoved(_))));
    assert!(mutator_rx.try_recv().is_err());
}

#[tokio::test]
async fn test_mutations_do_not_leak_to_other_rooms() {
    let state = AppState::for_tests();
    let user = Uuid::new_v4();
    let board = seed_board(&state, user).await;
    let other_board = seed_board(&state, user).await;
    let card = seed_card(&state, &board, "Task").await;

    let (_conn, mut other_room_rx) = join_room(&state, other_board.id);

    update_card(
        State(state),
        auth(user),
        Origin(None),
        Path(card.id),
        Json(UpdateCard {
            title: Some("Renamed".to_string()),
            ..Default::default()
        }),
    )
    .await
    .unwrap();

    assert!(other_room_rx.try_recv().is_err());
}

fn spawn_update(
    state: &AppState,
    user: Uuid,
    card_id: Uuid,
    title: String,
) -> tokio::task::JoinHandle<()> {
    let state = state.clone();
    tokio::spawn(async move {
        update_card(
            State(state),
            auth(user),
            Origin(None),
            Path(card_id),
            Json(UpdateCard {
                title: Some(title),
                ..Default::default()
            }),
        )
        .await
        .unwrap();
    })
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn test_racing_updates_deliver_in_commit_order() {
    let state = AppState::for_tests();
    let user = Uuid::new_v4();
    let board = seed_board(&state, user).await;
    let card = seed_card(&state, &board, "Task").await;
    let (_conn, mut rx) = join_room(&state, board.id);

    // Two concurrent updates of the same card: the event delivered last
    // must carry the title that actually won in the store, every time.
    for round in 0..200 {
        let a = spawn_update(&state, user, card.id, format!("A{round}"));
        let b = spawn_update(&state, user, card.id, format!("B{round}"));
        a.await.unwrap();
        b.await.unwrap();

        let _first = rx.recv().await.unwrap();
        let last = match rx.recv().await {
            Some(BoardEvent::CardUpdate(card)) => card,
            other => panic!("expected card:update, got {other:?}"),
        };
        let committed = state.store.read().await.card(card.id).unwrap().title.clone();
        assert_eq!(last.title, committed, "round {round}");
    }
}

#[tokio::test]
async fn test_activity_recorded_for_each_mutation() {
    let state = AppState::for_tests();
    let user = Uuid::new_v4();
    let board = seed_board(&state, user).await;
    let card = seed_card(&state, &board, "Task").await;

    delete_card(State(state.clone()), auth(user), Origin(None), Path(card.id))
        .await
        .unwrap();

    let store = state.store.read().await;
    let recent = store.recent_activities(10);
    assert!(recent.iter().any(|a| a.action.contains("deleted card")));
}
