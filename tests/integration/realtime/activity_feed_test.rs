//! Workspace activity feed integration tests
//!
//! Activity events are workspace-wide: delivery does not depend on room
//! membership.

use axum::extract::{Query, State};
use std::collections::HashMap;
use uuid::Uuid;

use boardsync::backend::activity::{self, handlers::list_activities};
use boardsync::backend::server::AppState;
use boardsync::shared::EntityType;

use crate::common::auth;

#[tokio::test]
async fn test_activity_reaches_subscribers_outside_any_room() {
    let state = AppState::for_tests();
    let mut feed = state.broadcaster.subscribe_activity();

    let user = Uuid::new_v4();
    activity::record(&state, None, user, "joined the workspace", EntityType::User, None).await;

    let received = feed.recv().await.unwrap();
    assert_eq!(received.user_id, user);
    assert_eq!(received.action, "joined the workspace");
}

#[tokio::test]
async fn test_record_appends_to_store_and_feed() {
    let state = AppState::for_tests();
    let board_id = Uuid::new_v4();
    let mut feed = state.broadcaster.subscribe_activity();

    let recorded = activity::record(
        &state,
        Some(board_id),
        Uuid::new_v4(),
        "created card \"Task\"",
        EntityType::Card,
        Some(Uuid::new_v4().to_string()),
    )
    .await;

    assert_eq!(feed.recv().await.unwrap().id, recorded.id);
    assert_eq!(state.store.read().await.activity_count(), 1);
}

#[tokio::test]
async fn test_list_activities_caps_at_requested_limit() {
    let state = AppState::for_tests();
    let user = Uuid::new_v4();
    for i in 0..10 {
        activity::record(&state, None, user, format!("action {i}"), EntityType::User, None).await;
    }

    let mut params = HashMap::new();
    params.insert("limit".to_string(), "3".to_string());
    let body = list_activities(State(state), auth(user), Query(params)).await.unwrap();

    let activities = body.0["activities"].as_array().unwrap().clone();
    assert_eq!(activities.len(), 3);
    // Newest first
    assert_eq!(activities[0]["action"], "action 9");
}
