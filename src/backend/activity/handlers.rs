/**
 * Activity Feed Handlers
 *
 * Read-side of the workspace activity feed: clients load the recent
 * entries over REST and then follow `activity:new` socket events for
 * live updates.
 */

use std::collections::HashMap;

use axum::extract::{Query, State};
use axum::Json;

use crate::backend::error::BackendError;
use crate::backend::middleware::AuthUser;
use crate::backend::server::state::AppState;

/// Default number of entries returned by the feed
const DEFAULT_LIMIT: usize = 50;

/// List recent workspace activity (GET /api/activity)
///
/// # Query Parameters
///
/// - `limit` - Maximum number of entries to return (default 50)
pub async fn list_activities(
    State(state): State<AppState>,
    _user: AuthUser,
    Query(params): Query<HashMap<String, String>>,
) -> Result<Json<serde_json::Value>, BackendError> {
    let limit = params
        .get("limit")
        .and_then(|raw| raw.parse::<usize>().ok())
        .unwrap_or(DEFAULT_LIMIT);

    let store = state.store.read().await;
    let activities = store.recent_activities(limit);

    Ok(Json(serde_json::json!({ "activities": activities })))
}
