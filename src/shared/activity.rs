/**
 * Activity Data Structure
 *
 * This module defines the immutable activity records that make up the
 * workspace feed. Activities are append-only: they are never mutated or
 * deleted after creation.
 */
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Kind of entity an activity refers to
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum EntityType {
    Card,
    Board,
    Note,
    User,
    Team,
}

/// A single entry in the workspace activity feed
///
/// `board_id` is optional: board-scoped actions carry it, workspace-level
/// actions (user or team changes) do not.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct Activity {
    pub id: Uuid,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub board_id: Option<Uuid>,
    pub user_id: Uuid,
    /// Human-readable action text, e.g. "created card \"Fix login\""
    pub action: String,
    pub entity_type: EntityType,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub entity_id: Option<String>,
    pub created_at: DateTime<Utc>,
}

impl Activity {
    /// Create a new activity entry timestamped now
    pub fn new(
        board_id: Option<Uuid>,
        user_id: Uuid,
        action: impl Into<String>,
        entity_type: EntityType,
        entity_id: Option<String>,
    ) -> Self {
        Self {
            id: Uuid::new_v4(),
            board_id,
            user_id,
            action: action.into(),
            entity_type,
            entity_id,
            created_at: Utc::now(),
        }
    }
}
