/**
 * Card Data Structure
 *
 * This module defines the Card struct, the unit of work on a kanban board,
 * and the request payloads used to mutate cards over the REST surface.
 *
 * A card belongs to exactly one board and exactly one column at any
 * instant. Moving a card rewrites `column_id` (and possibly `order`) but
 * never `board_id`, which is immutable after creation.
 */
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A single card on a board
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct Card {
    pub id: Uuid,
    /// Owning board; immutable after creation
    pub board_id: Uuid,
    /// Current column membership; rewritten by move events
    pub column_id: Uuid,
    pub title: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub tags: Vec<String>,
    #[serde(default)]
    pub order: i32,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Card {
    /// Create a new card in the given board and column
    pub fn new(board_id: Uuid, column_id: Uuid, title: String) -> Self {
        let now = Utc::now();
        Self {
            id: Uuid::new_v4(),
            board_id,
            column_id,
            title,
            description: String::new(),
            tags: Vec::new(),
            order: 0,
            created_at: now,
            updated_at: now,
        }
    }
}

/// Payload for creating a card (POST /api/boards/{id}/cards)
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateCard {
    pub title: String,
    pub column_id: Uuid,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub tags: Option<Vec<String>>,
    #[serde(default)]
    pub order: Option<i32>,
}

/// Payload for updating card fields (PATCH /api/cards/{id})
///
/// Absent fields are left untouched. `board_id` and `column_id` are not
/// updatable through this payload; column changes go through the move
/// operation so that they broadcast as `card:moved`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateCard {
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub tags: Option<Vec<String>>,
    #[serde(default)]
    pub order: Option<i32>,
}

/// Payload for moving a card between columns (POST /api/cards/{id}/move)
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MoveCard {
    pub column_id: Uuid,
    #[serde(default)]
    pub order: Option<i32>,
}
