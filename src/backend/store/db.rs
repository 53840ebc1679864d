/**
 * Database Operations for Boards, Cards, Notes and Activities
 *
 * This module provides the optional PostgreSQL mirror of the in-memory
 * store. Writes are best-effort: the in-memory commit is the source of
 * truth and a failed mirror write is logged, never surfaced to the client
 * and never allowed to block a broadcast that already committed.
 *
 * Structured sub-documents (members, columns, tags) are stored as JSON
 * text columns, mirroring the document-store shape of the entities.
 */

use chrono::{DateTime, Utc};
use sqlx::PgPool;
use uuid::Uuid;

use crate::shared::{Activity, Board, Card, Column, EntityType, Member, Note};

/// Save a board to the database (insert or update)
pub async fn save_board(pool: &PgPool, board: &Board) -> Result<(), sqlx::Error> {
    let members = serde_json::to_string(&board.members)
        .map_err(|e| sqlx::Error::Encode(Box::new(e)))?;
    let columns = serde_json::to_string(&board.columns)
        .map_err(|e| sqlx::Error::Encode(Box::new(e)))?;

    sqlx::query(
        r#"
        INSERT INTO boards (id, title, description, owner_id, members, columns, created_at, updated_at)
        VALUES ($1, $2, $3, $4, $5, $6, $7, $8)
        ON CONFLICT (id) DO UPDATE SET
            title = EXCLUDED.title,
            description = EXCLUDED.description,
            members = EXCLUDED.members,
            columns = EXCLUDED.columns,
            updated_at = EXCLUDED.updated_at
        "#,
    )
    .bind(board.id)
    .bind(&board.title)
    .bind(&board.description)
    .bind(board.owner_id)
    .bind(members)
    .bind(columns)
    .bind(board.created_at)
    .bind(board.updated_at)
    .execute(pool)
    .await?;

    Ok(())
}

/// Save a card to the database (insert or update)
pub async fn save_card(pool: &PgPool, card: &Card) -> Result<(), sqlx::Error> {
    let tags = serde_json::to_string(&card.tags)
        .map_err(|e| sqlx::Error::Encode(Box::new(e)))?;

    sqlx::query(
        r#"
        INSERT INTO cards (id, board_id, column_id, title, description, tags, card_order, created_at, updated_at)
        VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9)
        ON CONFLICT (id) DO UPDATE SET
            column_id = EXCLUDED.column_id,
            title = EXCLUDED.title,
            description = EXCLUDED.description,
            tags = EXCLUDED.tags,
            card_order = EXCLUDED.card_order,
            updated_at = EXCLUDED.updated_at
        "#,
    )
    .bind(card.id)
    .bind(card.board_id)
    .bind(card.column_id)
    .bind(&card.title)
    .bind(&card.description)
    .bind(tags)
    .bind(card.order)
    .bind(card.created_at)
    .bind(card.updated_at)
    .execute(pool)
    .await?;

    Ok(())
}

/// Delete a card row
pub async fn delete_card(pool: &PgPool, card_id: Uuid) -> Result<(), sqlx::Error> {
    sqlx::query("DELETE FROM cards WHERE id = $1")
        .bind(card_id)
        .execute(pool)
        .await?;
    Ok(())
}

/// Save a note to the database (upsert keyed by board)
pub async fn save_note(pool: &PgPool, note: &Note) -> Result<(), sqlx::Error> {
    sqlx::query(
        r#"
        INSERT INTO notes (id, board_id, content, updated_at)
        VALUES ($1, $2, $3, $4)
        ON CONFLICT (board_id) DO UPDATE SET
            content = EXCLUDED.content,
            updated_at = EXCLUDED.updated_at
        "#,
    )
    .bind(note.id)
    .bind(note.board_id)
    .bind(&note.content)
    .bind(note.updated_at)
    .execute(pool)
    .await?;

    Ok(())
}

/// Append an activity record; activity rows are never updated
pub async fn save_activity(pool: &PgPool, activity: &Activity) -> Result<(), sqlx::Error> {
    let entity_type = serde_json::to_string(&activity.entity_type)
        .map_err(|e| sqlx::Error::Encode(Box::new(e)))?
        .trim_matches('"')
        .to_string();

    sqlx::query(
        r#"
        INSERT INTO activities (id, board_id, user_id, action, entity_type, entity_id, created_at)
        VALUES ($1, $2, $3, $4, $5, $6, $7)
        ON CONFLICT (id) DO NOTHING
        "#,
    )
    .bind(activity.id)
    .bind(activity.board_id)
    .bind(activity.user_id)
    .bind(&activity.action)
    .bind(entity_type)
    .bind(&activity.entity_id)
    .bind(activity.created_at)
    .execute(pool)
    .await?;

    Ok(())
}

/// Load all boards from the database
pub async fn load_boards(pool: &PgPool) -> Result<Vec<Board>, sqlx::Error> {
    #[derive(sqlx::FromRow)]
    struct BoardRow {
        id: Uuid,
        title: String,
        description: Option<String>,
        owner_id: Uuid,
        members: String,
        columns: String,
        created_at: DateTime<Utc>,
        updated_at: DateTime<Utc>,
    }

    let rows = sqlx::query_as::<_, BoardRow>(
        "SELECT id, title, description, owner_id, members, columns, created_at, updated_at
         FROM boards ORDER BY created_at ASC",
    )
    .fetch_all(pool)
    .await?;

    let mut boards = Vec::with_capacity(rows.len());
    for row in rows {
        let members: Vec<Member> = serde_json::from_str(&row.members)
            .map_err(|e| sqlx::Error::Decode(Box::new(e)))?;
        let columns: Vec<Column> = serde_json::from_str(&row.columns)
            .map_err(|e| sqlx::Error::Decode(Box::new(e)))?;
        boards.push(Board {
            id: row.id,
            title: row.title,
            description: row.description,
            owner_id: row.owner_id,
            members,
            columns,
            created_at: row.created_at,
            updated_at: row.updated_at,
        });
    }

    Ok(boards)
}

/// Load all cards from the database
pub async fn load_cards(pool: &PgPool) -> Result<Vec<Card>, sqlx::Error> {
    #[derive(sqlx::FromRow)]
    struct CardRow {
        id: Uuid,
        board_id: Uuid,
        column_id: Uuid,
        title: String,
        description: String,
        tags: String,
        card_order: i32,
        created_at: DateTime<Utc>,
        updated_at: DateTime<Utc>,
    }

    let rows = sqlx::query_as::<_, CardRow>(
        "SELECT id, board_id, column_id, title, description, tags, card_order, created_at, updated_at
         FROM cards ORDER BY created_at ASC",
    )
    .fetch_all(pool)
    .await?;

    let mut cards = Vec::with_capacity(rows.len());
    for row in rows {
        let tags: Vec<String> = serde_json::from_str(&row.tags)
            .map_err(|e| sqlx::Error::Decode(Box::new(e)))?;
        cards.push(Card {
            id: row.id,
            board_id: row.board_id,
            column_id: row.column_id,
            title: row.title,
            description: row.description,
            tags,
            order: row.card_order,
            created_at: row.created_at,
            updated_at: row.updated_at,
        });
    }

    Ok(cards)
}

/// Load all notes from the database
pub async fn load_notes(pool: &PgPool) -> Result<Vec<Note>, sqlx::Error> {
    #[derive(sqlx::FromRow)]
    struct NoteRow {
        id: Uuid,
        board_id: Uuid,
        content: String,
        updated_at: DateTime<Utc>,
    }

    let rows = sqlx::query_as::<_, NoteRow>(
        "SELECT id, board_id, content, updated_at FROM notes",
    )
    .fetch_all(pool)
    .await?;

    Ok(rows
        .into_iter()
        .map(|row| Note {
            id: row.id,
            board_id: row.board_id,
            content: row.content,
            updated_at: row.updated_at,
        })
        .collect())
}

/// Load all activity records from the database, oldest first
pub async fn load_activities(pool: &PgPool) -> Result<Vec<Activity>, sqlx::Error> {
    #[derive(sqlx::FromRow)]
    struct ActivityRow {
        id: Uuid,
        board_id: Option<Uuid>,
        user_id: Uuid,
        action: String,
        entity_type: String,
        entity_id: Option<String>,
        created_at: DateTime<Utc>,
    }

    let rows = sqlx::query_as::<_, ActivityRow>(
        "SELECT id, board_id, user_id, action, entity_type, entity_id, created_at
         FROM activities ORDER BY created_at ASC",
    )
    .fetch_all(pool)
    .await?;

    let mut activities = Vec::with_capacity(rows.len());
    for row in rows {
        let entity_type: EntityType =
            serde_json::from_str(&format!("\"{}\"", row.entity_type))
                .map_err(|e| sqlx::Error::Decode(Box::new(e)))?;
        activities.push(Activity {
            id: row.id,
            board_id: row.board_id,
            user_id: row.user_id,
            action: row.action,
            entity_type,
            entity_id: row.entity_id,
            created_at: row.created_at,
        });
    }

    Ok(activities)
}
