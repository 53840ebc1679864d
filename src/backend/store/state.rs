/**
 * In-memory Mutation Store
 *
 * Authoritative state for boards, cards, notes and activity records. Every
 * mutation targets one entity by id and commits here before any broadcast
 * is emitted; the optional database mirror (see `store::db`) trails this
 * state and is never read back except at startup.
 */
use std::collections::HashMap;

use uuid::Uuid;

use crate::shared::{Activity, Board, Card, MoveCard, Note, UpdateCard};

/// Authoritative in-memory state for the whole workspace
///
/// Wrapped in `Arc<RwLock<BoardStore>>` by the server so that handlers can
/// take concurrent read access while writes are serialized.
#[derive(Debug, Clone, Default)]
pub struct BoardStore {
    boards: HashMap<Uuid, Board>,
    cards: HashMap<Uuid, Card>,
    /// Notes keyed by board id; at most one note per board
    notes: HashMap<Uuid, Note>,
    /// Append-only activity log, oldest first
    activities: Vec<Activity>,
}

impl BoardStore {
    pub fn new() -> Self {
        Self::default()
    }

    // --- boards ---

    /// Insert a board, replacing any previous entry with the same id
    pub fn insert_board(&mut self, board: Board) -> Board {
        self.boards.insert(board.id, board.clone());
        board
    }

    pub fn board(&self, id: Uuid) -> Option<&Board> {
        self.boards.get(&id)
    }

    /// All boards the given user is a member of, newest first
    pub fn boards_for_user(&self, user_id: Uuid) -> Vec<Board> {
        let mut boards: Vec<Board> = self
            .boards
            .values()
            .filter(|b| b.is_member(user_id))
            .cloned()
            .collect();
        boards.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        boards
    }

    // --- cards ---

    /// Insert a freshly created card
    pub fn insert_card(&mut self, card: Card) -> Card {
        self.cards.insert(card.id, card.clone());
        card
    }

    pub fn card(&self, id: Uuid) -> Option<&Card> {
        self.cards.get(&id)
    }

    /// Cards belonging to a board, ordered by `order` then creation time
    pub fn cards_for_board(&self, board_id: Uuid) -> Vec<Card> {
        let mut cards: Vec<Card> = self
            .cards
            .values()
            .filter(|c| c.board_id == board_id)
            .cloned()
            .collect();
        cards.sort_by(|a, b| a.order.cmp(&b.order).then(a.created_at.cmp(&b.created_at)));
        cards
    }

    /// Apply a partial update to a card
    ///
    /// Absent fields are left untouched. Returns the updated card, or
    /// `None` if no card with that id exists.
    pub fn update_card(&mut self, id: Uuid, update: &UpdateCard) -> Option<Card> {
        let card = self.cards.get_mut(&id)?;
        if let Some(title) = &update.title {
            card.title = title.clone();
        }
        if let Some(description) = &update.description {
            card.description = description.clone();
        }
        if let Some(tags) = &update.tags {
            card.tags = tags.clone();
        }
        if let Some(order) = update.order {
            card.order = order;
        }
        card.updated_at = chrono::Utc::now();
        Some(card.clone())
    }

    /// Move a card to another column
    ///
    /// Rewrites `column_id` (and `order` when given) but never `board_id`.
    /// Returns the moved card, or `None` if no card with that id exists.
    pub fn move_card(&mut self, id: Uuid, mv: &MoveCard) -> Option<Card> {
        let card = self.cards.get_mut(&id)?;
        card.column_id = mv.column_id;
        if let Some(order) = mv.order {
            card.order = order;
        }
        card.updated_at = chrono::Utc::now();
        Some(card.clone())
    }

    /// Remove a card, returning it if it existed
    pub fn delete_card(&mut self, id: Uuid) -> Option<Card> {
        self.cards.remove(&id)
    }

    // --- notes ---

    pub fn note(&self, board_id: Uuid) -> Option<&Note> {
        self.notes.get(&board_id)
    }

    /// Insert a note as loaded from persistence, keeping its id
    pub fn insert_note(&mut self, note: Note) {
        self.notes.insert(note.board_id, note);
    }

    /// Upsert the note for a board
    ///
    /// The note is created lazily on first write and keeps its id across
    /// subsequent updates.
    pub fn upsert_note(&mut self, board_id: Uuid, content: String) -> Note {
        let note = self
            .notes
            .entry(board_id)
            .and_modify(|n| {
                n.content = content.clone();
                n.updated_at = chrono::Utc::now();
            })
            .or_insert_with(|| Note::new(board_id, content));
        note.clone()
    }

    // --- activities ---

    /// Append an activity record; records are never mutated afterwards
    pub fn append_activity(&mut self, activity: Activity) {
        self.activities.push(activity);
    }

    /// The most recent activity entries, newest first
    pub fn recent_activities(&self, limit: usize) -> Vec<Activity> {
        self.activities.iter().rev().take(limit).cloned().collect()
    }

    pub fn activity_count(&self) -> usize {
        self.activities.len()
    }
}
