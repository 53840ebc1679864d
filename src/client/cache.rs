/**
 * Client Reconciliation Cache
 *
 * Per-client in-memory projection of board state. Incoming socket events
 * are applied to this cache to keep it consistent with the server
 * without refetching. The cache is a copy, never the source of truth: on
 * ambiguity the server projection wins.
 *
 * # Reconciliation Rules
 *
 * Events may arrive out of order relative to REST responses (a socket
 * `card:create` can land before the HTTP create response resolves), and
 * delivery is at-least-once, so every rule is idempotent and tolerant of
 * unknown ids:
 *
 * - `card:create` - append, unless a card with that id already exists
 * - `card:update` - replace by id; a miss is a missed-create race and
 *   becomes an implicit append
 * - `card:delete` - remove by id; absence is not an error
 * - `card:moved` - rewrite only `column_id` of the matching card
 *
 * There is no revision counter on update/move events, so concurrent
 * last-write-wins cannot be distinguished from out-of-order delivery;
 * the cache applies events in arrival order.
 */

use uuid::Uuid;

use crate::shared::{Activity, Board, BoardEvent, Card};

/// Client-side projection of the currently open board
#[derive(Debug, Clone, Default)]
pub struct BoardCache {
    /// Cards of the current board, in arrival/position order
    pub cards: Vec<Card>,
    /// Board metadata, absent until a board is opened
    pub current_board: Option<Board>,
}

impl BoardCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// Open a board: replace the projection wholesale with the REST
    /// snapshot
    pub fn load(&mut self, board: Board, cards: Vec<Card>) {
        self.current_board = Some(board);
        self.cards = cards;
    }

    /// Clear the projection (board closed)
    pub fn clear(&mut self) {
        self.current_board = None;
        self.cards.clear();
    }

    /// Apply one server-originated event to the projection
    ///
    /// Never panics; events referencing unknown ids are recovered as
    /// described in the module docs. `activity:new` does not touch board
    /// state and is ignored here.
    pub fn apply(&mut self, event: &BoardEvent) {
        match event {
            BoardEvent::CardCreate(card) => self.apply_create(card),
            BoardEvent::CardUpdate(card) => self.apply_update(card),
            BoardEvent::CardDelete(deleted) => self.apply_delete(deleted.id),
            BoardEvent::CardMoved(moved) => self.apply_moved(moved.card_id, moved.column_id),
            BoardEvent::ActivityNew(_) => {}
        }
    }

    fn apply_create(&mut self, card: &Card) {
        // Duplicate-safe: at-least-once delivery means the same create
        // can arrive twice
        if self.find(card.id).is_none() {
            self.cards.push(card.clone());
        }
    }

    fn apply_update(&mut self, card: &Card) {
        match self.find(card.id) {
            Some(index) => self.cards[index] = card.clone(),
            // Missed-create race: treat as an implicit append
            None => self.cards.push(card.clone()),
        }
    }

    fn apply_delete(&mut self, id: Uuid) {
        self.cards.retain(|c| c.id != id);
    }

    fn apply_moved(&mut self, card_id: Uuid, column_id: Uuid) {
        if let Some(index) = self.find(card_id) {
            self.cards[index].column_id = column_id;
        }
    }

    /// Fetch a card from the projection by id
    pub fn card(&self, id: Uuid) -> Option<&Card> {
        self.find(id).map(|index| &self.cards[index])
    }

    fn find(&self, id: Uuid) -> Option<usize> {
        self.cards.iter().position(|c| c.id == id)
    }
}

/// Apply an activity event to a feed projection, newest first
///
/// Mirrors the cache rules for the workspace feed: duplicate-safe by id.
pub fn apply_activity(feed: &mut Vec<Activity>, activity: &Activity) {
    if !feed.iter().any(|a| a.id == activity.id) {
        feed.insert(0, activity.clone());
    }
}
