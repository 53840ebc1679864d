/**
 * Application State Management
 *
 * This module defines the application state structure and implements
 * the `FromRef` traits for Axum state extraction.
 *
 * # Architecture
 *
 * `AppState` is the central state container:
 * - The mutation store (authoritative board/card/note/activity state)
 * - The event broadcaster (room fan-out + workspace activity channel)
 * - The optional database mirror pool
 * - The token verification secret
 *
 * # Thread Safety
 *
 * - `Arc<RwLock<BoardStore>>` allows concurrent reads with serialized writes
 * - `EventBroadcaster` and `RoomRegistry` are internally synchronized
 * - The pool is `Option<PgPool>`; handlers mirror writes only when present
 */

use std::sync::Arc;

use axum::extract::FromRef;
use sqlx::PgPool;
use tokio::sync::RwLock;

use crate::backend::realtime::EventBroadcaster;
use crate::backend::rooms::RoomRegistry;
use crate::backend::store::{db, BoardStore};
use crate::shared::{Activity, Board, Card, Note};

/// Shared store handle
pub type SharedStore = Arc<RwLock<BoardStore>>;

/// Application state shared across all handlers
#[derive(Clone)]
pub struct AppState {
    /// Authoritative in-memory store; the commit point for every mutation
    pub store: SharedStore,

    /// Broadcaster for committed mutations
    ///
    /// Owns the room registry and the workspace activity channel. Every
    /// publish must happen after the corresponding store write.
    pub broadcaster: EventBroadcaster,

    /// Database mirror pool
    ///
    /// `None` when `DATABASE_URL` is not configured; the server then runs
    /// purely in memory.
    pub db_pool: Option<PgPool>,

    /// Secret used to verify bearer tokens
    pub jwt_secret: Arc<str>,
}

impl AppState {
    /// Create state over a fresh store and registry
    pub fn new(db_pool: Option<PgPool>, jwt_secret: impl Into<Arc<str>>) -> Self {
        Self {
            store: Arc::new(RwLock::new(BoardStore::new())),
            broadcaster: EventBroadcaster::new(RoomRegistry::new()),
            db_pool,
            jwt_secret: jwt_secret.into(),
        }
    }

    /// State for tests: in-memory only, fixed secret
    pub fn for_tests() -> Self {
        Self::new(None, "test-secret")
    }

    /// Mirror a committed board write to the database, best effort
    pub fn mirror_board(&self, board: Board) {
        if let Some(pool) = self.db_pool.clone() {
            tokio::spawn(async move {
                if let Err(e) = db::save_board(&pool, &board).await {
                    tracing::warn!("[Store] Failed to mirror board {}: {:?}", board.id, e);
                }
            });
        }
    }

    /// Mirror a committed card write to the database, best effort
    pub fn mirror_card(&self, card: Card) {
        if let Some(pool) = self.db_pool.clone() {
            tokio::spawn(async move {
                if let Err(e) = db::save_card(&pool, &card).await {
                    tracing::warn!("[Store] Failed to mirror card {}: {:?}", card.id, e);
                }
            });
        }
    }

    /// Mirror a committed card deletion to the database, best effort
    pub fn mirror_card_delete(&self, card_id: uuid::Uuid) {
        if let Some(pool) = self.db_pool.clone() {
            tokio::spawn(async move {
                if let Err(e) = db::delete_card(&pool, card_id).await {
                    tracing::warn!("[Store] Failed to mirror card delete {}: {:?}", card_id, e);
                }
            });
        }
    }

    /// Mirror a committed note write to the database, best effort
    pub fn mirror_note(&self, note: Note) {
        if let Some(pool) = self.db_pool.clone() {
            tokio::spawn(async move {
                if let Err(e) = db::save_note(&pool, &note).await {
                    tracing::warn!("[Store] Failed to mirror note {}: {:?}", note.id, e);
                }
            });
        }
    }

    /// Mirror an activity append to the database, best effort
    pub fn mirror_activity(&self, activity: Activity) {
        if let Some(pool) = self.db_pool.clone() {
            tokio::spawn(async move {
                if let Err(e) = db::save_activity(&pool, &activity).await {
                    tracing::warn!("[Store] Failed to mirror activity {}: {:?}", activity.id, e);
                }
            });
        }
    }
}

/// Allow handlers to extract the shared store directly
impl FromRef<AppState> for SharedStore {
    fn from_ref(app_state: &AppState) -> Self {
        app_state.store.clone()
    }
}

/// Allow handlers to extract the broadcaster directly
impl FromRef<AppState> for EventBroadcaster {
    fn from_ref(app_state: &AppState) -> Self {
        app_state.broadcaster.clone()
    }
}

/// Allow handlers to extract the optional database pool directly
impl FromRef<AppState> for Option<PgPool> {
    fn from_ref(app_state: &AppState) -> Self {
        app_state.db_pool.clone()
    }
}
