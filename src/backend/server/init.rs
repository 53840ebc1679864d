/**
 * Server Initialization
 *
 * This module handles the initialization and setup of the Axum HTTP
 * server: state creation, database loading, state restoration and route
 * configuration.
 *
 * # Initialization Process
 *
 * 1. Load configuration (token secret, optional database)
 * 2. Create the store, room registry and broadcaster
 * 3. Restore persisted state into the store if a database is available
 * 4. Create and configure the router
 *
 * # State Restoration
 *
 * The in-memory store is authoritative at runtime; the database exists so
 * the server can rebuild that state across restarts. Restoration failures
 * are logged and leave the server with an empty store rather than
 * preventing startup.
 */

use axum::Router;

use crate::backend::routes::router::create_router;
use crate::backend::server::config::{load_database, load_jwt_secret};
use crate::backend::server::state::AppState;
use crate::backend::store::db;

/// Create and configure the Axum application
pub async fn create_app() -> Router<()> {
    tracing::info!("Initializing boardsync server");

    let jwt_secret = load_jwt_secret();
    let db_pool = load_database().await;

    let app_state = AppState::new(db_pool, jwt_secret);

    if app_state.db_pool.is_some() {
        restore_store(&app_state).await;
    }

    tracing::info!("Store, registry and broadcast channels initialized");

    create_router(app_state)
}

/// Restore the in-memory store from the database
///
/// Loads boards, cards, notes and the activity log. Errors are logged but
/// don't prevent server startup.
async fn restore_store(app_state: &AppState) {
    let Some(pool) = &app_state.db_pool else {
        return;
    };

    tracing::info!("Restoring state from database...");
    let mut store = app_state.store.write().await;

    match db::load_boards(pool).await {
        Ok(boards) => {
            tracing::info!("Loaded {} boards from database", boards.len());
            for board in boards {
                store.insert_board(board);
            }
        }
        Err(e) => {
            tracing::warn!("Failed to load boards (tables may not exist yet): {:?}", e);
        }
    }

    match db::load_cards(pool).await {
        Ok(cards) => {
            tracing::info!("Loaded {} cards from database", cards.len());
            for card in cards {
                store.insert_card(card);
            }
        }
        Err(e) => {
            tracing::warn!("Failed to load cards: {:?}", e);
        }
    }

    match db::load_notes(pool).await {
        Ok(notes) => {
            tracing::info!("Loaded {} notes from database", notes.len());
            for note in notes {
                store.insert_note(note);
            }
        }
        Err(e) => {
            tracing::warn!("Failed to load notes: {:?}", e);
        }
    }

    match db::load_activities(pool).await {
        Ok(activities) => {
            tracing::info!("Loaded {} activity entries from database", activities.len());
            for activity in activities {
                store.append_activity(activity);
            }
        }
        Err(e) => {
            tracing::warn!("Failed to load activities: {:?}", e);
        }
    }

    tracing::info!("State restored from database");
}
