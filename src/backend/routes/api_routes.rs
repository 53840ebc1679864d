/**
 * API Route Handlers
 *
 * This module wires up the REST mutation surface:
 *
 * ## Boards
 * - `POST /api/boards` - Create a board
 * - `GET /api/boards` - List the caller's boards
 * - `GET /api/boards/{id}` - Fetch a board
 *
 * ## Cards
 * - `GET /api/boards/{id}/cards` - List a board's cards
 * - `POST /api/boards/{id}/cards` - Create a card
 * - `PATCH /api/cards/{id}` - Update card fields
 * - `DELETE /api/cards/{id}` - Delete a card
 * - `POST /api/cards/{id}/move` - Move a card between columns
 *
 * ## Notes
 * - `GET /api/boards/{id}/note` - Fetch the board note
 * - `PUT /api/boards/{id}/note` - Upsert the board note
 *
 * ## Activity
 * - `GET /api/activity` - Recent workspace activity
 *
 * All routes require a bearer token; the auth middleware is applied in
 * the router assembly.
 */

use axum::Router;

use crate::backend::activity::handlers::list_activities;
use crate::backend::boards::handlers::{create_board, get_board, list_boards};
use crate::backend::cards::handlers::{create_card, delete_card, list_cards, move_card, update_card};
use crate::backend::notes::handlers::{get_note, put_note};
use crate::backend::server::state::AppState;

/// Configure API routes
pub fn configure_api_routes(router: Router<AppState>) -> Router<AppState> {
    router
        // Board endpoints
        .route(
            "/api/boards",
            axum::routing::post(create_board).get(list_boards),
        )
        .route("/api/boards/{id}", axum::routing::get(get_board))
        // Card endpoints
        .route(
            "/api/boards/{id}/cards",
            axum::routing::get(list_cards).post(create_card),
        )
        .route(
            "/api/cards/{id}",
            axum::routing::patch(update_card).delete(delete_card),
        )
        .route("/api/cards/{id}/move", axum::routing::post(move_card))
        // Note endpoints
        .route(
            "/api/boards/{id}/note",
            axum::routing::get(get_note).put(put_note),
        )
        // Activity feed
        .route("/api/activity", axum::routing::get(list_activities))
}
