/**
 * Router Configuration
 *
 * This module provides the main router creation function that combines
 * all route configurations into a single Axum router.
 *
 * # Route Order
 *
 * 1. Socket route (`/ws`) - handles its own token since browsers cannot
 *    set headers on WebSocket upgrades
 * 2. API routes - behind the bearer-token middleware
 * 3. Fallback handler (404)
 */

use axum::Router;
use tower_http::trace::TraceLayer;

use crate::backend::middleware::auth_middleware;
use crate::backend::realtime::handle_socket_upgrade;
use crate::backend::routes::api_routes::configure_api_routes;
use crate::backend::server::state::AppState;

/// Create the Axum router with all routes configured
pub fn create_router(app_state: AppState) -> Router<()> {
    // API routes sit behind the auth middleware
    let api = configure_api_routes(Router::new()).route_layer(
        axum::middleware::from_fn_with_state(app_state.clone(), auth_middleware),
    );

    let router = Router::new()
        .route("/ws", axum::routing::get(handle_socket_upgrade))
        .merge(api)
        .layer(TraceLayer::new_for_http())
        .fallback(|| async { "404 Not Found" });

    router.with_state(app_state)
}
