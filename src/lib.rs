//! BoardSync - Main Library
//!
//! BoardSync is a real-time kanban board synchronization core. Board and
//! card mutations land over authenticated HTTP, are committed to an
//! in-memory store (mirrored to Postgres), and are fanned out over
//! WebSocket rooms so every client viewing a board converges on the same
//! state without refetching.
//!
//! # Module Structure
//!
//! The library is organized into three main modules:
//!
//! - **`shared`** - Types shared between client and server
//!   - Board, card, note and activity structures
//!   - The tagged wire event format and client frames
//!   - Error types
//!
//! - **`backend`** - Server-side code
//!   - Axum HTTP server with REST mutation handlers
//!   - Room membership registry and event broadcaster
//!   - JWT authentication, Postgres mirroring, activity feed
//!
//! - **`client`** - Client-side building blocks
//!   - Typed REST client
//!   - Reconnecting WebSocket transport with per-kind subscriptions
//!   - Reconciliation cache applying server events to a local projection
//!
//! # Usage
//!
//! ## Server-Side
//!
//! ```rust,no_run
//! use boardsync::backend::server::create_app;
//!
//! # async fn example() {
//! let app = create_app().await;
//! // Serve app with Axum
//! # }
//! ```
//!
//! ## Client-Side
//!
//! ```rust,no_run
//! use boardsync::client::{BoardApiClient, BoardSocket};
//!
//! let socket = BoardSocket::connect("ws://localhost:3000/ws", "token");
//! let api = BoardApiClient::new("http://localhost:3000", "token")
//!     .with_connection_id(socket.connection_id());
//! ```

pub mod backend;
pub mod client;
pub mod shared;
