//! Backend Module
//!
//! This module contains all server-side code for the boardsync
//! application: an Axum HTTP server whose mutation handlers commit to the
//! in-memory store and then fan typed events out to board rooms over
//! WebSockets.
//!
//! # Architecture
//!
//! The backend is organized into focused submodules:
//!
//! - **`server`** - Server initialization, application state, configuration
//! - **`routes`** - HTTP route configuration and router assembly
//! - **`store`** - Mutation store (in-memory commit point + database mirror)
//! - **`rooms`** - Room membership registry
//! - **`realtime`** - Event broadcasting and the socket endpoint
//! - **`activity`** - Activity recorder and feed handlers
//! - **`boards`**, **`cards`**, **`notes`** - REST mutation handlers
//! - **`auth`** - Bearer-token verification
//! - **`middleware`** - Request middleware
//! - **`error`** - Backend-specific error types
//!
//! # Data Flow
//!
//! ```text
//! HTTP mutation -> store write (commit) -> broadcaster publish
//!     -> room registry fan-out -> socket delivery -> client cache apply
//! ```
//!
//! The activity recorder taps the same commit point in parallel and
//! publishes on the workspace-wide channel.

pub mod activity;
pub mod auth;
pub mod boards;
pub mod cards;
pub mod error;
pub mod middleware;
pub mod notes;
pub mod realtime;
pub mod rooms;
pub mod routes;
pub mod server;
pub mod store;
