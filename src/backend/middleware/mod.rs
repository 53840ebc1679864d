//! Request Middleware
//!
//! Middleware applied to the mutation routes: bearer-token authentication
//! and extraction of the optional originating connection id.

pub mod auth;

pub use auth::{auth_middleware, AuthUser, Origin, CONNECTION_ID_HEADER};
