//! Routes
//!
//! HTTP route configuration and router assembly.
//!
//! - **`router`** - Main router creation
//! - **`api_routes`** - REST mutation surface

pub mod api_routes;
pub mod router;

pub use router::create_router;
