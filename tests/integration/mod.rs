//! Integration tests exercising handlers and the realtime layer together

pub mod api;
pub mod realtime;
