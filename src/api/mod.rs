//! API Module
//!
//! HTTP handlers and routing for the release filter.
//!
//! # Endpoints
//! - `GET /releases` - Filter releases by `version`, `sort`, `from`, `to`, `breaking`
//! - `GET /stats` - Get cache statistics
//! - `GET /health` - Health check endpoint

pub mod handlers;
pub mod routes;

pub use handlers::*;
pub use routes::create_router;
