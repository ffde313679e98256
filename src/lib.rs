//! Release Filter - release notes browser backend
//!
//! Fetches a repository's release notes, caches them briefly, and filters
//! them by major version, id range and breaking changes.

pub mod api;
pub mod cache;
pub mod config;
pub mod error;
pub mod models;
pub mod present;
pub mod upstream;
pub mod view;

pub use api::AppState;
pub use config::Config;
