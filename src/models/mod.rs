//! Data models for the release filter
//!
//! The release record itself plus the DTOs used for
//! serializing/deserializing HTTP query strings and response bodies.

pub mod release;
pub mod requests;
pub mod responses;

// Re-export commonly used types
pub use release::{Release, ReleaseOption};
pub use requests::ReleaseQuery;
pub use responses::{
    ErrorResponse, HealthResponse, ReleaseEntry, ReleasesResponse, StatsResponse,
};
