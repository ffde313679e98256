//! Upstream Module
//!
//! Access to the remote release feed.

mod client;

pub use client::{parse_releases, FetchError, ReleaseClient, GITHUB_API_URL, PER_PAGE};
