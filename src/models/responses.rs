//! Response DTOs for the release filter API
//!
//! Defines the structure of outgoing HTTP response bodies.

use serde::Serialize;

use crate::cache::CacheStats;
use crate::models::{Release, ReleaseOption};
use crate::present::{code_blocks, format_date, CodeBlock, DateStyle};
use crate::view::ReleaseView;

/// A release as handed to the page, with its dates already formatted.
#[derive(Debug, Clone, Serialize)]
pub struct ReleaseEntry {
    #[serde(flatten)]
    pub release: Release,
    /// Publication day, e.g. `August 20, 2024`
    pub published_date: String,
    /// Publication day and time, shown as a tooltip
    pub published_title: String,
    /// Fenced code in the notes, with highlighter hints
    pub code_blocks: Vec<CodeBlock>,
}

impl From<Release> for ReleaseEntry {
    fn from(release: Release) -> Self {
        let published_date = format_date(&release.published_at, DateStyle::Long);
        let published_title = format_date(&release.published_at, DateStyle::ShortDateTime);
        let code_blocks = code_blocks(&release.body);
        Self {
            release,
            published_date,
            published_title,
            code_blocks,
        }
    }
}

/// Response body for `GET /releases`
#[derive(Debug, Clone, Serialize)]
pub struct ReleasesResponse {
    /// Filtered and sorted releases
    pub releases: Vec<ReleaseEntry>,
    /// Bounds for the from/to selectors, oldest first
    #[serde(rename = "fromTo")]
    pub from_to: Vec<ReleaseOption>,
    /// Number of releases returned
    pub count: usize,
}

impl From<ReleaseView> for ReleasesResponse {
    fn from(view: ReleaseView) -> Self {
        let releases: Vec<ReleaseEntry> = view.releases.into_iter().map(Into::into).collect();
        Self {
            count: releases.len(),
            releases,
            from_to: view.range_options,
        }
    }
}

/// Response body for the stats endpoint (GET /stats)
#[derive(Debug, Clone, Serialize)]
pub struct StatsResponse {
    /// Number of cache hits
    pub hits: u64,
    /// Number of cache misses
    pub misses: u64,
    /// Current number of entries in cache
    pub total_entries: usize,
    /// Hit rate (hits / (hits + misses))
    pub hit_rate: f64,
}

impl From<&CacheStats> for StatsResponse {
    fn from(stats: &CacheStats) -> Self {
        Self {
            hits: stats.hits,
            misses: stats.misses,
            total_entries: stats.total_entries,
            hit_rate: stats.hit_rate(),
        }
    }
}

/// Response body for the health endpoint (GET /health)
#[derive(Debug, Clone, Serialize)]
pub struct HealthResponse {
    /// Health status (e.g., "healthy")
    pub status: String,
    /// Current timestamp in ISO 8601 format
    pub timestamp: String,
}

impl HealthResponse {
    /// Creates a new HealthResponse with current timestamp
    pub fn healthy() -> Self {
        Self {
            status: "healthy".to_string(),
            timestamp: chrono::Utc::now().to_rfc3339(),
        }
    }
}

/// Error response body for all error conditions
#[derive(Debug, Clone, Serialize)]
pub struct ErrorResponse {
    /// Error message describing what went wrong
    pub error: String,
}

impl ErrorResponse {
    pub fn new(error: impl Into<String>) -> Self {
        Self {
            error: error.into(),
        }
    }
}
