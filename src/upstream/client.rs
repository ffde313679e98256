//! GitHub releases API client
//!
//! Fetches one page of releases and validates each record into a [`Release`]
//! before it reaches the cache or the filters.

use reqwest::{header, Client, StatusCode};
use serde::Deserialize;
use thiserror::Error;
use tracing::{info, warn};

use crate::models::Release;

/// Base URL of the public GitHub REST API
pub const GITHUB_API_URL: &str = "https://api.github.com";

/// Releases requested per page
pub const PER_PAGE: u32 = 10;

/// GitHub rejects requests without a user agent
const CLIENT_USER_AGENT: &str = concat!(env!("CARGO_PKG_NAME"), "/", env!("CARGO_PKG_VERSION"));

/// Errors that can occur when fetching releases
#[derive(Debug, Error)]
pub enum FetchError {
    /// Upstream answered with a non-success status
    #[error("Failed to fetch releases: upstream responded with {0}")]
    Status(StatusCode),

    /// HTTP request failed
    #[error("HTTP request failed: {0}")]
    Request(#[from] reqwest::Error),

    /// Failed to parse JSON response
    #[error("Failed to parse JSON response: {0}")]
    Parse(#[from] serde_json::Error),

    /// A record lacks a field every release must have
    #[error("Invalid release record: {0}")]
    InvalidRecord(String),
}

/// A release object as the API sends it. Everything but `id` may be null.
#[derive(Debug, Deserialize)]
struct RawRelease {
    id: Option<u64>,
    name: Option<String>,
    tag_name: Option<String>,
    body: Option<String>,
    published_at: Option<String>,
    html_url: Option<String>,
}

impl TryFrom<RawRelease> for Release {
    type Error = FetchError;

    fn try_from(raw: RawRelease) -> Result<Self, Self::Error> {
        let id = raw
            .id
            .ok_or_else(|| FetchError::InvalidRecord("missing id".to_string()))?;

        // Releases created without a title come back with `name: null`
        let name = raw
            .name
            .filter(|name| !name.is_empty())
            .or(raw.tag_name)
            .ok_or_else(|| FetchError::InvalidRecord(format!("release {} has no name or tag", id)))?;

        Ok(Release {
            id,
            name,
            body: raw.body.unwrap_or_default(),
            published_at: raw.published_at.unwrap_or_default(),
            html_url: raw.html_url,
        })
    }
}

/// Client for the releases of one repository
#[derive(Debug, Clone)]
pub struct ReleaseClient {
    /// HTTP client for making requests
    http_client: Client,
    /// Base URL for the API (allows override for testing)
    base_url: String,
    owner: String,
    repo: String,
}

impl ReleaseClient {
    /// Creates a client for `owner/repo` on the public GitHub API
    pub fn new(owner: impl Into<String>, repo: impl Into<String>) -> Self {
        Self::with_base_url(GITHUB_API_URL, owner, repo)
    }

    /// Creates a client against a custom API root
    pub fn with_base_url(
        base_url: impl Into<String>,
        owner: impl Into<String>,
        repo: impl Into<String>,
    ) -> Self {
        Self {
            http_client: Client::new(),
            base_url: base_url.into().trim_end_matches('/').to_string(),
            owner: owner.into(),
            repo: repo.into(),
        }
    }

    /// URL of one page of releases
    pub fn releases_url(&self, page: u32) -> String {
        format!(
            "{}/repos/{}/{}/releases?page={}&per_page={}",
            self.base_url, self.owner, self.repo, page, PER_PAGE
        )
    }

    /// Fetch one page of releases, newest first
    ///
    /// # Returns
    /// * `Ok(Vec<Release>)` - Validated releases in upstream order
    /// * `Err(FetchError)` - If the request fails, upstream answers with a
    ///   non-success status, or a record is malformed
    pub async fn fetch_releases(&self, page: u32) -> Result<Vec<Release>, FetchError> {
        let url = self.releases_url(page);
        info!(%url, "fetching releases");

        let response = self
            .http_client
            .get(&url)
            .header(header::USER_AGENT, CLIENT_USER_AGENT)
            .header(header::ACCEPT, "application/vnd.github+json")
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            warn!(%url, %status, "upstream rejected release request");
            return Err(FetchError::Status(status));
        }

        let text = response.text().await?;
        parse_releases(&text)
    }
}

/// Parse and validate a JSON array of release objects
pub fn parse_releases(text: &str) -> Result<Vec<Release>, FetchError> {
    let raw: Vec<RawRelease> = serde_json::from_str(text)?;
    raw.into_iter().map(Release::try_from).collect()
}
