//! API Handlers
//!
//! HTTP request handlers for each release filter endpoint.

use std::sync::Arc;
use tokio::sync::RwLock;

use axum::{
    extract::{Query, State},
    Json,
};
use tracing::{debug, info};

use crate::cache::{CacheStore, RELEASES_CACHE_KEY};
use crate::config::Config;
use crate::error::Result;
use crate::models::{HealthResponse, Release, ReleaseQuery, ReleasesResponse, StatsResponse};
use crate::upstream::{FetchError, ReleaseClient};
use crate::view::derive_view;

/// Application state shared across all handlers.
///
/// Created once at startup; the cache lives for the whole process and is
/// never reset between requests.
#[derive(Clone)]
pub struct AppState {
    /// Thread-safe cache of the fetched release page
    pub cache: Arc<RwLock<CacheStore<Vec<Release>>>>,
    /// Upstream release feed
    pub client: ReleaseClient,
    /// Lifetime of a cached release page in seconds
    pub cache_ttl: u64,
}

impl AppState {
    /// Creates a new AppState with an empty cache.
    pub fn new(client: ReleaseClient, cache_ttl: u64) -> Self {
        Self {
            cache: Arc::new(RwLock::new(CacheStore::new())),
            client,
            cache_ttl,
        }
    }

    /// Creates a new AppState from configuration.
    pub fn from_config(config: &Config) -> Self {
        let client = ReleaseClient::with_base_url(&config.api_url, &config.owner, &config.repo);
        Self::new(client, config.cache_ttl)
    }

    /// Returns the release page, from cache when fresh, otherwise fetched.
    ///
    /// The lock is released while fetching, so simultaneous misses each hit
    /// the upstream and the last one to finish owns the cache entry.
    pub async fn load_releases(&self) -> std::result::Result<Vec<Release>, FetchError> {
        // Write lock: a read also updates hit/miss counters and drops stale entries
        let cached = self.cache.write().await.get(RELEASES_CACHE_KEY);
        if let Some(releases) = cached {
            debug!(count = releases.len(), "serving releases from cache");
            return Ok(releases);
        }

        let releases = self.client.fetch_releases(1).await?;
        self.cache
            .write()
            .await
            .set(RELEASES_CACHE_KEY, releases.clone(), self.cache_ttl);
        info!(
            count = releases.len(),
            ttl = self.cache_ttl,
            "cached fetched releases"
        );

        Ok(releases)
    }
}

/// Handler for GET /releases
///
/// Filters the cached release page by the query parameters.
pub async fn releases_handler(
    State(state): State<AppState>,
    Query(query): Query<ReleaseQuery>,
) -> Result<Json<ReleasesResponse>> {
    let criteria = query.to_criteria();
    let releases = state.load_releases().await?;

    let view = derive_view(&releases, &criteria);
    debug!(
        version = %criteria.version,
        shown = view.releases.len(),
        options = view.range_options.len(),
        "derived release view"
    );

    Ok(Json(ReleasesResponse::from(view)))
}

/// Handler for GET /stats
///
/// Returns current cache statistics.
pub async fn stats_handler(State(state): State<AppState>) -> Json<StatsResponse> {
    let stats = state.cache.read().await.stats();

    Json(StatsResponse::from(&stats))
}

/// Handler for GET /health
pub async fn health_handler() -> Json<HealthResponse> {
    Json(HealthResponse::healthy())
}
