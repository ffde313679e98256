//! Configuration Module
//!
//! Handles loading and managing server configuration from environment variables.

use std::env;

use crate::cache::DEFAULT_CACHE_TTL;
use crate::upstream::GITHUB_API_URL;

/// Server configuration parameters.
///
/// All values can be configured via environment variables with sensible defaults.
#[derive(Debug, Clone)]
pub struct Config {
    /// HTTP server port
    pub server_port: u16,
    /// Root of the releases REST API
    pub api_url: String,
    /// Repository owner whose releases are shown
    pub owner: String,
    /// Repository whose releases are shown
    pub repo: String,
    /// Lifetime of the cached release page in seconds
    pub cache_ttl: u64,
}

impl Config {
    /// Creates a new Config by loading values from environment variables.
    ///
    /// # Environment Variables
    /// - `SERVER_PORT` - HTTP server port (default: 3000)
    /// - `GITHUB_API_URL` - API root (default: `https://api.github.com`)
    /// - `RELEASES_OWNER` - Repository owner (default: `payloadcms`)
    /// - `RELEASES_REPO` - Repository name (default: `payload`)
    /// - `CACHE_TTL` - Cache lifetime in seconds (default: 180)
    pub fn from_env() -> Self {
        let defaults = Self::default();
        Self {
            server_port: env::var("SERVER_PORT")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(defaults.server_port),
            api_url: non_empty_var("GITHUB_API_URL").unwrap_or(defaults.api_url),
            owner: non_empty_var("RELEASES_OWNER").unwrap_or(defaults.owner),
            repo: non_empty_var("RELEASES_REPO").unwrap_or(defaults.repo),
            cache_ttl: env::var("CACHE_TTL")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(defaults.cache_ttl),
        }
    }
}

fn non_empty_var(name: &str) -> Option<String> {
    env::var(name).ok().filter(|v| !v.trim().is_empty())
}

impl Default for Config {
    fn default() -> Self {
        Self {
            server_port: 3000,
            api_url: GITHUB_API_URL.to_string(),
            owner: "payloadcms".to_string(),
            repo: "payload".to_string(),
            cache_ttl: DEFAULT_CACHE_TTL,
        }
    }
}
