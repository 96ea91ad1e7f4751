//! Configuration Module
//!
//! Handles loading and managing server configuration from environment variables.

use std::env;
use std::str::FromStr;

use crate::serializer::ApiVersion;

/// Server configuration parameters.
///
/// All values can be configured via environment variables with sensible defaults.
#[derive(Debug, Clone)]
pub struct Config {
    /// HTTP server port
    pub server_port: u16,
    /// Maximum number of cached list pages, 0 = unbounded
    pub cache_max_entries: usize,
    /// Lifetime of a cached list page in seconds, 0 = until invalidated
    pub cache_ttl: u64,
    /// Bearer token granting the admin role; None disables mutations
    pub admin_token: Option<String>,
    /// Representation served when the client does not ask for a version
    pub default_api_version: ApiVersion,
    /// Load demo authors and books at startup
    pub seed_fixtures: bool,
}

impl Config {
    /// Creates a new Config by loading values from environment variables.
    ///
    /// # Environment Variables
    /// - `SERVER_PORT` - HTTP server port (default: 3000)
    /// - `CACHE_MAX_ENTRIES` - Maximum cached pages (default: 1000)
    /// - `CACHE_TTL` - Cached page lifetime in seconds (default: 0)
    /// - `ADMIN_TOKEN` - Admin bearer token (default: unset)
    /// - `DEFAULT_API_VERSION` - `1.0` or `2.0` (default: 1.0)
    /// - `SEED_FIXTURES` - `true`/`1` to load demo data (default: false)
    pub fn from_env() -> Self {
        let defaults = Self::default();
        Self {
            server_port: parse_var("SERVER_PORT").unwrap_or(defaults.server_port),
            cache_max_entries: parse_var("CACHE_MAX_ENTRIES")
                .unwrap_or(defaults.cache_max_entries),
            cache_ttl: parse_var("CACHE_TTL").unwrap_or(defaults.cache_ttl),
            admin_token: env::var("ADMIN_TOKEN").ok().filter(|t| !t.is_empty()),
            default_api_version: parse_var("DEFAULT_API_VERSION")
                .unwrap_or(defaults.default_api_version),
            seed_fixtures: env::var("SEED_FIXTURES")
                .map(|v| matches!(v.to_ascii_lowercase().as_str(), "1" | "true" | "yes"))
                .unwrap_or(defaults.seed_fixtures),
        }
    }
}

fn parse_var<T: FromStr>(name: &str) -> Option<T> {
    env::var(name).ok().and_then(|v| v.trim().parse().ok())
}

impl Default for Config {
    fn default() -> Self {
        Self {
            server_port: 3000,
            cache_max_entries: 1000,
            cache_ttl: 0,
            admin_token: None,
            default_api_version: ApiVersion::V1,
            seed_fixtures: false,
        }
    }
}
