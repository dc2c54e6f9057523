//! Configuration Module
//!
//! Handles loading client configuration from environment variables, with
//! command-line flags layered on top.

use std::env;
use std::time::Duration;

use crate::cache::CacheConfig;
use crate::cli::Cli;

/// Default PokeAPI root
pub const DEFAULT_API_BASE: &str = "https://pokeapi.co/api/v2";

/// Client configuration parameters.
///
/// All values can be configured via environment variables with sensible defaults.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    /// API root, without a trailing slash
    pub api_base: String,
    /// Max-age of cached responses in milliseconds
    pub cache_interval_ms: u64,
    /// Reaper period in milliseconds; `None` means same as `cache_interval_ms`
    pub sweep_interval_ms: Option<u64>,
    /// Number of location areas per `map` page
    pub page_size: u32,
}

impl Config {
    /// Creates a new Config by loading values from environment variables.
    ///
    /// # Environment Variables
    /// - `POKEDEX_API_BASE` - API root (default: https://pokeapi.co/api/v2)
    /// - `POKEDEX_CACHE_INTERVAL_MS` - Cached response max-age (default: 5000)
    /// - `POKEDEX_SWEEP_INTERVAL_MS` - Reaper period (default: the cache interval)
    /// - `POKEDEX_PAGE_SIZE` - Location areas per page, at least 1 (default: 20)
    pub fn from_env() -> Self {
        let defaults = Self::default();

        Self {
            api_base: env::var("POKEDEX_API_BASE")
                .ok()
                .filter(|v| !v.is_empty())
                .map(|v| v.trim_end_matches('/').to_string())
                .unwrap_or(defaults.api_base),
            cache_interval_ms: env::var("POKEDEX_CACHE_INTERVAL_MS")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(defaults.cache_interval_ms),
            sweep_interval_ms: env::var("POKEDEX_SWEEP_INTERVAL_MS")
                .ok()
                .and_then(|v| v.parse().ok()),
            page_size: env::var("POKEDEX_PAGE_SIZE")
                .ok()
                .and_then(|v| v.parse().ok())
                .filter(|n| *n > 0)
                .unwrap_or(defaults.page_size),
        }
    }

    /// Overrides values with any flags given on the command line.
    pub fn merge_cli(mut self, cli: &Cli) -> Self {
        if let Some(api_base) = &cli.api_base {
            self.api_base = api_base.trim_end_matches('/').to_string();
        }
        if let Some(ms) = cli.cache_interval_ms {
            self.cache_interval_ms = ms;
        }
        if let Some(ms) = cli.sweep_interval_ms {
            self.sweep_interval_ms = Some(ms);
        }
        if let Some(page_size) = cli.page_size {
            self.page_size = page_size;
        }
        self
    }

    /// Converts the interval settings into cache expiry settings.
    pub fn cache_config(&self) -> CacheConfig {
        let max_age = Duration::from_millis(self.cache_interval_ms);
        let sweep_interval = self
            .sweep_interval_ms
            .map(Duration::from_millis)
            .unwrap_or(max_age);

        CacheConfig {
            max_age,
            sweep_interval,
        }
    }

    /// URL of the first page of location areas.
    pub fn first_page_url(&self) -> String {
        format!(
            "{}/location-area?offset=0&limit={}",
            self.api_base, self.page_size
        )
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            api_base: DEFAULT_API_BASE.to_string(),
            cache_interval_ms: 5000,
            sweep_interval_ms: None,
            page_size: 20,
        }
    }
}
