//! PokeAPI client
//!
//! Every request goes through the session cache, keyed by its full URL:
//! a hit skips the network, a miss fetches the body, stores it raw and only
//! then decodes it.

use reqwest::Client;
use serde::de::DeserializeOwned;
use tracing::debug;

use crate::cache::TimedCache;
use crate::error::{PokedexError, Result};
use crate::models::{LocationArea, LocationAreaPage, Pokemon};

/// Where a response payload came from
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Fetched {
    Cache,
    Network,
}

/// Client for the PokeAPI with a response cache in front of it
#[derive(Debug)]
pub struct PokeApiClient {
    http: Client,
    base_url: String,
    cache: TimedCache,
}

impl PokeApiClient {
    /// Create a client for `base_url` (e.g. `https://pokeapi.co/api/v2`)
    pub fn new(base_url: impl Into<String>, cache: TimedCache) -> Self {
        Self::with_client(Client::new(), base_url, cache)
    }

    /// Create a client with a custom HTTP client
    pub fn with_client(http: Client, base_url: impl Into<String>, cache: TimedCache) -> Self {
        let base_url = base_url.into().trim_end_matches('/').to_string();
        Self {
            http,
            base_url,
            cache,
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub fn cache(&self) -> &TimedCache {
        &self.cache
    }

    /// Stops the cache's reaper. Cached entries stay readable.
    pub async fn close(&mut self) {
        self.cache.close().await;
    }

    /// Fetch the raw body at `url`, serving it from the cache when present.
    ///
    /// On a miss the body of a successful response is cached before it is
    /// returned. Error statuses are not cached.
    pub async fn fetch(&self, url: &str) -> Result<(Vec<u8>, Fetched)> {
        if let Some(body) = self.cache.get(url).await {
            return Ok((body, Fetched::Cache));
        }

        debug!(url = %url, "fetching from network");
        let response = self.http.get(url).send().await?;

        let status = response.status();
        if !status.is_success() {
            return Err(PokedexError::Status {
                url: url.to_string(),
                status: status.as_u16(),
            });
        }

        let body = response.bytes().await?.to_vec();
        self.cache.add(url, body.clone()).await;

        Ok((body, Fetched::Network))
    }

    /// Fetch and decode a page of location areas from a listing URL
    pub async fn location_areas(&self, url: &str) -> Result<(LocationAreaPage, Fetched)> {
        self.fetch_json(url).await
    }

    /// Fetch and decode a single location area by id or name
    pub async fn location_area(&self, id_or_name: &str) -> Result<(LocationArea, Fetched)> {
        self.fetch_json(&self.location_area_url(id_or_name)).await
    }

    /// Fetch and decode a Pokemon by name
    pub async fn pokemon(&self, name: &str) -> Result<(Pokemon, Fetched)> {
        self.fetch_json(&self.pokemon_url(name)).await
    }

    pub fn location_area_url(&self, id_or_name: &str) -> String {
        format!(
            "{}/location-area/{}",
            self.base_url,
            urlencoding::encode(id_or_name)
        )
    }

    pub fn pokemon_url(&self, name: &str) -> String {
        format!("{}/pokemon/{}", self.base_url, urlencoding::encode(name))
    }

    async fn fetch_json<T: DeserializeOwned>(&self, url: &str) -> Result<(T, Fetched)> {
        let (body, fetched) = self.fetch(url).await?;
        let value = serde_json::from_slice(&body)?;
        Ok((value, fetched))
    }
}
