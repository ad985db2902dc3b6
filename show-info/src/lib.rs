// Typed client for the TV show metadata API, routed through the request cache.

pub mod filter;
mod models;


pub use models::{Episode, Image, Show};
pub use request_cache::{CacheStats, Error, RequestCache, SharedRequestCache, SurfFetcher};

use std::sync::Arc;

const BASE_URL: &str = "https://api.tvmaze.com";

/// Client for the show metadata endpoints.
///
/// Every request goes through a shared [`RequestCache`], so no URL is
/// fetched more than once per session regardless of how many collaborators
/// ask for it.
pub struct ShowInfoClient {
    cache: SharedRequestCache,
}

impl ShowInfoClient {
    pub fn new() -> Self {
        Self::with_cache(Arc::new(RequestCache::new(Arc::new(SurfFetcher::new()))))
    }

    /// Share an existing cache between collaborators.
    pub fn with_cache(cache: SharedRequestCache) -> Self {
        Self { cache }
    }

    /// All shows known to the API, sorted by name, case insensitive.
    pub async fn shows(&self) -> Result<Vec<Show>, Error> {
        let url = format!("{}/shows", BASE_URL);
        let payload = self.cache.get(&url).await?;
        let mut shows: Vec<Show> =
            serde_json::from_value(payload).map_err(|source| Error::decode(&url, source))?;
        shows.sort_by_cached_key(|show| show.name().to_lowercase());
        log::debug!("Loaded {} shows", shows.len());
        Ok(shows)
    }

    /// Every episode of one show.
    pub async fn episodes(&self, show_id: u64) -> Result<Vec<Episode>, Error> {
        let url = format!("{}/shows/{}/episodes", BASE_URL, show_id);
        let payload = self.cache.get(&url).await?;
        let episodes: Vec<Episode> =
            serde_json::from_value(payload).map_err(|source| Error::decode(&url, source))?;
        log::debug!("Loaded {} episodes for show {}", episodes.len(), show_id);
        Ok(episodes)
    }

    pub fn cache(&self) -> &SharedRequestCache {
        &self.cache
    }

    pub fn cache_stats(&self) -> CacheStats {
        self.cache.stats()
    }

    pub fn clear_cache(&self) -> usize {
        self.cache.clear()
    }
}

impl Default for ShowInfoClient {
    fn default() -> Self {
        Self::new()
    }
}
