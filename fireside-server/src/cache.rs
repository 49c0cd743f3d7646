//! Caching layer for geocoding responses.
//!
//! Address queries repeat heavily as users type and re-search, and the
//! public Nominatim service asks clients to cache. Responses are cached by
//! normalized query text with a TTL, bounding upstream traffic without
//! holding suggestions long enough to go stale.

use std::sync::Arc;
use std::time::Duration;

use moka::future::Cache as MokaCache;

use crate::geocode::{GeocodeError, Geocoder, MIN_QUERY_LEN, Suggestion};

/// Configuration for the geocode cache.
#[derive(Debug, Clone)]
pub struct GeocodeCacheConfig {
    /// TTL for cached entries.
    pub ttl: Duration,

    /// Maximum number of cached queries.
    pub max_capacity: u64,
}

impl Default for GeocodeCacheConfig {
    fn default() -> Self {
        Self {
            ttl: Duration::from_secs(10 * 60),
            max_capacity: 1000,
        }
    }
}

/// Geocoder with response caching.
///
/// Wraps any [`Geocoder`] and caches suggestion lists per normalized query.
pub struct CachedGeocodeClient<G> {
    client: G,
    cache: MokaCache<String, Arc<Vec<Suggestion>>>,
}

impl<G: Geocoder> CachedGeocodeClient<G> {
    /// Create a new cached client.
    pub fn new(client: G, config: &GeocodeCacheConfig) -> Self {
        let cache = MokaCache::builder()
            .time_to_live(config.ttl)
            .max_capacity(config.max_capacity)
            .build();

        Self { client, cache }
    }

    /// Search for address suggestions, using the cache if possible.
    ///
    /// Queries shorter than [`MIN_QUERY_LEN`] characters yield an empty
    /// list without touching the cache or the provider.
    pub async fn search(&self, query: &str) -> Result<Arc<Vec<Suggestion>>, GeocodeError> {
        let trimmed = query.trim();
        if trimmed.chars().count() < MIN_QUERY_LEN {
            return Ok(Arc::new(Vec::new()));
        }

        // Case differences shouldn't cause separate provider hits
        let key = trimmed.to_lowercase();

        if let Some(cached) = self.cache.get(&key).await {
            return Ok(cached);
        }

        let suggestions = self.client.search(trimmed).await?;
        let entry = Arc::new(suggestions);

        self.cache.insert(key, entry.clone()).await;

        Ok(entry)
    }

    /// Number of cached queries (for monitoring).
    pub fn entry_count(&self) -> u64 {
        self.cache.entry_count()
    }

    /// Invalidate all cached entries.
    pub fn invalidate_all(&self) {
        self.cache.invalidate_all();
    }
}
