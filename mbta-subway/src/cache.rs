//! Caching layer for MBTA lookups.
//!
//! Trip stop sequences and stop records change rarely, so they are cached
//! by id. Route listings are cheap and always fetched. A batched stop lookup
//! serves what it can from the cache and fetches the rest in one request.

use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;

use moka::future::Cache as MokaCache;
use tracing::debug;

use crate::domain::{Route, RoutePattern, RouteType, StopId, StopRecord, TripId};
use crate::mbta::{MbtaClient, MbtaError};
use crate::network::NetworkSource;

/// Configuration for the cache.
#[derive(Debug, Clone)]
pub struct CacheConfig {
    /// TTL for cached entries.
    pub ttl: Duration,

    /// Maximum number of cached entries per kind.
    pub max_capacity: u64,
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self {
            ttl: Duration::from_secs(60 * 60),
            max_capacity: 10_000,
        }
    }
}

/// Cache for trip and stop lookups.
pub struct MbtaCache {
    trip_stops: MokaCache<TripId, Arc<Vec<StopId>>>,
    stops: MokaCache<StopId, StopRecord>,
}

impl MbtaCache {
    /// Create a new cache with the given configuration.
    pub fn new(config: &CacheConfig) -> Self {
        let trip_stops = MokaCache::builder()
            .time_to_live(config.ttl)
            .max_capacity(config.max_capacity)
            .build();
        let stops = MokaCache::builder()
            .time_to_live(config.ttl)
            .max_capacity(config.max_capacity)
            .build();

        Self { trip_stops, stops }
    }

    /// Invalidate all cached entries.
    pub fn invalidate_all(&self) {
        self.trip_stops.invalidate_all();
        self.stops.invalidate_all();
    }
}

/// MBTA data source with caching.
///
/// Wraps any [`NetworkSource`], by default the live [`MbtaClient`].
pub struct CachedMbtaClient<S = MbtaClient> {
    inner: S,
    cache: MbtaCache,
}

impl<S: NetworkSource> CachedMbtaClient<S> {
    /// Create a new cached client.
    pub fn new(inner: S, cache_config: &CacheConfig) -> Self {
        Self {
            inner,
            cache: MbtaCache::new(cache_config),
        }
    }

    /// Access the underlying source for operations that bypass cache.
    pub fn inner(&self) -> &S {
        &self.inner
    }

    /// Invalidate all cached entries.
    pub fn invalidate_cache(&self) {
        self.cache.invalidate_all();
    }
}

impl<S: NetworkSource> NetworkSource for CachedMbtaClient<S> {
    async fn list_routes(&self, types: &[RouteType]) -> Result<Vec<Route>, MbtaError> {
        self.inner.list_routes(types).await
    }

    async fn list_route_patterns(
        &self,
        types: &[RouteType],
    ) -> Result<Vec<RoutePattern>, MbtaError> {
        self.inner.list_route_patterns(types).await
    }

    async fn trip_stops(&self, trip: &TripId) -> Result<Vec<StopId>, MbtaError> {
        if let Some(cached) = self.cache.trip_stops.get(trip).await {
            return Ok(cached.as_ref().clone());
        }

        let stops = self.inner.trip_stops(trip).await?;
        self.cache
            .trip_stops
            .insert(trip.clone(), Arc::new(stops.clone()))
            .await;
        Ok(stops)
    }

    async fn stop(&self, id: &StopId) -> Result<StopRecord, MbtaError> {
        if let Some(cached) = self.cache.stops.get(id).await {
            return Ok(cached);
        }

        let record = self.inner.stop(id).await?;
        self.cache.stops.insert(id.clone(), record.clone()).await;
        Ok(record)
    }

    async fn stops(&self, ids: &[StopId]) -> Result<Vec<StopRecord>, MbtaError> {
        let mut found: HashMap<StopId, StopRecord> = HashMap::with_capacity(ids.len());
        let mut misses: Vec<StopId> = Vec::new();

        for id in ids {
            match self.cache.stops.get(id).await {
                Some(record) => {
                    found.insert(id.clone(), record);
                }
                None => {
                    if !misses.contains(id) {
                        misses.push(id.clone());
                    }
                }
            }
        }

        debug!(
            hits = found.len(),
            misses = misses.len(),
            "batched stop lookup"
        );

        if !misses.is_empty() {
            for record in self.inner.stops(&misses).await? {
                self.cache
                    .stops
                    .insert(record.id.clone(), record.clone())
                    .await;
                found.insert(record.id.clone(), record);
            }
        }

        // Request order, unknown ids omitted.
        Ok(ids.iter().filter_map(|id| found.get(id).cloned()).collect())
    }
}
