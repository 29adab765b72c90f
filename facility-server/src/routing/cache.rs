//! Caching layer over a routing provider.
//!
//! Geocode results are stable for a given address and travel summaries
//! change slowly, so both are cached with a TTL to keep repeated queries
//! from burning provider quota. Route geometry is fetched only for a
//! user-selected destination and passes through uncached. Errors are never
//! cached: a failed call is retried on the next request.

use std::time::Duration;

use async_trait::async_trait;
use moka::future::Cache as MokaCache;

use crate::domain::Coordinates;

use super::error::RouteError;
use super::provider::{RouteInfo, RoutingProvider, TravelMode};

/// Cache key for travel summaries: origin and destination in microdegrees
/// plus the mode. Microdegree resolution (~0.1 m) keeps `f64` out of the key.
type SummaryKey = ((i64, i64), (i64, i64), TravelMode);

fn point_key(c: Coordinates) -> (i64, i64) {
    ((c.lat() * 1e6).round() as i64, (c.lng() * 1e6).round() as i64)
}

/// Configuration for the routing cache.
#[derive(Debug, Clone)]
pub struct RoutingCacheConfig {
    /// TTL for cached entries.
    pub ttl: Duration,

    /// Maximum number of cached entries per cache.
    pub max_capacity: u64,
}

impl Default for RoutingCacheConfig {
    fn default() -> Self {
        Self {
            ttl: Duration::from_secs(10 * 60),
            max_capacity: 1000,
        }
    }
}

/// Routing provider with caching.
///
/// Wraps any inner [`RoutingProvider`] and caches geocode and
/// travel-distance responses.
pub struct CachedRoutingProvider<P> {
    inner: P,
    geocodes: MokaCache<String, Coordinates>,
    summaries: MokaCache<SummaryKey, RouteInfo>,
}

impl<P> CachedRoutingProvider<P> {
    /// Create a new cached provider around `inner`.
    pub fn new(inner: P, config: &RoutingCacheConfig) -> Self {
        let geocodes = MokaCache::builder()
            .time_to_live(config.ttl)
            .max_capacity(config.max_capacity)
            .build();
        let summaries = MokaCache::builder()
            .time_to_live(config.ttl)
            .max_capacity(config.max_capacity)
            .build();

        Self {
            inner,
            geocodes,
            summaries,
        }
    }

    /// Access the underlying provider.
    pub fn inner(&self) -> &P {
        &self.inner
    }

    /// Number of cached entries across both caches.
    pub fn entry_count(&self) -> u64 {
        self.geocodes.entry_count() + self.summaries.entry_count()
    }

    /// Invalidate all cached entries.
    pub fn invalidate_all(&self) {
        self.geocodes.invalidate_all();
        self.summaries.invalidate_all();
    }
}

#[async_trait]
impl<P: RoutingProvider> RoutingProvider for CachedRoutingProvider<P> {
    async fn geocode(&self, address: &str) -> Result<Coordinates, RouteError> {
        if let Some(cached) = self.geocodes.get(address).await {
            return Ok(cached);
        }

        let coords = self.inner.geocode(address).await?;
        self.geocodes.insert(address.to_string(), coords).await;
        Ok(coords)
    }

    async fn travel_distance(
        &self,
        origin: Coordinates,
        destination: Coordinates,
        mode: TravelMode,
    ) -> Result<RouteInfo, RouteError> {
        let key = (point_key(origin), point_key(destination), mode);

        if let Some(cached) = self.summaries.get(&key).await {
            return Ok(cached);
        }

        let info = self.inner.travel_distance(origin, destination, mode).await?;
        self.summaries.insert(key, info.clone()).await;
        Ok(info)
    }

    async fn route(
        &self,
        origin: Coordinates,
        destination: Coordinates,
        mode: TravelMode,
    ) -> Result<RouteInfo, RouteError> {
        self.inner.route(origin, destination, mode).await
    }
}
