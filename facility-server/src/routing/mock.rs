//! Mock routing provider for testing without network access.
//!
//! Serves canned geocode and route responses and can be told to fail with a
//! specific [`RouteError`], so engine tests can assert on every outcome the
//! real provider can produce.

use std::collections::HashMap;
use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};

use async_trait::async_trait;

use crate::domain::Coordinates;

use super::error::RouteError;
use super::provider::{RouteInfo, RoutingProvider, TravelMode};

/// Mock provider with canned responses.
///
/// Addresses not registered via [`with_geocode`](Self::with_geocode) resolve
/// to `NotFound`; route operations return the canned [`RouteInfo`] when one
/// is set and `NotFound` otherwise. An injected failure takes precedence
/// over everything. A call counter supports cache-behavior assertions.
#[derive(Debug, Clone, Default)]
pub struct MockRoutingProvider {
    geocodes: HashMap<String, Coordinates>,
    route_info: Option<RouteInfo>,
    fail_with: Option<RouteError>,
    calls: Arc<AtomicUsize>,
}

impl MockRoutingProvider {
    /// Create a mock that answers `NotFound` to everything.
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a canned geocode result.
    pub fn with_geocode(mut self, address: impl Into<String>, coords: Coordinates) -> Self {
        self.geocodes.insert(address.into(), coords);
        self
    }

    /// Set the canned route response for travel-distance and route calls.
    pub fn with_route(mut self, info: RouteInfo) -> Self {
        self.route_info = Some(info);
        self
    }

    /// Make every operation fail with the given error.
    pub fn failing_with(mut self, error: RouteError) -> Self {
        self.fail_with = Some(error);
        self
    }

    /// Number of provider operations invoked so far.
    pub fn call_count(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    fn record_call(&self) -> Result<(), RouteError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        match &self.fail_with {
            Some(error) => Err(error.clone()),
            None => Ok(()),
        }
    }
}

#[async_trait]
impl RoutingProvider for MockRoutingProvider {
    async fn geocode(&self, address: &str) -> Result<Coordinates, RouteError> {
        self.record_call()?;
        self.geocodes.get(address).copied().ok_or(RouteError::NotFound)
    }

    async fn travel_distance(
        &self,
        _origin: Coordinates,
        _destination: Coordinates,
        _mode: TravelMode,
    ) -> Result<RouteInfo, RouteError> {
        self.record_call()?;
        match &self.route_info {
            Some(info) => Ok(RouteInfo {
                path: None,
                ..info.clone()
            }),
            None => Err(RouteError::NotFound),
        }
    }

    async fn route(
        &self,
        _origin: Coordinates,
        _destination: Coordinates,
        _mode: TravelMode,
    ) -> Result<RouteInfo, RouteError> {
        self.record_call()?;
        self.route_info.clone().ok_or(RouteError::NotFound)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn coords(lat: f64, lng: f64) -> Coordinates {
        Coordinates::new(lat, lng).unwrap()
    }

    fn info() -> RouteInfo {
        RouteInfo {
            distance_text: "5.2 mi".to_string(),
            duration_text: "18 mins".to_string(),
            distance_meters: 8369,
            duration_seconds: 1080,
            path: Some(vec![coords(47.6, -122.3), coords(47.7, -122.34)]),
        }
    }

    #[tokio::test]
    async fn geocode_canned_and_missing() {
        let mock = MockRoutingProvider::new()
            .with_geocode("1000 4th Ave, Seattle", coords(47.6067, -122.3325));

        let found = mock.geocode("1000 4th Ave, Seattle").await.unwrap();
        assert_eq!(found, coords(47.6067, -122.3325));

        // Unknown addresses are a normal absent outcome, not a panic
        let missing = mock.geocode("nonexistent-address-xyz").await;
        assert_eq!(missing.unwrap_err(), RouteError::NotFound);
    }

    #[tokio::test]
    async fn travel_distance_strips_path() {
        let mock = MockRoutingProvider::new().with_route(info());

        let summary = mock
            .travel_distance(coords(47.6, -122.3), coords(47.7, -122.34), TravelMode::Driving)
            .await
            .unwrap();

        assert_eq!(summary.distance_meters, 8369);
        assert!(summary.path.is_none());
    }

    #[tokio::test]
    async fn route_keeps_path() {
        let mock = MockRoutingProvider::new().with_route(info());

        let full = mock
            .route(coords(47.6, -122.3), coords(47.7, -122.34), TravelMode::Transit)
            .await
            .unwrap();

        assert_eq!(full.path.as_ref().unwrap().len(), 2);
    }

    #[tokio::test]
    async fn injected_failure_wins() {
        let mock = MockRoutingProvider::new()
            .with_geocode("somewhere", coords(47.6, -122.3))
            .failing_with(RouteError::Timeout);

        assert_eq!(mock.geocode("somewhere").await.unwrap_err(), RouteError::Timeout);
    }

    #[tokio::test]
    async fn call_counter_increments() {
        let mock = MockRoutingProvider::new();
        assert_eq!(mock.call_count(), 0);

        let _ = mock.geocode("a").await;
        let _ = mock
            .travel_distance(coords(0.0, 0.0), coords(1.0, 1.0), TravelMode::Walking)
            .await;

        assert_eq!(mock.call_count(), 2);
    }
}
