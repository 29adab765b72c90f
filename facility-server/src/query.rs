//! Query facade composing the catalog and the routing provider.
//!
//! This is the single entry point the presentation layer calls. Proximity
//! queries are pure in-memory computation and never touch the provider;
//! enrichment with live travel data is opt-in, per selected destination, so
//! a provider outage can never take the base result list down with it.

use std::sync::Arc;

use chrono::NaiveTime;
use futures::future::join_all;
use tracing::warn;

use crate::catalog::{FacilityCatalog, NearbyQuery};
use crate::domain::{Coordinates, QueryResult};
use crate::routing::{RouteError, RouteInfo, RoutingProvider, TravelMode};

/// Facade over the facility catalog and routing provider.
#[derive(Clone)]
pub struct FacilityFinder {
    catalog: Arc<FacilityCatalog>,
    routing: Arc<dyn RoutingProvider>,
}

impl FacilityFinder {
    /// Create a new finder.
    pub fn new(catalog: Arc<FacilityCatalog>, routing: Arc<dyn RoutingProvider>) -> Self {
        Self { catalog, routing }
    }

    /// The underlying catalog, for accessor queries.
    pub fn catalog(&self) -> &FacilityCatalog {
        &self.catalog
    }

    /// Facilities near the origin, closest first. Performs no enrichment.
    ///
    /// The evaluation instant is explicit; the presentation boundary passes
    /// "now".
    pub fn find_nearby(&self, query: &NearbyQuery, at: NaiveTime) -> Vec<QueryResult<'_>> {
        self.catalog.nearest(query, at)
    }

    /// Resolve an address to coordinates via the provider.
    pub async fn geocode(&self, address: &str) -> Result<Coordinates, RouteError> {
        self.routing.geocode(address).await
    }

    /// Route from the origin to a facility selected by name.
    ///
    /// The selected facility travels in the request rather than in any
    /// server-side session state. An unknown name is the same normal
    /// absent outcome as a provider miss.
    pub async fn route_to(
        &self,
        origin: Coordinates,
        facility_name: &str,
        mode: TravelMode,
    ) -> Result<RouteInfo, RouteError> {
        let facility = self
            .catalog
            .by_name(facility_name)
            .ok_or(RouteError::NotFound)?;

        self.routing.route(origin, facility.coordinates, mode).await
    }

    /// Best-effort travel summaries for the first `n` results.
    ///
    /// Fetches are concurrent and independent; a failure for one
    /// destination collapses to `None` after a logged diagnostic and never
    /// affects the others. The returned vector is index-aligned with
    /// `results` and padded with `None` beyond `n`.
    pub async fn enrich_top(
        &self,
        origin: Coordinates,
        results: &[QueryResult<'_>],
        n: usize,
        mode: TravelMode,
    ) -> Vec<Option<RouteInfo>> {
        let fetches = results.iter().take(n).map(|row| {
            let name = row.facility.name.as_str();
            let destination = row.facility.coordinates;
            async move {
                match self.routing.travel_distance(origin, destination, mode).await {
                    Ok(info) => Some(info),
                    Err(error) => {
                        warn!(facility = name, %error, "travel enrichment failed");
                        None
                    }
                }
            }
        });

        let mut enriched = join_all(fetches).await;
        enriched.resize(results.len(), None);
        enriched
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::FacilityRecord;
    use crate::routing::MockRoutingProvider;

    fn record(name: &str, kind: &str, lat: f64, lng: f64, hours: &str) -> FacilityRecord {
        FacilityRecord {
            name: name.to_string(),
            address: format!("{name} address"),
            kind: kind.to_string(),
            coordinates: (lat, lng),
            hours: hours.to_string(),
            features: vec![],
            notes: None,
        }
    }

    fn catalog() -> Arc<FacilityCatalog> {
        Arc::new(
            FacilityCatalog::new(vec![
                record("F1", "Library", 47.6062, -122.3321, "9:00AM-9:00PM"),
                record("F2", "Community Center", 47.7052, -122.3438, "7:00AM-9:00PM"),
            ])
            .unwrap(),
        )
    }

    fn finder_with(mock: MockRoutingProvider) -> FacilityFinder {
        FacilityFinder::new(catalog(), Arc::new(mock))
    }

    fn origin() -> Coordinates {
        Coordinates::new(47.6062, -122.3321).unwrap()
    }

    fn ten_am() -> NaiveTime {
        NaiveTime::from_hms_opt(10, 0, 0).unwrap()
    }

    fn info() -> RouteInfo {
        RouteInfo {
            distance_text: "7.1 mi".to_string(),
            duration_text: "24 mins".to_string(),
            distance_meters: 11426,
            duration_seconds: 1440,
            path: Some(vec![origin()]),
        }
    }

    #[test]
    fn find_nearby_excludes_distant_facilities() {
        // F1 is at the origin; F2 (~6.9 mi away) is outside the 5-mile radius
        let finder = finder_with(MockRoutingProvider::new());
        let query = NearbyQuery::new(origin(), 5.0);

        let results = finder.find_nearby(&query, ten_am());

        assert_eq!(results.len(), 1);
        assert_eq!(results[0].facility.name, "F1");
        assert_eq!(results[0].distance_miles, 0.0);
        assert!(results[0].is_open);
    }

    #[test]
    fn find_nearby_never_calls_the_provider() {
        let mock = MockRoutingProvider::new();
        let finder = FacilityFinder::new(catalog(), Arc::new(mock.clone()));

        let _ = finder.find_nearby(&NearbyQuery::new(origin(), 50.0), ten_am());

        assert_eq!(mock.call_count(), 0);
    }

    #[tokio::test]
    async fn route_to_selected_facility() {
        let finder = finder_with(MockRoutingProvider::new().with_route(info()));

        let route = finder
            .route_to(origin(), "F2", TravelMode::Transit)
            .await
            .unwrap();

        assert_eq!(route.duration_text, "24 mins");
        assert!(route.path.is_some());
    }

    #[tokio::test]
    async fn route_to_unknown_facility_is_not_found() {
        let finder = finder_with(MockRoutingProvider::new().with_route(info()));

        let result = finder.route_to(origin(), "Nonexistent", TravelMode::Transit).await;

        assert_eq!(result.unwrap_err(), RouteError::NotFound);
    }

    #[tokio::test]
    async fn geocode_absent_is_not_found() {
        let finder = finder_with(MockRoutingProvider::new());

        let result = finder.geocode("nonexistent-address-xyz").await;

        assert_eq!(result.unwrap_err(), RouteError::NotFound);
    }

    #[tokio::test]
    async fn enrich_top_fills_first_n() {
        let finder = finder_with(MockRoutingProvider::new().with_route(info()));
        let query = NearbyQuery::new(origin(), 50.0);

        let results = finder.find_nearby(&query, ten_am());
        assert_eq!(results.len(), 2);

        let enriched = finder
            .enrich_top(origin(), &results, 1, TravelMode::Driving)
            .await;

        assert_eq!(enriched.len(), 2);
        assert!(enriched[0].is_some());
        assert!(enriched[1].is_none());
    }

    #[tokio::test]
    async fn enrich_top_collapses_failures() {
        // Provider down: every enrichment fails, the result list survives
        let finder = finder_with(
            MockRoutingProvider::new().failing_with(RouteError::Provider("down".to_string())),
        );
        let query = NearbyQuery::new(origin(), 50.0);

        let results = finder.find_nearby(&query, ten_am());
        let enriched = finder
            .enrich_top(origin(), &results, results.len(), TravelMode::Driving)
            .await;

        assert_eq!(results.len(), 2);
        assert!(enriched.iter().all(Option::is_none));
    }
}
