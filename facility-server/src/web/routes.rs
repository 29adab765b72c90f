//! HTTP route handlers.

use axum::{
    Json, Router,
    extract::{Query, State},
    http::StatusCode,
    response::IntoResponse,
    routing::get,
};
use chrono::{Local, NaiveTime};
use tracing::warn;

use crate::catalog::NearbyQuery;
use crate::domain::Coordinates;
use crate::routing::{RouteError, TravelMode};

use super::dto::*;
use super::state::AppState;

/// Default search radius in miles when the request does not supply one.
const DEFAULT_MAX_DISTANCE_MILES: f64 = 5.0;

/// Create the application router.
pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health))
        .route("/api/facilities", get(list_facilities))
        .route("/api/facilities.geojson", get(facilities_geojson))
        .route("/api/nearby", get(nearby))
        .route("/api/geocode", get(geocode))
        .route("/api/route", get(route))
        .with_state(state)
}

/// Health check endpoint.
async fn health() -> &'static str {
    "ok"
}

/// List facilities, optionally filtered by kind or feature.
async fn list_facilities(
    State(state): State<AppState>,
    Query(req): Query<ListFacilitiesRequest>,
) -> Json<ListFacilitiesResponse> {
    let catalog = state.finder.catalog();

    let facilities: Vec<FacilityDto> = match (&req.kind, &req.feature) {
        (Some(kind), _) => catalog.by_kind(kind).into_iter().map(Into::into).collect(),
        (None, Some(feature)) => catalog
            .with_feature(feature)
            .into_iter()
            .map(Into::into)
            .collect(),
        (None, None) => catalog.all().iter().map(Into::into).collect(),
    };

    Json(ListFacilitiesResponse { facilities })
}

/// The catalog as a GeoJSON FeatureCollection.
async fn facilities_geojson(State(state): State<AppState>) -> Json<serde_json::Value> {
    Json(state.finder.catalog().to_geojson())
}

/// Nearby facilities, closest first.
async fn nearby(
    State(state): State<AppState>,
    Query(req): Query<NearbyRequest>,
) -> Result<Json<NearbyResponse>, AppError> {
    let origin = Coordinates::new(req.lat, req.lng).map_err(|e| AppError::BadRequest {
        message: e.to_string(),
    })?;

    // The evaluation instant defaults to the wall clock here, at the
    // outermost boundary; everything below takes it as a parameter.
    let at = match &req.at {
        Some(s) => NaiveTime::parse_from_str(s, "%H:%M").map_err(|_| AppError::BadRequest {
            message: format!("invalid time: {s} (expected HH:MM)"),
        })?,
        None => Local::now().time(),
    };

    let kinds = req
        .kinds
        .as_deref()
        .map(|s| {
            s.split(',')
                .map(str::trim)
                .filter(|k| !k.is_empty())
                .map(str::to_string)
                .collect()
        })
        .unwrap_or_default();

    let query = NearbyQuery {
        origin,
        max_distance_miles: req.max_distance.unwrap_or(DEFAULT_MAX_DISTANCE_MILES),
        kinds,
        open_only: req.open_only.unwrap_or(false),
        limit: req.limit,
    };

    let results = state.finder.find_nearby(&query, at);
    let results = results.iter().map(Into::into).collect();

    Ok(Json(NearbyResponse { results }))
}

/// Geocode an address.
async fn geocode(
    State(state): State<AppState>,
    Query(req): Query<GeocodeRequest>,
) -> Result<Json<GeocodeResponse>, AppError> {
    let coords = state.finder.geocode(&req.address).await?;

    Ok(Json(GeocodeResponse {
        lat: coords.lat(),
        lng: coords.lng(),
    }))
}

/// Route from an origin to a selected facility.
///
/// A missing route is a normal outcome (`available: false`), not an error:
/// the caller still has the straight-line result list to fall back on.
async fn route(
    State(state): State<AppState>,
    Query(req): Query<RouteRequest>,
) -> Result<Json<RouteResponse>, AppError> {
    let origin = Coordinates::new(req.lat, req.lng).map_err(|e| AppError::BadRequest {
        message: e.to_string(),
    })?;

    let mode: TravelMode = match &req.mode {
        Some(s) => s.parse().map_err(|e: crate::routing::InvalidTravelMode| {
            AppError::BadRequest {
                message: e.to_string(),
            }
        })?,
        None => TravelMode::default(),
    };

    // Unknown facility names 404; provider misses degrade to "unavailable"
    if state.finder.catalog().by_name(&req.to).is_none() {
        return Err(AppError::NotFound {
            message: format!("no facility named {}", req.to),
        });
    }

    match state.finder.route_to(origin, &req.to, mode).await {
        Ok(info) => Ok(Json(info.into())),
        Err(error @ (RouteError::NotFound | RouteError::Timeout)) => {
            warn!(to = %req.to, %error, "route lookup unavailable");
            Ok(Json(RouteResponse::unavailable()))
        }
        Err(error) => Err(AppError::Unavailable {
            message: error.to_string(),
        }),
    }
}

/// Application error type.
#[derive(Debug)]
pub enum AppError {
    BadRequest { message: String },
    NotFound { message: String },
    Unavailable { message: String },
}

impl From<RouteError> for AppError {
    fn from(e: RouteError) -> Self {
        match e {
            RouteError::NotFound => AppError::NotFound {
                message: "no result found".to_string(),
            },
            RouteError::Timeout | RouteError::Provider(_) => AppError::Unavailable {
                message: e.to_string(),
            },
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> axum::response::Response {
        let (status, message) = match self {
            AppError::BadRequest { message } => (StatusCode::BAD_REQUEST, message),
            AppError::NotFound { message } => (StatusCode::NOT_FOUND, message),
            AppError::Unavailable { message } => (StatusCode::SERVICE_UNAVAILABLE, message),
        };

        warn!(status = %status, message = %message, "request failed");

        let body = Json(ErrorResponse { error: message });
        (status, body).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;

    use crate::catalog::{DEFAULT_SEED, FacilityCatalog, load_records};
    use crate::query::FacilityFinder;
    use crate::routing::MockRoutingProvider;

    fn app_state(mock: MockRoutingProvider) -> AppState {
        let catalog = FacilityCatalog::new(load_records(DEFAULT_SEED).unwrap()).unwrap();
        AppState::new(FacilityFinder::new(Arc::new(catalog), Arc::new(mock)))
    }

    #[tokio::test]
    async fn nearby_handler_validates_coordinates() {
        let state = app_state(MockRoutingProvider::new());

        let req = NearbyRequest {
            lat: 95.0,
            lng: -122.3,
            max_distance: None,
            kinds: None,
            open_only: None,
            limit: None,
            at: None,
        };

        let result = nearby(State(state), Query(req)).await;
        assert!(matches!(result, Err(AppError::BadRequest { .. })));
    }

    #[tokio::test]
    async fn nearby_handler_with_explicit_instant() {
        let state = app_state(MockRoutingProvider::new());

        let req = NearbyRequest {
            lat: 47.6062,
            lng: -122.3321,
            max_distance: Some(2.0),
            kinds: None,
            open_only: Some(true),
            limit: None,
            at: Some("11:00".to_string()),
        };

        let response = nearby(State(state), Query(req)).await.unwrap();

        // Within 2 miles of downtown and open at 11:00: Central Library,
        // the International District center, and the Armory, in that order
        assert_eq!(response.0.results.len(), 3);
        assert_eq!(response.0.results[0].facility.name, "Central Library");
        assert!(response.0.results.iter().all(|r| r.is_open));
        let sorted: Vec<f64> = response.0.results.iter().map(|r| r.distance_miles).collect();
        assert!(sorted.windows(2).all(|w| w[0] <= w[1]));
    }

    #[tokio::test]
    async fn nearby_handler_rejects_bad_instant() {
        let state = app_state(MockRoutingProvider::new());

        let req = NearbyRequest {
            lat: 47.6062,
            lng: -122.3321,
            max_distance: None,
            kinds: None,
            open_only: None,
            limit: None,
            at: Some("25:99".to_string()),
        };

        let result = nearby(State(state), Query(req)).await;
        assert!(matches!(result, Err(AppError::BadRequest { .. })));
    }

    #[tokio::test]
    async fn route_handler_unknown_facility_is_404() {
        let state = app_state(MockRoutingProvider::new());

        let req = RouteRequest {
            lat: 47.6062,
            lng: -122.3321,
            to: "Nonexistent".to_string(),
            mode: None,
        };

        let result = route(State(state), Query(req)).await;
        assert!(matches!(result, Err(AppError::NotFound { .. })));
    }

    #[tokio::test]
    async fn route_handler_provider_miss_is_unavailable_payload() {
        // Known facility, but the provider has no route: 200 with
        // available=false rather than an error status
        let state = app_state(MockRoutingProvider::new());

        let req = RouteRequest {
            lat: 47.6062,
            lng: -122.3321,
            to: "Central Library".to_string(),
            mode: Some("walking".to_string()),
        };

        let response = route(State(state), Query(req)).await.unwrap();
        assert!(!response.0.available);
    }

    #[tokio::test]
    async fn route_handler_rejects_unknown_mode() {
        let state = app_state(MockRoutingProvider::new());

        let req = RouteRequest {
            lat: 47.6062,
            lng: -122.3321,
            to: "Central Library".to_string(),
            mode: Some("teleport".to_string()),
        };

        let result = route(State(state), Query(req)).await;
        assert!(matches!(result, Err(AppError::BadRequest { .. })));
    }

    #[tokio::test]
    async fn geocode_handler_maps_not_found() {
        let state = app_state(MockRoutingProvider::new());

        let req = GeocodeRequest {
            address: "nonexistent-address-xyz".to_string(),
        };

        let result = geocode(State(state), Query(req)).await;
        assert!(matches!(result, Err(AppError::NotFound { .. })));
    }

    #[tokio::test]
    async fn list_facilities_filters() {
        let state = app_state(MockRoutingProvider::new());

        let all = list_facilities(
            State(state.clone()),
            Query(ListFacilitiesRequest {
                kind: None,
                feature: None,
            }),
        )
        .await;
        assert_eq!(all.0.facilities.len(), 6);

        let libraries = list_facilities(
            State(state.clone()),
            Query(ListFacilitiesRequest {
                kind: Some("Library".to_string()),
                feature: None,
            }),
        )
        .await;
        assert_eq!(libraries.0.facilities.len(), 1);

        let seated = list_facilities(
            State(state),
            Query(ListFacilitiesRequest {
                kind: None,
                feature: Some("Seating".to_string()),
            }),
        )
        .await;
        assert_eq!(seated.0.facilities.len(), 1);
        assert_eq!(seated.0.facilities[0].name, "Central Library");
    }
}
