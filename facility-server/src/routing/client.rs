//! Maps Web Services HTTP client.
//!
//! Implements [`RoutingProvider`] against a Google-style Maps API: geocoding,
//! distance-matrix, and directions endpoints. Provider status strings and
//! transport failures are mapped into the closed [`RouteError`] set at this
//! boundary, so nothing provider-specific leaks past it.

use std::sync::Arc;

use async_trait::async_trait;
use serde::de::DeserializeOwned;
use tokio::sync::Semaphore;

use crate::domain::Coordinates;

use super::error::RouteError;
use super::polyline;
use super::provider::{RouteInfo, RoutingProvider, TravelMode};
use super::types::{DirectionsResponse, DistanceMatrixResponse, GeocodeResponse, TextValue};

/// Default base URL for the Maps Web Services API.
const DEFAULT_BASE_URL: &str = "https://maps.googleapis.com/maps/api";

/// Default maximum concurrent requests.
const DEFAULT_MAX_CONCURRENT: usize = 5;

/// Default request timeout in seconds.
///
/// Provider calls are blocking network I/O from the caller's point of view;
/// the bound keeps a stalled provider from holding requests open
/// indefinitely.
const DEFAULT_TIMEOUT_SECS: u64 = 10;

/// Configuration for the Maps client.
#[derive(Debug, Clone)]
pub struct MapsConfig {
    /// API key sent with every request.
    pub api_key: String,
    /// Base URL for the API (defaults to production).
    pub base_url: String,
    /// Maximum concurrent requests.
    pub max_concurrent: usize,
    /// Request timeout in seconds.
    pub timeout_secs: u64,
}

impl MapsConfig {
    /// Create a new config with the given API key.
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            api_key: api_key.into(),
            base_url: DEFAULT_BASE_URL.to_string(),
            max_concurrent: DEFAULT_MAX_CONCURRENT,
            timeout_secs: DEFAULT_TIMEOUT_SECS,
        }
    }

    /// Set a custom base URL (for testing).
    pub fn with_base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = url.into();
        self
    }

    /// Set maximum concurrent requests.
    pub fn with_max_concurrent(mut self, n: usize) -> Self {
        self.max_concurrent = n;
        self
    }

    /// Set request timeout.
    pub fn with_timeout(mut self, secs: u64) -> Self {
        self.timeout_secs = secs;
        self
    }
}

/// Maps Web Services client.
///
/// Uses a semaphore to limit concurrent requests and avoid tripping
/// provider-side rate limiting.
#[derive(Debug, Clone)]
pub struct MapsClient {
    http: reqwest::Client,
    base_url: String,
    api_key: String,
    semaphore: Arc<Semaphore>,
}

impl MapsClient {
    /// Create a new Maps client with the given configuration.
    pub fn new(config: MapsConfig) -> Result<Self, RouteError> {
        let http = reqwest::Client::builder()
            .timeout(std::time::Duration::from_secs(config.timeout_secs))
            .build()
            .map_err(|e| RouteError::Provider(format!("failed to build HTTP client: {e}")))?;

        Ok(Self {
            http,
            base_url: config.base_url,
            api_key: config.api_key,
            semaphore: Arc::new(Semaphore::new(config.max_concurrent)),
        })
    }

    /// Issue a GET and parse the JSON body.
    async fn get_json<T: DeserializeOwned>(
        &self,
        url: &str,
        query: &[(&str, String)],
    ) -> Result<T, RouteError> {
        let _permit = self
            .semaphore
            .acquire()
            .await
            .map_err(|_| RouteError::Provider("semaphore closed".to_string()))?;

        let response = self
            .http
            .get(url)
            .query(query)
            .query(&[("key", self.api_key.as_str())])
            .send()
            .await
            .map_err(request_error)?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(RouteError::Provider(format!(
                "HTTP {}: {}",
                status.as_u16(),
                body.chars().take(200).collect::<String>()
            )));
        }

        let body = response.text().await.map_err(request_error)?;

        serde_json::from_str(&body).map_err(|e| {
            RouteError::Provider(format!(
                "JSON parse error: {e} (body: {})",
                body.chars().take(200).collect::<String>()
            ))
        })
    }
}

#[async_trait]
impl RoutingProvider for MapsClient {
    async fn geocode(&self, address: &str) -> Result<Coordinates, RouteError> {
        let url = format!("{}/geocode/json", self.base_url);
        let response: GeocodeResponse = self
            .get_json(&url, &[("address", address.to_string())])
            .await?;

        check_status(&response.status)?;

        let location = response
            .results
            .first()
            .ok_or(RouteError::NotFound)?
            .geometry
            .location;

        Coordinates::new(location.lat, location.lng)
            .map_err(|e| RouteError::Provider(format!("provider returned {e}")))
    }

    async fn travel_distance(
        &self,
        origin: Coordinates,
        destination: Coordinates,
        mode: TravelMode,
    ) -> Result<RouteInfo, RouteError> {
        let url = format!("{}/distancematrix/json", self.base_url);
        let response: DistanceMatrixResponse = self
            .get_json(
                &url,
                &[
                    ("origins", origin.to_string()),
                    ("destinations", destination.to_string()),
                    ("mode", mode.as_str().to_string()),
                    ("units", "imperial".to_string()),
                ],
            )
            .await?;

        check_status(&response.status)?;

        let element = response
            .rows
            .first()
            .and_then(|row| row.elements.first())
            .ok_or(RouteError::NotFound)?;

        check_status(&element.status)?;

        let (distance, duration) = summary_fields(&element.distance, &element.duration)?;
        Ok(RouteInfo {
            distance_text: distance.text.clone(),
            duration_text: duration.text.clone(),
            distance_meters: distance.value,
            duration_seconds: duration.value,
            path: None,
        })
    }

    async fn route(
        &self,
        origin: Coordinates,
        destination: Coordinates,
        mode: TravelMode,
    ) -> Result<RouteInfo, RouteError> {
        let url = format!("{}/directions/json", self.base_url);
        let response: DirectionsResponse = self
            .get_json(
                &url,
                &[
                    ("origin", origin.to_string()),
                    ("destination", destination.to_string()),
                    ("mode", mode.as_str().to_string()),
                ],
            )
            .await?;

        check_status(&response.status)?;

        let route = response.routes.first().ok_or(RouteError::NotFound)?;
        let leg = route.legs.first().ok_or(RouteError::NotFound)?;

        let path = route
            .overview_polyline
            .as_ref()
            .map(|p| polyline::decode(&p.points))
            .transpose()
            .map_err(|e| RouteError::Provider(format!("bad route geometry: {e}")))?;

        let (distance, duration) = summary_fields(&leg.distance, &leg.duration)?;
        Ok(RouteInfo {
            distance_text: distance.text.clone(),
            duration_text: duration.text.clone(),
            distance_meters: distance.value,
            duration_seconds: duration.value,
            path,
        })
    }
}

/// Map a transport failure into the closed error set.
fn request_error(e: reqwest::Error) -> RouteError {
    if e.is_timeout() {
        RouteError::Timeout
    } else {
        RouteError::Provider(e.to_string())
    }
}

/// Map a provider status string into the closed error set.
///
/// `OK` passes; the no-result statuses become `NotFound`; everything else
/// (quota, auth, malformed request) becomes `Provider` with the status
/// preserved for diagnostics.
fn check_status(status: &str) -> Result<(), RouteError> {
    match status {
        "OK" => Ok(()),
        "ZERO_RESULTS" | "NOT_FOUND" => Err(RouteError::NotFound),
        other => Err(RouteError::Provider(format!("provider status {other}"))),
    }
}

/// Both summary fields must be present on an OK response.
fn summary_fields<'a>(
    distance: &'a Option<TextValue>,
    duration: &'a Option<TextValue>,
) -> Result<(&'a TextValue, &'a TextValue), RouteError> {
    match (distance, duration) {
        (Some(d), Some(t)) => Ok((d, t)),
        _ => Err(RouteError::Provider(
            "OK response missing distance/duration".to_string(),
        )),
    }
}
