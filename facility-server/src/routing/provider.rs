//! The provider trait and its result types.

use std::fmt;
use std::str::FromStr;

use async_trait::async_trait;

use crate::domain::Coordinates;

use super::error::RouteError;

/// Error returned when parsing an unknown travel mode string.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown travel mode: {0}")]
pub struct InvalidTravelMode(pub String);

/// Mode of travel for routing requests.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TravelMode {
    Driving,
    Walking,
    Bicycling,
    Transit,
}

impl TravelMode {
    /// The wire string the provider expects.
    pub fn as_str(&self) -> &'static str {
        match self {
            TravelMode::Driving => "driving",
            TravelMode::Walking => "walking",
            TravelMode::Bicycling => "bicycling",
            TravelMode::Transit => "transit",
        }
    }
}

impl Default for TravelMode {
    fn default() -> Self {
        TravelMode::Transit
    }
}

impl fmt::Display for TravelMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for TravelMode {
    type Err = InvalidTravelMode;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "driving" => Ok(TravelMode::Driving),
            "walking" => Ok(TravelMode::Walking),
            "bicycling" => Ok(TravelMode::Bicycling),
            "transit" => Ok(TravelMode::Transit),
            other => Err(InvalidTravelMode(other.to_string())),
        }
    }
}

/// Travel summary for one origin/destination pair.
///
/// Ephemeral: created per enrichment request and discarded once the caller
/// has rendered it. `path` is present only when the operation that produced
/// it fetches route geometry.
#[derive(Debug, Clone, PartialEq)]
pub struct RouteInfo {
    /// Human-readable distance, e.g. `"5.2 mi"`.
    pub distance_text: String,

    /// Human-readable duration, e.g. `"18 mins"`.
    pub duration_text: String,

    /// Distance magnitude in meters.
    pub distance_meters: u32,

    /// Duration magnitude in seconds.
    pub duration_seconds: u32,

    /// Decoded route geometry, when a path was returned.
    pub path: Option<Vec<Coordinates>>,
}

/// Narrow interface to an external routing/geocoding provider.
///
/// All operations are idempotent. Failures come back as explicit
/// [`RouteError`] values; this layer neither logs nor retries, so callers
/// can decide what a failure means for them and tests can assert on the
/// specific outcome.
#[async_trait]
pub trait RoutingProvider: Send + Sync {
    /// Resolve an address to coordinates.
    async fn geocode(&self, address: &str) -> Result<Coordinates, RouteError>;

    /// Travel distance and duration between two points, without geometry.
    async fn travel_distance(
        &self,
        origin: Coordinates,
        destination: Coordinates,
        mode: TravelMode,
    ) -> Result<RouteInfo, RouteError>;

    /// Full route between two points, including decoded path geometry.
    async fn route(
        &self,
        origin: Coordinates,
        destination: Coordinates,
        mode: TravelMode,
    ) -> Result<RouteInfo, RouteError>;
}
