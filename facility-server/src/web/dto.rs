//! Data transfer objects for web requests and responses.

use serde::{Deserialize, Serialize};

use crate::domain::{Facility, QueryResult};
use crate::routing::RouteInfo;

/// Request for the facility listing.
#[derive(Debug, Deserialize)]
pub struct ListFacilitiesRequest {
    /// Filter to one category, e.g. "Library"
    pub kind: Option<String>,

    /// Filter to facilities carrying a feature tag
    pub feature: Option<String>,
}

/// Request for the nearby query.
#[derive(Debug, Deserialize)]
pub struct NearbyRequest {
    /// User latitude
    pub lat: f64,

    /// User longitude
    pub lng: f64,

    /// Maximum distance in miles (defaults to 5)
    pub max_distance: Option<f64>,

    /// Comma-separated category filter, e.g. "Library,Event Hall"
    pub kinds: Option<String>,

    /// Only facilities open at the evaluation instant
    pub open_only: Option<bool>,

    /// Maximum number of results
    pub limit: Option<usize>,

    /// Evaluation time in HH:MM format (defaults to now)
    pub at: Option<String>,
}

/// Request to geocode an address.
#[derive(Debug, Deserialize)]
pub struct GeocodeRequest {
    pub address: String,
}

/// Request for a route to a selected facility.
#[derive(Debug, Deserialize)]
pub struct RouteRequest {
    /// Origin latitude
    pub lat: f64,

    /// Origin longitude
    pub lng: f64,

    /// Name of the destination facility
    pub to: String,

    /// Travel mode (defaults to transit)
    pub mode: Option<String>,
}

/// A facility in responses.
#[derive(Debug, Serialize)]
pub struct FacilityDto {
    pub name: String,
    pub address: String,
    #[serde(rename = "type")]
    pub kind: String,
    pub lat: f64,
    pub lng: f64,
    pub hours: String,
    pub features: Vec<String>,
    pub notes: Option<String>,
}

impl From<&Facility> for FacilityDto {
    fn from(f: &Facility) -> Self {
        Self {
            name: f.name.clone(),
            address: f.address.clone(),
            kind: f.kind.clone(),
            lat: f.coordinates.lat(),
            lng: f.coordinates.lng(),
            hours: f.hours.clone(),
            features: f.features.clone(),
            notes: f.notes.clone(),
        }
    }
}

/// Response for the facility listing.
#[derive(Debug, Serialize)]
pub struct ListFacilitiesResponse {
    pub facilities: Vec<FacilityDto>,
}

/// A row in nearby results.
#[derive(Debug, Serialize)]
pub struct NearbyResultDto {
    #[serde(flatten)]
    pub facility: FacilityDto,

    /// Straight-line distance from the query origin, in miles
    pub distance_miles: f64,

    /// Open status at the evaluation instant
    pub is_open: bool,
}

impl From<&QueryResult<'_>> for NearbyResultDto {
    fn from(row: &QueryResult<'_>) -> Self {
        Self {
            facility: row.facility.into(),
            distance_miles: row.distance_miles,
            is_open: row.is_open,
        }
    }
}

/// Response for the nearby query.
#[derive(Debug, Serialize)]
pub struct NearbyResponse {
    pub results: Vec<NearbyResultDto>,
}

/// Response for a geocode request.
#[derive(Debug, Serialize)]
pub struct GeocodeResponse {
    pub lat: f64,
    pub lng: f64,
}

/// Response for a route request.
///
/// `available` is false when the provider had no route; the remaining
/// fields are then absent. Presentation renders that as "distance
/// unavailable" rather than an error.
#[derive(Debug, Serialize)]
pub struct RouteResponse {
    pub available: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub distance_text: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub duration_text: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub distance_meters: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub duration_seconds: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub path: Option<Vec<[f64; 2]>>,
}

impl RouteResponse {
    /// A response for a route the provider could not produce.
    pub fn unavailable() -> Self {
        Self {
            available: false,
            distance_text: None,
            duration_text: None,
            distance_meters: None,
            duration_seconds: None,
            path: None,
        }
    }
}

impl From<RouteInfo> for RouteResponse {
    fn from(info: RouteInfo) -> Self {
        Self {
            available: true,
            distance_text: Some(info.distance_text),
            duration_text: Some(info.duration_text),
            distance_meters: Some(info.distance_meters),
            duration_seconds: Some(info.duration_seconds),
            path: info
                .path
                .map(|points| points.iter().map(|p| [p.lat(), p.lng()]).collect()),
        }
    }
}

/// Error payload for failed requests.
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub error: String,
}
