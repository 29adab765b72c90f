//! Maps API response DTOs.
//!
//! These types map directly to the Maps Web Services JSON responses for the
//! geocoding, distance-matrix, and directions endpoints. They use `Option`
//! liberally because the provider omits fields on non-OK statuses.

use serde::Deserialize;

/// A paired human-readable text and raw magnitude, e.g.
/// `{"text": "5.2 mi", "value": 8369}`.
#[derive(Debug, Clone, Deserialize)]
pub struct TextValue {
    pub text: String,
    pub value: u32,
}

/// Response from the geocoding endpoint.
#[derive(Debug, Clone, Deserialize)]
pub struct GeocodeResponse {
    pub status: String,
    #[serde(default)]
    pub results: Vec<GeocodeResult>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct GeocodeResult {
    pub geometry: Geometry,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Geometry {
    pub location: LatLng,
}

#[derive(Debug, Clone, Copy, Deserialize)]
pub struct LatLng {
    pub lat: f64,
    pub lng: f64,
}

/// Response from the distance-matrix endpoint.
///
/// We only ever request a single origin and destination, so the response is
/// one row with one element.
#[derive(Debug, Clone, Deserialize)]
pub struct DistanceMatrixResponse {
    pub status: String,
    #[serde(default)]
    pub rows: Vec<DistanceMatrixRow>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct DistanceMatrixRow {
    #[serde(default)]
    pub elements: Vec<DistanceMatrixElement>,
}

/// One origin/destination cell. `status` is per-element: the overall
/// response can be OK while a cell has no route.
#[derive(Debug, Clone, Deserialize)]
pub struct DistanceMatrixElement {
    pub status: String,
    pub distance: Option<TextValue>,
    pub duration: Option<TextValue>,
}

/// Response from the directions endpoint.
#[derive(Debug, Clone, Deserialize)]
pub struct DirectionsResponse {
    pub status: String,
    #[serde(default)]
    pub routes: Vec<DirectionsRoute>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct DirectionsRoute {
    pub overview_polyline: Option<Polyline>,
    #[serde(default)]
    pub legs: Vec<DirectionsLeg>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Polyline {
    pub points: String,
}

/// A leg of a route. Requests with no waypoints produce exactly one leg.
#[derive(Debug, Clone, Deserialize)]
pub struct DirectionsLeg {
    pub distance: Option<TextValue>,
    pub duration: Option<TextValue>,
}
