//! Great-circle distance between coordinates.
//!
//! Uses the haversine formula on a spherical Earth model, which stays well
//! within half a percent of an ellipsoidal geodesic for terrestrial
//! distances.

use ::geo::{HaversineDistance, Point};

use crate::domain::Coordinates;

const METERS_PER_MILE: f64 = 1609.344;

/// Great-circle distance between two points, in miles.
///
/// Symmetric, zero for identical points, and total for every valid
/// coordinate pair including the poles and antipodal points.
///
/// # Examples
///
/// ```
/// use facility_server::domain::Coordinates;
/// use facility_server::geo::distance_miles;
///
/// let a = Coordinates::new(47.6062, -122.3321).unwrap();
/// assert_eq!(distance_miles(a, a), 0.0);
/// ```
pub fn distance_miles(a: Coordinates, b: Coordinates) -> f64 {
    // geo points are (x, y) = (lng, lat)
    let pa = Point::new(a.lng(), a.lat());
    let pb = Point::new(b.lng(), b.lat());
    pa.haversine_distance(&pb) / METERS_PER_MILE
}
