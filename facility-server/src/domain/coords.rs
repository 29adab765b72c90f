//! Geographic coordinate types.

use std::fmt;

/// Error returned when constructing coordinates outside the valid ranges.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("invalid coordinates: {reason}")]
pub struct InvalidCoordinates {
    reason: &'static str,
}

impl InvalidCoordinates {
    fn new(reason: &'static str) -> Self {
        Self { reason }
    }
}

/// A validated (latitude, longitude) pair in decimal degrees.
///
/// Latitude is in [-90, 90], longitude in [-180, 180], both finite. Any
/// `Coordinates` value is valid by construction, so code operating on
/// coordinates (distance, serialization) never needs to re-check ranges.
///
/// # Examples
///
/// ```
/// use facility_server::domain::Coordinates;
///
/// let seattle = Coordinates::new(47.6062, -122.3321).unwrap();
/// assert_eq!(seattle.lat(), 47.6062);
/// assert_eq!(seattle.lng(), -122.3321);
///
/// // Out-of-range values are rejected
/// assert!(Coordinates::new(91.0, 0.0).is_err());
/// assert!(Coordinates::new(0.0, 180.5).is_err());
/// assert!(Coordinates::new(f64::NAN, 0.0).is_err());
/// ```
#[derive(Clone, Copy, PartialEq)]
pub struct Coordinates {
    lat: f64,
    lng: f64,
}

impl Coordinates {
    /// Create validated coordinates from decimal degrees.
    pub fn new(lat: f64, lng: f64) -> Result<Self, InvalidCoordinates> {
        if !lat.is_finite() || !lng.is_finite() {
            return Err(InvalidCoordinates::new("latitude and longitude must be finite"));
        }
        if !(-90.0..=90.0).contains(&lat) {
            return Err(InvalidCoordinates::new("latitude must be in [-90, 90]"));
        }
        if !(-180.0..=180.0).contains(&lng) {
            return Err(InvalidCoordinates::new("longitude must be in [-180, 180]"));
        }
        Ok(Self { lat, lng })
    }

    /// Returns the latitude in decimal degrees.
    pub fn lat(&self) -> f64 {
        self.lat
    }

    /// Returns the longitude in decimal degrees.
    pub fn lng(&self) -> f64 {
        self.lng
    }
}

impl fmt::Debug for Coordinates {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Coordinates({}, {})", self.lat, self.lng)
    }
}

impl fmt::Display for Coordinates {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{},{}", self.lat, self.lng)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn accepts_valid_ranges() {
        assert!(Coordinates::new(0.0, 0.0).is_ok());
        assert!(Coordinates::new(47.6062, -122.3321).is_ok());
        assert!(Coordinates::new(-33.8688, 151.2093).is_ok());

        // Boundary values are valid
        assert!(Coordinates::new(90.0, 0.0).is_ok());
        assert!(Coordinates::new(-90.0, 0.0).is_ok());
        assert!(Coordinates::new(0.0, 180.0).is_ok());
        assert!(Coordinates::new(0.0, -180.0).is_ok());
    }

    #[test]
    fn rejects_out_of_range() {
        assert!(Coordinates::new(90.001, 0.0).is_err());
        assert!(Coordinates::new(-90.001, 0.0).is_err());
        assert!(Coordinates::new(0.0, 180.001).is_err());
        assert!(Coordinates::new(0.0, -180.001).is_err());
    }

    #[test]
    fn rejects_non_finite() {
        assert!(Coordinates::new(f64::NAN, 0.0).is_err());
        assert!(Coordinates::new(0.0, f64::NAN).is_err());
        assert!(Coordinates::new(f64::INFINITY, 0.0).is_err());
        assert!(Coordinates::new(0.0, f64::NEG_INFINITY).is_err());
    }

    #[test]
    fn accessors() {
        let c = Coordinates::new(47.6062, -122.3321).unwrap();
        assert_eq!(c.lat(), 47.6062);
        assert_eq!(c.lng(), -122.3321);
    }

    #[test]
    fn display_format() {
        let c = Coordinates::new(47.5, -122.25).unwrap();
        assert_eq!(c.to_string(), "47.5,-122.25");
    }

    #[test]
    fn equality() {
        let a = Coordinates::new(47.6, -122.3).unwrap();
        let b = Coordinates::new(47.6, -122.3).unwrap();
        let c = Coordinates::new(47.7, -122.3).unwrap();
        assert_eq!(a, b);
        assert_ne!(a, c);
    }
}
