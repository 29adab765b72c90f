//! Facility records and per-query result rows.

use chrono::NaiveTime;

use super::Coordinates;
use super::hours;

/// A physical location with coordinates, hours, and category/features.
///
/// Facilities are immutable after catalog construction. The `name` is the
/// unique lookup key within a catalog. The `hours` string is kept raw:
/// a malformed value degrades that facility to "closed" at query time
/// instead of failing the load.
#[derive(Debug, Clone, PartialEq)]
pub struct Facility {
    /// Unique name within the catalog.
    pub name: String,

    /// Display address; not parsed.
    pub address: String,

    /// Open-ended category string, e.g. "Community Center" or "Library".
    pub kind: String,

    /// Validated location.
    pub coordinates: Coordinates,

    /// Daily operating window, e.g. `"9:00AM-9:00PM"`.
    pub hours: String,

    /// Ordered capability tags, e.g. "Air Conditioning".
    pub features: Vec<String>,

    /// Optional free-text notes.
    pub notes: Option<String>,
}

impl Facility {
    /// Whether this facility is open at the given instant.
    ///
    /// Malformed hours strings are treated as closed (see
    /// [`hours::is_open`]).
    pub fn is_open_at(&self, at: NaiveTime) -> bool {
        hours::is_open(&self.hours, at)
    }

    /// Whether this facility carries the given feature tag (exact match).
    pub fn has_feature(&self, feature: &str) -> bool {
        self.features.iter().any(|f| f == feature)
    }
}

/// A facility row produced by a proximity query.
///
/// `distance_miles` and `is_open` are recomputed on every query (open status
/// changes with the clock) and never persisted on the facility itself.
#[derive(Debug, Clone)]
pub struct QueryResult<'a> {
    /// The matched facility.
    pub facility: &'a Facility,

    /// Great-circle distance from the query origin, in miles.
    pub distance_miles: f64,

    /// Open status at the query's evaluation instant.
    pub is_open: bool,
}
