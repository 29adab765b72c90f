//! In-memory facility catalog.
//!
//! The catalog is built once from seed records and is read-only afterwards:
//! queries never mutate facility data, and derived values (distance, open
//! status) are recomputed per query rather than stored. Construction is the
//! single place where seed data is validated: duplicate names and
//! out-of-range coordinates fail fast here instead of surfacing later at
//! query time.

pub mod seed;

use std::collections::HashMap;

use chrono::NaiveTime;
use serde_json::json;

use crate::domain::{Coordinates, Facility, InvalidCoordinates, QueryResult};
use crate::geo::distance_miles;

pub use seed::{DEFAULT_SEED, FacilityRecord, SeedError, load_records, load_records_from_file};

/// Errors from catalog construction.
#[derive(Debug, thiserror::Error)]
pub enum CatalogError {
    /// Two seed records share a name. Names are the lookup key, so the seed
    /// data must be fixed before the catalog can be used.
    #[error("duplicate facility name: {0}")]
    DuplicateName(String),

    /// A seed record carries coordinates outside the valid ranges.
    #[error("facility {name}: {source}")]
    InvalidCoordinates {
        name: String,
        source: InvalidCoordinates,
    },
}

/// Parameters for a proximity query.
#[derive(Debug, Clone)]
pub struct NearbyQuery {
    /// The user's location.
    pub origin: Coordinates,

    /// Maximum straight-line distance to include, in miles.
    pub max_distance_miles: f64,

    /// Category filter; empty means no filtering by kind.
    pub kinds: Vec<String>,

    /// When true, only facilities open at the evaluation instant.
    pub open_only: bool,

    /// Optional result cap. `None` returns every match.
    pub limit: Option<usize>,
}

impl NearbyQuery {
    /// A query with no kind filter, no open filter, and no result cap.
    pub fn new(origin: Coordinates, max_distance_miles: f64) -> Self {
        Self {
            origin,
            max_distance_miles,
            kinds: Vec::new(),
            open_only: false,
            limit: None,
        }
    }
}

/// Immutable store of facility records.
pub struct FacilityCatalog {
    facilities: Vec<Facility>,
    by_name: HashMap<String, usize>,
}

impl FacilityCatalog {
    /// Build a catalog from seed records, preserving input order.
    ///
    /// Fails on a duplicate name or out-of-range coordinates; a catalog is
    /// never constructed from partially-valid seed data.
    pub fn new(records: Vec<FacilityRecord>) -> Result<Self, CatalogError> {
        let mut facilities = Vec::with_capacity(records.len());
        let mut by_name = HashMap::with_capacity(records.len());

        for record in records {
            let (lat, lng) = record.coordinates;
            let coordinates =
                Coordinates::new(lat, lng).map_err(|source| CatalogError::InvalidCoordinates {
                    name: record.name.clone(),
                    source,
                })?;

            if by_name.insert(record.name.clone(), facilities.len()).is_some() {
                return Err(CatalogError::DuplicateName(record.name));
            }

            facilities.push(Facility {
                name: record.name,
                address: record.address,
                kind: record.kind,
                coordinates,
                hours: record.hours,
                features: record.features,
                notes: record.notes,
            });
        }

        Ok(Self { facilities, by_name })
    }

    /// Number of facilities in the catalog.
    pub fn len(&self) -> usize {
        self.facilities.len()
    }

    /// Whether the catalog is empty.
    pub fn is_empty(&self) -> bool {
        self.facilities.is_empty()
    }

    /// All facilities, in construction order.
    pub fn all(&self) -> &[Facility] {
        &self.facilities
    }

    /// Look up a facility by its unique name.
    ///
    /// `None` is the normal "not found" outcome, not an error.
    pub fn by_name(&self, name: &str) -> Option<&Facility> {
        self.by_name.get(name).map(|&idx| &self.facilities[idx])
    }

    /// All facilities of a given kind, unfiltered by distance.
    pub fn by_kind(&self, kind: &str) -> Vec<&Facility> {
        self.facilities.iter().filter(|f| f.kind == kind).collect()
    }

    /// All facilities carrying the given feature tag (exact match).
    pub fn with_feature(&self, feature: &str) -> Vec<&Facility> {
        self.facilities
            .iter()
            .filter(|f| f.has_feature(feature))
            .collect()
    }

    /// Facilities near the query origin, closest first.
    ///
    /// Computes distance and open status for every facility, drops those
    /// farther than `max_distance_miles`, applies the kind and open-only
    /// filters, and sorts ascending by distance with ties broken by name so
    /// the order is deterministic. The evaluation instant is explicit;
    /// callers at the presentation boundary pass "now".
    pub fn nearest(&self, query: &NearbyQuery, at: NaiveTime) -> Vec<QueryResult<'_>> {
        let mut results: Vec<QueryResult<'_>> = self
            .facilities
            .iter()
            .map(|facility| QueryResult {
                distance_miles: distance_miles(query.origin, facility.coordinates),
                is_open: facility.is_open_at(at),
                facility,
            })
            .filter(|row| row.distance_miles <= query.max_distance_miles)
            .filter(|row| query.kinds.is_empty() || query.kinds.iter().any(|k| *k == row.facility.kind))
            .filter(|row| !query.open_only || row.is_open)
            .collect();

        results.sort_by(|a, b| {
            a.distance_miles
                .total_cmp(&b.distance_miles)
                .then_with(|| a.facility.name.cmp(&b.facility.name))
        });

        if let Some(limit) = query.limit {
            results.truncate(limit);
        }

        results
    }

    /// The catalog as a GeoJSON FeatureCollection.
    ///
    /// GeoJSON uses (longitude, latitude) point order.
    pub fn to_geojson(&self) -> serde_json::Value {
        let features: Vec<serde_json::Value> = self
            .facilities
            .iter()
            .map(|f| {
                json!({
                    "type": "Feature",
                    "geometry": {
                        "type": "Point",
                        "coordinates": [f.coordinates.lng(), f.coordinates.lat()],
                    },
                    "properties": {
                        "name": f.name,
                        "address": f.address,
                        "type": f.kind,
                        "hours": f.hours,
                        "features": f.features,
                        "notes": f.notes,
                    },
                })
            })
            .collect();

        json!({
            "type": "FeatureCollection",
            "features": features,
        })
    }
}
