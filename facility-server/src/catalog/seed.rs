//! Seed-data loading for the facility catalog.
//!
//! Seed records are static configuration: an ordered JSON list of facility
//! definitions loaded once before the first query. A default seed (the
//! original Seattle deployment) is bundled into the binary.

use std::path::Path;

use serde::{Deserialize, Deserializer};

/// The bundled default seed data.
pub const DEFAULT_SEED: &str = include_str!("../../data/facilities.json");

/// Errors from loading seed data.
#[derive(Debug, thiserror::Error)]
pub enum SeedError {
    /// Reading the seed file failed.
    #[error("failed to read seed file: {0}")]
    Io(#[from] std::io::Error),

    /// The seed JSON did not parse.
    #[error("failed to parse seed JSON: {0}")]
    Json(#[from] serde_json::Error),
}

/// A raw facility definition as it appears in seed data.
///
/// Coordinates arrive as a `[latitude, longitude]` pair and are validated
/// at catalog construction, not here. The `features` field accepts either a
/// list of tags or a single delimiter-separated string; both normalize to
/// the same ordered list at ingestion so nothing downstream branches on the
/// representation.
#[derive(Debug, Clone, Deserialize)]
pub struct FacilityRecord {
    pub name: String,
    pub address: String,
    #[serde(rename = "type")]
    pub kind: String,
    pub coordinates: (f64, f64),
    pub hours: String,
    #[serde(default, deserialize_with = "features_list")]
    pub features: Vec<String>,
    #[serde(default)]
    pub notes: Option<String>,
}

/// Deserialize a feature list from either a JSON array or a single
/// `","`/`";"`-separated string, trimming tags and dropping empties.
fn features_list<'de, D>(deserializer: D) -> Result<Vec<String>, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum ListOrString {
        List(Vec<String>),
        One(String),
    }

    let raw = match ListOrString::deserialize(deserializer)? {
        ListOrString::List(tags) => tags,
        ListOrString::One(s) => s.split([',', ';']).map(str::to_string).collect(),
    };

    Ok(raw
        .iter()
        .map(|tag| tag.trim())
        .filter(|tag| !tag.is_empty())
        .map(str::to_string)
        .collect())
}

/// Parse seed records from a JSON string.
pub fn load_records(json: &str) -> Result<Vec<FacilityRecord>, SeedError> {
    Ok(serde_json::from_str(json)?)
}

/// Load seed records from a JSON file on disk.
pub fn load_records_from_file(path: impl AsRef<Path>) -> Result<Vec<FacilityRecord>, SeedError> {
    let json = std::fs::read_to_string(path)?;
    load_records(&json)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn bundled_seed_parses() {
        let records = load_records(DEFAULT_SEED).unwrap();
        assert_eq!(records.len(), 6);
        assert_eq!(records[0].name, "Rainier Beach Community Center");
        assert_eq!(records[0].kind, "Community Center");
        assert_eq!(records[0].coordinates, (47.5223, -122.2666));
        assert!(records[5].notes.is_some());
    }

    #[test]
    fn features_as_list() {
        let json = r#"[{
            "name": "A", "address": "1 Main St", "type": "Library",
            "coordinates": [47.6, -122.3], "hours": "9:00AM-5:00PM",
            "features": ["Air Conditioning", " Restrooms "]
        }]"#;

        let records = load_records(json).unwrap();
        assert_eq!(records[0].features, vec!["Air Conditioning", "Restrooms"]);
        assert_eq!(records[0].notes, None);
    }

    #[test]
    fn features_as_delimited_string() {
        let json = r#"[{
            "name": "A", "address": "1 Main St", "type": "Library",
            "coordinates": [47.6, -122.3], "hours": "9:00AM-5:00PM",
            "features": "Air Conditioning, Restrooms; Seating"
        }]"#;

        let records = load_records(json).unwrap();
        assert_eq!(
            records[0].features,
            vec!["Air Conditioning", "Restrooms", "Seating"]
        );
    }

    #[test]
    fn features_default_to_empty() {
        let json = r#"[{
            "name": "A", "address": "1 Main St", "type": "Library",
            "coordinates": [47.6, -122.3], "hours": "9:00AM-5:00PM"
        }]"#;

        let records = load_records(json).unwrap();
        assert!(records[0].features.is_empty());
    }

    #[test]
    fn empty_tags_are_dropped() {
        let json = r#"[{
            "name": "A", "address": "1 Main St", "type": "Library",
            "coordinates": [47.6, -122.3], "hours": "9:00AM-5:00PM",
            "features": "Air Conditioning,,  ,Restrooms"
        }]"#;

        let records = load_records(json).unwrap();
        assert_eq!(records[0].features, vec!["Air Conditioning", "Restrooms"]);
    }

    #[test]
    fn malformed_json_is_an_error() {
        assert!(matches!(load_records("not json"), Err(SeedError::Json(_))));
        assert!(matches!(load_records(r#"[{"name": 42}]"#), Err(SeedError::Json(_))));
    }

    #[test]
    fn load_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(
            file,
            r#"[{{
                "name": "A", "address": "1 Main St", "type": "Library",
                "coordinates": [47.6, -122.3], "hours": "9:00AM-5:00PM",
                "features": []
            }}]"#
        )
        .unwrap();

        let records = load_records_from_file(file.path()).unwrap();
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].name, "A");
    }

    #[test]
    fn missing_file_is_an_error() {
        assert!(matches!(
            load_records_from_file("/nonexistent/facilities.json"),
            Err(SeedError::Io(_))
        ));
    }
}
