//! Point loading
//!
//! Reads point-of-interest sets handed over by the fetch layer. Three JSON
//! shapes are accepted:
//!
//! ```text
//! [{"title": "...", "extract": "...", "position": {"lat": 0, "lng": 0}}]   native
//! [{"title": "...", "lat": 0, "lon": 0, "dist": 12.5}]                    geosearch records
//! {"query": {"geosearch": [ ... ]}}                                        full geosearch reply
//! ```

use std::fs;
use std::io::Read;
use std::path::Path;

use serde::Deserialize;

use super::error::{DriftError, Result, ResultExt};
use super::models::{Coordinate, PointOfInterest};

/// One record of a geographic search reply.
#[derive(Debug, Clone, Deserialize)]
pub struct GeoSearchRecord {
    pub title: String,
    pub lat: f64,
    pub lon: f64,
    #[serde(default)]
    pub extract: Option<String>,
}

impl From<GeoSearchRecord> for PointOfInterest {
    fn from(record: GeoSearchRecord) -> Self {
        PointOfInterest {
            title: record.title,
            extract: record.extract,
            position: Some(Coordinate::new(record.lat, record.lon)),
        }
    }
}

#[derive(Deserialize)]
#[serde(untagged)]
enum PointRecord {
    // Tried first: the native shape would otherwise swallow lat/lon records
    GeoSearch(GeoSearchRecord),
    Native(PointOfInterest),
}

impl From<PointRecord> for PointOfInterest {
    fn from(record: PointRecord) -> Self {
        match record {
            PointRecord::GeoSearch(r) => r.into(),
            PointRecord::Native(p) => p,
        }
    }
}

#[derive(Deserialize)]
struct GeoSearchQuery {
    #[serde(default)]
    geosearch: Vec<GeoSearchRecord>,
}

#[derive(Deserialize)]
#[serde(untagged)]
enum PointDocument {
    List(Vec<PointRecord>),
    Reply { query: GeoSearchQuery },
}

/// Parse points from a JSON string.
pub fn parse_points(json: &str) -> Result<Vec<PointOfInterest>> {
    let document: PointDocument = serde_json::from_str(json).map_err(|e| {
        DriftError::invalid_points(format!("expected a list of points or a geosearch reply: {}", e))
    })?;
    Ok(match document {
        PointDocument::List(records) => records.into_iter().map(Into::into).collect(),
        PointDocument::Reply { query } => query.geosearch.into_iter().map(Into::into).collect(),
    })
}

/// Read points from a JSON file.
pub fn load_points(path: &Path) -> Result<Vec<PointOfInterest>> {
    let contents = fs::read_to_string(path)
        .map_err(DriftError::from)
        .context(format!("reading {}", path.display()))?;
    parse_points(&contents).context(format!("parsing {}", path.display()))
}

/// Read points from any reader (e.g. stdin).
pub fn read_points<R: Read>(mut reader: R) -> Result<Vec<PointOfInterest>> {
    let mut contents = String::new();
    reader.read_to_string(&mut contents)?;
    parse_points(&contents)
}
