//! Core data models for drift
//!
//! This module contains the fundamental data structures used throughout the
//! whisper pipeline. Everything here is created per request and discarded
//! afterwards.

use serde::{Deserialize, Serialize};

use super::techniques::Technique;

/// A geographic coordinate in decimal degrees.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Coordinate {
    /// Latitude in degrees, positive north
    pub lat: f64,
    /// Longitude in degrees, positive east
    pub lng: f64,
}

impl Coordinate {
    /// Create a new coordinate
    pub const fn new(lat: f64, lng: f64) -> Self {
        Self { lat, lng }
    }
}

impl std::fmt::Display for Coordinate {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:.4}N, {:.4}E", self.lat, self.lng)
    }
}

/// A point of interest near the user, as supplied by the fetch layer.
///
/// Both the descriptive text and the position may be missing; the core
/// tolerates either.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PointOfInterest {
    /// Display title (e.g. an article title)
    pub title: String,
    /// Optional descriptive text
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub extract: Option<String>,
    /// Optional location
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub position: Option<Coordinate>,
}

impl PointOfInterest {
    /// Create a point with a title and nothing else
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            extract: None,
            position: None,
        }
    }

    /// Attach descriptive text
    pub fn with_extract(mut self, extract: impl Into<String>) -> Self {
        self.extract = Some(extract.into());
        self
    }

    /// Attach a position
    pub fn with_position(mut self, lat: f64, lng: f64) -> Self {
        self.position = Some(Coordinate::new(lat, lng));
        self
    }

    /// The descriptive text, or an empty string when absent
    pub fn extract_or_empty(&self) -> &str {
        self.extract.as_deref().unwrap_or("")
    }

    /// Text a technique should draw words from.
    ///
    /// Falls back to the title when there is no extract, so that a bare
    /// point still contributes vocabulary.
    pub fn source_text(&self) -> &str {
        match self.extract.as_deref() {
            Some(text) if !text.trim().is_empty() => text,
            _ => &self.title,
        }
    }
}

/// A point scored against the user's position and heading.
#[derive(Debug, Clone, PartialEq)]
pub struct ScoredCandidate {
    /// The underlying point
    pub poi: PointOfInterest,
    /// Great-circle distance from the user in meters (>= 0)
    pub distance_m: f64,
    /// Initial bearing from the user in degrees, [0, 360)
    pub bearing_deg: f64,
    /// Angle between bearing and heading in degrees, [0, 180]
    pub heading_delta_deg: f64,
}

/// The outcome of one generation request.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WhisperResult {
    /// The whisper sentence (never empty)
    pub text: String,
    /// Titles of the points that fed the whisper, at most two
    pub source_titles: Vec<String>,
    /// Technique that produced the text; `None` for fixed responses
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub technique: Option<Technique>,
}

impl WhisperResult {
    /// A fixed response that did not go through a technique
    pub fn fixed(text: impl Into<String>, source_titles: Vec<String>) -> Self {
        Self {
            text: text.into(),
            source_titles,
            technique: None,
        }
    }

    /// A generated response
    pub fn generated(text: String, source_titles: Vec<String>, technique: Technique) -> Self {
        Self {
            text,
            source_titles,
            technique: Some(technique),
        }
    }

    /// Number of characters in the whisper
    pub fn char_count(&self) -> usize {
        self.text.chars().count()
    }
}
