//! Drift Journal
//!
//! The log of whispers a session has produced, and the movement gate that
//! decides when the user has wandered far enough to deserve a new one.
//!
//! Entries live in memory only; `to_json` is there for callers that want to
//! hand the log to something else.

use chrono::{DateTime, Utc};
use rand::Rng;
use serde::{Deserialize, Serialize};

use super::config::DriftConfig;
use super::models::{Coordinate, WhisperResult};

/// Voice used when no voices are configured
pub const DEFAULT_VOICE: &str = "Charon";

/// One whisper, as presented to the user.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DriftEntry {
    /// Short content-derived identifier
    pub id: String,
    /// When the whisper was produced
    pub timestamp: DateTime<Utc>,
    /// The whisper text
    pub text: String,
    /// Where the user stood
    pub coords: Coordinate,
    /// Titles the whisper was built from
    pub anchors: Vec<String>,
    /// Voice the whisper should be spoken in
    pub voice: String,
}

impl DriftEntry {
    /// Build an entry from a result at an explicit time.
    pub fn new(
        result: &WhisperResult,
        coords: Coordinate,
        voice: impl Into<String>,
        timestamp: DateTime<Utc>,
    ) -> Self {
        Self {
            id: entry_id(&result.text, &timestamp),
            timestamp,
            text: result.text.clone(),
            coords,
            anchors: result.source_titles.clone(),
            voice: voice.into(),
        }
    }

    /// Build an entry stamped now, with a voice drawn from the configuration.
    pub fn record<R: Rng + ?Sized>(
        result: &WhisperResult,
        coords: Coordinate,
        config: &DriftConfig,
        rng: &mut R,
    ) -> Self {
        let voice = if config.voices.is_empty() {
            DEFAULT_VOICE.to_string()
        } else {
            config.voices[rng.gen_range(0..config.voices.len())].clone()
        };
        Self::new(result, coords, voice, Utc::now())
    }
}

/// First 12 hex digits of md5(timestamp ‖ text).
fn entry_id(text: &str, timestamp: &DateTime<Utc>) -> String {
    let digest = md5::compute(format!("{}|{}", timestamp.to_rfc3339(), text).as_bytes());
    format!("{:x}", digest)[..12].to_string()
}

/// Newest-first list of drift entries.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DriftLog {
    entries: Vec<DriftEntry>,
}

impl DriftLog {
    /// Create an empty log
    pub fn new() -> Self {
        Self::default()
    }

    /// Add an entry at the front
    pub fn push(&mut self, entry: DriftEntry) {
        self.entries.insert(0, entry);
    }

    /// The most recent entry
    pub fn latest(&self) -> Option<&DriftEntry> {
        self.entries.first()
    }

    /// Entries, newest first
    pub fn entries(&self) -> &[DriftEntry] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Pretty JSON of the whole log
    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(&self.entries)
    }
}

/// Decides whether the user has moved enough to trigger a new drift.
///
/// Movement is measured in raw degrees of latitude or longitude, not meters.
#[derive(Debug, Clone, PartialEq)]
pub struct MovementGate {
    threshold_deg: f64,
    last: Option<Coordinate>,
}

impl MovementGate {
    /// Create a gate with the given threshold in degrees
    pub fn new(threshold_deg: f64) -> Self {
        Self {
            threshold_deg,
            last: None,
        }
    }

    /// Gate using the configured threshold
    pub fn from_config(config: &DriftConfig) -> Self {
        Self::new(config.drift_threshold_deg)
    }

    /// Position of the last drift, if any
    pub fn last(&self) -> Option<Coordinate> {
        self.last
    }

    /// Whether `current` warrants a drift. Records `current` when it does.
    ///
    /// The first position always triggers.
    pub fn should_drift(&mut self, current: Coordinate) -> bool {
        let moved = match self.last {
            None => true,
            Some(last) => {
                (current.lat - last.lat).abs() > self.threshold_deg
                    || (current.lng - last.lng).abs() > self.threshold_deg
            }
        };
        if moved {
            self.last = Some(current);
        }
        moved
    }

    /// Forget the last position so the next one triggers
    pub fn reset(&mut self) {
        self.last = None;
    }
}
