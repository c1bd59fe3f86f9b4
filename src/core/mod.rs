//! Core module for the drift whisper engine
//!
//! # Architecture
//!
//! - `models`: Core data structures (Coordinate, PointOfInterest, WhisperResult)
//! - `error`: Error types using thiserror
//! - `config`: DriftConfig and its JSON loader
//! - `geo`: Bearing, distance and angular delta
//! - `selector`: Heading-aware candidate selection
//! - `lexicon`: Tokenizer and noun-like word extraction
//! - `techniques`: The five text generation techniques
//! - `generator`: WhisperGenerator orchestration
//! - `stream`: Lazy character emission and pacing
//! - `journal`: Drift log entries and the movement gate
//! - `points`: Point-of-interest JSON loading

pub mod models;
pub mod error;
pub mod config;
pub mod geo;
pub mod selector;
pub mod lexicon;
pub mod techniques;
pub mod generator;
pub mod stream;
pub mod journal;
pub mod points;

// Re-export commonly used types
pub use models::{Coordinate, PointOfInterest, ScoredCandidate, WhisperResult};
pub use error::{DriftError, Result, ResultExt, TechniqueError};
pub use config::{DriftConfig, CONFIG_FILE_NAME, SPECTRAL_VOICES};
pub use geo::{angular_delta, bearing, distance, within_radius, EARTH_RADIUS_M};
pub use selector::{CandidateSelector, Selection, DEFAULT_CONE_HALF_ANGLE};
pub use lexicon::{extract_nouns, tokenize};
pub use techniques::{Technique, TechniqueInput};
pub use generator::{capitalize_first, WhisperGenerator, VOID_WHISPER};
pub use stream::{CharacterSink, Pacer, WhisperStream};
pub use journal::{DriftEntry, DriftLog, MovementGate};
pub use points::{load_points, parse_points, read_points, GeoSearchRecord};
