//! drift - Whispers from nearby places (Rust Engine)
//!
//! This library turns a position, a compass heading and a handful of nearby
//! points of interest into a short generated sentence, a "whisper". It is
//! designed to be consumed by:
//! - The CLI binary (src/bin/drift.rs)
//! - WASM bindings (`wasm` feature) for the browser front end
//!
//! # Architecture
//!
//! This crate follows the "Library-First" pattern:
//! - **lib.rs** (this file): Pure logic, no CLI concerns
//! - **bin/drift.rs**: Thin wrapper that calls the library
//!
//! Location watching, fetching nearby articles, speech and rendering all
//! belong to the caller. The library only sees a list of points and a
//! coordinate, and always answers with a sentence.
//!
//! # Example
//!
//! ```
//! use drift::{generate, Coordinate, PointOfInterest};
//!
//! let points = vec![
//!     PointOfInterest::new("Lighthouse Point")
//!         .with_extract("A lighthouse stood for a century.")
//!         .with_position(41.02, -105.0),
//!     PointOfInterest::new("Old Quarry")
//!         .with_extract("The quarry was abandoned in silence.")
//!         .with_position(41.03, -105.0),
//! ];
//! let whisper = generate(&points, Coordinate::new(41.0, -105.0), Some(0.0));
//! assert!(!whisper.text.is_empty());
//! assert_eq!(whisper.source_titles.len(), 2);
//! ```

pub mod core;

#[cfg(feature = "wasm")]
pub mod wasm;

pub use crate::core::{
    CharacterSink, Coordinate, DriftConfig, DriftEntry, DriftError, DriftLog, MovementGate,
    Pacer, PointOfInterest, Technique, WhisperGenerator, WhisperResult, WhisperStream,
};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Generate a whisper with default configuration.
///
/// Never fails: no points, a single point, or a failing technique each
/// produce a fixed sentence instead.
pub fn generate(
    points: &[PointOfInterest],
    user: Coordinate,
    heading: Option<f64>,
) -> WhisperResult {
    WhisperGenerator::default().generate(points, user, heading)
}

/// Generate a whisper with default configuration and stream it into `sink`.
///
/// The sink sees every character together with the text emitted so far;
/// the returned result holds the complete text.
pub fn generate_streaming<S: CharacterSink + ?Sized>(
    points: &[PointOfInterest],
    user: Coordinate,
    sink: &mut S,
    heading: Option<f64>,
) -> WhisperResult {
    WhisperGenerator::default().generate_streaming(points, user, sink, heading)
}
