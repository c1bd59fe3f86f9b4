//! Whisper Generator
//!
//! The root of the pipeline: select candidates, pick a technique, run it,
//! and normalize the result. Generation never fails from the caller's point
//! of view:
//!
//! ```text
//! points ──► CandidateSelector ──► Selection
//!                                    │
//!            None ───────────────────┼──► VOID_WHISPER
//!            Single(poi) ────────────┼──► single_whisper(title)
//!            Pair(a, b) ──► Technique::apply ──► capitalize_first
//!                                    │ (Err / empty / panic)
//!                                    └──► fallback_whisper(a, b)
//! ```
//!
//! The generator holds only immutable configuration, so one instance can be
//! shared freely between threads.

use std::panic::{self, AssertUnwindSafe};

use rand::Rng;
use tracing::{debug, warn};

use super::config::DriftConfig;
use super::models::{Coordinate, PointOfInterest, WhisperResult};
use super::selector::{CandidateSelector, Selection};
use super::stream::{CharacterSink, WhisperStream};
use super::techniques::{Technique, TechniqueInput};

/// Response when there is nothing nearby to speak of
pub const VOID_WHISPER: &str = "The signal is too weak to hold. The void is silent.";

/// Response for a lone point of interest.
pub fn single_whisper(title: &str) -> String {
    format!("Only {} answers, and it will not say what it remembers.", title)
}

/// Response when a technique fails on a pair.
pub fn fallback_whisper(title_a: &str, title_b: &str) -> String {
    format!(
        "{} and {} murmur to each other beneath the static.",
        title_a, title_b
    )
}

/// Uppercase the first character and leave the rest untouched.
pub fn capitalize_first(text: &str) -> String {
    let mut chars = text.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

/// Stateless whisper service.
#[derive(Debug, Clone, Default)]
pub struct WhisperGenerator {
    config: DriftConfig,
    selector: CandidateSelector,
}

impl WhisperGenerator {
    /// Create a generator from configuration
    pub fn new(config: DriftConfig) -> Self {
        let selector = CandidateSelector::new(config.cone_half_angle_deg);
        Self { config, selector }
    }

    /// The configuration in use
    pub fn config(&self) -> &DriftConfig {
        &self.config
    }

    /// Generate a whisper using the thread-local random source.
    pub fn generate(
        &self,
        points: &[PointOfInterest],
        user: Coordinate,
        heading: Option<f64>,
    ) -> WhisperResult {
        self.generate_with_rng(points, user, heading, &mut rand::thread_rng())
    }

    /// Generate a whisper with an explicit random source.
    pub fn generate_with_rng<R: Rng + ?Sized>(
        &self,
        points: &[PointOfInterest],
        user: Coordinate,
        heading: Option<f64>,
        rng: &mut R,
    ) -> WhisperResult {
        let selection = self.selector.select(points, user, heading, rng);
        self.compose(&selection, None, rng)
    }

    /// Generate a whisper with a fixed technique instead of a random one.
    ///
    /// Fixed responses (no points, one point) are unaffected.
    pub fn generate_with_technique<R: Rng + ?Sized>(
        &self,
        points: &[PointOfInterest],
        user: Coordinate,
        heading: Option<f64>,
        technique: Technique,
        rng: &mut R,
    ) -> WhisperResult {
        let selection = self.selector.select(points, user, heading, rng);
        self.compose(&selection, Some(technique), rng)
    }

    /// Turn a selection into a whisper.
    pub fn compose<R: Rng + ?Sized>(
        &self,
        selection: &Selection,
        forced: Option<Technique>,
        rng: &mut R,
    ) -> WhisperResult {
        match selection {
            Selection::None => {
                debug!("no candidates, returning the void whisper");
                WhisperResult::fixed(VOID_WHISPER, Vec::new())
            }
            Selection::Single(poi) => {
                debug!(title = %poi.title, "single candidate");
                WhisperResult::fixed(single_whisper(&poi.title), vec![poi.title.clone()])
            }
            Selection::Pair(a, b) => self.compose_pair(a, b, forced, rng),
        }
    }

    fn compose_pair<R: Rng + ?Sized>(
        &self,
        a: &PointOfInterest,
        b: &PointOfInterest,
        forced: Option<Technique>,
        rng: &mut R,
    ) -> WhisperResult {
        let fallback = || {
            WhisperResult::fixed(
                fallback_whisper(&a.title, &b.title),
                vec![a.title.clone(), b.title.clone()],
            )
        };

        let technique = match forced.or_else(|| Technique::choose(&self.config.techniques, rng)) {
            Some(technique) => technique,
            None => {
                warn!("no techniques enabled, using fallback whisper");
                return fallback();
            }
        };

        let input = TechniqueInput {
            fragment_a: a.source_text(),
            fragment_b: b.source_text(),
            title_a: &a.title,
            title_b: &b.title,
        };

        let outcome = panic::catch_unwind(AssertUnwindSafe(|| {
            technique.apply(&input, &self.config, rng)
        }));

        match outcome {
            Ok(Ok(text)) if !text.trim().is_empty() => {
                debug!(%technique, "generated whisper");
                WhisperResult::generated(
                    capitalize_first(text.trim()),
                    vec![a.title.clone(), b.title.clone()],
                    technique,
                )
            }
            Ok(Ok(_)) => {
                warn!(%technique, "technique produced empty text, using fallback whisper");
                fallback()
            }
            Ok(Err(err)) => {
                warn!(%technique, error = %err, "technique failed, using fallback whisper");
                fallback()
            }
            Err(_) => {
                warn!(%technique, "technique panicked, using fallback whisper");
                fallback()
            }
        }
    }

    /// Generate a whisper and wrap it in a lazy character stream.
    pub fn stream<R: Rng + ?Sized>(
        &self,
        points: &[PointOfInterest],
        user: Coordinate,
        heading: Option<f64>,
        rng: &mut R,
    ) -> WhisperStream {
        WhisperStream::new(self.generate_with_rng(points, user, heading, rng))
    }

    /// Generate a whisper and hand it to `sink` one character at a time.
    ///
    /// Returns the complete result once every character has been emitted.
    /// Pacing is left to the caller (see `Pacer`).
    pub fn generate_streaming<S: CharacterSink + ?Sized>(
        &self,
        points: &[PointOfInterest],
        user: Coordinate,
        sink: &mut S,
        heading: Option<f64>,
    ) -> WhisperResult {
        self.generate_streaming_with_rng(points, user, sink, heading, &mut rand::thread_rng())
    }

    /// `generate_streaming` with an explicit random source.
    pub fn generate_streaming_with_rng<S: CharacterSink + ?Sized, R: Rng + ?Sized>(
        &self,
        points: &[PointOfInterest],
        user: Coordinate,
        sink: &mut S,
        heading: Option<f64>,
        rng: &mut R,
    ) -> WhisperResult {
        self.stream(points, user, heading, rng).drain_into(sink)
    }
}
