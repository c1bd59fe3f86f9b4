//! Generation Techniques
//!
//! Five independent ways of turning two text fragments into one whisper:
//!
//! | Technique        | Idea                                                  |
//! |------------------|-------------------------------------------------------|
//! | Template fill    | Slot titles, nouns, verbs into a sentence template    |
//! | Markov blend     | Walk a bigram graph built from both fragments         |
//! | Cut-up           | Interleave short random chunks of both fragments      |
//! | Phonetic bridge  | Pair the two nouns that share the most trigrams       |
//! | Skip-gram        | Sample strided tokens alternately from each fragment  |
//!
//! Every technique is a pure function of its input and an injected random
//! source. None of them capitalize; the generator does that once.

pub mod cutup;
pub mod markov;
pub mod phonetic;
pub mod skipgram;
pub mod template;

use rand::Rng;
use serde::{Deserialize, Serialize};

use super::config::DriftConfig;
use super::error::TechniqueError;

/// The available generation techniques.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Technique {
    TemplateFill,
    MarkovBlend,
    CutUp,
    PhoneticBridge,
    SkipGram,
}

impl Technique {
    /// Every technique, in a stable order
    pub const ALL: [Technique; 5] = [
        Technique::TemplateFill,
        Technique::MarkovBlend,
        Technique::CutUp,
        Technique::PhoneticBridge,
        Technique::SkipGram,
    ];

    /// Stable kebab-case name
    pub fn name(&self) -> &'static str {
        match self {
            Technique::TemplateFill => "template-fill",
            Technique::MarkovBlend => "markov-blend",
            Technique::CutUp => "cut-up",
            Technique::PhoneticBridge => "phonetic-bridge",
            Technique::SkipGram => "skip-gram",
        }
    }

    /// Parse a technique name (a few short aliases are accepted)
    pub fn parse(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "template-fill" | "template" => Some(Technique::TemplateFill),
            "markov-blend" | "markov" | "bigram" => Some(Technique::MarkovBlend),
            "cut-up" | "cutup" => Some(Technique::CutUp),
            "phonetic-bridge" | "phonetic" => Some(Technique::PhoneticBridge),
            "skip-gram" | "skipgram" => Some(Technique::SkipGram),
            _ => None,
        }
    }

    /// Pick one technique uniformly from `enabled`.
    pub fn choose<R: Rng + ?Sized>(enabled: &[Technique], rng: &mut R) -> Option<Technique> {
        if enabled.is_empty() {
            return None;
        }
        Some(enabled[rng.gen_range(0..enabled.len())])
    }

    /// Run this technique over `input`.
    pub fn apply<R: Rng + ?Sized>(
        &self,
        input: &TechniqueInput<'_>,
        config: &DriftConfig,
        rng: &mut R,
    ) -> Result<String, TechniqueError> {
        match self {
            Technique::TemplateFill => template::fill_random(input, rng),
            Technique::MarkovBlend => markov::blend(
                input.fragment_a,
                input.fragment_b,
                config.markov_steps,
                rng,
            ),
            Technique::CutUp => cutup::interleave(
                input.fragment_a,
                input.fragment_b,
                config.cutup_target_min..=config.cutup_target_max,
                rng,
            ),
            Technique::PhoneticBridge => {
                phonetic::bridge(input.fragment_a, input.fragment_b, rng)
            }
            Technique::SkipGram => skipgram::sample(
                input.fragment_a,
                input.fragment_b,
                &skipgram::SkipGramParams {
                    stride: config.skipgram_stride,
                    probability: config.skipgram_probability,
                    cap: config.skipgram_cap,
                },
                rng,
            ),
        }
    }
}

impl std::fmt::Display for Technique {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.name())
    }
}

/// The two fragments (and titles) a technique combines.
#[derive(Debug, Clone, Copy)]
pub struct TechniqueInput<'a> {
    pub fragment_a: &'a str,
    pub fragment_b: &'a str,
    pub title_a: &'a str,
    pub title_b: &'a str,
}
