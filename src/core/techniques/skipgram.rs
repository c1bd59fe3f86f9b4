//! Skip-gram sampler
//!
//! Walks both token streams in lockstep with a fixed stride, keeping each
//! visited token with some probability, alternating sources. The result is
//! left trailing off with an ellipsis.

use rand::Rng;

use crate::core::error::TechniqueError;
use crate::core::lexicon::tokenize;

const TECHNIQUE: &str = "skip-gram";

/// Sampler knobs, usually taken from `DriftConfig`
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SkipGramParams {
    pub stride: usize,
    pub probability: f64,
    pub cap: usize,
}

impl Default for SkipGramParams {
    fn default() -> Self {
        Self {
            stride: 2,
            probability: 0.7,
            cap: 8,
        }
    }
}

/// Sample strided tokens alternately from both fragments.
pub fn sample<R: Rng + ?Sized>(
    fragment_a: &str,
    fragment_b: &str,
    params: &SkipGramParams,
    rng: &mut R,
) -> Result<String, TechniqueError> {
    let tokens_a = tokenize(fragment_a);
    let tokens_b = tokenize(fragment_b);
    if tokens_a.is_empty() && tokens_b.is_empty() {
        return Err(TechniqueError::EmptyTokens {
            technique: TECHNIQUE,
        });
    }

    let stride = params.stride.max(1);
    let probability = params.probability.clamp(0.0, 1.0);
    let longest = tokens_a.len().max(tokens_b.len());

    let mut kept: Vec<&str> = Vec::new();
    let mut index = 0;
    'walk: while index < longest {
        for tokens in [&tokens_a, &tokens_b] {
            if kept.len() >= params.cap {
                break 'walk;
            }
            if let Some(token) = tokens.get(index) {
                if rng.gen_bool(probability) {
                    kept.push(token);
                }
            }
        }
        index += stride;
    }

    if kept.is_empty() {
        // Every coin came up tails; keep the opening word so the line is never blank
        if let Some(first) = tokens_a.first().or_else(|| tokens_b.first()) {
            kept.push(first);
        }
    }

    Ok(format!("{}...", kept.join(" ")))
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    const A: &str = "one two three four five six seven eight nine ten";
    const B: &str = "red orange yellow green blue indigo violet";

    #[test]
    fn test_certain_sampling_alternates_at_stride() {
        let params = SkipGramParams {
            stride: 2,
            probability: 1.0,
            cap: 8,
        };
        let mut rng = StdRng::seed_from_u64(0);
        let out = sample(A, B, &params, &mut rng).unwrap();
        assert_eq!(out, "one red three yellow five blue seven violet...");
    }

    #[test]
    fn test_cap_is_respected() {
        let params = SkipGramParams {
            stride: 1,
            probability: 1.0,
            cap: 3,
        };
        let mut rng = StdRng::seed_from_u64(0);
        let out = sample(A, B, &params, &mut rng).unwrap();
        assert_eq!(out, "one red two...");
    }

    #[test]
    fn test_zero_probability_keeps_first_word() {
        let params = SkipGramParams {
            stride: 2,
            probability: 0.0,
            cap: 8,
        };
        let mut rng = StdRng::seed_from_u64(0);
        assert_eq!(sample(A, B, &params, &mut rng).unwrap(), "one...");
    }

    #[test]
    fn test_default_params_stay_under_cap() {
        let mut rng = StdRng::seed_from_u64(77);
        for _ in 0..100 {
            let out = sample(A, B, &SkipGramParams::default(), &mut rng).unwrap();
            assert!(out.ends_with("..."));
            let words = out.trim_end_matches("...").split(' ').count();
            assert!(words >= 1 && words <= 8);
        }
    }

    #[test]
    fn test_empty_fragments_fail() {
        let mut rng = StdRng::seed_from_u64(0);
        assert!(sample("", "", &SkipGramParams::default(), &mut rng).is_err());
    }
}
