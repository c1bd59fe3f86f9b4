//! Phonetic bridge
//!
//! Finds the pair of nouns, one from each fragment, that share the most
//! three-letter substrings and joins them with a connective phrase. The
//! overlap is a crude stand-in for "sounds alike".

use std::collections::HashSet;

use rand::Rng;

use crate::core::error::TechniqueError;
use crate::core::lexicon::{extract_nouns, DEFAULT_NOUN_A, DEFAULT_NOUN_B};

const TECHNIQUE: &str = "phonetic-bridge";

/// Connective phrasings; `{a}` and `{b}` are the bridged nouns.
pub const CONNECTIVES: &[&str] = &[
    "{a} bleeds into {b}",
    "between {a} and {b}, the same hum",
    "{a}, {b}: one sound wearing two names",
    "{a} folds into {b} where the letters touch",
    "say {a} slowly and it becomes {b}",
    "{a} rhymes with {b} in the dark",
];

/// The set of three-character substrings of `word`.
pub fn trigrams(word: &str) -> HashSet<String> {
    let chars: Vec<char> = word.chars().collect();
    chars.windows(3).map(|w| w.iter().collect()).collect()
}

/// Number of trigrams `a` and `b` have in common.
pub fn trigram_overlap(a: &str, b: &str) -> usize {
    trigrams(a).intersection(&trigrams(b)).count()
}

/// The cross pair with the highest overlap; the first pair found wins ties.
///
/// Returns `None` only when either list is empty.
pub fn best_pair<'n>(
    nouns_a: &'n [String],
    nouns_b: &'n [String],
) -> Option<(&'n str, &'n str, usize)> {
    let mut best: Option<(&str, &str, usize)> = None;
    for a in nouns_a {
        for b in nouns_b {
            let score = trigram_overlap(a, b);
            if best.map_or(true, |(_, _, top)| score > top) {
                best = Some((a.as_str(), b.as_str(), score));
            }
        }
    }
    best
}

/// Bridge two fragments through their most similar-sounding nouns.
pub fn bridge<R: Rng + ?Sized>(
    fragment_a: &str,
    fragment_b: &str,
    rng: &mut R,
) -> Result<String, TechniqueError> {
    let mut nouns_a = extract_nouns(fragment_a);
    if nouns_a.is_empty() {
        nouns_a.push(DEFAULT_NOUN_A.to_string());
    }
    let mut nouns_b = extract_nouns(fragment_b);
    if nouns_b.is_empty() {
        nouns_b.push(DEFAULT_NOUN_B.to_string());
    }

    let (a, b, _) = best_pair(&nouns_a, &nouns_b).ok_or(TechniqueError::EmptyTokens {
        technique: TECHNIQUE,
    })?;
    if CONNECTIVES.is_empty() {
        return Err(TechniqueError::EmptyTable {
            technique: TECHNIQUE,
            table: "connectives",
        });
    }
    let phrase = CONNECTIVES[rng.gen_range(0..CONNECTIVES.len())];

    Ok(phrase.replacen("{a}", a, 1).replacen("{b}", b, 1))
}
