//! Markov / bigram blend
//!
//! Builds a directed multigraph of "word → next word" edges from each
//! fragment, merges the two, and walks it from a word both fragments share.
//! The shared seed is what makes the result read as a blend rather than a
//! quote from one side.

use std::collections::{BTreeMap, HashSet};

use rand::Rng;

use crate::core::error::TechniqueError;
use crate::core::lexicon::{is_stopword, tokenize};

const TECHNIQUE: &str = "markov-blend";

/// Word adjacency: each key maps to every word that followed it, repeats kept.
pub type BigramMap = BTreeMap<String, Vec<String>>;

/// Bigram edges of one token stream.
pub fn bigrams(tokens: &[String]) -> BigramMap {
    let mut map = BigramMap::new();
    for pair in tokens.windows(2) {
        map.entry(pair[0].clone()).or_default().push(pair[1].clone());
    }
    map
}

/// Merge `other` into `into`, concatenating edge lists.
pub fn merge(into: &mut BigramMap, other: BigramMap) {
    for (word, nexts) in other {
        into.entry(word).or_default().extend(nexts);
    }
}

/// Words of `a` that also appear in `b`, in first-occurrence order.
/// Content words come before stopwords.
///
/// A shared word may have no outgoing edge; the walk then ends after it.
pub fn shared_seeds(a: &[String], b: &[String]) -> Vec<String> {
    let in_b: HashSet<&str> = b.iter().map(String::as_str).collect();
    let mut seen = HashSet::new();
    let shared: Vec<String> = a
        .iter()
        .filter(|word| in_b.contains(word.as_str()))
        .filter(|word| seen.insert(word.as_str()))
        .cloned()
        .collect();

    let (content, function): (Vec<String>, Vec<String>) =
        shared.into_iter().partition(|word| !is_stopword(word));
    if content.is_empty() {
        function
    } else {
        content
    }
}

/// Blend two fragments with a bounded random walk of at most `steps` words.
pub fn blend<R: Rng + ?Sized>(
    fragment_a: &str,
    fragment_b: &str,
    steps: usize,
    rng: &mut R,
) -> Result<String, TechniqueError> {
    let tokens_a = tokenize(fragment_a);
    let tokens_b = tokenize(fragment_b);

    let mut map = bigrams(&tokens_a);
    merge(&mut map, bigrams(&tokens_b));

    if map.is_empty() {
        // Single-word fragments still give us something to say
        return tokens_a
            .first()
            .or_else(|| tokens_b.first())
            .cloned()
            .ok_or(TechniqueError::EmptyTokens {
                technique: TECHNIQUE,
            });
    }

    let seeds = shared_seeds(&tokens_a, &tokens_b);
    let seed = if seeds.is_empty() {
        let keys: Vec<&String> = map.keys().collect();
        keys[rng.gen_range(0..keys.len())].clone()
    } else {
        seeds[rng.gen_range(0..seeds.len())].clone()
    };

    let mut walk = vec![seed];
    while walk.len() < steps.max(1) {
        let current = &walk[walk.len() - 1];
        let next = match map.get(current) {
            Some(nexts) if !nexts.is_empty() => nexts[rng.gen_range(0..nexts.len())].clone(),
            _ => break,
        };
        walk.push(next);
    }

    Ok(walk.join(" "))
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn toks(text: &str) -> Vec<String> {
        tokenize(text)
    }

    #[test]
    fn test_bigrams_keep_repeats() {
        let map = bigrams(&toks("stone bridge stone bridge stone river"));
        assert_eq!(map["stone"], vec!["bridge", "bridge", "river"]);
        assert_eq!(map["bridge"], vec!["stone", "stone"]);
        assert!(!map.contains_key("river"));
    }

    #[test]
    fn test_merge_concatenates_edges() {
        let mut map = bigrams(&toks("old bridge sags"));
        merge(&mut map, bigrams(&toks("old mill turns")));
        assert_eq!(map["old"], vec!["bridge", "mill"]);
    }

    #[test]
    fn test_shared_seeds_prefer_content_words() {
        let a = toks("the iron bridge crossed the canyon");
        let b = toks("the bridge burned down the valley");
        assert_eq!(shared_seeds(&a, &b), vec!["bridge"]);
    }

    #[test]
    fn test_shared_seeds_keep_words_without_successors() {
        let a = toks("travelers crossed over the old bridge");
        let b = toks("farmers built another wooden bridge");
        assert_eq!(shared_seeds(&a, &b), vec!["bridge"]);
    }

    #[test]
    fn test_shared_final_word_still_seeds_the_walk() {
        // "bridge" ends both fragments, so the walk stops right after it
        let a = "Travelers crossed over the old bridge";
        let b = "Farmers built another wooden bridge";
        let mut rng = StdRng::seed_from_u64(1);
        let trials = 200;
        let starts = (0..trials)
            .filter(|_| blend(a, b, 8, &mut rng).unwrap().starts_with("bridge"))
            .count();
        assert!(starts * 2 > trials, "only {} of {} walks started at bridge", starts, trials);
        assert_eq!(blend(a, b, 8, &mut rng).unwrap(), "bridge");
    }

    #[test]
    fn test_walk_length_is_bounded() {
        let mut rng = StdRng::seed_from_u64(9);
        let text = "one two three one two three one two three one two three";
        for steps in [1, 4, 8] {
            let out = blend(text, text, steps, &mut rng).unwrap();
            assert!(out.split(' ').count() <= steps);
        }
    }

    #[test]
    fn test_walk_stops_at_dead_end() {
        let mut rng = StdRng::seed_from_u64(2);
        // Only edge: granite -> pyramid, and pyramid has no successor
        let out = blend("granite pyramid", "granite", 8, &mut rng).unwrap();
        assert_eq!(out, "granite pyramid");
    }

    #[test]
    fn test_shared_word_biases_the_seed() {
        let a = "The old bridge carried wagons over the river for decades.";
        let b = "A covered bridge burned during the winter flood.";
        let mut rng = StdRng::seed_from_u64(1234);
        let trials = 200;
        let starts = (0..trials)
            .filter(|_| {
                blend(a, b, 8, &mut rng)
                    .unwrap()
                    .starts_with("bridge")
            })
            .count();
        assert!(starts * 2 > trials, "only {} of {} walks started at bridge", starts, trials);
    }

    #[test]
    fn test_empty_fragments_fail() {
        let mut rng = StdRng::seed_from_u64(0);
        let err = blend("", "?!", 8, &mut rng).unwrap_err();
        assert_eq!(err, TechniqueError::EmptyTokens { technique: TECHNIQUE });
    }

    #[test]
    fn test_single_token_fragments() {
        let mut rng = StdRng::seed_from_u64(0);
        assert_eq!(blend("monument", "", 8, &mut rng).unwrap(), "monument");
    }
}
