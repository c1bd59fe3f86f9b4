//! Cut-up interleave
//!
//! Slices each fragment into short runs of words and deals them out,
//! picking the source at random each time, until the target count is reached
//! or both piles are empty.

use std::collections::VecDeque;
use std::ops::RangeInclusive;

use rand::Rng;

use crate::core::error::TechniqueError;

const TECHNIQUE: &str = "cut-up";

/// Separator placed between dealt chunks
pub const CUTUP_SEPARATOR: &str = " — ";

/// Chunk sizes, in words
pub const CHUNK_WORDS: RangeInclusive<usize> = 2..=4;

/// Split `text` into consecutive chunks of 2–4 words.
///
/// The final chunk may be shorter when the words run out.
pub fn chunk<R: Rng + ?Sized>(text: &str, rng: &mut R) -> VecDeque<String> {
    let words: Vec<&str> = text.split_whitespace().collect();
    let mut chunks = VecDeque::new();
    let mut start = 0;
    while start < words.len() {
        let size = rng.gen_range(CHUNK_WORDS);
        let end = (start + size).min(words.len());
        chunks.push_back(words[start..end].join(" "));
        start = end;
    }
    chunks
}

/// Interleave chunks of both fragments into a single cut-up line.
pub fn interleave<R: Rng + ?Sized>(
    fragment_a: &str,
    fragment_b: &str,
    target: RangeInclusive<usize>,
    rng: &mut R,
) -> Result<String, TechniqueError> {
    let mut pile_a = chunk(fragment_a, rng);
    let mut pile_b = chunk(fragment_b, rng);
    if pile_a.is_empty() && pile_b.is_empty() {
        return Err(TechniqueError::EmptyTokens {
            technique: TECHNIQUE,
        });
    }

    let target = if target.is_empty() {
        *target.start()
    } else {
        rng.gen_range(target)
    };

    let mut dealt = Vec::with_capacity(target);
    while dealt.len() < target {
        let from_a = match (pile_a.is_empty(), pile_b.is_empty()) {
            (true, true) => break,
            (false, true) => true,
            (true, false) => false,
            (false, false) => rng.gen_bool(0.5),
        };
        let piece = if from_a {
            pile_a.pop_front()
        } else {
            pile_b.pop_front()
        };
        if let Some(piece) = piece {
            dealt.push(piece);
        }
    }

    Ok(dealt.join(CUTUP_SEPARATOR))
}
