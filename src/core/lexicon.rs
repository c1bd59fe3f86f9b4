//! Lexical extraction
//!
//! A deliberately shallow tokenizer: lowercase words stripped of punctuation,
//! and a "noun-like" subset chosen by stopword and length heuristics. There is
//! no part-of-speech tagging here; a long word that is not a function word is
//! treated as a noun.

use std::collections::HashSet;

use lazy_static::lazy_static;
use regex::Regex;

/// Tokens must be longer than this to survive `tokenize`
pub const MIN_TOKEN_LEN: usize = 2;

/// Tokens must be longer than this to count as nouns
pub const MIN_NOUN_LEN: usize = 4;

/// Fallback noun for the first fragment when it yields none
pub const DEFAULT_NOUN_A: &str = "stone";

/// Fallback noun for the second fragment when it yields none
pub const DEFAULT_NOUN_B: &str = "echo";

/// Function words that never count as nouns
pub const STOPWORDS: &[&str] = &[
    // articles and determiners
    "the", "a", "an", "this", "that", "these", "those", "some", "any", "each", "every",
    "either", "neither", "such", "other", "another", "which", "whose", "whom", "what",
    // conjunctions
    "and", "but", "or", "nor", "for", "yet", "so", "because", "although", "though",
    "while", "whereas", "unless", "until", "since", "whether", "however", "therefore",
    // auxiliaries and copulas
    "is", "are", "was", "were", "be", "been", "being", "am", "has", "have", "had",
    "having", "do", "does", "did", "doing", "will", "would", "shall", "should", "can",
    "could", "may", "might", "must",
    // prepositions
    "of", "in", "on", "at", "by", "to", "from", "with", "within", "without", "into",
    "onto", "upon", "about", "above", "below", "under", "over", "after", "before",
    "between", "among", "through", "throughout", "during", "against", "along", "across",
    "around", "behind", "beyond", "near", "toward", "towards", "inside", "outside",
    // pronouns and adverbs that pass the length filter
    "their", "there", "where", "they", "them", "then", "than", "also", "when",
    "again", "still", "often", "later", "first", "known", "named", "located", "several",
    "including", "became", "built", "part",
];

lazy_static! {
    static ref NON_WORD: Regex = Regex::new(r"[^\w\s'-]").unwrap();
    static ref STOPWORD_SET: HashSet<&'static str> = STOPWORDS.iter().copied().collect();
}

/// Split free text into lowercase word tokens longer than two characters.
///
/// Everything except word characters, apostrophes, hyphens and whitespace is
/// removed before splitting on whitespace.
pub fn tokenize(text: &str) -> Vec<String> {
    let lowered = text.to_lowercase();
    NON_WORD
        .replace_all(&lowered, "")
        .split_whitespace()
        .filter(|token| token.chars().count() > MIN_TOKEN_LEN)
        .map(str::to_string)
        .collect()
}

/// Whether `word` is in the fixed stopword set.
pub fn is_stopword(word: &str) -> bool {
    STOPWORD_SET.contains(word)
}

/// Noun-like words of `text`, in first-occurrence order, without duplicates.
pub fn extract_nouns(text: &str) -> Vec<String> {
    let mut seen = HashSet::new();
    tokenize(text)
        .into_iter()
        .filter(|token| token.chars().count() > MIN_NOUN_LEN && !is_stopword(token))
        .filter(|token| seen.insert(token.clone()))
        .collect()
}

/// First noun of `text`, or `default` when there is none.
pub fn first_noun_or(text: &str, default: &str) -> String {
    extract_nouns(text)
        .into_iter()
        .next()
        .unwrap_or_else(|| default.to_string())
}
