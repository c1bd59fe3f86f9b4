//! Template fill
//!
//! Picks a sentence template and fills its slots:
//!
//! - `{A}` / `{B}`: the two titles, minus any parenthetical or comma suffix
//! - `{nounA}` / `{nounB}`: first noun-like word of each fragment
//! - `{verbA}` / `{verbB}`: random verbs
//! - `{abstract}`: a random abstract noun

use lazy_static::lazy_static;
use rand::Rng;
use regex::{Captures, Regex};

use crate::core::error::TechniqueError;
use crate::core::lexicon::{first_noun_or, DEFAULT_NOUN_A, DEFAULT_NOUN_B};

use super::TechniqueInput;

const TECHNIQUE: &str = "template-fill";

pub const TEMPLATES: &[&str] = &[
    "The {nounA} remembers {nounB}.",
    "{A} {verbA} the {nounB} of {B}.",
    "Somewhere between {A} and {B}, the {abstract} {verbA}.",
    "The {nounA} of {A} {verbA} into {abstract}.",
    "{B} is what the {nounA} {verbB} after dark.",
    "Under {A}, a {nounB} {verbA} without a name.",
    "What {A} {verbA}, {B} {verbB}.",
    "The {abstract} here tastes of {nounA} and {nounB}.",
    "Every {nounA} {verbA} toward {B}.",
    "{A} and {B} share one {abstract}.",
    "A {nounB} {verbB} where {A} used to be.",
    "Listen: the {nounA} {verbA}, the {nounB} {verbB}.",
    "{B} keeps the {nounA} that {A} forgot.",
    "The {nounB} {verbA} in the {abstract} of {A}.",
    "Nothing {verbA} at {A} except the {nounB}.",
    "{A} was never a {nounA}; it was {abstract}.",
    "The road from {A} to {B} is paved with {abstract}.",
    "Count the {nounA}s. {B} already has.",
    "Between {nounA} and {nounB}, only {abstract}.",
    "The {abstract} of {B} {verbA} through the {nounA}.",
    "{A} {verbA}. {B} {verbB}. The {abstract} stays.",
    "A {nounA} {verbA} under the weight of {B}.",
    "{B} hums the {nounA} back to sleep.",
    "Here the {nounB} {verbB} and {A} does not answer.",
    "The last {nounA} of {A} {verbA} in {abstract}.",
    "{A} dreams the {nounB}; {B} dreams the {abstract}.",
    "Something about {nounA} {verbA} beneath {B}.",
    "The {nounA} is a door. {B} is the {abstract} behind it.",
];

pub const VERBS: &[&str] = &[
    "remembers", "dissolves", "hums", "forgets", "waits", "leaks", "drifts", "folds",
    "unravels", "listens", "mourns", "shivers", "sleeps", "returns", "rusts", "glows",
    "whispers", "erodes", "lingers", "echoes",
];

pub const ABSTRACTS: &[&str] = &[
    "silence", "memory", "absence", "static", "longing", "erosion", "gravity", "dusk",
    "forgetting", "distance", "residue", "hunger", "stillness", "vertigo", "patience",
];

lazy_static! {
    static ref PLACEHOLDER: Regex =
        Regex::new(r"\{(A|B|nounA|nounB|verbA|verbB|abstract)\}").unwrap();
}

/// Values substituted into a template.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TemplateSlots {
    pub title_a: String,
    pub title_b: String,
    pub noun_a: String,
    pub noun_b: String,
    pub verb_a: String,
    pub verb_b: String,
    pub abstract_noun: String,
}

impl TemplateSlots {
    /// Derive slot values from the input, drawing verbs and the abstract noun at random.
    pub fn draw<R: Rng + ?Sized>(
        input: &TechniqueInput<'_>,
        rng: &mut R,
    ) -> Result<Self, TechniqueError> {
        Ok(Self {
            title_a: clean_title(input.title_a),
            title_b: clean_title(input.title_b),
            noun_a: first_noun_or(input.fragment_a, DEFAULT_NOUN_A),
            noun_b: first_noun_or(input.fragment_b, DEFAULT_NOUN_B),
            verb_a: pick(VERBS, "verbs", rng)?.to_string(),
            verb_b: pick(VERBS, "verbs", rng)?.to_string(),
            abstract_noun: pick(ABSTRACTS, "abstracts", rng)?.to_string(),
        })
    }
}

fn pick<'t, R: Rng + ?Sized>(
    table: &'t [&'static str],
    name: &'static str,
    rng: &mut R,
) -> Result<&'t str, TechniqueError> {
    if table.is_empty() {
        return Err(TechniqueError::EmptyTable {
            technique: TECHNIQUE,
            table: name,
        });
    }
    Ok(table[rng.gen_range(0..table.len())])
}

/// Strip a trailing parenthetical or comma suffix from a title.
///
/// `"Ames Monument (Wyoming)"` and `"Laramie, Wyoming"` become
/// `"Ames Monument"` and `"Laramie"`.
pub fn clean_title(title: &str) -> String {
    let head = title.split(['(', ',']).next().unwrap_or("").trim();
    if head.is_empty() {
        title.trim().to_string()
    } else {
        head.to_string()
    }
}

/// Substitute every placeholder in `template` in a single pass.
///
/// Substituted text is never rescanned, so a title containing `{B}` stays
/// literal.
pub fn fill_template(template: &str, slots: &TemplateSlots) -> String {
    PLACEHOLDER
        .replace_all(template, |caps: &Captures<'_>| match &caps[1] {
            "A" => slots.title_a.clone(),
            "B" => slots.title_b.clone(),
            "nounA" => slots.noun_a.clone(),
            "nounB" => slots.noun_b.clone(),
            "verbA" => slots.verb_a.clone(),
            "verbB" => slots.verb_b.clone(),
            _ => slots.abstract_noun.clone(),
        })
        .into_owned()
}

/// Fill a randomly chosen template.
pub fn fill_random<R: Rng + ?Sized>(
    input: &TechniqueInput<'_>,
    rng: &mut R,
) -> Result<String, TechniqueError> {
    let template = pick(TEMPLATES, "templates", rng)?;
    let slots = TemplateSlots::draw(input, rng)?;
    let text = fill_template(template, &slots);
    if text.trim().is_empty() {
        return Err(TechniqueError::EmptyOutput {
            technique: TECHNIQUE,
        });
    }
    Ok(text)
}
