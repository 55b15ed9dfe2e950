//! Preparation-time estimation.
//!
//! The source catalog does not carry timing data, so the UI shows an
//! estimate derived from the preparation method and the ingredient count.
//! The estimate only has to be deterministic and roughly ordered by
//! effort; it is display copy, not a timer.

use crate::constants::{PREP_TIME_MAX_MINUTES, PREP_TIME_MIN_MINUTES};

/// Technique keywords and their minute weights.
///
/// Matched case-insensitively as substrings of the method text, so
/// "muddled" matches "muddle".
const TECHNIQUE_WEIGHTS: &[(&str, u32)] = &[
    ("muddle", 2),
    ("blend", 3),
    ("layer", 3),
    ("flame", 2),
    ("shake", 1),
    ("stir", 1),
    ("strain", 1),
    ("garnish", 1),
];

/// Estimate preparation time in minutes.
///
/// Base of two minutes, plus one minute per two ingredients, plus the
/// technique weights found in the method text, clamped to
/// [`PREP_TIME_MIN_MINUTES`]..=[`PREP_TIME_MAX_MINUTES`].
pub fn estimate_minutes(method: &str, ingredient_count: usize) -> u32 {
    let method_lower = method.to_lowercase();

    let technique: u32 = TECHNIQUE_WEIGHTS
        .iter()
        .filter(|(keyword, _)| method_lower.contains(keyword))
        .map(|(_, weight)| *weight)
        .sum();

    let base = 2 + (ingredient_count as u32) / 2 + technique;

    base.clamp(PREP_TIME_MIN_MINUTES, PREP_TIME_MAX_MINUTES)
}
