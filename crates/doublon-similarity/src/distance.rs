//! Edit-distance name similarity.

use strsim::levenshtein;

use crate::normalize::normalize;

/// Scores how similar two names are, in `[0, 1]`.
///
/// Both inputs are normalized first. Normalized-equal strings score 1, and a comparison
/// against an empty string scores 0. Otherwise the score is `1 - d / L`, where `d` is the
/// Levenshtein distance (unit cost insert, delete and substitute, counted in characters) and
/// `L` is the character length of the longer normalized string.
///
/// The score is symmetric and decreases as the number of edits grows.
pub fn string_similarity(a: &str, b: &str) -> f64 {
    let a = normalize(a);
    let b = normalize(b);

    if a == b {
        return 1.0;
    }
    if a.is_empty() || b.is_empty() {
        return 0.0;
    }

    let distance = levenshtein(&a, &b);
    let longest = a.chars().count().max(b.chars().count());

    1.0 - distance as f64 / longest as f64
}
