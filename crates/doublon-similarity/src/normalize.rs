//! Text canonicalization for comparisons.
//!
//! Every signal in this crate compares text through [`normalize`], so two strings that differ
//! only by case, accents or spacing compare as equal.

use unicode_normalization::{UnicodeNormalization, char::is_combining_mark};

/// Canonicalizes free text for comparison.
///
/// The pipeline:
/// 1. Lowercase
/// 2. Decompose (NFD) and drop combining marks, so `é` becomes `e`
/// 3. Collapse whitespace runs to a single space and trim the ends
///
/// The function is idempotent and never fails; empty input yields an empty string.
pub fn normalize(text: &str) -> String {
    let stripped: String = text
        .to_lowercase()
        .nfd()
        .filter(|c| !is_combining_mark(*c))
        .collect();

    stripped.split_whitespace().collect::<Vec<_>>().join(" ")
}
