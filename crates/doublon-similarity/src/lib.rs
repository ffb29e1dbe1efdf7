//! Similarity signals for duplicate detection.
//!
//! This crate holds the pure scoring functions used to decide whether a new report
//! plausibly describes something already recorded:
//! - Text normalization (case, diacritics, whitespace)
//! - Edit-distance name similarity
//! - URL keyword extraction and overlap
//! - Same-year date similarity
//! - The weighted composite score
//!
//! Nothing here performs I/O; every function is deterministic and cheap enough to call once
//! per candidate per request.
//!
//! # Example
//!
//! ```
//! use doublon_similarity::{string_similarity, url_similarity};
//!
//! assert!(string_similarity("Nesslé", "Nestlé") > 0.8);
//! assert!(url_similarity(
//!     "https://news.example.com/acme-water-pollution-2023",
//!     "https://news.example.com/acme-pollution-lawsuit",
//! ) > 0.0);
//! ```

#![warn(missing_docs)]

mod date;
mod distance;
mod normalize;
mod score;
mod source_url;

pub use date::{date_similarity, parse_date};
pub use distance::string_similarity;
pub use normalize::normalize;
pub use score::{
    DATE_WEIGHT, DESCRIPTION_WEIGHT, GATE_THRESHOLD, HIGH_THRESHOLD, LOW_THRESHOLD,
    MEDIUM_THRESHOLD, MatchLevel, NAME_WEIGHT, Signals, SimilarityScore, Thresholds, URL_WEIGHT,
    compose, score,
};
pub use source_url::{URL_STOPWORDS, extract_keywords, keyword_similarity, url_similarity};
