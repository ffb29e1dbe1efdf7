//! Weighted composite scoring.

use serde::{Deserialize, Serialize};

use crate::{date::date_similarity, distance::string_similarity, source_url::url_similarity};

/// Weight of the brand name signal. Always applied.
pub const NAME_WEIGHT: f64 = 0.5;
/// Weight of the same-year signal, applied only when it is non-zero.
pub const DATE_WEIGHT: f64 = 0.2;
/// Weight of the source URL signal, applied only when it is non-zero.
pub const URL_WEIGHT: f64 = 0.2;
/// Weight of the description/title signal, applied only when it is non-zero.
pub const DESCRIPTION_WEIGHT: f64 = 0.1;

/// Minimum overall score for a candidate to be reported.
pub const LOW_THRESHOLD: f64 = 0.4;
/// Overall score from which a candidate is labeled "similar".
pub const MEDIUM_THRESHOLD: f64 = 0.6;
/// Overall score from which a candidate is labeled "very similar".
pub const HIGH_THRESHOLD: f64 = 0.8;

/// Minimum brand name similarity a controversy or proposition needs before it is scored.
pub const GATE_THRESHOLD: f64 = 0.7;

/// The text fields a record exposes for comparison.
///
/// Implemented both by incoming queries and by stored candidates. Only the brand name is
/// mandatory; every other signal is skipped when either side lacks it.
pub trait Signals {
    /// Name of the brand the record is about.
    fn brand_name(&self) -> &str;

    /// Free text describing the record (a title for stored controversies).
    fn description(&self) -> Option<&str> {
        None
    }

    /// When the incident happened, as a date string.
    fn occurred_on(&self) -> Option<&str> {
        None
    }

    /// URL of the source documenting the incident.
    fn source_url(&self) -> Option<&str> {
        None
    }
}

/// Per-signal similarity between a query and one candidate.
///
/// Every component lies in `[0, 1]`. The URL signal feeds `overall` but has no field of its
/// own. On the wire the name component is called `marque`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct SimilarityScore {
    /// Brand name similarity.
    #[serde(rename = "marque", alias = "name")]
    pub name: f64,
    /// Description/title similarity.
    pub description: f64,
    /// Same-year signal.
    pub date: f64,
    /// Weighted combination used for ranking and filtering.
    pub overall: f64,
}

/// Scores a candidate against a query.
///
/// See [`compose`] for how the signals combine.
pub fn score(query: &impl Signals, candidate: &impl Signals) -> SimilarityScore {
    let name = string_similarity(query.brand_name(), candidate.brand_name());
    let description = both(query.description(), candidate.description(), string_similarity);
    let date = both(query.occurred_on(), candidate.occurred_on(), date_similarity);
    let url = both(query.source_url(), candidate.source_url(), url_similarity);

    SimilarityScore {
        name,
        description,
        date,
        overall: compose(name, description, date, url),
    }
}

/// Applies `f` when both sides are present, 0 otherwise.
fn both(a: Option<&str>, b: Option<&str>, f: fn(&str, &str) -> f64) -> f64 {
    match (a, b) {
        (Some(a), Some(b)) => f(a, b),
        _ => 0.0,
    }
}

/// Combines individual signals into the overall score.
///
/// `overall = 0.5 * name`, plus `0.2 * date`, `0.2 * url` and `0.1 * description` for each of
/// those signals that is non-zero. The weights are not renormalized when signals are missing:
/// a perfect name match alone tops out at 0.5, and only a query where all four signals are
/// present and maximal reaches 1.0. Thresholds are tuned against this behavior.
pub fn compose(name: f64, description: f64, date: f64, url: f64) -> f64 {
    let mut overall = name * NAME_WEIGHT;
    if date > 0.0 {
        overall += date * DATE_WEIGHT;
    }
    if url > 0.0 {
        overall += url * URL_WEIGHT;
    }
    if description > 0.0 {
        overall += description * DESCRIPTION_WEIGHT;
    }
    overall
}

/// How close a reported candidate is, for display.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum MatchLevel {
    /// At or above the low threshold.
    Low,
    /// At or above the medium threshold.
    Medium,
    /// At or above the high threshold.
    High,
}

impl MatchLevel {
    /// Human-readable label shown next to a match.
    pub fn label(self) -> &'static str {
        match self {
            Self::High => "very similar",
            Self::Medium => "similar",
            Self::Low => "possibly similar",
        }
    }
}

/// The three score cutoffs.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Thresholds {
    /// Inclusion cutoff.
    pub low: f64,
    /// "similar" cutoff.
    pub medium: f64,
    /// "very similar" cutoff.
    pub high: f64,
}

impl Default for Thresholds {
    fn default() -> Self {
        Self {
            low: LOW_THRESHOLD,
            medium: MEDIUM_THRESHOLD,
            high: HIGH_THRESHOLD,
        }
    }
}

impl Thresholds {
    /// Labels an overall score, or `None` when it is below the low cutoff.
    pub fn level(&self, overall: f64) -> Option<MatchLevel> {
        if overall >= self.high {
            Some(MatchLevel::High)
        } else if overall >= self.medium {
            Some(MatchLevel::Medium)
        } else if overall >= self.low {
            Some(MatchLevel::Low)
        } else {
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Minimal record for exercising the scorer.
    #[derive(Default)]
    struct Record {
        /// Brand name.
        brand: &'static str,
        /// Description.
        description: Option<&'static str>,
        /// Date.
        date: Option<&'static str>,
        /// URL.
        url: Option<&'static str>,
    }

    impl Signals for Record {
        fn brand_name(&self) -> &str {
            self.brand
        }

        fn description(&self) -> Option<&str> {
            self.description
        }

        fn occurred_on(&self) -> Option<&str> {
            self.date
        }

        fn source_url(&self) -> Option<&str> {
            self.url
        }
    }

    fn approx(a: f64, b: f64) -> bool {
        (a - b).abs() < 1e-9
    }

    #[test]
    fn name_only_capped_at_half() {
        let query = Record {
            brand: "Danone",
            ..Default::default()
        };
        let candidate = Record {
            brand: "Danone",
            description: Some("Lait contaminé"),
            date: Some("2020-01-01"),
            url: Some("https://example.com/danone-lait"),
        };
        let s = score(&query, &candidate);
        assert!(approx(s.name, 1.0));
        assert_eq!(s.description, 0.0);
        assert_eq!(s.date, 0.0);
        assert!(approx(s.overall, 0.5));
    }

    #[test]
    fn all_signals_maximal_reach_one() {
        let record = Record {
            brand: "Acme",
            description: Some("Water pollution"),
            date: Some("2023-04-01"),
            url: Some("https://example.com/acme-water-pollution"),
        };
        let s = score(&record, &record);
        assert!(approx(s.overall, 1.0));
    }

    #[test]
    fn compose_never_exceeds_one() {
        let steps = [0.0, 0.25, 0.5, 0.75, 1.0];
        for name in steps {
            for description in steps {
                for date in [0.0, 1.0] {
                    for url in steps {
                        let overall = compose(name, description, date, url);
                        assert!(overall <= 1.0 + 1e-12);
                        assert!(overall >= 0.0);
                    }
                }
            }
        }
    }

    #[test]
    fn compose_without_optional_signals() {
        assert!(approx(compose(0.8, 0.0, 0.0, 0.0), 0.4));
    }

    #[test]
    fn weights_are_not_renormalized() {
        // name and date only: 0.5 + 0.2, not (0.5 + 0.2) / 0.7
        assert!(approx(compose(1.0, 0.0, 1.0, 0.0), 0.7));
    }

    #[test]
    fn url_contributes_without_own_field() {
        let query = Record {
            brand: "Acme Corp",
            url: Some("https://news.example.com/acme-water-pollution-2023"),
            ..Default::default()
        };
        let candidate = Record {
            brand: "Acme Corp",
            url: Some("https://news.example.com/acme-pollution-lawsuit"),
            ..Default::default()
        };
        let s = score(&query, &candidate);
        assert!(approx(s.overall, 0.7));
    }

    #[test]
    fn malformed_optional_inputs_degrade_to_zero() {
        let query = Record {
            brand: "Acme",
            date: Some("not a date"),
            url: Some("not a url"),
            ..Default::default()
        };
        let candidate = Record {
            brand: "Acme",
            date: Some("2023-01-01"),
            url: Some("https://example.com/acme"),
            ..Default::default()
        };
        let s = score(&query, &candidate);
        assert_eq!(s.date, 0.0);
        assert!(approx(s.overall, 0.5));
    }

    #[test]
    fn serializes_name_as_marque() {
        let s = SimilarityScore {
            name: 1.0,
            description: 0.0,
            date: 1.0,
            overall: 0.7,
        };
        let value = serde_json::to_value(s).unwrap();
        assert_eq!(value["marque"], 1.0);
        assert!(value.get("name").is_none());
        assert_eq!(value["overall"], 0.7);
    }

    #[test]
    fn levels() {
        let t = Thresholds::default();
        assert_eq!(t.level(0.39), None);
        assert_eq!(t.level(0.4), Some(MatchLevel::Low));
        assert_eq!(t.level(0.6), Some(MatchLevel::Medium));
        assert_eq!(t.level(0.85), Some(MatchLevel::High));
        assert_eq!(MatchLevel::High.label(), "very similar");
    }
}
