//! Scored candidates and ranking.

use doublon_similarity::{Signals, SimilarityScore, score, string_similarity};
use doublon_store::{Brand, Controversy, Proposition};
use serde::Serialize;

/// A candidate record together with its score against the query.
///
/// Serializes as the record's own fields plus a `score` object.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ScoredCandidate<T> {
    /// The stored record, unchanged.
    #[serde(flatten)]
    pub candidate: T,
    /// Similarity to the query.
    pub score: SimilarityScore,
}

/// Matches found in each collection, best first.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct ResultBundle {
    /// Matching brands.
    #[serde(rename = "marques")]
    pub brands: Vec<ScoredCandidate<Brand>>,
    /// Matching approved controversies.
    #[serde(rename = "evenements")]
    pub controversies: Vec<ScoredCandidate<Controversy>>,
    /// Matching pending propositions.
    pub propositions: Vec<ScoredCandidate<Proposition>>,
}

impl ResultBundle {
    /// Total number of matches across collections.
    pub fn len(&self) -> usize {
        self.brands.len() + self.controversies.len() + self.propositions.len()
    }

    /// Whether no collection produced a match.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Scores, filters, sorts and truncates one collection.
///
/// When `gate` is set, candidates whose brand name similarity falls below it are dropped
/// before scoring. Survivors below `low` are dropped after scoring. Sorting is stable, so
/// equal scores keep collection order.
pub fn rank<T: Signals>(
    query: &impl Signals,
    candidates: Vec<T>,
    gate: Option<f64>,
    low: f64,
    limit: usize,
) -> Vec<ScoredCandidate<T>> {
    let mut scored: Vec<ScoredCandidate<T>> = candidates
        .into_iter()
        .filter(|candidate| {
            gate.is_none_or(|gate| {
                string_similarity(query.brand_name(), candidate.brand_name()) >= gate
            })
        })
        .map(|candidate| ScoredCandidate {
            score: score(query, &candidate),
            candidate,
        })
        .filter(|scored| scored.score.overall >= low)
        .collect();

    scored.sort_by(|a, b| b.score.overall.total_cmp(&a.score.overall));
    scored.truncate(limit);
    scored
}

#[cfg(test)]
mod tests {
    use doublon_similarity::LOW_THRESHOLD;
    use serde_json::json;

    use super::*;
    use crate::Query;

    fn brands(names: &[&str]) -> Vec<Brand> {
        names
            .iter()
            .enumerate()
            .map(|(i, name)| Brand::new(i as i64 + 1, *name))
            .collect()
    }

    fn ids<T>(scored: &[ScoredCandidate<T>], id: impl Fn(&T) -> String) -> Vec<String> {
        scored.iter().map(|s| id(&s.candidate)).collect()
    }

    #[test]
    fn truncates_with_stable_ties() {
        let query = Query::brand("Globex");
        let candidates = brands(&[
            "Globex", "Globexx", "GLOBEX", "Globe", "Glóbex", "Globez", "globex ", "Globex1",
            "Glob ex", "Globexs", "Initech",
        ]);

        let ranked = rank(&query, candidates, None, LOW_THRESHOLD, 5);

        assert_eq!(
            ids(&ranked, |b: &Brand| b.id.to_string()),
            vec!["1", "3", "5", "7", "2"]
        );
        assert!((ranked[0].score.overall - 0.5).abs() < 1e-9);
        assert!((ranked[4].score.name - 6.0 / 7.0).abs() < 1e-9);
    }

    #[test]
    fn drops_scores_below_low() {
        let query = Query::brand("Globex");
        let ranked = rank(&query, brands(&["Initech", "Globe"]), None, LOW_THRESHOLD, 5);

        assert_eq!(ids(&ranked, |b: &Brand| b.name.clone()), vec!["Globe"]);
    }

    #[test]
    fn gate_excludes_other_brands() {
        let query = Query::controversy("Globex")
            .with_date("2023-02-01")
            .with_source_url("https://news.example.com/globex-fraud");
        let mut other = Controversy::new(1, "Initech");
        other.occurred_on = Some(String::from("2023-06-01"));
        other.source_url = Some(String::from("https://news.example.com/globex-fraud"));

        assert!(rank(&query, vec![other.clone()], Some(0.7), 0.0, 3).is_empty());
        assert_eq!(rank(&query, vec![other], None, 0.0, 3).len(), 1);
    }

    #[test]
    fn zero_limit_returns_nothing() {
        let query = Query::brand("Globex");
        assert!(rank(&query, brands(&["Globex"]), None, 0.4, 0).is_empty());
    }

    #[test]
    fn serializes_record_with_score() {
        let mut brand = Brand::new(7, "Nestlé");
        brand.extra.insert(String::from("secteur"), json!("agroalimentaire"));
        let bundle = ResultBundle {
            brands: vec![ScoredCandidate {
                candidate: brand,
                score: SimilarityScore {
                    name: 1.0,
                    description: 0.0,
                    date: 0.0,
                    overall: 0.5,
                },
            }],
            ..ResultBundle::default()
        };

        let value = serde_json::to_value(&bundle).unwrap();

        assert_eq!(
            value,
            json!({
                "marques": [{
                    "id": 7,
                    "nom": "Nestlé",
                    "secteur": "agroalimentaire",
                    "score": {"marque": 1.0, "description": 0.0, "date": 0.0, "overall": 0.5}
                }],
                "evenements": [],
                "propositions": []
            })
        );
        assert_eq!(bundle.len(), 1);
    }
}
