//! Source URL keyword extraction and comparison.
//!
//! Two reports about the same incident often cite articles whose slugs share the meaningful
//! words (`/acme-water-pollution-2023` and `/acme-pollution-lawsuit`). Hosts are ignored:
//! only the path and query string carry tokens.

use std::collections::HashSet;

use url::Url;

use crate::normalize::normalize;

/// Generic web tokens that say nothing about the content of a page.
pub const URL_STOPWORDS: &[&str] = &["www", "com", "fr", "org", "net", "html", "php", "jsp", "asp"];

/// Tokens at or below this length (in characters) are dropped.
const MAX_DROPPED_TOKEN_LEN: usize = 2;

/// Weight applied to the Jaccard index in [`url_similarity`].
const JACCARD_BOOST: f64 = 1.5;

/// Weight applied to the overlap ratio in [`url_similarity`].
const OVERLAP_WEIGHT: f64 = 0.5;

/// Extracts the meaningful keywords from a URL's path and query string.
///
/// Returns an empty set when the URL cannot be parsed. Tokens are split on hyphens,
/// underscores, slashes and whitespace after replacing every other non `[a-z0-9]` character
/// with a space. Short tokens, purely numeric tokens and [`URL_STOPWORDS`] are discarded, and
/// survivors are normalized.
pub fn extract_keywords(url: &str) -> HashSet<String> {
    let Ok(parsed) = Url::parse(url) else {
        return HashSet::new();
    };

    let mut text = parsed.path().to_string();
    if let Some(query) = parsed.query() {
        text.push('?');
        text.push_str(query);
    }

    let cleaned: String = text
        .to_lowercase()
        .chars()
        .map(|c| {
            if c.is_ascii_lowercase() || c.is_ascii_digit() || matches!(c, '-' | '_' | '/') {
                c
            } else {
                ' '
            }
        })
        .collect();

    cleaned
        .split(|c: char| matches!(c, '-' | '_' | '/') || c.is_whitespace())
        .filter(|token| is_keyword(token))
        .map(normalize)
        .collect()
}

/// Whether a raw token carries meaning.
fn is_keyword(token: &str) -> bool {
    token.chars().count() > MAX_DROPPED_TOKEN_LEN
        && !token.chars().all(|c| c.is_ascii_digit())
        && !URL_STOPWORDS.contains(&token)
}

/// Scores the keyword overlap of two URLs, in `[0, 1]`.
///
/// With keyword sets `K1` and `K2`, `common = |K1 ∩ K2|`, the Jaccard index
/// `j = common / |K1 ∪ K2|` and the overlap ratio `r = common / min(|K1|, |K2|)`, the score is
/// `min(1, 1.5 * j + 0.5 * r)`. The blend is deliberately boosted so that a few strongly
/// shared slug words score high even when one URL is much longer than the other.
///
/// Returns 0 when either URL yields no keywords (including unparsable URLs).
pub fn url_similarity(a: &str, b: &str) -> f64 {
    let first = extract_keywords(a);
    let second = extract_keywords(b);
    keyword_similarity(&first, &second)
}

/// Scores two pre-extracted keyword sets with the [`url_similarity`] formula.
pub fn keyword_similarity(first: &HashSet<String>, second: &HashSet<String>) -> f64 {
    if first.is_empty() || second.is_empty() {
        return 0.0;
    }

    let common = first.intersection(second).count() as f64;
    let union = first.union(second).count() as f64;
    let smallest = first.len().min(second.len()) as f64;

    let jaccard = if union > 0.0 { common / union } else { 0.0 };
    let overlap = common / smallest;

    (jaccard * JACCARD_BOOST + overlap * OVERLAP_WEIGHT).min(1.0)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn keywords(url: &str) -> Vec<String> {
        let mut words: Vec<_> = extract_keywords(url).into_iter().collect();
        words.sort();
        words
    }

    #[test]
    fn extracts_slug_words() {
        assert_eq!(
            keywords("https://news.example.com/acme-water-pollution-2023"),
            vec!["acme", "pollution", "water"]
        );
    }

    #[test]
    fn ignores_host() {
        assert_eq!(keywords("https://www.lemonde.fr/"), Vec::<String>::new());
    }

    #[test]
    fn includes_query_string() {
        assert_eq!(
            keywords("https://example.org/article.php?id=42&topic=deforestation"),
            vec!["article", "deforestation", "topic"]
        );
    }

    #[test]
    fn drops_short_numeric_and_stopwords() {
        assert_eq!(
            keywords("https://example.com/fr/2024/01/www/html/ok/boycott_index.html"),
            vec!["boycott", "index"]
        );
    }

    #[test]
    fn collapses_duplicates() {
        assert_eq!(
            keywords("https://example.com/palm-oil/palm-oil-again"),
            vec!["again", "oil", "palm"]
        );
    }

    #[test]
    fn replaces_percent_encoding_with_separators() {
        // "%C3%A9" is not a keyword character, so it splits the token
        assert_eq!(
            keywords("https://example.com/sant%C3%A9-publique"),
            vec!["publique", "sant"]
        );
    }

    #[test]
    fn unparsable_url_is_empty() {
        assert!(extract_keywords("not a url").is_empty());
        assert!(extract_keywords("").is_empty());
    }

    #[test]
    fn unparsable_url_scores_zero() {
        assert_eq!(
            url_similarity("not a url", "https://example.com/acme-pollution"),
            0.0
        );
        assert_eq!(
            url_similarity("https://example.com/acme-pollution", "::::"),
            0.0
        );
    }

    #[test]
    fn shared_tokens_boosted() {
        // common = 2, union = 4, min = 3: 1.5 * 0.5 + 0.5 * 2/3 > 1, capped
        let score = url_similarity(
            "https://news.example.com/acme-water-pollution-2023",
            "https://news.example.com/acme-pollution-lawsuit",
        );
        assert!((score - 1.0).abs() < f64::EPSILON);
    }

    #[test]
    fn partial_overlap_below_cap() {
        // K1 = {acme, water, pollution, river, report}, K2 = {acme, lawsuit, settlement}
        // common = 1, union = 7, min = 3: 1.5/7 + 0.5/3
        let score = url_similarity(
            "https://a.example/acme-water-pollution-river-report",
            "https://b.example/acme-lawsuit-settlement",
        );
        let expected = 1.5 / 7.0 + 0.5 / 3.0;
        assert!((score - expected).abs() < 1e-9);
    }

    #[test]
    fn disjoint_urls_score_zero() {
        assert_eq!(
            url_similarity(
                "https://example.com/palm-oil-deforestation",
                "https://example.com/child-labour-cocoa"
            ),
            0.0
        );
    }

    #[test]
    fn symmetric() {
        let a = "https://example.com/acme-water-pollution-river";
        let b = "https://example.com/acme-river-spill";
        assert!((url_similarity(a, b) - url_similarity(b, a)).abs() < f64::EPSILON);
    }
}
