use super::scorer::QualityScorer;
use super::types::{QueryDomain, SearchResult};
use log::debug;
use std::cmp::Ordering;
use std::collections::HashSet;

/// Upper bound on the threshold applied to specialised domains
pub const DOMAIN_THRESHOLD_CAP: f64 = 0.1;

/// Words of a title that make up its duplicate signature
const SIGNATURE_WORDS: usize = 5;

/// Specialised domains are held to a looser bar than general queries
pub fn effective_threshold(domain: QueryDomain, min_score: f64) -> f64 {
    match domain {
        QueryDomain::General => min_score,
        _ => min_score.min(DOMAIN_THRESHOLD_CAP),
    }
}

/// Order-insensitive fingerprint of a title
pub fn title_signature(title: &str) -> String {
    let normalized: String = title
        .to_lowercase()
        .chars()
        .filter(|c| c.is_alphanumeric() || c.is_whitespace())
        .collect();

    let mut words: Vec<&str> = normalized.split_whitespace().collect();
    words.sort_unstable();
    words.truncate(SIGNATURE_WORDS);
    words.join(" ")
}

/// Drop every result whose title signature or case-folded link was already
/// seen; the first occurrence wins.
pub fn deduplicate(results: Vec<SearchResult>) -> Vec<SearchResult> {
    let mut seen_titles = HashSet::new();
    let mut seen_links = HashSet::new();

    results
        .into_iter()
        .filter(|result| {
            let signature = title_signature(&result.title);
            let link = result.link.to_lowercase();
            if seen_titles.contains(&signature) || seen_links.contains(&link) {
                return false;
            }
            seen_titles.insert(signature);
            seen_links.insert(link);
            true
        })
        .collect()
}

/// Score, threshold, rank and deduplicate a batch of results
pub fn filter_results(
    scorer: &QualityScorer,
    results: &[SearchResult],
    query: &str,
    min_score: f64,
) -> Vec<SearchResult> {
    let domain = scorer.detect_domain(query);
    let threshold = effective_threshold(domain, min_score);

    let mut kept: Vec<SearchResult> = results
        .iter()
        .map(|result| scorer.score_in_domain(result, query, domain))
        .filter(|result| result.score_or_zero() >= threshold)
        .collect();

    kept.sort_by(|a, b| {
        b.score_or_zero()
            .partial_cmp(&a.score_or_zero())
            .unwrap_or(Ordering::Equal)
    });

    let passed = kept.len();
    let unique = deduplicate(kept);

    debug!(
        "Filtered {} results for '{}' ({} domain, threshold {:.2}): {} passed, {} after dedup",
        results.len(),
        query,
        domain,
        threshold,
        passed,
        unique.len()
    );

    unique
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::quality::config::QualityConfig;

    fn scorer() -> QualityScorer {
        QualityScorer::new(QualityConfig::default()).unwrap()
    }

    #[test]
    fn test_effective_threshold() {
        assert_eq!(effective_threshold(QueryDomain::Medical, 0.3), 0.1);
        assert_eq!(effective_threshold(QueryDomain::Rust, 0.05), 0.05);
        assert_eq!(effective_threshold(QueryDomain::General, 0.3), 0.3);
    }

    #[test]
    fn test_title_signature() {
        assert_eq!(
            title_signature("Rust: The Book!"),
            title_signature("the book rust")
        );
        assert_eq!(
            title_signature("f e d c b a"),
            "a b c d e"
        );
    }

    #[test]
    fn test_deduplicate_first_occurrence_wins() {
        let results = vec![
            SearchResult::new("Guide to ownership", "https://a.example/one", "first"),
            SearchResult::new("Ownership guide to", "https://b.example/two", "second"),
            SearchResult::new("Something else", "HTTPS://A.EXAMPLE/ONE", "third"),
            SearchResult::new("Unrelated", "https://c.example/three", "fourth"),
        ];
        let unique = deduplicate(results);
        let snippets: Vec<&str> = unique.iter().map(|r| r.snippet.as_str()).collect();
        assert_eq!(snippets, vec!["first", "fourth"]);
    }

    #[test]
    fn test_filter_sorts_descending_and_drops_low_scores() {
        let results = vec![
            SearchResult::new("Bad", "https://www.pinterest.com/pin/1", "x"),
            SearchResult::new(
                "Sourdough starter maintenance notes",
                "https://www.kingarthurbaking.com/blog/sourdough",
                "Feed the starter daily with equal parts flour and water; keep it warm.",
            ),
            SearchResult::new(
                "Sourdough on Wikipedia, the free encyclopedia",
                "https://en.wikipedia.org/wiki/Sourdough",
                "Sourdough is bread made by the fermentation of dough using wild yeast.",
            ),
        ];
        let filtered = filter_results(&scorer(), &results, "sourdough bread baking", 0.3);
        assert_eq!(filtered.len(), 2);
        assert!(filtered[0].link.contains("wikipedia"));
        assert!(filtered[0].score_or_zero() >= filtered[1].score_or_zero());
    }

    #[test]
    fn test_equal_scores_keep_input_order() {
        let results = vec![
            SearchResult::new(
                "First sourdough article",
                "https://one.example/a",
                "Sourdough notes that are long enough to pass.",
            ),
            SearchResult::new(
                "Second sourdough writeup",
                "https://two.example/b",
                "Sourdough notes that are long enough to pass.",
            ),
        ];
        let filtered = filter_results(&scorer(), &results, "sourdough", 0.0);
        assert_eq!(filtered[0].link, "https://one.example/a");
        assert_eq!(filtered[1].link, "https://two.example/b");
    }
}
