use proptest::prelude::*;
use std::collections::HashSet;

use search_quality_filter::quality::filter::title_signature;
use search_quality_filter::{QueryDomain, ResultAnalyzer, SearchResult};

fn result_strategy() -> impl Strategy<Value = SearchResult> {
    (
        "[A-Za-z0-9 :,!-]{0,60}",
        prop_oneof![
            "https://[a-z]{1,10}\\.(com|org|dev|gov|xyz)/[a-z0-9/]{0,20}",
            Just(String::new()),
        ],
        "[A-Za-z0-9 .,;!?`()=-]{0,600}",
    )
        .prop_map(|(title, link, snippet)| SearchResult::new(title, link, snippet))
}

fn query_strategy() -> impl Strategy<Value = String> {
    prop_oneof![
        "[a-z ]{0,30}",
        Just("covid vaccine efficacy".to_string()),
        Just("react hooks example".to_string()),
        Just("rust async error".to_string()),
    ]
}

proptest! {
    #[test]
    fn test_score_is_bounded(result in result_strategy(), query in query_strategy()) {
        let analyzer = ResultAnalyzer::default();
        let score = analyzer.score_result(&result, &query).score.unwrap();
        prop_assert!((0.0..=1.0).contains(&score));
    }

    #[test]
    fn test_detect_domain_deterministic(query in ".*") {
        let analyzer = ResultAnalyzer::default();
        prop_assert_eq!(analyzer.detect_domain(&query), analyzer.detect_domain(&query));
    }

    #[test]
    fn test_keywordless_queries_are_general(query in "[0-9 ]{0,20}") {
        let analyzer = ResultAnalyzer::default();
        prop_assert_eq!(analyzer.detect_domain(&query), QueryDomain::General);
    }

    #[test]
    fn test_filter_idempotent(
        results in prop::collection::vec(result_strategy(), 0..8),
        query in query_strategy(),
        min_score in 0.0f64..0.8,
    ) {
        let analyzer = ResultAnalyzer::default();
        let once = analyzer.filter_results(&results, &query, min_score);
        let twice = analyzer.filter_results(&once, &query, min_score);
        prop_assert_eq!(once, twice);
    }

    #[test]
    fn test_survivors_never_collide(
        results in prop::collection::vec(result_strategy(), 0..8),
        query in query_strategy(),
    ) {
        let analyzer = ResultAnalyzer::default();
        let filtered = analyzer.filter_results(&results, &query, 0.0);

        let signatures: HashSet<String> =
            filtered.iter().map(|r| title_signature(&r.title)).collect();
        let links: HashSet<String> = filtered.iter().map(|r| r.link.to_lowercase()).collect();
        prop_assert_eq!(signatures.len(), filtered.len());
        prop_assert_eq!(links.len(), filtered.len());
    }
}
