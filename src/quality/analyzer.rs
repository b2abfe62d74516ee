use super::config::{QualityConfig, QualityConfigOverride, DEFAULT_MIN_SCORE};
use super::enrich::enrich_with;
use super::errors::QualityResult;
use super::filter::filter_results;
use super::handlers::DomainHandler;
use super::scorer::QualityScorer;
use super::stats::{compute_stats, get_insights, DomainInsights, ResultStats};
use super::types::{QueryDomain, SearchResult};
use log::{debug, warn};
use serde_json::Value;

/// Entry point for scoring, filtering and annotating search results.
///
/// Holds one validated configuration with every pattern compiled. It is
/// immutable after construction and safe to share between threads.
pub struct ResultAnalyzer {
    scorer: QualityScorer,
}

impl ResultAnalyzer {
    pub fn new(config: QualityConfig) -> QualityResult<Self> {
        Ok(Self {
            scorer: QualityScorer::new(config)?,
        })
    }

    /// Defaults with the given overrides applied on top
    pub fn with_overrides(overrides: QualityConfigOverride) -> QualityResult<Self> {
        Self::new(QualityConfig::with_overrides(overrides))
    }

    pub fn config(&self) -> &QualityConfig {
        self.scorer.config()
    }

    pub fn detect_domain(&self, query: &str) -> QueryDomain {
        self.scorer.detect_domain(query)
    }

    /// Handler for the domain the query falls into
    pub fn handler_for(&self, query: &str) -> &dyn DomainHandler {
        self.scorer
            .handlers()
            .for_domain(self.detect_domain(query))
    }

    pub fn score_result(&self, result: &SearchResult, query: &str) -> SearchResult {
        self.scorer.score_result(result, query)
    }

    pub fn filter_results(
        &self,
        results: &[SearchResult],
        query: &str,
        min_score: f64,
    ) -> Vec<SearchResult> {
        filter_results(&self.scorer, results, query, min_score)
    }

    pub fn filter_results_default(&self, results: &[SearchResult], query: &str) -> Vec<SearchResult> {
        self.filter_results(results, query, DEFAULT_MIN_SCORE)
    }

    pub fn enrich_result(&self, result: &SearchResult, query: &str) -> SearchResult {
        let domain = self.detect_domain(query);
        enrich_with(self.scorer.handlers().for_domain(domain), domain, result)
    }

    /// Filter then enrich every surviving result
    pub fn process(&self, results: &[SearchResult], query: &str, min_score: f64) -> Vec<SearchResult> {
        let domain = self.detect_domain(query);
        let handler = self.scorer.handlers().for_domain(domain);

        let processed: Vec<SearchResult> = self
            .filter_results(results, query, min_score)
            .iter()
            .map(|result| enrich_with(handler, domain, result))
            .collect();

        debug!(
            "Processed {} of {} results for '{}'",
            processed.len(),
            results.len(),
            query
        );
        processed
    }

    pub fn compute_stats(&self, results: &[SearchResult], query: Option<&str>) -> ResultStats {
        compute_stats(&self.scorer, results, query)
    }

    pub fn get_insights(&self, results: &[SearchResult], query: &str) -> DomainInsights {
        get_insights(&self.scorer, results, query)
    }
}

impl Default for ResultAnalyzer {
    fn default() -> Self {
        Self::new(QualityConfig::default()).expect("default quality configuration must compile")
    }
}

/// Read a raw batch of upstream records.
///
/// Anything that is not an array is treated as an empty batch. Entries that
/// are not objects are skipped; objects with mistyped fields keep whatever
/// string fields they carry and are left for scoring to reject.
pub fn parse_results(value: &Value) -> Vec<SearchResult> {
    let Some(entries) = value.as_array() else {
        warn!("Expected an array of search results, got {}", json_kind(value));
        return Vec::new();
    };

    let mut results = Vec::with_capacity(entries.len());
    for (index, entry) in entries.iter().enumerate() {
        if !entry.is_object() {
            warn!(
                "Skipping search result {}: expected an object, got {}",
                index,
                json_kind(entry)
            );
            continue;
        }

        match serde_json::from_value::<SearchResult>(entry.clone()) {
            Ok(result) => results.push(result),
            Err(e) => {
                warn!("Search result {} has malformed fields: {}", index, e);
                results.push(SearchResult::new(
                    string_field(entry, "title"),
                    string_field(entry, "link"),
                    string_field(entry, "snippet"),
                ));
            }
        }
    }

    results
}

fn string_field(entry: &Value, key: &str) -> String {
    entry
        .get(key)
        .and_then(Value::as_str)
        .unwrap_or_default()
        .to_string()
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::quality::config::DomainConfigOverride;
    use crate::quality::errors::QualityError;
    use serde_json::json;

    #[test]
    fn test_parse_non_array_is_empty() {
        assert!(parse_results(&json!({ "title": "not a list" })).is_empty());
        assert!(parse_results(&Value::Null).is_empty());
    }

    #[test]
    fn test_parse_skips_non_objects() {
        let value = json!([
            { "title": "Kept", "link": "https://example.com", "snippet": "Body" },
            "stray string",
            42
        ]);
        let results = parse_results(&value);
        assert_eq!(results.len(), 1);
        assert_eq!(results[0].title, "Kept");
    }

    #[test]
    fn test_parse_mistyped_fields_keep_strings() {
        let value = json!([{ "title": 7, "link": "https://example.com", "snippet": "Body" }]);
        let results = parse_results(&value);
        assert_eq!(results.len(), 1);
        assert!(results[0].title.is_empty());
        assert_eq!(results[0].link, "https://example.com");
    }

    #[test]
    fn test_with_overrides_rejects_bad_boost() {
        let overrides = QualityConfigOverride {
            medical: Some(DomainConfigOverride {
                authority_boost: Some(-1.0),
                ..DomainConfigOverride::default()
            }),
            ..QualityConfigOverride::default()
        };
        let error = ResultAnalyzer::with_overrides(overrides).err().unwrap();
        assert!(matches!(error, QualityError::InvalidConfig { .. }));
        assert_eq!(error.field(), "medical.authority_boost");
    }

    #[test]
    fn test_process_enriches_survivors() {
        let analyzer = ResultAnalyzer::default();
        let results = vec![SearchResult::new(
            "The Rust Programming Language: Ownership",
            "https://doc.rust-lang.org/book/ch04-00-understanding-ownership.html",
            "Ownership is Rust's most unique feature and enables memory safety guarantees without a garbage collector.",
        )];
        let processed = analyzer.process(&results, "rust ownership", DEFAULT_MIN_SCORE);
        assert_eq!(processed.len(), 1);
        assert!(processed[0].score.is_some());
        assert!(processed[0].source_type.is_some());
        assert!(processed[0].has_code_examples.is_some());
    }

    #[test]
    fn test_analyzer_is_send_and_sync() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<ResultAnalyzer>();
    }
}
