mod general;
mod medical;
mod systems;
mod webdev;

pub use general::GeneralHandler;
pub use medical::MedicalHandler;
pub use systems::RustHandler;
pub use webdev::WebDevHandler;

pub(crate) use medical::cites_evidence;
pub(crate) use webdev::mentions_framework;

use super::config::QualityConfig;
use super::types::{Difficulty, QueryDomain, SearchResult, SourceType};
use lazy_static::lazy_static;
use regex::Regex;
use url::Url;

/// Capabilities every domain handler provides
pub trait DomainHandler: Send + Sync {
    fn domain(&self) -> QueryDomain;

    /// Additive score delta for domain-specific content signals
    fn validate_content(&self, result: &SearchResult) -> f64;

    fn estimate_difficulty(&self, result: &SearchResult) -> Difficulty;

    fn detect_source_type(&self, url: &str) -> SourceType;

    fn detect_code_examples(&self, snippet: &str) -> bool {
        has_code_block(snippet)
    }

    /// Reflow a snippet for display. Never changes its words.
    fn format_snippet(&self, snippet: &str) -> String {
        collapse_blank_lines(snippet)
    }
}

/// Extra checks only the systems-language handler offers
pub trait SystemsLanguageExt: Send + Sync {
    /// Bonus for idiomatic code, compilation targets and language-unique features
    fn validate_specific_patterns(&self, result: &SearchResult) -> f64;

    /// Whether the result frames the language against another one
    fn is_comparative_content(&self, result: &SearchResult) -> bool;
}

/// Dispatch table from domain to handler
pub struct HandlerSet {
    medical: MedicalHandler,
    web: WebDevHandler,
    rust: RustHandler,
    general: GeneralHandler,
}

impl HandlerSet {
    pub fn new(config: &QualityConfig) -> Self {
        Self {
            medical: MedicalHandler::new(&config.medical),
            web: WebDevHandler::new(&config.javascript),
            rust: RustHandler::new(&config.rust),
            general: GeneralHandler::new(),
        }
    }

    pub fn for_domain(&self, domain: QueryDomain) -> &dyn DomainHandler {
        match domain {
            QueryDomain::Medical => &self.medical,
            QueryDomain::JavaScript => &self.web,
            QueryDomain::Rust => &self.rust,
            QueryDomain::General => &self.general,
        }
    }

    pub fn systems(&self, domain: QueryDomain) -> Option<&dyn SystemsLanguageExt> {
        match domain {
            QueryDomain::Rust => Some(&self.rust),
            _ => None,
        }
    }
}

// ============ Shared rule tables and helpers ============

/// One row of a source-type cascade
pub(crate) struct SourceRule {
    pattern: Regex,
    source: SourceType,
}

/// Compile a built-in source-type table. The tables are constants, so a bad
/// pattern is a programming error.
pub(crate) fn source_rules(rows: &[(&str, SourceType)]) -> Vec<SourceRule> {
    rows.iter()
        .map(|(pattern, source)| SourceRule {
            pattern: Regex::new(pattern).expect("built-in source rule must compile"),
            source: *source,
        })
        .collect()
}

/// First matching rule wins; `Tutorial` when nothing matches
pub(crate) fn classify_source(rules: &[SourceRule], url: &str) -> SourceType {
    let target = normalized_link(url);
    rules
        .iter()
        .find(|rule| rule.pattern.is_match(&target))
        .map(|rule| rule.source)
        .unwrap_or(SourceType::Tutorial)
}

/// Host and path of a link, lower-cased; the raw link when it does not parse
pub(crate) fn normalized_link(url: &str) -> String {
    match Url::parse(url) {
        Ok(parsed) => format!(
            "{}{}",
            parsed.host_str().unwrap_or_default(),
            parsed.path()
        )
        .to_lowercase(),
        Err(_) => url.to_lowercase(),
    }
}

/// Advanced / intermediate / beginner vocabulary for difficulty estimation
pub(crate) struct DifficultyTiers {
    pub advanced: &'static [&'static str],
    pub intermediate: &'static [&'static str],
    pub beginner: &'static [&'static str],
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct TierCounts {
    pub advanced: usize,
    pub intermediate: usize,
    pub beginner: usize,
}

impl DifficultyTiers {
    pub fn count(&self, text_lower: &str) -> TierCounts {
        TierCounts {
            advanced: count_terms(text_lower, self.advanced),
            intermediate: count_terms(text_lower, self.intermediate),
            beginner: count_terms(text_lower, self.beginner),
        }
    }

    /// Advanced beats beginner; everything else is intermediate
    pub fn estimate(&self, text_lower: &str) -> Difficulty {
        let counts = self.count(text_lower);
        if counts.advanced >= 2 {
            Difficulty::Advanced
        } else if counts.beginner >= 1 {
            Difficulty::Beginner
        } else {
            Difficulty::Intermediate
        }
    }
}

/// Number of distinct terms contained in the text
pub(crate) fn count_terms(text_lower: &str, terms: &[&str]) -> usize {
    terms.iter().filter(|term| text_lower.contains(*term)).count()
}

/// Number of distinct configured indicators present, case-sensitive
pub(crate) fn count_indicators(snippet: &str, indicators: &[String]) -> usize {
    indicators
        .iter()
        .filter(|indicator| snippet.contains(indicator.as_str()))
        .count()
}

lazy_static! {
    static ref CODE_FENCE: Regex = Regex::new(r"```").unwrap();
    static ref INLINE_CODE: Regex = Regex::new(r"`[^`\n]*[(){};=<>:.\[\]][^`\n]*`").unwrap();
    static ref BLANK_LINES: Regex = Regex::new(r"\n{3,}").unwrap();
}

/// Fenced blocks, or inline spans that contain syntax rather than a bare word
pub(crate) fn has_code_block(snippet: &str) -> bool {
    CODE_FENCE.is_match(snippet) || INLINE_CODE.is_match(snippet)
}

pub(crate) fn collapse_blank_lines(snippet: &str) -> String {
    BLANK_LINES.replace_all(snippet, "\n\n").into_owned()
}

/// Break a line before each keyword that follows `;`, `{` or `}`
pub(crate) fn break_before_keywords(boundary: &Regex, snippet: &str) -> String {
    let broken = boundary.replace_all(snippet, "$punct\n$keyword");
    collapse_blank_lines(&broken)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_dispatch_table_matches_domain() {
        let handlers = HandlerSet::new(&QualityConfig::default());
        for domain in [
            QueryDomain::Medical,
            QueryDomain::JavaScript,
            QueryDomain::Rust,
            QueryDomain::General,
        ] {
            assert_eq!(handlers.for_domain(domain).domain(), domain);
        }
    }

    #[test]
    fn test_systems_extension_only_for_rust() {
        let handlers = HandlerSet::new(&QualityConfig::default());
        assert!(handlers.systems(QueryDomain::Rust).is_some());
        assert!(handlers.systems(QueryDomain::JavaScript).is_none());
        assert!(handlers.systems(QueryDomain::General).is_none());
    }

    #[test]
    fn test_normalized_link() {
        assert_eq!(
            normalized_link("https://Docs.RS/serde/latest/serde/"),
            "docs.rs/serde/latest/serde/"
        );
        assert_eq!(normalized_link("not a url"), "not a url");
    }

    #[test]
    fn test_code_block_detection() {
        assert!(has_code_block("Use ```let x = 1;``` here"));
        assert!(has_code_block("Call `foo()` to start"));
        assert!(!has_code_block("The `tokio` crate is popular"));
        assert!(!has_code_block("No code at all"));
    }

    #[test]
    fn test_collapse_blank_lines() {
        assert_eq!(collapse_blank_lines("a\n\n\n\nb\n\nc"), "a\n\nb\n\nc");
    }

    #[test]
    fn test_count_terms_counts_distinct_terms() {
        assert_eq!(count_terms("unsafe unsafe ffi", &["unsafe", "ffi", "pin<"]), 2);
    }
}
