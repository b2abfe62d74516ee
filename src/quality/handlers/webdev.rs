use super::{
    break_before_keywords, classify_source, count_indicators, has_code_block, source_rules,
    DifficultyTiers, DomainHandler, SourceRule,
};
use crate::quality::config::DomainConfig;
use crate::quality::types::{Difficulty, QueryDomain, SearchResult, SourceType};
use lazy_static::lazy_static;
use regex::Regex;

const TERMINOLOGY_BONUS: f64 = 0.1;
const REFERENCE_BONUS: f64 = 0.1;
const CODE_BONUS: f64 = 0.2;
const ECOSYSTEM_BONUS: f64 = 0.1;
const MODERN_BONUS: f64 = 0.1;
const OUTDATED_PENALTY: f64 = -0.1;

/// Distinct configured indicators needed before prose counts as code
const INDICATOR_THRESHOLD: usize = 3;

const TIERS: DifficultyTiers = DifficultyTiers {
    advanced: &[
        "performance optimization",
        "memory leak",
        "event loop",
        "prototype chain",
        "concurrent rendering",
        "server components",
        "internals",
        "reconciliation",
        "web workers",
        "code splitting",
        "microtask",
        "garbage collection",
    ],
    intermediate: &[],
    beginner: &[
        "beginner",
        "introduction",
        "getting started",
        "basics",
        "tutorial",
        "learn",
        "hello world",
        "first steps",
    ],
};

lazy_static! {
    static ref REFERENCE: Regex =
        Regex::new(r"\b(documentation|docs|api reference|specification|mdn)\b").unwrap();
    static ref ECOSYSTEM: Regex = Regex::new(
        r"\b(components?|hooks?|props|state|promises?|async|modules?|bundlers?|event listeners?)\b"
    )
    .unwrap();
    static ref MODERN: Regex =
        Regex::new(r"\b(es20(1[5-9]|2\d)|es6|react 1[89]|node(\.js)? (1[6-9]|2\d))\b").unwrap();
    static ref FRAMEWORK: Regex =
        Regex::new(r"\b(react|vue|angular|svelte|next\.js|nuxt|express|solid\.?js)\b").unwrap();
    static ref OUTDATED: Regex = Regex::new(r"\b(internet explorer|ie[6-9])\b").unwrap();
    static ref STRUCTURE: Regex = Regex::new(
        r#"\b(const|let|var)\s+[A-Za-z_$][\w$]*\s*=|\bfunction\s*[\w$]*\s*\(|=>|\bconsole\.log\(|\bimport\s+.+\s+from\s+['"]|\bexport\s+(default|const|function)\b"#
    )
    .unwrap();
    static ref KEYWORD_BOUNDARY: Regex = Regex::new(
        r"(?P<punct>[;{}])[ \t]*(?P<keyword>function|const|let|var|class|import|export|return)\b"
    )
    .unwrap();
    static ref SOURCE_RULES: Vec<SourceRule> = source_rules(&[
        (
            r"developer\.mozilla\.org|reactjs\.org|react\.dev|vuejs\.org|angular\.io|nodejs\.org|typescriptlang\.org|svelte\.dev|/docs?/|/api/|/reference/",
            SourceType::Documentation,
        ),
        (
            r"github\.com|gitlab\.com|codepen\.io|codesandbox\.io|jsfiddle\.net|npmjs\.com/package",
            SourceType::CodeRepository,
        ),
        (r"stackoverflow\.com|stackexchange\.com", SourceType::QA),
        (r"dev\.to|medium\.com|hashnode\.|blog", SourceType::Blog),
        (r"news|infoq\.com|javascriptweekly", SourceType::News),
    ]);
}

/// Whether a result names a front-end or server framework
pub(crate) fn mentions_framework(result: &SearchResult) -> bool {
    FRAMEWORK.is_match(&result.combined_text())
}

/// Heuristics for JavaScript and web development queries
pub struct WebDevHandler {
    keywords: Vec<String>,
    code_indicators: Vec<String>,
}

impl WebDevHandler {
    pub fn new(config: &DomainConfig) -> Self {
        Self {
            keywords: config.keywords.clone(),
            code_indicators: config.code_indicators.clone(),
        }
    }
}

impl DomainHandler for WebDevHandler {
    fn domain(&self) -> QueryDomain {
        QueryDomain::JavaScript
    }

    fn validate_content(&self, result: &SearchResult) -> f64 {
        let text = result.combined_text();
        let mut delta = 0.0;

        if self.keywords.iter().any(|k| text.contains(k.as_str())) {
            delta += TERMINOLOGY_BONUS;
        }
        if REFERENCE.is_match(&text) {
            delta += REFERENCE_BONUS;
        }
        if self.detect_code_examples(&result.snippet) {
            delta += CODE_BONUS;
        }
        if ECOSYSTEM.is_match(&text) {
            delta += ECOSYSTEM_BONUS;
        }
        if MODERN.is_match(&text) {
            delta += MODERN_BONUS;
        }
        if OUTDATED.is_match(&text) {
            delta += OUTDATED_PENALTY;
        }

        delta
    }

    fn estimate_difficulty(&self, result: &SearchResult) -> Difficulty {
        TIERS.estimate(&result.combined_text())
    }

    fn detect_source_type(&self, url: &str) -> SourceType {
        classify_source(&SOURCE_RULES, url)
    }

    fn detect_code_examples(&self, snippet: &str) -> bool {
        has_code_block(snippet)
            || STRUCTURE.is_match(snippet)
            || count_indicators(snippet, &self.code_indicators) >= INDICATOR_THRESHOLD
    }

    fn format_snippet(&self, snippet: &str) -> String {
        break_before_keywords(&KEYWORD_BOUNDARY, snippet)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn handler() -> WebDevHandler {
        WebDevHandler::new(&DomainConfig::javascript())
    }

    #[test]
    fn test_react_docs_content_bonus() {
        let result = SearchResult::new(
            "useEffect Cleanup — React Docs",
            "https://react.dev/reference/react/useEffect",
            "Returning a cleanup function from useEffect lets you clean up resources such as subscriptions or timers before the component re-renders or unmounts.",
        );
        // terminology + reference + ecosystem, no code
        let delta = handler().validate_content(&result);
        assert!((delta - 0.3).abs() < 1e-9);
    }

    #[test]
    fn test_code_detection() {
        let handler = handler();
        assert!(handler.detect_code_examples("const total = items.length;"));
        assert!(handler.detect_code_examples("items.map((item) => item.id)"));
        assert!(handler.detect_code_examples("Use ```npm install``` first"));
        assert!(!handler.detect_code_examples("Returning a cleanup function from an effect."));
    }

    #[test]
    fn test_outdated_platform_penalty() {
        let result = SearchResult::new(
            "Polyfills for IE8",
            "https://example.com",
            "Supporting Internet Explorer with shims.",
        );
        let delta = handler().validate_content(&result);
        assert!((delta + 0.1).abs() < 1e-9);
    }

    #[test]
    fn test_difficulty() {
        let handler = handler();
        let advanced = SearchResult::new(
            "Event loop internals",
            "https://example.com",
            "Microtask scheduling explained.",
        );
        assert_eq!(handler.estimate_difficulty(&advanced), Difficulty::Advanced);

        let beginner = SearchResult::new(
            "JavaScript basics",
            "https://example.com",
            "Variables and types.",
        );
        assert_eq!(handler.estimate_difficulty(&beginner), Difficulty::Beginner);
    }

    #[test]
    fn test_source_types() {
        let handler = handler();
        assert_eq!(
            handler.detect_source_type("https://react.dev/reference/react/useEffect"),
            SourceType::Documentation
        );
        assert_eq!(
            handler.detect_source_type("https://github.com/facebook/react"),
            SourceType::CodeRepository
        );
        assert_eq!(
            handler.detect_source_type("https://stackoverflow.com/questions/1"),
            SourceType::QA
        );
        assert_eq!(
            handler.detect_source_type("https://dev.to/someone/hooks"),
            SourceType::Blog
        );
        assert_eq!(
            handler.detect_source_type("https://www.freecodecamp.org/learn"),
            SourceType::Tutorial
        );
    }

    #[test]
    fn test_framework_mentions() {
        let result = SearchResult::new("Routing in Vue", "https://example.com", "Set up the router.");
        assert!(mentions_framework(&result));
        let plain = SearchResult::new("Array methods", "https://example.com", "map and filter.");
        assert!(!mentions_framework(&plain));
    }

    #[test]
    fn test_format_snippet_breaks_before_keywords() {
        let formatted = handler().format_snippet("const a = 1; const b = 2; return a + b;");
        assert_eq!(formatted, "const a = 1;\nconst b = 2;\nreturn a + b;");
    }
}
