use super::{
    break_before_keywords, classify_source, count_indicators, has_code_block, source_rules,
    DifficultyTiers, DomainHandler, SourceRule, SystemsLanguageExt,
};
use crate::quality::config::DomainConfig;
use crate::quality::types::{Difficulty, QueryDomain, SearchResult, SourceType};
use lazy_static::lazy_static;
use regex::Regex;

const TERMINOLOGY_BONUS: f64 = 0.1;
const REFERENCE_BONUS: f64 = 0.15;
const CODE_BONUS: f64 = 0.2;
const ECOSYSTEM_BONUS: f64 = 0.1;
const EDITION_BONUS: f64 = 0.05;

const IDIOM_BONUS: f64 = 0.1;
const TARGET_BONUS: f64 = 0.05;
const UNIQUE_FEATURE_BONUS: f64 = 0.1;

const INDICATOR_THRESHOLD: usize = 3;

const TIERS: DifficultyTiers = DifficultyTiers {
    advanced: &[
        "unsafe",
        "lifetime",
        "variance",
        "pin<",
        "phantomdata",
        "proc macro",
        "procedural macro",
        "ffi",
        "atomic",
        "async runtime",
        "trait object",
        "higher-ranked",
        "monomorphization",
        "repr(c)",
    ],
    intermediate: &[
        "trait",
        "generic",
        "iterator",
        "closure",
        "error handling",
        "smart pointer",
        "box<",
        "rc<",
        "arc<",
        "module",
        "pattern matching",
    ],
    beginner: &[
        "beginner",
        "getting started",
        "hello world",
        "introduction",
        "basics",
        "install",
        "first program",
        "the book",
        "learn rust",
    ],
};

lazy_static! {
    static ref TERMINOLOGY: Regex =
        Regex::new(r"\b(ownership|borrow(ing|ed)?|lifetimes?|traits?|crates?|unsafe|macros?)\b")
            .unwrap();
    static ref REFERENCE: Regex =
        Regex::new(r"(the rust book|rustonomicon|rust reference|\brfc \d+|docs\.rs|std::)").unwrap();
    static ref ECOSYSTEM: Regex = Regex::new(
        r"\b(tokio|serde|actix|axum|rayon|clap|anyhow|thiserror|diesel|wasm-bindgen)\b"
    )
    .unwrap();
    static ref EDITION: Regex = Regex::new(r"\b(edition 20(15|18|21|24)|rust 1\.\d+)").unwrap();
    static ref STRUCTURE: Regex = Regex::new(
        r"\bfn\s+\w+\s*[<(]|\blet\s+(mut\s+)?\w+\s*(:\s*[\w<>&']+\s*)?=|\bimpl(<[^>]*>)?\s+[A-Z]\w*|\bpub\s+(struct|enum|fn|trait)\b|\buse\s+(std|crate|super)::|#\[derive\(|\b\w+!\("
    )
    .unwrap();
    static ref IDIOMS: Regex = Regex::new(
        r"(Result<|Option<|\?;|\bimpl\b[^{]*\bfor\b|\bif let\b|\bmatch\b|\.iter\(\)|\.map\()"
    )
    .unwrap();
    static ref TARGETS: Regex = Regex::new(
        r"\b(wasm|webassembly|embedded|no_std|x86_64|aarch64|riscv|cross-compil)"
    )
    .unwrap();
    static ref UNIQUE_FEATURES: Regex = Regex::new(
        r"\b(zero-cost|borrow checker|ownership|lifetimes?|fearless concurrency|memory safety)\b"
    )
    .unwrap();
    static ref COMPARATIVE: Regex = Regex::new(
        r"\brust\s+(vs\.?|versus|compared (to|with))\s+(c\+\+|c\b|go\b|golang|zig|java\b|python|swift|javascript)|\b(c\+\+|c|go|golang|zig|java|python|swift|javascript)\s+(vs\.?|versus|compared (to|with))\s+rust\b"
    )
    .unwrap();
    static ref ADVANCED_STRUCTURE: Regex =
        Regex::new(r"unsafe\s*\{|<'[a-z]|&'[a-z]|\bwhere\s+\w+\s*:").unwrap();
    static ref BEGINNER_STRUCTURE: Regex = Regex::new(r"fn main\(\)|println!").unwrap();
    static ref KEYWORD_BOUNDARY: Regex = Regex::new(
        r"(?P<punct>[;{}])[ \t]*(?P<keyword>fn|let|impl|pub|use|struct|enum|match)\b"
    )
    .unwrap();
    static ref SOURCE_RULES: Vec<SourceRule> = source_rules(&[
        (
            r"doc\.rust-lang\.org|docs\.rs|rust-lang\.github\.io|/std/",
            SourceType::Documentation,
        ),
        (r"blog\.rust-lang\.org|this-week-in-rust\.org", SourceType::News),
        (
            r"github\.com|gitlab\.com|crates\.io|codeberg\.org",
            SourceType::CodeRepository,
        ),
        (
            r"stackoverflow\.com|users\.rust-lang\.org|internals\.rust-lang\.org|reddit\.com/r/rust",
            SourceType::QA,
        ),
        (r"medium\.com|dev\.to|blog", SourceType::Blog),
    ]);
}

/// Heuristics for Rust queries, including the systems-language extension
pub struct RustHandler {
    code_indicators: Vec<String>,
}

impl RustHandler {
    pub fn new(config: &DomainConfig) -> Self {
        Self {
            code_indicators: config.code_indicators.clone(),
        }
    }
}

impl DomainHandler for RustHandler {
    fn domain(&self) -> QueryDomain {
        QueryDomain::Rust
    }

    fn validate_content(&self, result: &SearchResult) -> f64 {
        let text = result.combined_text();
        let mut delta = 0.0;

        if TERMINOLOGY.is_match(&text) {
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
        if EDITION.is_match(&text) {
            delta += EDITION_BONUS;
        }

        delta
    }

    /// Advanced terms dominate; structural code patterns break ties when
    /// the vocabulary alone is inconclusive.
    fn estimate_difficulty(&self, result: &SearchResult) -> Difficulty {
        let text = result.combined_text();
        let counts = TIERS.count(&text);

        if counts.advanced >= 2 {
            return Difficulty::Advanced;
        }
        if counts.beginner >= 1 && counts.advanced == 0 {
            return Difficulty::Beginner;
        }

        let raw = format!("{} {}", result.title, result.snippet);
        if counts.advanced == 1 && ADVANCED_STRUCTURE.is_match(&raw) {
            return Difficulty::Advanced;
        }
        if counts.advanced == 0 && counts.intermediate == 0 && BEGINNER_STRUCTURE.is_match(&raw) {
            return Difficulty::Beginner;
        }

        Difficulty::Intermediate
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

impl SystemsLanguageExt for RustHandler {
    fn validate_specific_patterns(&self, result: &SearchResult) -> f64 {
        let raw = format!("{} {}", result.title, result.snippet);
        let text = raw.to_lowercase();
        let mut delta = 0.0;

        if IDIOMS.is_match(&raw) {
            delta += IDIOM_BONUS;
        }
        if TARGETS.is_match(&text) {
            delta += TARGET_BONUS;
        }
        if UNIQUE_FEATURES.is_match(&text) {
            delta += UNIQUE_FEATURE_BONUS;
        }

        delta
    }

    fn is_comparative_content(&self, result: &SearchResult) -> bool {
        COMPARATIVE.is_match(&result.combined_text())
    }
}
