use super::errors::{QualityError, QualityResult};
use super::types::QueryDomain;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Default minimum score passed to filtering when the caller has no opinion
pub const DEFAULT_MIN_SCORE: f64 = 0.3;

/// Per-domain tunables
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DomainConfig {
    pub min_title_length: usize,
    pub min_snippet_length: usize,
    pub min_relevant_words: usize,
    pub authority_boost: f64,
    /// Lower-case triggers for domain detection and terminology checks
    pub keywords: Vec<String>,
    /// Regex patterns matched against the case-folded link
    pub trusted_domains: Vec<String>,
    pub code_indicators: Vec<String>,
    pub synonyms: BTreeMap<String, Vec<String>>,
}

/// URL pattern tiers checked by URL trust validation
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UrlPatterns {
    pub trusted: Vec<String>,
    pub suspicious: Vec<String>,
    pub avoid: Vec<String>,
}

/// Global scoring configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct QualityConfig {
    pub max_snippet_length: usize,
    pub ideal_snippet_length: usize,
    pub snippet_length_tolerance: usize,

    pub title_weight: f64,
    pub snippet_weight: f64,
    pub url_weight: f64,

    pub spam_words: Vec<String>,
    pub url_patterns: UrlPatterns,

    pub medical: DomainConfig,
    pub javascript: DomainConfig,
    pub rust: DomainConfig,
    pub general: DomainConfig,
}

fn strings(items: &[&str]) -> Vec<String> {
    items.iter().map(|s| s.to_string()).collect()
}

/// Build a synonym table from `(word, "space separated alternatives")` pairs
fn synonyms(entries: &[(&str, &str)]) -> BTreeMap<String, Vec<String>> {
    entries
        .iter()
        .map(|(word, alternatives)| {
            let alternatives = alternatives.split_whitespace().map(String::from).collect();
            (word.to_string(), alternatives)
        })
        .collect()
}

impl DomainConfig {
    pub fn medical() -> Self {
        Self {
            min_title_length: 10,
            min_snippet_length: 15,
            min_relevant_words: 1,
            authority_boost: 0.8,
            keywords: strings(&[
                "covid", "vaccine", "disease", "symptom", "treatment", "diagnosis", "medical",
                "medicine", "health", "clinical", "patient", "therapy", "infection", "virus",
                "cancer", "diabetes", "surgery", "doctor", "pandemic",
            ]),
            trusted_domains: strings(&[
                r"cdc\.gov",
                r"nih\.gov",
                r"who\.int",
                r"mayoclinic\.org",
                r"nejm\.org",
                r"thelancet\.com",
                r"bmj\.com",
                r"jamanetwork\.com",
                r"clevelandclinic\.org",
                r"medlineplus\.gov",
                r"nhs\.uk",
                r"cochranelibrary\.com",
                r"pubmed",
            ]),
            code_indicators: Vec::new(),
            synonyms: synonyms(&[
                ("covid", "covid-19 coronavirus sars-cov-2"),
                ("vaccine", "vaccines vaccination immunization"),
                ("efficacy", "effectiveness efficiency"),
                ("symptoms", "signs manifestations"),
                ("treatment", "therapy management"),
                ("disease", "illness condition disorder"),
            ]),
        }
    }

    pub fn javascript() -> Self {
        Self {
            min_title_length: 10,
            min_snippet_length: 30,
            min_relevant_words: 2,
            authority_boost: 0.3,
            keywords: strings(&[
                "javascript", "typescript", "react", "vue", "angular", "svelte", "node.js",
                "nodejs", "npm", "webpack", "jquery", "useeffect", "usestate", "next.js",
                "ecmascript", "es6", "css", "html",
            ]),
            trusted_domains: strings(&[
                r"developer\.mozilla\.org",
                r"reactjs\.org",
                r"vuejs\.org",
                r"angular\.io",
                r"nodejs\.org",
                r"typescriptlang\.org",
                r"npmjs\.com",
                r"//web\.dev",
                r"javascript\.info",
                r"tc39\.es",
            ]),
            code_indicators: strings(&[
                "```", "function", "const ", "let ", "=>", "import ", "export ", "console.log",
                "return ",
            ]),
            synonyms: synonyms(&[
                ("function", "method callback"),
                ("example", "sample demo snippet"),
                ("error", "exception bug"),
                ("component", "element widget"),
                ("tutorial", "guide walkthrough"),
            ]),
        }
    }

    pub fn rust() -> Self {
        Self {
            min_title_length: 10,
            min_snippet_length: 30,
            min_relevant_words: 1,
            authority_boost: 0.4,
            keywords: strings(&[
                "rust", "rustc", "rustup", "cargo", "crates.io", "tokio", "serde",
                "borrow checker", "clippy", "rustlang",
            ]),
            trusted_domains: strings(&[
                r"rust-lang\.org",
                r"docs\.rs",
                r"crates\.io",
                r"rust-lang\.github\.io",
                r"tokio\.rs",
                r"this-week-in-rust\.org",
            ]),
            code_indicators: strings(&[
                "```", "fn ", "let mut", "impl ", "pub struct", "use std::", "match ", "#[derive",
            ]),
            synonyms: synonyms(&[
                ("error", "result panic"),
                ("async", "await future futures"),
                ("memory", "ownership borrow allocation"),
                ("thread", "concurrency parallelism"),
                ("macro", "macros proc-macro"),
            ]),
        }
    }

    pub fn general() -> Self {
        Self {
            min_title_length: 10,
            min_snippet_length: 30,
            min_relevant_words: 1,
            authority_boost: 0.0,
            keywords: Vec::new(),
            trusted_domains: Vec::new(),
            code_indicators: Vec::new(),
            synonyms: BTreeMap::new(),
        }
    }
}

impl Default for UrlPatterns {
    fn default() -> Self {
        Self {
            trusted: strings(&[
                r"wikipedia\.org",
                r"github\.com",
                r"stackoverflow\.com",
                r"developer\.mozilla\.org",
                r"w3\.org",
                r"\.gov\b",
                r"\.edu\b",
            ]),
            suspicious: strings(&[
                r"bit\.ly",
                r"tinyurl\.com",
                r"\.(xyz|top|click|loan|work)(/|$)",
                r"[?&](ref|aff|affiliate)=",
                r"\d{6,}\.html",
            ]),
            avoid: strings(&[
                r"pinterest\.",
                r"answers\.yahoo\.com",
                r"ehow\.com",
                r"ezinearticles\.com",
                r"//(ad|ads|spam)\.",
            ]),
        }
    }
}

impl Default for QualityConfig {
    fn default() -> Self {
        Self {
            max_snippet_length: 400,
            ideal_snippet_length: 200,
            snippet_length_tolerance: 100,
            title_weight: 0.3,
            snippet_weight: 0.5,
            url_weight: 0.2,
            spam_words: strings(&[
                "click here",
                "buy now",
                "limited time offer",
                "act now",
                "sponsored",
                "advertisement",
                "100% free",
                "make money fast",
                "casino",
                "free download",
            ]),
            url_patterns: UrlPatterns::default(),
            medical: DomainConfig::medical(),
            javascript: DomainConfig::javascript(),
            rust: DomainConfig::rust(),
            general: DomainConfig::general(),
        }
    }
}

/// Partial replacement for a [`DomainConfig`]; unset fields keep their value
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct DomainConfigOverride {
    pub min_title_length: Option<usize>,
    pub min_snippet_length: Option<usize>,
    pub min_relevant_words: Option<usize>,
    pub authority_boost: Option<f64>,
    pub keywords: Option<Vec<String>>,
    pub trusted_domains: Option<Vec<String>>,
    pub code_indicators: Option<Vec<String>>,
    pub synonyms: Option<BTreeMap<String, Vec<String>>>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct UrlPatternsOverride {
    pub trusted: Option<Vec<String>>,
    pub suspicious: Option<Vec<String>>,
    pub avoid: Option<Vec<String>>,
}

/// Partial replacement for a [`QualityConfig`], usually deserialized from JSON
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct QualityConfigOverride {
    pub max_snippet_length: Option<usize>,
    pub ideal_snippet_length: Option<usize>,
    pub snippet_length_tolerance: Option<usize>,
    pub title_weight: Option<f64>,
    pub snippet_weight: Option<f64>,
    pub url_weight: Option<f64>,
    pub spam_words: Option<Vec<String>>,
    pub url_patterns: Option<UrlPatternsOverride>,
    pub medical: Option<DomainConfigOverride>,
    pub javascript: Option<DomainConfigOverride>,
    pub rust: Option<DomainConfigOverride>,
    pub general: Option<DomainConfigOverride>,
}

impl DomainConfig {
    pub fn apply(&mut self, overrides: DomainConfigOverride) {
        if let Some(value) = overrides.min_title_length {
            self.min_title_length = value;
        }
        if let Some(value) = overrides.min_snippet_length {
            self.min_snippet_length = value;
        }
        if let Some(value) = overrides.min_relevant_words {
            self.min_relevant_words = value;
        }
        if let Some(value) = overrides.authority_boost {
            self.authority_boost = value;
        }
        if let Some(value) = overrides.keywords {
            self.keywords = value.into_iter().map(|k| k.to_lowercase()).collect();
        }
        if let Some(value) = overrides.trusted_domains {
            self.trusted_domains = value;
        }
        if let Some(value) = overrides.code_indicators {
            self.code_indicators = value;
        }
        if let Some(value) = overrides.synonyms {
            self.synonyms = value
                .into_iter()
                .map(|(word, alternatives)| {
                    let alternatives = alternatives.iter().map(|a| a.to_lowercase()).collect();
                    (word.to_lowercase(), alternatives)
                })
                .collect();
        }
    }
}

impl UrlPatterns {
    pub fn apply(&mut self, overrides: UrlPatternsOverride) {
        if let Some(value) = overrides.trusted {
            self.trusted = value;
        }
        if let Some(value) = overrides.suspicious {
            self.suspicious = value;
        }
        if let Some(value) = overrides.avoid {
            self.avoid = value;
        }
    }
}

impl QualityConfig {
    /// Defaults with the given overrides applied on top
    pub fn with_overrides(overrides: QualityConfigOverride) -> Self {
        let mut config = Self::default();
        config.apply(overrides);
        config
    }

    pub fn apply(&mut self, overrides: QualityConfigOverride) {
        if let Some(value) = overrides.max_snippet_length {
            self.max_snippet_length = value;
        }
        if let Some(value) = overrides.ideal_snippet_length {
            self.ideal_snippet_length = value;
        }
        if let Some(value) = overrides.snippet_length_tolerance {
            self.snippet_length_tolerance = value;
        }
        if let Some(value) = overrides.title_weight {
            self.title_weight = value;
        }
        if let Some(value) = overrides.snippet_weight {
            self.snippet_weight = value;
        }
        if let Some(value) = overrides.url_weight {
            self.url_weight = value;
        }
        if let Some(value) = overrides.spam_words {
            self.spam_words = value.into_iter().map(|w| w.to_lowercase()).collect();
        }
        if let Some(value) = overrides.url_patterns {
            self.url_patterns.apply(value);
        }
        if let Some(value) = overrides.medical {
            self.medical.apply(value);
        }
        if let Some(value) = overrides.javascript {
            self.javascript.apply(value);
        }
        if let Some(value) = overrides.rust {
            self.rust.apply(value);
        }
        if let Some(value) = overrides.general {
            self.general.apply(value);
        }
    }

    pub fn domain(&self, domain: QueryDomain) -> &DomainConfig {
        match domain {
            QueryDomain::Medical => &self.medical,
            QueryDomain::JavaScript => &self.javascript,
            QueryDomain::Rust => &self.rust,
            QueryDomain::General => &self.general,
        }
    }

    /// Check numeric tunables. Patterns are checked when they are compiled.
    pub fn validate(&self) -> QualityResult<()> {
        if self.max_snippet_length == 0 {
            return Err(QualityError::invalid_config(
                "max_snippet_length",
                "must be greater than zero",
            ));
        }
        if self.snippet_length_tolerance == 0 {
            return Err(QualityError::invalid_config(
                "snippet_length_tolerance",
                "must be greater than zero",
            ));
        }

        let weights = [
            ("title_weight", self.title_weight),
            ("snippet_weight", self.snippet_weight),
            ("url_weight", self.url_weight),
        ];
        for (field, value) in weights {
            check_non_negative(field, value)?;
        }

        for domain in [
            QueryDomain::Medical,
            QueryDomain::JavaScript,
            QueryDomain::Rust,
            QueryDomain::General,
        ] {
            let config = self.domain(domain);
            let field = format!("{}.authority_boost", domain);
            check_non_negative(&field, config.authority_boost)?;

            if self.max_snippet_length < config.min_snippet_length {
                return Err(QualityError::invalid_config(
                    "max_snippet_length",
                    format!(
                        "must be at least {}.min_snippet_length ({}), got {}",
                        domain, config.min_snippet_length, self.max_snippet_length
                    ),
                ));
            }
        }

        Ok(())
    }
}

fn check_non_negative(field: &str, value: f64) -> QualityResult<()> {
    if !value.is_finite() || value < 0.0 {
        return Err(QualityError::invalid_config(
            field,
            format!("must be a finite, non-negative number (got {})", value),
        ));
    }
    Ok(())
}
