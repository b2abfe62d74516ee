use super::config::QualityConfig;
use super::domain::{compile_patterns, matches_any, CompiledDomain, DomainRegistry};
use super::errors::QualityResult;
use super::handlers::HandlerSet;
use super::types::{QueryDomain, SearchResult};
use lazy_static::lazy_static;
use log::trace;
use regex::Regex;
use std::collections::HashSet;

pub const ISSUE_MISSING_FIELDS: &str = "Missing required fields";
pub const ISSUE_TITLE_TOO_SHORT: &str = "Title too short";
pub const ISSUE_SNIPPET_TOO_SHORT: &str = "Snippet too short";
pub const ISSUE_LOW_RELEVANCE: &str = "Low query relevance";
pub const ISSUE_LOW_QUALITY_SOURCE: &str = "Low-quality source";
pub const ISSUE_SUSPICIOUS_URL: &str = "Suspicious URL pattern";
pub const ISSUE_SPAM: &str = "Contains spam content";
pub const ISSUE_REPETITIVE: &str = "Repetitive content";

const BASE_SCORE: f64 = 0.5;
const LENGTH_PENALTY: f64 = -0.2;
const IDEAL_LENGTH_BONUS: f64 = 0.1;
const SYNONYM_CREDIT: f64 = 0.8;
const LOW_RELEVANCE_PENALTY: f64 = -0.3;
const DOMAIN_TRUSTED_BONUS: f64 = 0.7;
const GLOBAL_TRUSTED_BONUS: f64 = 0.5;
const AVOID_PENALTY: f64 = -0.5;
const SUSPICIOUS_PENALTY: f64 = -0.3;
const SPAM_PENALTY: f64 = -0.3;
const SNIPPET_DENSITY_WEIGHT: f64 = 0.2;
const FULL_SENTENCE_BONUS: f64 = 0.1;
const PARTIAL_SENTENCE_BONUS: f64 = 0.05;
const REPETITION_PENALTY: f64 = -0.1;
const REPETITION_MIN_RATIO: f64 = 0.5;

lazy_static! {
    static ref COMPLETE_SENTENCE: Regex = Regex::new(r"[^.!?]+[.!?](\s|$)").unwrap();
}

/// Scores results against a query using one compiled configuration
pub struct QualityScorer {
    config: QualityConfig,
    registry: DomainRegistry,
    handlers: HandlerSet,
    trusted: Vec<Regex>,
    suspicious: Vec<Regex>,
    avoid: Vec<Regex>,
}

impl QualityScorer {
    /// Validate the configuration and compile every pattern it carries
    pub fn new(config: QualityConfig) -> QualityResult<Self> {
        config.validate()?;

        let registry = DomainRegistry::new(&config)?;
        let handlers = HandlerSet::new(&config);
        let trusted = compile_patterns("url_patterns.trusted", &config.url_patterns.trusted)?;
        let suspicious =
            compile_patterns("url_patterns.suspicious", &config.url_patterns.suspicious)?;
        let avoid = compile_patterns("url_patterns.avoid", &config.url_patterns.avoid)?;

        Ok(Self {
            config,
            registry,
            handlers,
            trusted,
            suspicious,
            avoid,
        })
    }

    pub fn config(&self) -> &QualityConfig {
        &self.config
    }

    pub fn registry(&self) -> &DomainRegistry {
        &self.registry
    }

    pub fn handlers(&self) -> &HandlerSet {
        &self.handlers
    }

    pub fn detect_domain(&self, query: &str) -> QueryDomain {
        self.registry.detect_domain(query)
    }

    /// Whether the link matches one of the global trusted patterns
    pub fn is_globally_trusted(&self, link: &str) -> bool {
        matches_any(&self.trusted, &link.to_lowercase())
    }

    /// Score a result, detecting the domain from the query
    pub fn score_result(&self, result: &SearchResult, query: &str) -> SearchResult {
        let domain = self.detect_domain(query);
        self.score_in_domain(result, query, domain)
    }

    /// Score a result for an already detected domain
    pub fn score_in_domain(
        &self,
        result: &SearchResult,
        query: &str,
        domain: QueryDomain,
    ) -> SearchResult {
        let mut scored = result.clone();
        scored.issues.clear();

        if !result.has_required_fields() {
            trace!("Rejecting result with missing fields: '{}'", result.link);
            scored.score = Some(0.0);
            scored.issues.push(ISSUE_MISSING_FIELDS.to_string());
            return scored;
        }

        let compiled = self.registry.get(domain);
        let mut score = BASE_SCORE;

        score += self.check_lengths(&mut scored, compiled);
        score += self.check_relevance(&mut scored, query, compiled);
        score += self.check_url(&mut scored, compiled);

        let content = self.handlers.for_domain(domain).validate_content(&scored);
        trace!("Domain content delta for '{}': {:+.3}", scored.link, content);
        score += content;

        score += self.check_general_content(&mut scored, query);

        if let Some(systems) = self.handlers.systems(domain) {
            let specific = systems.validate_specific_patterns(&scored);
            trace!("Systems-language delta for '{}': {:+.3}", scored.link, specific);
            score += specific;
        }

        score = score.clamp(0.0, 1.0);

        if domain != QueryDomain::General && self.is_authoritative(compiled, &scored.link) {
            score = (score + compiled.config.authority_boost).clamp(0.0, 1.0);
            trace!(
                "Authority boost {:+.2} applied to '{}'",
                compiled.config.authority_boost,
                scored.link
            );
        }

        trace!("Final score for '{}': {:.3}", scored.link, score);
        scored.score = Some(score);
        scored
    }

    fn is_authoritative(&self, compiled: &CompiledDomain, link: &str) -> bool {
        compiled.is_trusted(link) || self.is_globally_trusted(link)
    }

    fn check_lengths(&self, result: &mut SearchResult, compiled: &CompiledDomain) -> f64 {
        let mut delta = 0.0;

        if result.title.chars().count() < compiled.config.min_title_length {
            result.issues.push(ISSUE_TITLE_TOO_SHORT.to_string());
            delta += LENGTH_PENALTY;
        }

        let snippet_len = result.snippet.chars().count();
        if snippet_len < compiled.config.min_snippet_length {
            result.issues.push(ISSUE_SNIPPET_TOO_SHORT.to_string());
            delta += LENGTH_PENALTY;
        }

        if snippet_len > self.config.max_snippet_length {
            result.snippet = truncate_snippet(&result.snippet, self.config.max_snippet_length);
        } else {
            let distance = snippet_len.abs_diff(self.config.ideal_snippet_length);
            if distance <= self.config.snippet_length_tolerance {
                let closeness =
                    1.0 - distance as f64 / self.config.snippet_length_tolerance as f64;
                delta += IDEAL_LENGTH_BONUS * closeness;
            }
        }

        trace!("Length delta for '{}': {:+.3}", result.link, delta);
        delta
    }

    fn check_relevance(
        &self,
        result: &mut SearchResult,
        query: &str,
        compiled: &CompiledDomain,
    ) -> f64 {
        let query_tokens = tokenize(query);
        let title_tokens = tokenize(&result.title);
        let snippet_tokens = tokenize(&result.snippet);
        let content: HashSet<&str> = title_tokens
            .iter()
            .chain(snippet_tokens.iter())
            .map(String::as_str)
            .collect();

        let mut relevant = 0.0;
        for token in &query_tokens {
            if content.contains(token.as_str()) {
                relevant += 1.0;
            }
            for synonym in compiled.synonyms_for(token) {
                if content.contains(synonym.as_str()) {
                    relevant += SYNONYM_CREDIT;
                }
            }
        }

        let delta = if relevant < compiled.config.min_relevant_words as f64 {
            result.issues.push(ISSUE_LOW_RELEVANCE.to_string());
            LOW_RELEVANCE_PENALTY
        } else if query_tokens.is_empty() {
            0.0
        } else {
            relevant / query_tokens.len() as f64 * self.config.snippet_weight
        };

        trace!(
            "Relevance for '{}': {:.1} relevant words, delta {:+.3}",
            result.link,
            relevant,
            delta
        );
        delta
    }

    fn check_url(&self, result: &mut SearchResult, compiled: &CompiledDomain) -> f64 {
        let link = result.link.to_lowercase();

        let delta = if compiled.is_trusted(&link) {
            DOMAIN_TRUSTED_BONUS
        } else if matches_any(&self.trusted, &link) {
            GLOBAL_TRUSTED_BONUS
        } else if matches_any(&self.avoid, &link) {
            result.issues.push(ISSUE_LOW_QUALITY_SOURCE.to_string());
            AVOID_PENALTY
        } else if matches_any(&self.suspicious, &link) {
            result.issues.push(ISSUE_SUSPICIOUS_URL.to_string());
            SUSPICIOUS_PENALTY
        } else {
            0.0
        };

        trace!("URL delta for '{}': {:+.3}", result.link, delta);
        delta
    }

    fn check_general_content(&self, result: &mut SearchResult, query: &str) -> f64 {
        let mut delta = 0.0;
        let text = result.combined_text();

        if self
            .config
            .spam_words
            .iter()
            .any(|word| text.contains(word.as_str()))
        {
            result.issues.push(ISSUE_SPAM.to_string());
            delta += SPAM_PENALTY;
        }

        let query_tokens = tokenize(query);
        if !query_tokens.is_empty() {
            delta += density(&query_tokens, &result.title) * self.config.title_weight;
            delta += density(&query_tokens, &result.snippet) * SNIPPET_DENSITY_WEIGHT;
        }

        delta += sentence_structure_bonus(&result.snippet);

        let words = tokenize(&result.snippet);
        if !words.is_empty() {
            let unique: HashSet<&String> = words.iter().collect();
            if (unique.len() as f64 / words.len() as f64) < REPETITION_MIN_RATIO {
                result.issues.push(ISSUE_REPETITIVE.to_string());
                delta += REPETITION_PENALTY;
            }
        }

        trace!("General content delta for '{}': {:+.3}", result.link, delta);
        delta
    }
}

/// Keep the first `max_chars` characters and mark the cut with an ellipsis
pub fn truncate_snippet(snippet: &str, max_chars: usize) -> String {
    let mut truncated: String = snippet.chars().take(max_chars).collect();
    truncated.push_str("...");
    truncated
}

/// Lower-cased whitespace tokens
fn tokenize(text: &str) -> Vec<String> {
    text.to_lowercase()
        .split_whitespace()
        .map(String::from)
        .collect()
}

/// Share of query tokens that appear among the tokens of `text`
fn density(query_tokens: &[String], text: &str) -> f64 {
    let tokens: HashSet<String> = tokenize(text).into_iter().collect();
    let found = query_tokens
        .iter()
        .filter(|token| tokens.contains(token.as_str()))
        .count();
    found as f64 / query_tokens.len() as f64
}

fn sentence_structure_bonus(snippet: &str) -> f64 {
    let trimmed = snippet.trim();
    let starts_upper = trimmed.chars().next().is_some_and(char::is_uppercase);
    if !starts_upper {
        return 0.0;
    }

    if trimmed.ends_with(['.', '!', '?']) {
        FULL_SENTENCE_BONUS
    } else if COMPLETE_SENTENCE.is_match(trimmed) {
        PARTIAL_SENTENCE_BONUS
    } else {
        0.0
    }
}
