use super::{classify_source, source_rules, DifficultyTiers, DomainHandler, SourceRule};
use crate::quality::types::{Difficulty, QueryDomain, SearchResult, SourceType};
use lazy_static::lazy_static;
use regex::Regex;

const EXPLANATORY_BONUS: f64 = 0.05;
const AUTHORITATIVE_BONUS: f64 = 0.05;

const TIERS: DifficultyTiers = DifficultyTiers {
    advanced: &[
        "advanced",
        "in-depth",
        "expert",
        "technical",
        "research",
        "architecture",
        "deep dive",
    ],
    intermediate: &[],
    beginner: &[
        "beginner",
        "introduction",
        "basics",
        "simple",
        "easy",
        "101",
        "getting started",
    ],
};

lazy_static! {
    static ref EXPLANATORY: Regex =
        Regex::new(r"\b(guide|overview|explained|introduction|how to|what is)\b").unwrap();
    static ref AUTHORITATIVE: Regex =
        Regex::new(r"\b(research|study|official|according to)\b").unwrap();
    static ref SOURCE_RULES: Vec<SourceRule> = source_rules(&[
        (
            r"wikipedia\.org|/docs?/|documentation|readthedocs",
            SourceType::Documentation,
        ),
        (r"github\.com|gitlab\.com|bitbucket\.org", SourceType::CodeRepository),
        (
            r"stackoverflow\.com|stackexchange\.com|quora\.com|reddit\.com",
            SourceType::QA,
        ),
        (
            r"reuters\.com|bbc\.|cnn\.com|nytimes\.com|apnews\.com|/news/",
            SourceType::News,
        ),
        (r"blog|medium\.com|wordpress\.com|substack\.com", SourceType::Blog),
    ]);
}

/// Fallback heuristics for queries outside every specialised domain
#[derive(Default)]
pub struct GeneralHandler;

impl GeneralHandler {
    pub fn new() -> Self {
        Self
    }
}

impl DomainHandler for GeneralHandler {
    fn domain(&self) -> QueryDomain {
        QueryDomain::General
    }

    fn validate_content(&self, result: &SearchResult) -> f64 {
        let text = result.combined_text();
        let mut delta = 0.0;

        if EXPLANATORY.is_match(&text) {
            delta += EXPLANATORY_BONUS;
        }
        if AUTHORITATIVE.is_match(&text) {
            delta += AUTHORITATIVE_BONUS;
        }

        delta
    }

    fn estimate_difficulty(&self, result: &SearchResult) -> Difficulty {
        TIERS.estimate(&result.combined_text())
    }

    fn detect_source_type(&self, url: &str) -> SourceType {
        classify_source(&SOURCE_RULES, url)
    }
}
