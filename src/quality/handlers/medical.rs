use super::{classify_source, source_rules, DifficultyTiers, DomainHandler, SourceRule};
use crate::quality::config::DomainConfig;
use crate::quality::types::{Difficulty, QueryDomain, SearchResult, SourceType};
use lazy_static::lazy_static;
use regex::Regex;

const TERMINOLOGY_BONUS: f64 = 0.15;
const EVIDENCE_BONUS: f64 = 0.2;
const CITATION_BONUS: f64 = 0.15;
const UNSUPPORTED_CLAIM_PENALTY: f64 = -0.3;

const TIERS: DifficultyTiers = DifficultyTiers {
    advanced: &[
        "pathophysiology",
        "pharmacokinetics",
        "pharmacodynamics",
        "etiology",
        "randomized controlled",
        "meta-analysis",
        "clinical trial",
        "immunogenicity",
        "histopathology",
        "molecular",
        "contraindication",
        "cohort",
    ],
    intermediate: &[],
    beginner: &[
        "what is",
        "overview",
        "basics",
        "symptoms",
        "simple",
        "introduction",
        "faq",
        "patient guide",
        "easy to understand",
    ],
};

lazy_static! {
    static ref TERMINOLOGY: Regex = Regex::new(
        r"\b(symptoms?|diagnos\w*|treatments?|patients?|clinical|therap\w*|chronic|dosage|prognosis)\b"
    )
    .unwrap();
    static ref EVIDENCE: Regex = Regex::new(
        r"\b(peer[- ]reviewed|clinical (trials?|stud(y|ies))|randomi[sz]ed|meta-analys[ie]s|systematic review|according to (the )?(cdc|who|nih|fda))\b"
    )
    .unwrap();
    static ref CITATION: Regex =
        Regex::new(r"(\bdoi:|\bpmid\b|\bet al\.|\bjournal of\b|\(\d{4}\))").unwrap();
    static ref UNSUPPORTED_CLAIM: Regex = Regex::new(
        r"(miracle cure|cure-all|doctors hate|100% effective|secret remedy)"
    )
    .unwrap();
    static ref SOURCE_RULES: Vec<SourceRule> = source_rules(&[
        (
            r"cdc\.gov|nih\.gov|who\.int|fda\.gov|nhs\.uk|medlineplus\.gov|ema\.europa\.eu",
            SourceType::MedicalAuthority,
        ),
        (
            r"mayoclinic\.org|clevelandclinic\.org|hopkinsmedicine\.org|health\.harvard\.edu",
            SourceType::MedicalAuthority,
        ),
        (
            r"pubmed|ncbi\.nlm|nejm\.org|thelancet\.com|bmj\.com|jamanetwork\.com|cochranelibrary\.com|nature\.com",
            SourceType::Documentation,
        ),
        (
            r"reuters\.com|bbc\.|cnn\.com|nytimes\.com|statnews\.com|medicalnewstoday\.com|/news/",
            SourceType::News,
        ),
        (r"reddit\.com|quora\.com|stackexchange\.com", SourceType::QA),
        (r"blog|medium\.com|substack\.com", SourceType::Blog),
    ]);
}

/// Whether a result uses evidence or citation language
pub(crate) fn cites_evidence(result: &SearchResult) -> bool {
    let text = result.combined_text();
    EVIDENCE.is_match(&text) || CITATION.is_match(&text)
}

/// Heuristics for health and medicine queries
pub struct MedicalHandler {
    keywords: Vec<String>,
}

impl MedicalHandler {
    pub fn new(config: &DomainConfig) -> Self {
        Self {
            keywords: config.keywords.clone(),
        }
    }

    fn uses_terminology(&self, text_lower: &str) -> bool {
        self.keywords.iter().any(|k| text_lower.contains(k.as_str()))
            || TERMINOLOGY.is_match(text_lower)
    }
}

impl DomainHandler for MedicalHandler {
    fn domain(&self) -> QueryDomain {
        QueryDomain::Medical
    }

    fn validate_content(&self, result: &SearchResult) -> f64 {
        let text = result.combined_text();
        let mut delta = 0.0;

        if self.uses_terminology(&text) {
            delta += TERMINOLOGY_BONUS;
        }
        if EVIDENCE.is_match(&text) {
            delta += EVIDENCE_BONUS;
        }
        if CITATION.is_match(&text) {
            delta += CITATION_BONUS;
        }
        if UNSUPPORTED_CLAIM.is_match(&text) {
            delta += UNSUPPORTED_CLAIM_PENALTY;
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
