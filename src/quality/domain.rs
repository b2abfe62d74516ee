use super::config::{DomainConfig, QualityConfig};
use super::errors::{QualityError, QualityResult};
use super::types::QueryDomain;
use log::debug;
use regex::{Regex, RegexBuilder};

/// Compile a list of URL patterns, reporting the owning field on failure
pub fn compile_patterns(field: &str, patterns: &[String]) -> QualityResult<Vec<Regex>> {
    patterns
        .iter()
        .map(|pattern| {
            RegexBuilder::new(pattern)
                .case_insensitive(true)
                .build()
                .map_err(|e| QualityError::invalid_pattern(field, pattern, e))
        })
        .collect()
}

/// True when any pattern matches the text
pub fn matches_any(patterns: &[Regex], text: &str) -> bool {
    patterns.iter().any(|pattern| pattern.is_match(text))
}

/// A domain's configuration with its patterns compiled
#[derive(Debug, Clone)]
pub struct CompiledDomain {
    pub domain: QueryDomain,
    pub config: DomainConfig,
    trusted: Vec<Regex>,
}

impl CompiledDomain {
    fn new(domain: QueryDomain, config: &DomainConfig) -> QualityResult<Self> {
        let field = format!("{}.trusted_domains", domain);
        Ok(Self {
            domain,
            config: config.clone(),
            trusted: compile_patterns(&field, &config.trusted_domains)?,
        })
    }

    /// Whether the link matches one of this domain's trusted patterns
    pub fn is_trusted(&self, link: &str) -> bool {
        matches_any(&self.trusted, &link.to_lowercase())
    }

    /// Whether the lower-cased text contains any of the domain keywords
    pub fn mentions_keyword(&self, text_lower: &str) -> bool {
        self.config
            .keywords
            .iter()
            .any(|keyword| text_lower.contains(keyword.as_str()))
    }

    /// Alternatives registered for a query token
    pub fn synonyms_for(&self, token: &str) -> &[String] {
        self.config
            .synonyms
            .get(token)
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }
}

#[derive(Debug, Clone)]
pub struct DomainRegistry {
    medical: CompiledDomain,
    javascript: CompiledDomain,
    rust: CompiledDomain,
    general: CompiledDomain,
}

impl DomainRegistry {
    pub fn new(config: &QualityConfig) -> QualityResult<Self> {
        Ok(Self {
            medical: CompiledDomain::new(QueryDomain::Medical, &config.medical)?,
            javascript: CompiledDomain::new(QueryDomain::JavaScript, &config.javascript)?,
            rust: CompiledDomain::new(QueryDomain::Rust, &config.rust)?,
            general: CompiledDomain::new(QueryDomain::General, &config.general)?,
        })
    }

    pub fn get(&self, domain: QueryDomain) -> &CompiledDomain {
        match domain {
            QueryDomain::Medical => &self.medical,
            QueryDomain::JavaScript => &self.javascript,
            QueryDomain::Rust => &self.rust,
            QueryDomain::General => &self.general,
        }
    }

    /// Map a free-text query to exactly one domain, `General` when nothing matches
    pub fn detect_domain(&self, query: &str) -> QueryDomain {
        let query_lower = query.to_lowercase();

        let detected = QueryDomain::PRIORITY
            .iter()
            .copied()
            .find(|domain| self.get(*domain).mentions_keyword(&query_lower))
            .unwrap_or(QueryDomain::General);

        debug!("Detected domain '{}' for query '{}'", detected, query);
        detected
    }
}
