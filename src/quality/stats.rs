use super::handlers::{cites_evidence, mentions_framework};
use super::scorer::QualityScorer;
use super::types::{QueryDomain, SearchResult, SourceType};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Score at or above which a result counts as high quality
pub const HIGH_QUALITY_SCORE: f64 = 0.7;

const UNKNOWN_SOURCE: &str = "Unknown";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ResultStats {
    pub total: usize,
    pub average_score: f64,
    pub high_quality: usize,
    pub source_types: BTreeMap<String, usize>,
    pub issues: BTreeMap<String, usize>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub domain: Option<DomainStats>,
}

/// Domain-specific counters, present when stats are computed for a query
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "domain", rename_all = "lowercase")]
pub enum DomainStats {
    #[serde(rename_all = "camelCase")]
    Medical {
        authority_sources: usize,
        evidence_based: usize,
    },
    #[serde(rename_all = "camelCase")]
    JavaScript {
        framework_mentions: usize,
        with_code_examples: usize,
        official_docs: usize,
    },
    #[serde(rename_all = "camelCase")]
    Rust {
        comparative_content: usize,
        official_sources: usize,
        with_code_examples: usize,
    },
    #[serde(rename_all = "camelCase")]
    General { trusted_sources: usize },
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DomainInsights {
    pub domain: QueryDomain,
    pub insights: Vec<String>,
    pub recommendations: Vec<String>,
}

pub fn compute_stats(
    scorer: &QualityScorer,
    results: &[SearchResult],
    query: Option<&str>,
) -> ResultStats {
    let total = results.len();
    let average_score = if total == 0 {
        0.0
    } else {
        results.iter().map(SearchResult::score_or_zero).sum::<f64>() / total as f64
    };
    let high_quality = count_where(results, |r| r.score_or_zero() >= HIGH_QUALITY_SCORE);

    let mut source_types = BTreeMap::new();
    let mut issues = BTreeMap::new();
    for result in results {
        let label = result
            .source_type
            .map(|source| source.label())
            .unwrap_or(UNKNOWN_SOURCE);
        *source_types.entry(label.to_string()).or_insert(0) += 1;

        for issue in &result.issues {
            *issues.entry(issue.clone()).or_insert(0) += 1;
        }
    }

    let domain = query.map(|query| {
        let domain = scorer.detect_domain(query);
        domain_stats(scorer, domain, results)
    });

    ResultStats {
        total,
        average_score,
        high_quality,
        source_types,
        issues,
        domain,
    }
}

fn count_where(results: &[SearchResult], predicate: impl Fn(&SearchResult) -> bool) -> usize {
    results.iter().filter(|&result| predicate(result)).count()
}

fn domain_stats(
    scorer: &QualityScorer,
    domain: QueryDomain,
    results: &[SearchResult],
) -> DomainStats {
    let handler = scorer.handlers().for_domain(domain);
    let compiled = scorer.registry().get(domain);
    let source_of = |result: &SearchResult| {
        result
            .source_type
            .unwrap_or_else(|| handler.detect_source_type(&result.link))
    };
    let has_code = |result: &SearchResult| {
        result
            .has_code_examples
            .unwrap_or_else(|| handler.detect_code_examples(&result.snippet))
    };

    match domain {
        QueryDomain::Medical => DomainStats::Medical {
            authority_sources: count_where(results, |r| {
                source_of(r) == SourceType::MedicalAuthority
            }),
            evidence_based: count_where(results, cites_evidence),
        },
        QueryDomain::JavaScript => DomainStats::JavaScript {
            framework_mentions: count_where(results, mentions_framework),
            with_code_examples: count_where(results, &has_code),
            official_docs: count_where(results, |r| compiled.is_trusted(&r.link)),
        },
        QueryDomain::Rust => {
            let comparative_content = scorer
                .handlers()
                .systems(domain)
                .map(|systems| count_where(results, |r| systems.is_comparative_content(r)))
                .unwrap_or(0);
            DomainStats::Rust {
                comparative_content,
                official_sources: count_where(results, |r| compiled.is_trusted(&r.link)),
                with_code_examples: count_where(results, &has_code),
            }
        }
        QueryDomain::General => DomainStats::General {
            trusted_sources: count_where(results, |r| scorer.is_globally_trusted(&r.link)),
        },
    }
}

/// Human-readable coverage summary with suggestions for the gaps
pub fn get_insights(
    scorer: &QualityScorer,
    results: &[SearchResult],
    query: &str,
) -> DomainInsights {
    let domain = scorer.detect_domain(query);
    let stats = domain_stats(scorer, domain, results);
    let high_quality = count_where(results, |r| r.score_or_zero() >= HIGH_QUALITY_SCORE);

    let mut insights = vec![format!(
        "{} of {} results are high quality",
        high_quality,
        results.len()
    )];
    let mut recommendations = Vec::new();

    if results.is_empty() {
        recommendations
            .push("No results passed filtering; broaden the query or lower the minimum score".to_string());
    }

    match stats {
        DomainStats::Medical {
            authority_sources,
            evidence_based,
        } => {
            insights.push(format!(
                "{} results from official medical sources",
                authority_sources
            ));
            insights.push(format!("{} results cite clinical evidence", evidence_based));
            if authority_sources == 0 {
                recommendations.push(
                    "Add site:cdc.gov, site:nih.gov or site:who.int to reach official health guidance"
                        .to_string(),
                );
            }
            if evidence_based == 0 {
                recommendations.push(
                    "Include terms like \"clinical trial\" or \"systematic review\" to surface evidence-based sources"
                        .to_string(),
                );
            }
        }
        DomainStats::JavaScript {
            framework_mentions,
            with_code_examples,
            official_docs,
        } => {
            insights.push(format!("{} results from official documentation", official_docs));
            insights.push(format!("{} results include code examples", with_code_examples));
            insights.push(format!("{} results mention a framework", framework_mentions));
            if official_docs == 0 {
                recommendations.push(
                    "Check MDN or the framework's official documentation".to_string(),
                );
            }
            if with_code_examples == 0 {
                recommendations
                    .push("Add \"example\" or \"code\" to the query to find runnable snippets".to_string());
            }
        }
        DomainStats::Rust {
            comparative_content,
            official_sources,
            with_code_examples,
        } => {
            insights.push(format!("{} results from official Rust sources", official_sources));
            insights.push(format!("{} results include code examples", with_code_examples));
            insights.push(format!(
                "{} results compare Rust with other languages",
                comparative_content
            ));
            if official_sources == 0 {
                recommendations
                    .push("Check docs.rs or doc.rust-lang.org for authoritative answers".to_string());
            }
            if with_code_examples == 0 {
                recommendations
                    .push("Add \"example\" to the query to find results with code".to_string());
            }
        }
        DomainStats::General { trusted_sources } => {
            insights.push(format!("{} results from trusted sources", trusted_sources));
            if trusted_sources == 0 {
                recommendations.push(
                    "Refine the query or consult a reference site such as Wikipedia".to_string(),
                );
            }
        }
    }

    DomainInsights {
        domain,
        insights,
        recommendations,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::quality::config::QualityConfig;

    fn scorer() -> QualityScorer {
        QualityScorer::new(QualityConfig::default()).unwrap()
    }

    fn scored(title: &str, link: &str, snippet: &str, score: f64) -> SearchResult {
        let mut result = SearchResult::new(title, link, snippet);
        result.score = Some(score);
        result
    }

    #[test]
    fn test_empty_stats() {
        let stats = compute_stats(&scorer(), &[], None);
        assert_eq!(stats.total, 0);
        assert_eq!(stats.average_score, 0.0);
        assert!(stats.domain.is_none());
    }

    #[test]
    fn test_histograms_and_averages() {
        let mut first = scored("One", "https://a.example", "a", 0.9);
        first.source_type = Some(SourceType::Blog);
        first.issues = vec!["Title too short".to_string()];
        let second = scored("Two", "https://b.example", "b", 0.3);
        let unscored = SearchResult::new("Three", "https://c.example", "c");

        let stats = compute_stats(&scorer(), &[first, second, unscored], None);
        assert_eq!(stats.total, 3);
        assert!((stats.average_score - 0.4).abs() < 1e-9);
        assert_eq!(stats.high_quality, 1);
        assert_eq!(stats.source_types.get("Blog"), Some(&1));
        assert_eq!(stats.source_types.get("Unknown"), Some(&2));
        assert_eq!(stats.issues.get("Title too short"), Some(&1));
    }

    #[test]
    fn test_medical_domain_stats() {
        let results = vec![
            scored(
                "Vaccine guidance",
                "https://www.cdc.gov/vaccines/",
                "Randomized clinical trials show protection.",
                0.9,
            ),
            scored("Home remedies", "https://example.com", "Try this tea.", 0.4),
        ];
        let stats = compute_stats(&scorer(), &results, Some("covid vaccine efficacy"));
        assert_eq!(
            stats.domain,
            Some(DomainStats::Medical {
                authority_sources: 1,
                evidence_based: 1
            })
        );
    }

    #[test]
    fn test_rust_domain_stats() {
        let results = vec![scored(
            "Rust vs Go for services",
            "https://blog.example.com/rust-vs-go",
            "Comparing `fn main()` in both.",
            0.8,
        )];
        let stats = compute_stats(&scorer(), &results, Some("rust error handling"));
        assert_eq!(
            stats.domain,
            Some(DomainStats::Rust {
                comparative_content: 1,
                official_sources: 0,
                with_code_examples: 1
            })
        );
    }

    #[test]
    fn test_domain_stats_serialization() {
        let json = serde_json::to_value(DomainStats::General { trusted_sources: 2 }).unwrap();
        assert_eq!(
            json,
            serde_json::json!({ "domain": "general", "trustedSources": 2 })
        );
    }

    #[test]
    fn test_insights_flag_missing_official_sources() {
        let results = vec![scored("Home remedies", "https://example.com", "Try this tea.", 0.4)];
        let insights = get_insights(&scorer(), &results, "flu symptoms");
        assert_eq!(insights.domain, QueryDomain::Medical);
        assert!(insights
            .insights
            .contains(&"0 results from official medical sources".to_string()));
        assert_eq!(insights.recommendations.len(), 2);
    }

    #[test]
    fn test_insights_for_empty_results() {
        let insights = get_insights(&scorer(), &[], "sourdough bread");
        assert_eq!(insights.domain, QueryDomain::General);
        assert_eq!(insights.insights[0], "0 of 0 results are high quality");
        assert!(insights.recommendations[0].starts_with("No results passed filtering"));
    }
}
