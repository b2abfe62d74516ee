use super::handlers::DomainHandler;
use super::stats::ResultStats;
use super::types::SearchResult;
use colored::Colorize;
use tabled::{settings::Style, Table, Tabled};

#[derive(Tabled)]
struct StatRow {
    #[tabled(rename = "Category")]
    category: String,
    #[tabled(rename = "Value")]
    value: String,
    #[tabled(rename = "Count")]
    count: usize,
}

fn score_label(score: f64) -> String {
    let label = format!("{:.2}", score);
    if score >= 0.7 {
        label.green().to_string()
    } else if score >= 0.4 {
        label.yellow().to_string()
    } else {
        label.red().to_string()
    }
}

/// Numbered, colored listing of scored results with their annotations
pub fn format_scored_results(
    results: &[SearchResult],
    query: &str,
    handler: &dyn DomainHandler,
) -> String {
    if results.is_empty() {
        return format!("No results passed quality filtering for '{}'", query);
    }

    let mut output = Vec::new();
    output.push(format!(
        "{} '{}' ({} results, {} domain):\n",
        "Quality-ranked results for".cyan().bold(),
        query,
        results.len(),
        handler.domain()
    ));

    for (index, result) in results.iter().enumerate() {
        let mut lines = Vec::new();

        lines.push(format!("{}. {}", index + 1, result.title.bold()));
        lines.push(format!("   URL: {}", result.link));
        lines.push(format!("   Score: {}", score_label(result.score_or_zero())));

        let mut metadata = Vec::new();
        if let Some(source) = result.source_type {
            metadata.push(format!("Source: {}", source));
        }
        if let Some(difficulty) = result.difficulty {
            metadata.push(format!("Difficulty: {}", difficulty));
        }
        if let Some(length) = result.content_length {
            metadata.push(format!("Length: {}", length));
        }
        if result.has_code_examples == Some(true) {
            metadata.push("Has code".to_string());
        }
        if let Some(updated) = &result.last_updated {
            metadata.push(format!("Updated: {}", updated));
        }
        if !metadata.is_empty() {
            lines.push(format!("   {}", metadata.join(" | ")));
        }

        if !result.issues.is_empty() {
            lines.push(format!(
                "   {} {}",
                "Issues:".yellow(),
                result.issues.join(", ")
            ));
        }

        let snippet = handler.format_snippet(&result.snippet);
        for (line_index, line) in snippet.lines().enumerate() {
            let prefix = if line_index == 0 { "Snippet: " } else { "         " };
            lines.push(format!("   {}{}", prefix, line));
        }

        output.push(lines.join("\n"));
    }

    output.join("\n\n")
}

/// Source-type and issue histograms as a table, preceded by a summary line
pub fn format_stats_table(stats: &ResultStats) -> String {
    let mut rows: Vec<StatRow> = stats
        .source_types
        .iter()
        .map(|(source, count)| StatRow {
            category: "Source".to_string(),
            value: source.clone(),
            count: *count,
        })
        .collect();
    rows.extend(stats.issues.iter().map(|(issue, count)| StatRow {
        category: "Issue".to_string(),
        value: issue.clone(),
        count: *count,
    }));

    let summary = format!(
        "{} {} results, average score {:.2}, {} high quality",
        "Result stats:".cyan().bold(),
        stats.total,
        stats.average_score,
        stats.high_quality
    );

    if rows.is_empty() {
        return summary;
    }

    let mut table = Table::new(rows);
    table.with(Style::modern());
    format!("{}\n{}", summary, table)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::quality::config::QualityConfig;
    use crate::quality::handlers::HandlerSet;
    use crate::quality::types::{QueryDomain, SourceType};
    use std::collections::BTreeMap;

    #[test]
    fn test_empty_results_message() {
        let handlers = HandlerSet::new(&QualityConfig::default());
        let output = format_scored_results(&[], "anything", handlers.for_domain(QueryDomain::General));
        assert_eq!(output, "No results passed quality filtering for 'anything'");
    }

    #[test]
    fn test_results_listing_includes_annotations() {
        colored::control::set_override(false);
        let handlers = HandlerSet::new(&QualityConfig::default());
        let mut result = SearchResult::new(
            "Closures in JavaScript",
            "https://developer.mozilla.org/en-US/docs/Web/JavaScript/Closures",
            "const add = (a) => (b) => a + b; return add(1)(2);",
        );
        result.score = Some(0.85);
        result.source_type = Some(SourceType::Documentation);
        result.issues = vec!["Title too short".to_string()];

        let output = format_scored_results(
            &[result],
            "javascript closures",
            handlers.for_domain(QueryDomain::JavaScript),
        );
        assert!(output.contains("1. Closures in JavaScript"));
        assert!(output.contains("Score: 0.85"));
        assert!(output.contains("Source: Documentation"));
        assert!(output.contains("Issues: Title too short"));
        assert!(output.contains("Snippet: const add = (a) => (b) => a + b;\n"));
        assert!(output.contains("         return add(1)(2);"));
    }

    #[test]
    fn test_stats_table_lists_histograms() {
        colored::control::set_override(false);
        let mut source_types = BTreeMap::new();
        source_types.insert("Blog".to_string(), 2);
        let mut issues = BTreeMap::new();
        issues.insert("Snippet too short".to_string(), 1);
        let stats = ResultStats {
            total: 2,
            average_score: 0.55,
            high_quality: 1,
            source_types,
            issues,
            domain: None,
        };

        let output = format_stats_table(&stats);
        assert!(output.starts_with("Result stats: 2 results, average score 0.55, 1 high quality"));
        assert!(output.contains("Blog"));
        assert!(output.contains("Snippet too short"));
    }
}
