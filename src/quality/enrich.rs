use super::handlers::DomainHandler;
use super::types::{ContentLength, QueryDomain, SearchResult};
use chrono::NaiveDate;
use lazy_static::lazy_static;
use regex::Regex;

const MONTHS: [&str; 12] = [
    "jan", "feb", "mar", "apr", "may", "jun", "jul", "aug", "sep", "oct", "nov", "dec",
];

lazy_static! {
    static ref ISO_DATE: Regex = Regex::new(r"\b(\d{4})-(\d{2})-(\d{2})\b").unwrap();
    static ref WRITTEN_DATE: Regex = Regex::new(
        r"(?i)\b(jan(?:uary)?|feb(?:ruary)?|mar(?:ch)?|apr(?:il)?|may|june?|july?|aug(?:ust)?|sep(?:t(?:ember)?)?|oct(?:ober)?|nov(?:ember)?|dec(?:ember)?)\.?\s+(\d{1,2}),?\s+(\d{4})\b"
    )
    .unwrap();
}

/// Annotate a result using the handler of its query's domain
pub fn enrich_with(
    handler: &dyn DomainHandler,
    domain: QueryDomain,
    result: &SearchResult,
) -> SearchResult {
    let mut enriched = result.clone();

    enriched.source_type = Some(handler.detect_source_type(&result.link));
    enriched.difficulty = Some(handler.estimate_difficulty(result));
    enriched.has_code_examples = if domain.is_code_oriented() {
        Some(handler.detect_code_examples(&result.snippet))
    } else {
        None
    };
    enriched.content_length = Some(ContentLength::from_snippet(&result.snippet));
    enriched.last_updated = extract_last_updated(&result.snippet);

    enriched
}

/// First calendar date mentioned in the text, as `YYYY-MM-DD`
pub fn extract_last_updated(text: &str) -> Option<String> {
    let iso = ISO_DATE.captures_iter(text).find_map(|caps| {
        let start = caps.get(0)?.start();
        let date = NaiveDate::from_ymd_opt(
            caps[1].parse().ok()?,
            caps[2].parse().ok()?,
            caps[3].parse().ok()?,
        )?;
        Some((start, date))
    });

    let written = WRITTEN_DATE.captures_iter(text).find_map(|caps| {
        let start = caps.get(0)?.start();
        let prefix = caps[1].get(..3)?.to_lowercase();
        let month = MONTHS.iter().position(|m| *m == prefix)? as u32 + 1;
        let date =
            NaiveDate::from_ymd_opt(caps[3].parse().ok()?, month, caps[2].parse().ok()?)?;
        Some((start, date))
    });

    [iso, written]
        .into_iter()
        .flatten()
        .min_by_key(|(start, _)| *start)
        .map(|(_, date)| date.format("%Y-%m-%d").to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::quality::config::QualityConfig;
    use crate::quality::handlers::HandlerSet;
    use crate::quality::types::{Difficulty, SourceType};

    #[test]
    fn test_extract_iso_date() {
        assert_eq!(
            extract_last_updated("Updated 2023-07-04 with new data."),
            Some("2023-07-04".to_string())
        );
    }

    #[test]
    fn test_extract_written_dates() {
        assert_eq!(
            extract_last_updated("Posted Mar 5, 2024 by the team"),
            Some("2024-03-05".to_string())
        );
        assert_eq!(
            extract_last_updated("Last reviewed September 12, 2022."),
            Some("2022-09-12".to_string())
        );
    }

    #[test]
    fn test_earliest_date_wins() {
        assert_eq!(
            extract_last_updated("Jan 2, 2020 original, revised 2021-06-30"),
            Some("2020-01-02".to_string())
        );
    }

    #[test]
    fn test_invalid_dates_are_ignored() {
        assert_eq!(extract_last_updated("Build 2023-13-45 released"), None);
        assert_eq!(extract_last_updated("No dates at all"), None);
    }

    #[test]
    fn test_enrich_code_flag_only_for_code_domains() {
        let handlers = HandlerSet::new(&QualityConfig::default());
        let result = SearchResult::new(
            "Ownership in Rust",
            "https://doc.rust-lang.org/book/ch04-01-what-is-ownership.html",
            "Each value has an owner: `let s = String::from(\"hi\");`",
        );

        let rust = enrich_with(handlers.for_domain(QueryDomain::Rust), QueryDomain::Rust, &result);
        assert_eq!(rust.has_code_examples, Some(true));
        assert_eq!(rust.source_type, Some(SourceType::Documentation));
        assert_eq!(rust.content_length, Some(ContentLength::Short));

        let general = enrich_with(
            handlers.for_domain(QueryDomain::General),
            QueryDomain::General,
            &result,
        );
        assert_eq!(general.has_code_examples, None);
        assert_eq!(general.difficulty, Some(Difficulty::Intermediate));
    }
}
