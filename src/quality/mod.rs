pub mod analyzer;
pub mod config;
pub mod domain;
pub mod enrich;
pub mod errors;
pub mod filter;
pub mod handlers;
pub mod report;
pub mod scorer;
pub mod stats;
pub mod types;

pub use analyzer::{parse_results, ResultAnalyzer};
pub use config::{
    DomainConfig, DomainConfigOverride, QualityConfig, QualityConfigOverride, UrlPatterns,
    UrlPatternsOverride, DEFAULT_MIN_SCORE,
};
pub use errors::{QualityError, QualityResult};
pub use handlers::{DomainHandler, HandlerSet, SystemsLanguageExt};
pub use report::{format_scored_results, format_stats_table};
pub use stats::{DomainInsights, DomainStats, ResultStats};
pub use types::{ContentLength, Difficulty, QueryDomain, SearchResult, SourceType};
