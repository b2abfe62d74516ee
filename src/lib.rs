pub mod quality;

pub use quality::{
    parse_results, DomainInsights, DomainStats, QualityConfig, QualityConfigOverride,
    QualityError, QualityResult, QueryDomain, ResultAnalyzer, ResultStats, SearchResult,
};
