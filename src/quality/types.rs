use serde::{Deserialize, Serialize};
use std::fmt;

/// Subject-matter category that decides which heuristics apply to a query
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum QueryDomain {
    Medical,
    JavaScript,
    Rust,
    General,
}

impl QueryDomain {
    /// Detection order; the first domain whose keywords match wins.
    pub const PRIORITY: [QueryDomain; 3] = [
        QueryDomain::Medical,
        QueryDomain::JavaScript,
        QueryDomain::Rust,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            QueryDomain::Medical => "medical",
            QueryDomain::JavaScript => "javascript",
            QueryDomain::Rust => "rust",
            QueryDomain::General => "general",
        }
    }

    /// Domains whose results are expected to carry code
    pub fn is_code_oriented(&self) -> bool {
        matches!(self, QueryDomain::JavaScript | QueryDomain::Rust)
    }
}

impl fmt::Display for QueryDomain {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SourceType {
    Documentation,
    Tutorial,
    #[serde(rename = "Q&A")]
    QA,
    #[serde(rename = "Code Repository")]
    CodeRepository,
    Blog,
    #[serde(rename = "Medical Authority")]
    MedicalAuthority,
    News,
}

impl SourceType {
    pub fn label(&self) -> &'static str {
        match self {
            SourceType::Documentation => "Documentation",
            SourceType::Tutorial => "Tutorial",
            SourceType::QA => "Q&A",
            SourceType::CodeRepository => "Code Repository",
            SourceType::Blog => "Blog",
            SourceType::MedicalAuthority => "Medical Authority",
            SourceType::News => "News",
        }
    }
}

impl fmt::Display for SourceType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Difficulty {
    Beginner,
    Intermediate,
    Advanced,
}

impl fmt::Display for Difficulty {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Difficulty::Beginner => "Beginner",
            Difficulty::Intermediate => "Intermediate",
            Difficulty::Advanced => "Advanced",
        };
        f.write_str(label)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ContentLength {
    Short,
    Medium,
    Long,
}

impl ContentLength {
    /// Bucket a snippet by character count: > 200 is long, > 100 is medium.
    pub fn from_snippet(snippet: &str) -> Self {
        let len = snippet.chars().count();
        if len > 200 {
            ContentLength::Long
        } else if len > 100 {
            ContentLength::Medium
        } else {
            ContentLength::Short
        }
    }
}

impl fmt::Display for ContentLength {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            ContentLength::Short => "Short",
            ContentLength::Medium => "Medium",
            ContentLength::Long => "Long",
        };
        f.write_str(label)
    }
}

/// A search result as produced upstream, plus the annotations added by
/// scoring and enrichment
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SearchResult {
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub link: String,
    #[serde(default)]
    pub snippet: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub score: Option<f64>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub issues: Vec<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub source_type: Option<SourceType>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub has_code_examples: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub difficulty: Option<Difficulty>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub content_length: Option<ContentLength>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub last_updated: Option<String>,
}

impl SearchResult {
    pub fn new(
        title: impl Into<String>,
        link: impl Into<String>,
        snippet: impl Into<String>,
    ) -> Self {
        Self {
            title: title.into(),
            link: link.into(),
            snippet: snippet.into(),
            ..Self::default()
        }
    }

    /// Score, treating an unscored result as zero
    pub fn score_or_zero(&self) -> f64 {
        self.score.unwrap_or(0.0)
    }

    pub fn has_required_fields(&self) -> bool {
        !self.title.trim().is_empty()
            && !self.link.trim().is_empty()
            && !self.snippet.trim().is_empty()
    }

    /// Title and snippet joined and case-folded, the text most heuristics scan
    pub fn combined_text(&self) -> String {
        format!("{} {}", self.title, self.snippet).to_lowercase()
    }
}
