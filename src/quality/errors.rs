use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum QualityError {
    #[error("Invalid pattern in {field}: {pattern} - {message}")]
    InvalidPattern {
        field: String,
        pattern: String,
        message: String,
    },

    #[error("Invalid quality configuration: {field} - {message}")]
    InvalidConfig { field: String, message: String },
}

impl QualityError {
    pub fn invalid_pattern(field: &str, pattern: &str, source: regex::Error) -> Self {
        Self::InvalidPattern {
            field: field.to_string(),
            pattern: pattern.to_string(),
            message: source.to_string(),
        }
    }

    pub fn invalid_config(field: &str, message: impl Into<String>) -> Self {
        Self::InvalidConfig {
            field: field.to_string(),
            message: message.into(),
        }
    }

    /// Name of the configuration field that failed validation
    pub fn field(&self) -> &str {
        match self {
            QualityError::InvalidPattern { field, .. } => field,
            QualityError::InvalidConfig { field, .. } => field,
        }
    }

    pub fn to_user_message(&self) -> String {
        match self {
            QualityError::InvalidPattern { field, pattern, .. } => {
                format!("Pattern '{}' in '{}' is not a valid regular expression", pattern, field)
            }
            QualityError::InvalidConfig { field, message } => {
                format!("Configuration value '{}' is invalid: {}", field, message)
            }
        }
    }
}

pub type QualityResult<T> = Result<T, QualityError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_invalid_pattern_message() {
        let source = regex::Regex::new("(unclosed").unwrap_err();
        let error = QualityError::invalid_pattern("url_patterns.trusted", "(unclosed", source);
        assert_eq!(error.field(), "url_patterns.trusted");
        assert!(error.to_string().starts_with("Invalid pattern in url_patterns.trusted: (unclosed"));
        assert!(error.to_user_message().contains("'(unclosed'"));
    }

    #[test]
    fn test_invalid_config_message() {
        let error = QualityError::invalid_config("max_snippet_length", "must be greater than zero");
        assert_eq!(
            error.to_user_message(),
            "Configuration value 'max_snippet_length' is invalid: must be greater than zero"
        );
    }
}
