//! Error types for the filter-search engine and its command-line front end

use thiserror::Error;

/// Everything that can go wrong while wiring or running a search
#[derive(Debug, Error)]
pub enum SearchError {
    #[error("Invalid query pattern: {0}")]
    InvalidPattern(#[from] regex::Error),

    #[error("Duplicate filter name: {0}")]
    DuplicateFilter(String),

    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl SearchError {
    /// Stable code for machine-readable output
    pub fn error_code(&self) -> &'static str {
        match self {
            SearchError::InvalidPattern(_) => "invalid_pattern",
            SearchError::DuplicateFilter(_) => "duplicate_filter",
            SearchError::InvalidInput(_) => "invalid_input",
            SearchError::Io(err) if err.kind() == std::io::ErrorKind::NotFound => "not_found",
            SearchError::Io(_) => "io_error",
            SearchError::Json(_) => "json_error",
        }
    }

    /// Process exit code used by the CLI
    pub fn exit_code(&self) -> i32 {
        match self.error_code() {
            "invalid_input" | "duplicate_filter" | "invalid_pattern" | "json_error" => 1,
            "not_found" => 3,
            _ => 5,
        }
    }
}

pub type Result<T> = std::result::Result<T, SearchError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_search_error_display() {
        let error = SearchError::DuplicateFilter("name".to_string());
        assert_eq!(error.to_string(), "Duplicate filter name: name");

        let error = SearchError::InvalidInput("strategy must be any or every".to_string());
        assert_eq!(
            error.to_string(),
            "Invalid input: strategy must be any or every"
        );
    }

    #[test]
    fn test_error_codes() {
        assert_eq!(
            SearchError::DuplicateFilter("id".into()).error_code(),
            "duplicate_filter"
        );
        let missing = std::io::Error::new(std::io::ErrorKind::NotFound, "gone");
        assert_eq!(SearchError::from(missing).error_code(), "not_found");
        let denied = std::io::Error::new(std::io::ErrorKind::PermissionDenied, "no");
        assert_eq!(SearchError::from(denied).error_code(), "io_error");
    }

    #[test]
    fn test_exit_codes() {
        assert_eq!(SearchError::InvalidInput("x".into()).exit_code(), 1);
        let missing = std::io::Error::new(std::io::ErrorKind::NotFound, "gone");
        assert_eq!(SearchError::from(missing).exit_code(), 3);
        let other = std::io::Error::new(std::io::ErrorKind::Other, "boom");
        assert_eq!(SearchError::from(other).exit_code(), 5);
    }

    #[test]
    fn test_json_error_conversion() {
        let err = serde_json::from_str::<serde_json::Value>("{").unwrap_err();
        let error: SearchError = err.into();
        assert_eq!(error.error_code(), "json_error");
    }
}
