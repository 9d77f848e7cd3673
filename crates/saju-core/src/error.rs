//! Error types for the coaching library.

use std::path::PathBuf;

use thiserror::Error;

/// Comprehensive error type for all coaching operations.
///
/// Upstream failures ([`CoachError::Http`], [`CoachError::Api`],
/// [`CoachError::EmptyResponse`], [`CoachError::MissingApiKey`]) are produced
/// by the text generation client and are converted into user-visible strings
/// by [`crate::coach::Coach`]; they never reach the plan extractor or the task
/// store.
#[derive(Error, Debug)]
pub enum CoachError {
    /// Transport-level failure talking to the text generation endpoint
    #[error("HTTP error: {source}")]
    Http {
        #[from]
        source: reqwest::Error,
    },
    /// Text generation endpoint answered with a non-success status
    #[error("API error (status {status}): {message}")]
    Api { status: u16, message: String },
    /// Text generation endpoint answered without any text
    #[error("Text generation returned empty content")]
    EmptyResponse,
    /// No API key was configured for the text generation endpoint
    #[error("No API key configured; set GEMINI_API_KEY or pass --api-key")]
    MissingApiKey,
    /// Invalid input validation errors
    #[error("Invalid input for field '{field}': {reason}")]
    InvalidInput { field: String, reason: String },
    /// File system operation errors
    #[error("File system error at path '{path}': {source}")]
    FileSystem {
        path: PathBuf,
        source: std::io::Error,
    },
    /// XDG directory specification errors
    #[error("XDG directory error: {0}")]
    XdgDirectory(String),
    /// Calendar arithmetic or date construction errors
    #[error("Date error: {source}")]
    Date {
        #[from]
        source: jiff::Error,
    },
    /// Serialization/deserialization errors
    #[error("Serialization error: {source}")]
    Serialization {
        #[from]
        source: serde_json::Error,
    },
    /// Configuration errors
    #[error("Configuration error: {message}")]
    Configuration { message: String },
}

/// Builder for creating input validation errors.
pub struct InvalidInputBuilder {
    field: String,
}

impl InvalidInputBuilder {
    /// Create a new invalid input error builder for a field.
    pub fn new(field: impl Into<String>) -> Self {
        Self {
            field: field.into(),
        }
    }

    /// Build the error with the given reason.
    pub fn with_reason(self, reason: impl Into<String>) -> CoachError {
        CoachError::InvalidInput {
            field: self.field,
            reason: reason.into(),
        }
    }
}

impl CoachError {
    /// Creates a builder for input validation errors.
    pub fn invalid_input(field: impl Into<String>) -> InvalidInputBuilder {
        InvalidInputBuilder::new(field)
    }

    /// Creates a configuration error from any displayable message.
    pub fn configuration(message: impl Into<String>) -> Self {
        Self::Configuration {
            message: message.into(),
        }
    }

    /// Whether the error came from the upstream text generation call.
    pub fn is_upstream(&self) -> bool {
        matches!(
            self,
            Self::Http { .. } | Self::Api { .. } | Self::EmptyResponse | Self::MissingApiKey
        )
    }
}

/// Result type alias for coaching operations
pub type Result<T> = std::result::Result<T, CoachError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_invalid_input_builder() {
        let err = CoachError::invalid_input("name").with_reason("must not be empty");
        assert_eq!(
            err.to_string(),
            "Invalid input for field 'name': must not be empty"
        );
        assert!(!err.is_upstream());
    }

    #[test]
    fn test_upstream_classification() {
        assert!(CoachError::MissingApiKey.is_upstream());
        assert!(CoachError::EmptyResponse.is_upstream());
        assert!(
            CoachError::Api {
                status: 429,
                message: "quota".to_string()
            }
            .is_upstream()
        );
        assert!(!CoachError::configuration("bad timeout").is_upstream());
    }
}
