//! Error types for sitebrief.
//!
//! A single error enum covers configuration, I/O, upstream AI failures,
//! malformed AI responses, prompt rendering, and serialization.

use thiserror::Error;

/// Unified error type for sitebrief.
///
/// All fallible functions return `Result<T, AppError>`.
/// We never panic; errors must be represented and propagated.
#[derive(Error, Debug)]
pub enum AppError {
    /// Configuration-related errors
    #[error("Configuration error: {0}")]
    Config(String),

    /// I/O and filesystem errors
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// The AI service was unreachable or answered with a non-success status
    #[error("LLM error: {0}")]
    Llm(String),

    /// The AI service answered, but the payload did not have the expected shape
    #[error("Malformed response: {0}")]
    MalformedResponse(String),

    /// Prompt and form errors
    #[error("Prompt error: {0}")]
    Prompt(String),

    /// Serialization/deserialization errors
    #[error("Serialization error: {0}")]
    Serialization(String),

    /// Generic errors
    #[error("{0}")]
    Other(String),
}

impl AppError {
    /// Whether this error came from the AI service being unavailable.
    pub fn is_upstream(&self) -> bool {
        matches!(self, AppError::Llm(_))
    }
}

impl From<serde_json::Error> for AppError {
    fn from(err: serde_json::Error) -> Self {
        AppError::Serialization(err.to_string())
    }
}

impl From<serde_yaml::Error> for AppError {
    fn from(err: serde_yaml::Error) -> Self {
        AppError::Serialization(err.to_string())
    }
}

/// Convenience type alias for Results with AppError.
pub type AppResult<T> = Result<T, AppError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_upstream_and_malformed_are_distinct() {
        let upstream = AppError::Llm("connection refused".to_string());
        let malformed = AppError::MalformedResponse("expected object".to_string());

        assert!(upstream.is_upstream());
        assert!(!malformed.is_upstream());
        assert_eq!(upstream.to_string(), "LLM error: connection refused");
        assert_eq!(
            malformed.to_string(),
            "Malformed response: expected object"
        );
    }

    #[test]
    fn test_from_serde_json() {
        let err = serde_json::from_str::<serde_json::Value>("{not json").unwrap_err();
        let app: AppError = err.into();
        assert!(matches!(app, AppError::Serialization(_)));
    }
}
