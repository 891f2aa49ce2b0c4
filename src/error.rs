use thiserror::Error;

use crate::models::Mode;

pub type Result<T> = std::result::Result<T, CodesmithError>;

/// Error taxonomy for the completion pipeline
#[derive(Debug, Error)]
pub enum CodesmithError {
    /// Network failure or non-success HTTP status from the completion endpoint
    #[error("Transport error: {0}")]
    Transport(String),

    /// Response body is not decodable JSON
    #[error("Malformed response body: {0}")]
    MalformedResponse(#[from] serde_json::Error),

    /// Decoded JSON is missing (or has the wrong type for) a required field
    #[error("Invalid response format from AI: missing or invalid field '{field}'")]
    InvalidResponseShape { field: &'static str },

    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Configuration error: {0}")]
    Config(String),

    /// A pipeline failure already wrapped with its user-facing operation label
    #[error("{0}")]
    Operation(String),

    #[error("Internal error: {0}")]
    Internal(String),
}

impl CodesmithError {
    /// Wrap a pipeline failure into the user-facing "Failed to <operation>: <cause>"
    /// message. Already-wrapped errors pass through unchanged.
    pub fn for_operation(self, mode: Mode) -> Self {
        match self {
            CodesmithError::Operation(msg) => CodesmithError::Operation(msg),
            other => {
                CodesmithError::Operation(format!("Failed to {}: {other}", mode.operation_label()))
            }
        }
    }

    /// True for errors produced by shape validation rather than transport or decoding.
    pub fn is_shape_error(&self) -> bool {
        matches!(self, CodesmithError::InvalidResponseShape { .. })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_operation_wrapping() {
        let err = CodesmithError::Transport("HTTP error! Status: 503".to_string());
        let wrapped = err.for_operation(Mode::Generate);
        assert_eq!(
            wrapped.to_string(),
            "Failed to generate code: Transport error: HTTP error! Status: 503"
        );
    }

    #[test]
    fn test_operation_wrapping_is_idempotent() {
        let err = CodesmithError::Operation("Failed to review code: boom".to_string());
        let wrapped = err.for_operation(Mode::Review);
        assert_eq!(wrapped.to_string(), "Failed to review code: boom");
    }

    #[test]
    fn test_shape_error_predicate() {
        let err = CodesmithError::InvalidResponseShape { field: "score" };
        assert!(err.is_shape_error());
        assert!(!CodesmithError::Transport("x".to_string()).is_shape_error());
    }
}
