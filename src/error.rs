//! Error type shared by every inference routine
//!
//! Failures here are definitional: the input admits no meaningful answer.
//! Nothing is retried or recovered inside the library; errors propagate to
//! the caller. Questionable-but-computable inputs (small samples, skewed
//! proportions) are NOT errors; they go through `inference::conditions`.

use thiserror::Error;

/// Errors raised by the inference engine
#[derive(Error, Debug)]
pub enum InferenceError {
    /// Unrecognized option value or a parameter outside its domain
    #[error("invalid argument: {0}")]
    InvalidArgument(String),

    /// Requested category or group is absent from the sample
    #[error("key not found: {0}")]
    KeyNotFound(String),

    /// Zero total count, zero standard error or an empty group
    #[error("division by zero: {0}")]
    DivisionByZero(String),

    /// Derived quantity is unusable, e.g. non-positive degrees of freedom
    #[error("invalid state: {0}")]
    InvalidState(String),

    /// Operation exists in the API but has no implementation
    #[error("not implemented: {0}")]
    NotImplemented(&'static str),

    #[error("failed to read configuration: {0}")]
    ConfigIo(#[from] std::io::Error),

    #[error("failed to parse configuration: {0}")]
    ConfigParse(#[from] toml::de::Error),
}

/// Result type for inference operations
pub type Result<T> = std::result::Result<T, InferenceError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_includes_detail() {
        let err = InferenceError::KeyNotFound("category 'maybe'".to_string());
        assert_eq!(err.to_string(), "key not found: category 'maybe'");
    }

    #[test]
    fn test_not_implemented_display() {
        let err = InferenceError::NotImplemented("single_proportion_interval");
        assert!(err.to_string().contains("single_proportion_interval"));
    }

    #[test]
    fn test_io_error_converts() {
        let io = std::io::Error::new(std::io::ErrorKind::NotFound, "missing.toml");
        let err: InferenceError = io.into();
        assert!(matches!(err, InferenceError::ConfigIo(_)));
    }
}
