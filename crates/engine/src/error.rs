//! Unified error type for the engine layer
//!
//! Codes in the 200 range belong to the engine; domain errors pass through
//! with their own 100-range codes.

use fableforge_domain::DomainError;
use thiserror::Error;

/// Unified error type for rule resolution and combat
#[derive(Debug, Error, Clone, PartialEq)]
pub enum EngineError {
    /// No resolver in the chain accepts the path
    #[error("No resolver supports path: {0}")]
    UnsupportedResolver(String),

    /// A rendered rule contains characters outside the arithmetic whitelist
    #[error("Not a math expression: {0}")]
    NotMathExpression(String),

    /// The arithmetic parser rejected a rendered rule
    #[error("Evaluation failed: {0}")]
    EvaluationFailed(String),

    /// A rule or modifier targeted the enemy side of a one-sided interaction
    #[error("Missing entity for path: {0}")]
    MissingEntity(String),

    /// The element has no such mutable property
    #[error("Unsupported property: {0}")]
    UnsupportedProperty(String),

    /// A rule referenced a stat the character does not have
    #[error("Missing stat: {0}")]
    MissingStat(String),

    /// Compound attribute expansion exceeded the nesting limit
    #[error("Recursion limit exceeded while expanding: {0}")]
    RecursionLimit(String),

    /// Error from the domain layer
    #[error(transparent)]
    Domain(#[from] DomainError),
}

impl EngineError {
    /// Stable numeric code for this error, kept for content-tool compatibility.
    pub fn code(&self) -> u16 {
        match self {
            Self::UnsupportedResolver(_) => 201,
            Self::NotMathExpression(_) => 202,
            Self::EvaluationFailed(_) => 203,
            Self::MissingEntity(_) => 204,
            Self::UnsupportedProperty(_) => 205,
            Self::MissingStat(_) => 206,
            Self::RecursionLimit(_) => 207,
            Self::Domain(inner) => inner.code(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_engine_error_codes_are_stable() {
        assert_eq!(EngineError::UnsupportedResolver("x.y".into()).code(), 201);
        assert_eq!(EngineError::NotMathExpression("y(1)".into()).code(), 202);
        assert_eq!(EngineError::RecursionLimit("a.b".into()).code(), 207);
    }

    #[test]
    fn test_domain_errors_keep_their_code() {
        let err = EngineError::from(DomainError::constraint("no"));
        assert_eq!(err.code(), 102);
    }
}
