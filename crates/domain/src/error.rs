//! Unified error type for the domain layer
//!
//! Every variant carries a stable numeric code so that content tooling and
//! save files written against older builds keep reporting the same error
//! identifiers. Codes in the 100 range belong to the domain; the engine
//! crate owns the 200 range.

use thiserror::Error;

/// Unified error type for domain operations
#[derive(Debug, Error, Clone, PartialEq)]
pub enum DomainError {
    /// Validation failed (e.g., invalid field values)
    #[error("Validation failed: {0}")]
    Validation(String),

    /// Parse error (for value objects)
    #[error("Parse error: {0}")]
    Parse(String),

    /// Business rule violation
    #[error("Constraint violation: {0}")]
    Constraint(String),

    /// A graph node id was registered twice
    #[error("Duplicate node id: {0}")]
    DuplicateNode(String),

    /// An edge referenced a node that does not exist
    #[error("Unknown node id: {0}")]
    MissingNode(String),
}

impl DomainError {
    /// Creates a validation error for business rule violations.
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    /// Creates a parse error for string-to-type conversion failures.
    pub fn parse(msg: impl Into<String>) -> Self {
        Self::Parse(msg.into())
    }

    /// Create a constraint violation error
    pub fn constraint(msg: impl Into<String>) -> Self {
        Self::Constraint(msg.into())
    }

    /// Stable numeric code for this error, kept for content-tool compatibility.
    pub fn code(&self) -> u16 {
        match self {
            Self::Validation(_) => 100,
            Self::Parse(_) => 101,
            Self::Constraint(_) => 102,
            Self::DuplicateNode(_) => 110,
            Self::MissingNode(_) => 111,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validation_error() {
        let err = DomainError::validation("value out of range");
        assert!(matches!(err, DomainError::Validation(_)));
        assert_eq!(err.to_string(), "Validation failed: value out of range");
        assert_eq!(err.code(), 100);
    }

    #[test]
    fn test_graph_error_codes_are_stable() {
        assert_eq!(DomainError::DuplicateNode("intro".into()).code(), 110);
        assert_eq!(DomainError::MissingNode("outro".into()).code(), 111);
    }

    #[test]
    fn test_constraint_error() {
        let err = DomainError::constraint("compound attributes cannot be mutated");
        assert_eq!(
            err.to_string(),
            "Constraint violation: compound attributes cannot be mutated"
        );
        assert_eq!(err.code(), 102);
    }
}
