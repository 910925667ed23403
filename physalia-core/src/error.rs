//! Structured error types for the Physalia ecosystem.

use thiserror::Error;

/// Unified error type for all Physalia operations.
#[derive(Debug, Error)]
pub enum PhysaliaError {
    /// Invalid input (bad arguments, out-of-range values)
    #[error("invalid input: {0}")]
    InvalidInput(String),

    /// A scoring matrix or profile is malformed (wrong dimensions,
    /// sign-convention violation, missing symbol coverage)
    #[error("invalid scoring matrix: {0}")]
    InvalidMatrix(String),

    /// An input sequence has zero length
    #[error("empty input: {0}")]
    EmptyInput(String),

    /// A dynamic-programming matrix would exceed the configured memory ceiling.
    /// Recoverable: retry with a banded alignment or a larger workspace limit.
    #[error("resource exhausted: {requested} DP cells requested, limit is {limit}")]
    ResourceExhausted { requested: usize, limit: usize },

    /// Local alignment found no positive-scoring region. A normal outcome
    /// for unrelated sequences, not a defect; callers must handle it.
    #[error("no positive-scoring local alignment")]
    NoAlignment,

    /// Internal invariant violated during traceback. Always fatal: the
    /// computed result cannot be trusted and must not be used.
    #[error("inconsistent DP matrix: {0}")]
    InconsistentMatrix(String),
}

/// Convenience alias used throughout the Physalia ecosystem.
pub type Result<T> = std::result::Result<T, PhysaliaError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_messages() {
        let err = PhysaliaError::ResourceExhausted {
            requested: 1_000_000,
            limit: 1_000,
        };
        assert_eq!(
            err.to_string(),
            "resource exhausted: 1000000 DP cells requested, limit is 1000"
        );

        let err = PhysaliaError::NoAlignment;
        assert_eq!(err.to_string(), "no positive-scoring local alignment");

        let err = PhysaliaError::EmptyInput("query".into());
        assert_eq!(err.to_string(), "empty input: query");
    }
}
