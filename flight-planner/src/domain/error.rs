//! Domain error types.
//!
//! These errors represent validation failures in the domain layer. They are
//! distinct from file and I/O errors.

/// Domain-level errors for validation and data consistency.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum DomainError {
    /// Flight indices are 32-bit; larger tables cannot be addressed
    #[error("flight table too large: {0} records (max 4294967295)")]
    TooManyFlights(usize),

    /// A flight lands before it takes off
    #[error("flight lands before it takes off (record {0})")]
    NegativeDuration(usize),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn error_display() {
        let err = DomainError::TooManyFlights(5_000_000_000);
        assert_eq!(
            err.to_string(),
            "flight table too large: 5000000000 records (max 4294967295)"
        );

        let err = DomainError::NegativeDuration(3);
        assert_eq!(err.to_string(), "flight lands before it takes off (record 3)");
    }
}
