//! Result convention shared by every layer.
//!
//! Expected failures travel as the `Err` branch of a [`DomainResult`]; the
//! variant is the only discriminant, so a value and an error can never be
//! populated together. Layers pass failures upward unchanged.

use super::DomainError;

/// Outcome of any repository or use-case operation.
///
/// # Examples
/// ```
/// use tasks::domain::{DomainError, DomainResult, failure, success};
///
/// let ok: DomainResult<u8> = success(3);
/// assert_eq!(ok, Ok(3));
///
/// let err: DomainResult<u8> = failure(DomainError::unauthorized());
/// assert!(err.is_err());
/// ```
pub type DomainResult<T> = Result<T, DomainError>;

/// Wrap `value` in a successful outcome.
#[must_use = "an outcome that is never inspected hides its value"]
pub const fn success<T>(value: T) -> DomainResult<T> {
    Ok(value)
}

/// Wrap `error` in a failed outcome.
#[must_use = "an outcome that is never inspected hides its failure"]
pub const fn failure<T>(error: DomainError) -> DomainResult<T> {
    Err(error)
}

#[cfg(test)]
mod tests {
    //! Constructor behaviour for the result convention.

    use rstest::rstest;

    use super::*;
    use crate::domain::ErrorCode;

    #[rstest]
    #[case(0_i64)]
    #[case(-17_i64)]
    #[case(i64::MAX)]
    fn success_wraps_value_unchanged(#[case] value: i64) {
        let outcome = success(value);
        assert!(outcome.is_ok());
        assert_eq!(outcome.ok(), Some(value));
    }

    #[rstest]
    fn success_accepts_absent_values() {
        let outcome: DomainResult<Option<String>> = success(None);
        assert_eq!(outcome, Ok(None));
    }

    #[rstest]
    #[case(DomainError::not_found("Task", "42"))]
    #[case(DomainError::validation("Title is required"))]
    #[case(DomainError::network("Network request failed"))]
    #[case(DomainError::unauthorized())]
    fn failure_wraps_error_unchanged(#[case] error: DomainError) {
        let outcome: DomainResult<()> = failure(error.clone());
        assert!(outcome.is_err());
        assert_eq!(outcome.err(), Some(error));
    }

    #[rstest]
    fn failure_exposes_code_without_value() {
        let outcome: DomainResult<u32> = failure(DomainError::validation("bad"));
        match outcome {
            Ok(value) => panic!("unexpected value {value}"),
            Err(error) => assert_eq!(error.code(), ErrorCode::ValidationError),
        }
    }
}
