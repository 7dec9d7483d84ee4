//! Error types for the signal engine.

use thiserror::Error;

/// Errors raised by the signal engine.
///
/// Missing data is never an error here: empty inputs degrade to documented
/// neutral defaults. The only failure class is a contract violation in the
/// inputs themselves.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SignalError {
    /// An input contained a NaN or infinite value.
    #[error("invalid input: {context} contains a non-finite value")]
    InvalidInput {
        /// Which input failed validation.
        context: &'static str,
    },
}

impl SignalError {
    pub(crate) const fn invalid(context: &'static str) -> Self {
        Self::InvalidInput { context }
    }
}

/// Result type alias for engine operations.
pub type Result<T> = std::result::Result<T, SignalError>;

/// Rejects NaN and infinite values before they reach any arithmetic.
pub(crate) fn ensure_finite<I>(values: I, context: &'static str) -> Result<()>
where
    I: IntoIterator<Item = f64>,
{
    for value in values {
        if !value.is_finite() {
            return Err(SignalError::invalid(context));
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn finite_values_pass() {
        assert!(ensure_finite([0.0, -1.5, 1e12], "series").is_ok());
    }

    #[test]
    fn nan_is_rejected_with_context() {
        let err = ensure_finite([1.0, f64::NAN], "series").unwrap_err();
        assert_eq!(err, SignalError::invalid("series"));
        assert!(err.to_string().contains("series"));
    }

    #[test]
    fn infinities_are_rejected() {
        assert!(ensure_finite([f64::INFINITY], "series").is_err());
        assert!(ensure_finite([f64::NEG_INFINITY], "series").is_err());
    }

    #[test]
    fn empty_input_passes() {
        assert!(ensure_finite(std::iter::empty(), "series").is_ok());
    }
}
