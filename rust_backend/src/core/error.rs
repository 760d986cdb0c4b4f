//! Error types for calculator operations.

/// Result type for calculator operations
pub type CalcResult<T> = Result<T, CalcError>;

/// Error type for calculator operations.
///
/// The `Display` text is the user-facing message. The UI boundary prefixes it with
/// [`ERROR_MARKER`](crate::core::ERROR_MARKER) via [`render`](crate::core::render).
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum CalcError {
    #[error("denominator is zero, cannot compute Tq")]
    DivisionByZero,

    #[error("cosine value must be within [-1, 1]")]
    CosineOutOfRange(f64),

    #[error("please enter a valid number (e.g. 0.5 or 60)")]
    InvalidNumber(String),

    #[error("invalid mode selection")]
    InvalidMode(String),

    #[error("invalid parameter {name}: {reason}")]
    InvalidParameter { name: &'static str, reason: String },

    #[error("error: {0}")]
    Arithmetic(String),
}

impl CalcError {
    /// Degenerate inputs (zero denominator, out-of-range cosine) as opposed to
    /// malformed ones.
    pub fn is_degenerate_input(&self) -> bool {
        matches!(self, CalcError::DivisionByZero | CalcError::CosineOutOfRange(_))
    }

    pub(crate) fn invalid_parameter(name: &'static str, reason: impl Into<String>) -> Self {
        CalcError::InvalidParameter {
            name,
            reason: reason.into(),
        }
    }
}

impl From<std::num::ParseFloatError> for CalcError {
    fn from(e: std::num::ParseFloatError) -> Self {
        CalcError::InvalidNumber(e.to_string())
    }
}
