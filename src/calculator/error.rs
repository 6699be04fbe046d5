//! Error types for the calculator core.

use thiserror::Error;

/// Classification was attempted on an empty buffer.
#[derive(Clone, Copy, Debug, Error, PartialEq, Eq)]
#[error("cannot classify the trailing character of an empty buffer")]
pub struct EmptyBufferError;

/// Failure reported by an expression evaluator.
#[derive(Clone, Debug, Error, PartialEq, Eq)]
pub enum EvaluationError {
    /// The expression could not be parsed or evaluated.
    #[error("malformed expression `{expression}`: {reason}")]
    Malformed { expression: String, reason: String },

    /// The expression evaluated to NaN or an infinity (e.g. division by zero).
    #[error("expression `{expression}` has no finite value ({value})")]
    NotFinite { expression: String, value: String },

    /// Only base 10 is understood by the evaluators in this crate.
    #[error("unsupported numeric base {0}")]
    UnsupportedBase(u32),
}

/// Failure of a single editor event.
#[derive(Clone, Debug, Error, PartialEq, Eq)]
pub enum EditError {
    #[error("`{0}` is not a decimal digit")]
    InvalidDigit(char),

    #[error(transparent)]
    Evaluation(#[from] EvaluationError),
}
