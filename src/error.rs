//! Engine error kinds
//!
//! Every failure is caused by the caller's input. Most are detected before
//! any computation runs; transaction totals are checked as they accumulate.
//! None of them is transient.

use thiserror::Error;

pub type Result<T> = std::result::Result<T, EngineError>;

#[derive(Debug, Clone, PartialEq, Error)]
pub enum EngineError {
    /// Non-finite or out-of-domain return rate, negative contribution, bad horizon
    #[error("Invalid assumptions: {0}")]
    InvalidAssumptions(String),

    /// Negative or non-finite milestone values
    #[error("Invalid milestone '{id}': {reason}")]
    InvalidMilestone { id: String, reason: String },

    /// Non-finite transaction amount, or totals that overflow
    #[error("Invalid transaction at index {index}: {reason}")]
    InvalidTransaction { index: usize, reason: String },

    /// Month token not matching the strict YYYY-MM shape
    #[error("Invalid period format '{0}': expected YYYY-MM")]
    InvalidPeriodFormat(String),
}

impl EngineError {
    pub(crate) fn assumptions(reason: impl Into<String>) -> Self {
        EngineError::InvalidAssumptions(reason.into())
    }

    pub(crate) fn milestone(id: &str, reason: impl Into<String>) -> Self {
        EngineError::InvalidMilestone {
            id: id.to_string(),
            reason: reason.into(),
        }
    }

    /// All engine errors are caused by the caller's input
    pub fn is_client_error(&self) -> bool {
        match self {
            EngineError::InvalidAssumptions(_)
            | EngineError::InvalidMilestone { .. }
            | EngineError::InvalidTransaction { .. }
            | EngineError::InvalidPeriodFormat(_) => true,
        }
    }
}
