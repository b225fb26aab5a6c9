//! Scoring errors (RSS evaluation, stability analysis).

use super::error_code::{self, TensorboxErrorCode};
use super::{DatasetError, PatternError};

/// Errors local to one evaluation call. They never abort sibling
/// configurations or algorithms.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum EvaluationError {
    #[error("Pattern error: {0}")]
    Pattern(#[from] PatternError),

    #[error("Dataset error: {0}")]
    Dataset(#[from] DatasetError),

    #[error("Stability analysis needs at least one trial")]
    NoTrials,
}

impl TensorboxErrorCode for EvaluationError {
    fn error_code(&self) -> &'static str {
        match self {
            Self::Pattern(e) => e.error_code(),
            Self::Dataset(e) => e.error_code(),
            Self::NoTrials => error_code::NO_TRIALS,
        }
    }
}
