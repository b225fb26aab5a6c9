//! Pattern parsing and comparison errors.

use std::path::PathBuf;

use super::error_code::{self, TensorboxErrorCode};

/// Errors raised while parsing, comparing or persisting patterns.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum PatternError {
    /// A pattern line does not follow `<D index fields> <density>`.
    #[error("Malformed pattern line {line:?}: {reason}")]
    Malformed { line: String, reason: String },

    #[error("Patterns have different dimension counts: {left} vs {right}")]
    DimensionMismatch { left: usize, right: usize },

    /// Every non-empty line of a pattern file was malformed.
    #[error("All {count} lines of {path} are malformed")]
    AllLinesMalformed { path: PathBuf, count: usize },

    #[error("I/O error on {path}: {message}")]
    Io { path: PathBuf, message: String },
}

impl PatternError {
    pub(crate) fn malformed(line: &str, reason: impl Into<String>) -> Self {
        Self::Malformed {
            line: line.to_string(),
            reason: reason.into(),
        }
    }

    pub(crate) fn io(path: impl Into<PathBuf>, err: &std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            message: err.to_string(),
        }
    }
}

impl TensorboxErrorCode for PatternError {
    fn error_code(&self) -> &'static str {
        match self {
            Self::Malformed { .. } => error_code::MALFORMED_PATTERN,
            Self::DimensionMismatch { .. } => error_code::DIMENSION_MISMATCH,
            Self::AllLinesMalformed { .. } => error_code::EMPTY_EXPERIMENT,
            Self::Io { .. } => error_code::IO_ERROR,
        }
    }
}
