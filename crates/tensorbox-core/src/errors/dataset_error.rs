//! Dataset and tensor errors.

use super::error_code::{self, TensorboxErrorCode};
use super::PatternError;

/// Errors raised by dense tensors and dataset collaborators.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum DatasetError {
    /// Cell lookup requested with a dimensionality the tensor does not have.
    #[error("Dimension {requested} not supported by a {tensor}-dimensional tensor")]
    UnsupportedDimension { requested: usize, tensor: usize },

    #[error("Index {index:?} out of bounds for shape {shape:?}")]
    IndexOutOfBounds { index: Vec<usize>, shape: Vec<usize> },

    #[error("Shape {shape:?} does not match {len} values")]
    ShapeMismatch { shape: Vec<usize>, len: usize },

    #[error("Unknown label {label:?} in dimension {dimension}")]
    UnknownLabel { dimension: usize, label: String },

    #[error("Dataset build failed: {0}")]
    Build(String),

    #[error("Pattern error: {0}")]
    Pattern(#[from] PatternError),
}

impl TensorboxErrorCode for DatasetError {
    fn error_code(&self) -> &'static str {
        match self {
            Self::UnsupportedDimension { .. } => error_code::UNSUPPORTED_DIMENSION,
            Self::UnknownLabel { .. } => error_code::UNKNOWN_LABEL,
            Self::Build(_) => error_code::DATASET_BUILD_FAILED,
            Self::Pattern(e) => e.error_code(),
            _ => error_code::DATASET_ERROR,
        }
    }
}
