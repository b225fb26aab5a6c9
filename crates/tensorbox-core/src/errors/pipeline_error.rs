//! Pipeline errors and non-fatal error collection.

use std::path::PathBuf;

use super::error_code::{self, TensorboxErrorCode};
use super::{ConfigError, DatasetError, EvaluationError, PatternError};

/// Errors that can occur during pipeline execution.
/// Aggregates subsystem errors via `From` conversions.
#[derive(Debug, thiserror::Error)]
pub enum PipelineError {
    #[error("Pattern error: {0}")]
    Pattern(#[from] PatternError),

    #[error("Dataset error: {0}")]
    Dataset(#[from] DatasetError),

    #[error("Evaluation error: {0}")]
    Evaluation(#[from] EvaluationError),

    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("Configuration name {name} not supported")]
    UnsupportedConfiguration { name: String },

    #[error("Building datasets failed: {0}")]
    DatasetBuild(String),

    #[error("Algorithm {algorithm} timed out at threshold {threshold}")]
    AlgorithmTimeout { algorithm: String, threshold: f64 },

    #[error("Process {program} failed: {message}")]
    Process { program: String, message: String },

    #[error("I/O error on {path}: {message}")]
    Io { path: PathBuf, message: String },

    #[error("Serialization error: {0}")]
    Serialization(String),
}

impl PipelineError {
    pub fn io(path: impl Into<PathBuf>, err: &std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            message: err.to_string(),
        }
    }

    /// Errors that leave later stages without valid input and therefore
    /// abort the whole session.
    pub fn is_fatal(&self) -> bool {
        matches!(
            self,
            Self::UnsupportedConfiguration { .. } | Self::DatasetBuild(_) | Self::Config(_)
        )
    }
}

impl TensorboxErrorCode for PipelineError {
    fn error_code(&self) -> &'static str {
        match self {
            Self::Pattern(e) => e.error_code(),
            Self::Dataset(e) => e.error_code(),
            Self::Evaluation(e) => e.error_code(),
            Self::Config(e) => e.error_code(),
            Self::UnsupportedConfiguration { .. } => error_code::UNSUPPORTED_CONFIGURATION,
            Self::DatasetBuild(_) => error_code::DATASET_BUILD_FAILED,
            Self::AlgorithmTimeout { .. } => error_code::ALGORITHM_TIMEOUT,
            Self::Process { .. } => error_code::PROCESS_ERROR,
            Self::Io { .. } => error_code::IO_ERROR,
            Self::Serialization(_) => error_code::PIPELINE_ERROR,
        }
    }
}

/// Result of a pipeline step that accumulates non-fatal errors.
/// Allows partial results to be returned even when some lines fail.
#[derive(Debug, Default)]
pub struct PipelineResult<T: Default = ()> {
    /// The successful result data.
    pub data: T,
    /// Non-fatal errors collected during the step.
    pub errors: Vec<PipelineError>,
}

impl<T: Default> PipelineResult<T> {
    /// Create a new result with no errors.
    pub fn new(data: T) -> Self {
        Self {
            data,
            errors: Vec::new(),
        }
    }

    /// Add a non-fatal error to the result.
    pub fn add_error(&mut self, error: impl Into<PipelineError>) {
        self.errors.push(error.into());
    }

    /// Returns true if there are no non-fatal errors.
    pub fn is_clean(&self) -> bool {
        self.errors.is_empty()
    }

    /// Returns the number of non-fatal errors.
    pub fn error_count(&self) -> usize {
        self.errors.len()
    }

    /// Drops the collected errors and returns the data.
    pub fn into_data(self) -> T {
        self.data
    }
}
