//! TensorboxErrorCode trait for structured error reporting.

/// Every error enum implements this to expose a stable, machine-readable
/// code next to its human-readable message.
pub trait TensorboxErrorCode {
    /// Returns the error code string (e.g., "MALFORMED_PATTERN").
    fn error_code(&self) -> &'static str;

    /// Returns the formatted report string: `[ERROR_CODE] message`.
    fn report_string(&self) -> String
    where
        Self: std::fmt::Display,
    {
        format!("[{}] {}", self.error_code(), self)
    }
}

pub const MALFORMED_PATTERN: &str = "MALFORMED_PATTERN";
pub const DIMENSION_MISMATCH: &str = "DIMENSION_MISMATCH";
pub const EMPTY_EXPERIMENT: &str = "EMPTY_EXPERIMENT";
pub const IO_ERROR: &str = "IO_ERROR";
pub const UNSUPPORTED_DIMENSION: &str = "UNSUPPORTED_DIMENSION";
pub const DATASET_ERROR: &str = "DATASET_ERROR";
pub const DATASET_BUILD_FAILED: &str = "DATASET_BUILD_FAILED";
pub const UNKNOWN_LABEL: &str = "UNKNOWN_LABEL";
pub const NO_TRIALS: &str = "NO_TRIALS";
pub const CONFIG_ERROR: &str = "CONFIG_ERROR";
pub const UNSUPPORTED_CONFIGURATION: &str = "UNSUPPORTED_CONFIGURATION";
pub const ALGORITHM_TIMEOUT: &str = "ALGORITHM_TIMEOUT";
pub const PROCESS_ERROR: &str = "PROCESS_ERROR";
pub const PIPELINE_ERROR: &str = "PIPELINE_ERROR";
