//! Error handling for tensorbox.
//! One error enum per subsystem, `thiserror` only, zero `anyhow`.

pub mod config_error;
pub mod dataset_error;
pub mod error_code;
pub mod evaluation_error;
pub mod pattern_error;
pub mod pipeline_error;

pub use config_error::ConfigError;
pub use dataset_error::DatasetError;
pub use error_code::TensorboxErrorCode;
pub use evaluation_error::EvaluationError;
pub use pattern_error::PatternError;
pub use pipeline_error::{PipelineError, PipelineResult};
