//! # tensorbox-core
//!
//! Foundation crate for tensorbox.
//! Defines errors, config, tracing, constants, the dense tensor, the dataset
//! collaborator trait and the pattern/experiment model.
//! Every other crate in the workspace depends on this.

pub mod config;
pub mod constants;
pub mod dataset;
pub mod errors;
pub mod pattern;
pub mod tensor;
pub mod tracing;
pub mod types;

// Re-export the most commonly used types at the crate root.
pub use config::TensorboxConfig;
pub use dataset::{Dataset, LabelCodec, TensorDataset};
pub use errors::{
    ConfigError, DatasetError, EvaluationError, PatternError, PipelineError, PipelineResult,
};
pub use pattern::{Experiment, Pattern};
pub use tensor::DenseTensor;
