//! Configuration system for tensorbox.
//! TOML-based, layered resolution: CLI > env > project > user > defaults.

pub mod pipeline_config;
pub mod quality_config;
pub mod stability_config;
pub mod tensorbox_config;

pub use pipeline_config::PipelineConfig;
pub use quality_config::QualityConfig;
pub use stability_config::StabilityConfig;
pub use tensorbox_config::{CliOverrides, TensorboxConfig};
