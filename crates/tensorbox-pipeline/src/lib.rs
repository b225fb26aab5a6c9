//! # tensorbox-pipeline
//!
//! Drives pattern-mining runs per dataset configuration:
//! build dataset, translate representation, run every registered algorithm
//! with a wall-clock timeout, post-process its pattern file (dedup, sort,
//! label decoding) and optionally run a repeated-trial stability study.
//!
//! The pipeline is sequential: algorithms of one configuration share the
//! same output tree and never run concurrently.

pub mod algorithm;
pub mod command_algorithm;
pub mod configuration;
pub mod context;
pub mod controller;
pub mod decode;
pub mod layout;
pub mod process;
pub mod provider;
pub mod report;
pub mod run_log;
pub mod stability_study;
pub mod timeouts;
pub mod translator;

pub use algorithm::{Algorithm, AlgorithmDescriptor, RunOutcome, RunRequest};
pub use command_algorithm::CommandAlgorithm;
pub use configuration::DatasetConfiguration;
pub use context::SessionContext;
pub use controller::PipelineController;
pub use layout::{FsWorkspace, OutputLayout, Workspace};
pub use provider::{DatasetProvider, StaticProvider};
pub use report::{RunRecord, RunStage, SessionReport};
pub use run_log::RunLog;
pub use timeouts::TimeoutBook;
pub use translator::{Translator, TranslatorRegistry};
