//! # tensorbox-analysis
//!
//! Scoring of ranked pattern lists against a reference tensor.
//!
//! - [`quality`]: incremental residual-sum-of-squares evolution and curve
//!   aggregation across iterations.
//! - [`stability`]: mean best-Jaccard similarity of ground-truth patterns
//!   across perturbed trials.
//!
//! Evaluators borrow datasets and experiments read-only; every call owns its
//! own prediction state.

pub mod quality;
pub mod stability;

pub use quality::{calculate_model_rss, rss_evolution, EvolutionOptions, ModelRss, RssPoint};
pub use stability::{StabilityAnalyzer, StabilityReport};
