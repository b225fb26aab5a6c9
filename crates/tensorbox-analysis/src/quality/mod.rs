//! QualityEvaluator: residual-sum-of-squares scoring of ranked pattern lists.
//!
//! Overlapping patterns resolve to the maximum predicted density per cell.
//! Switching to sum or last-write silently changes every score.

pub mod aggregate;
pub mod rss;

pub use aggregate::{common_evolution_size, mean_evolution, sum_evolutions};
pub use rss::{calculate_model_rss, pattern_rss, rss_evolution, EvolutionOptions, ModelRss, RssPoint};
