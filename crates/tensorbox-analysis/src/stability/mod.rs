//! StabilityAnalyzer: how reliably perturbed trials rediscover ground-truth
//! patterns.

pub mod analyzer;
pub mod report;

pub use analyzer::StabilityAnalyzer;
pub use report::{StabilityEntry, StabilityReport, StabilitySummary};
