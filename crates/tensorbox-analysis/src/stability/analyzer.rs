//! Mean best-Jaccard similarity of ground-truth patterns across trials.

use rayon::prelude::*;
use tensorbox_core::errors::EvaluationError;
use tensorbox_core::pattern::Experiment;
use tensorbox_core::tracing::metrics;
use tracing::info;

use super::report::{StabilityEntry, StabilityReport};

/// Compares a ground-truth experiment against perturbed trial experiments.
///
/// For ground pattern `g_i` and trial `k`, `best_i^k` is the highest Jaccard
/// index between `g_i` and any pattern of trial `k`; the reported score is
/// the mean of `best_i^k` over all trials.
///
/// Cost is `O(K * |ground| * |trial|)` pattern-pair comparisons, quadratic in
/// pattern-set size per trial. Ground patterns are scored in parallel; the
/// experiments are shared read-only and results keep ground-truth order.
#[derive(Debug, Clone, Copy)]
pub struct StabilityAnalyzer<'a> {
    ground: &'a Experiment,
}

impl<'a> StabilityAnalyzer<'a> {
    pub fn new(ground: &'a Experiment) -> Self {
        Self { ground }
    }

    pub fn analyze(&self, trials: &[Experiment]) -> Result<StabilityReport, EvaluationError> {
        if trials.is_empty() {
            return Err(EvaluationError::NoTrials);
        }
        let count = trials.len() as f64;

        let entries = self
            .ground
            .patterns()
            .par_iter()
            .map(|ground| -> Result<StabilityEntry, EvaluationError> {
                let mut sum = 0.0;
                for trial in trials {
                    sum += trial.best_jaccard(ground)?;
                }
                Ok(StabilityEntry {
                    pattern: ground.tuples_string(),
                    mean: sum / count,
                })
            })
            .collect::<Result<Vec<_>, _>>()?;

        info!(
            { metrics::TRIALS } = trials.len(),
            ground_patterns = entries.len(),
            "stability analysis done"
        );
        Ok(StabilityReport::new(entries))
    }
}
