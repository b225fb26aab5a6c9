//! Stability results and their text artifacts.

use std::fs;
use std::path::Path;

use statrs::statistics::Statistics;
use tensorbox_core::constants::{FULL_MEAN_JACCARDS_FILE, MEAN_JACCARDS_FILE};
use tensorbox_core::errors::{DatasetError, PipelineError};

/// Score of one ground-truth pattern.
#[derive(Debug, Clone, PartialEq)]
pub struct StabilityEntry {
    /// Index sets of the ground pattern, e.g. `0,1 4 2,3`.
    pub pattern: String,
    /// Mean best-Jaccard similarity across trials.
    pub mean: f64,
}

/// Descriptive statistics over the per-pattern scores.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct StabilitySummary {
    pub mean: f64,
    /// Sample standard deviation; 0.0 for a single score.
    pub std_dev: f64,
    pub min: f64,
    pub max: f64,
}

/// Per-ground-pattern scores in ground-truth order.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct StabilityReport {
    entries: Vec<StabilityEntry>,
}

impl StabilityReport {
    pub fn new(entries: Vec<StabilityEntry>) -> Self {
        Self { entries }
    }

    pub fn entries(&self) -> &[StabilityEntry] {
        &self.entries
    }

    pub fn scores(&self) -> Vec<f64> {
        self.entries.iter().map(|e| e.mean).collect()
    }

    /// Rewrites every pattern text, e.g. to replace indices with labels.
    pub fn relabel<F>(&mut self, mut label: F) -> Result<(), DatasetError>
    where
        F: FnMut(&str) -> Result<String, DatasetError>,
    {
        for entry in &mut self.entries {
            entry.pattern = label(&entry.pattern)?;
        }
        Ok(())
    }

    /// `None` when there are no ground patterns.
    pub fn summary(&self) -> Option<StabilitySummary> {
        if self.entries.is_empty() {
            return None;
        }
        let scores = self.scores();
        let std_dev = if scores.len() > 1 {
            Statistics::std_dev(scores.iter())
        } else {
            0.0
        };
        Some(StabilitySummary {
            mean: Statistics::mean(scores.iter()),
            std_dev,
            min: Statistics::min(scores.iter()),
            max: Statistics::max(scores.iter()),
        })
    }

    /// `<pattern>: <mean>` per line.
    pub fn full_mean_jaccards(&self) -> String {
        self.entries
            .iter()
            .map(|e| format!("{}: {:?}\n", e.pattern, e.mean))
            .collect()
    }

    /// `<mean>` per line.
    pub fn mean_jaccards(&self) -> String {
        self.entries
            .iter()
            .map(|e| format!("{:?}\n", e.mean))
            .collect()
    }

    /// Writes both artifacts into `dir`, creating it if needed.
    pub fn write_artifacts(&self, dir: &Path) -> Result<(), PipelineError> {
        fs::create_dir_all(dir).map_err(|e| PipelineError::io(dir, &e))?;
        for (name, content) in [
            (FULL_MEAN_JACCARDS_FILE, self.full_mean_jaccards()),
            (MEAN_JACCARDS_FILE, self.mean_jaccards()),
        ] {
            let path = dir.join(name);
            fs::write(&path, content).map_err(|e| PipelineError::io(&path, &e))?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn report() -> StabilityReport {
        StabilityReport::new(vec![
            StabilityEntry {
                pattern: "0,1 2".into(),
                mean: 1.0,
            },
            StabilityEntry {
                pattern: "3 4".into(),
                mean: 0.5,
            },
        ])
    }

    #[test]
    fn artifacts_render_in_ground_order() {
        let report = report();
        assert_eq!(report.full_mean_jaccards(), "0,1 2: 1.0\n3 4: 0.5\n");
        assert_eq!(report.mean_jaccards(), "1.0\n0.5\n");
    }

    #[test]
    fn summary_statistics() {
        let summary = report().summary().unwrap();
        assert!((summary.mean - 0.75).abs() < 1e-12);
        assert_eq!(summary.min, 0.5);
        assert_eq!(summary.max, 1.0);
        assert!((summary.std_dev - 0.125f64.sqrt()).abs() < 1e-12);
        assert!(StabilityReport::default().summary().is_none());
    }
}
