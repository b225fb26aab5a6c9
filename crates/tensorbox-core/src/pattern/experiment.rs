//! Ranked pattern list of one mining run.

use std::fs;
use std::path::{Path, PathBuf};

use tracing::{info, warn};

use super::Pattern;
use crate::dataset::Dataset;
use crate::errors::{DatasetError, PatternError, PipelineError, PipelineResult};
use crate::tracing::metrics;
use crate::types::collections::FxHashSet;

/// Ordered patterns produced by one run. Order is the rank assigned by the
/// producing algorithm, or non-increasing recomputed density after
/// [`Experiment::sort_patterns`].
#[derive(Debug, Clone, Default)]
pub struct Experiment {
    path: Option<PathBuf>,
    threshold: f64,
    dimension: usize,
    patterns: Vec<Pattern>,
}

/// Outcome of [`Experiment::sort_patterns`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SortReport {
    /// Patterns kept and ranked.
    pub sorted: usize,
    /// Patterns with an empty index set, dropped before scoring.
    pub excluded_degenerate: usize,
}

impl Experiment {
    pub fn new(dimension: usize, patterns: Vec<Pattern>) -> Self {
        Self {
            path: None,
            threshold: 0.0,
            dimension,
            patterns,
        }
    }

    /// Tags the experiment with the threshold (u) it was mined at.
    pub fn with_threshold(mut self, threshold: f64) -> Self {
        self.threshold = threshold;
        self
    }

    /// Parses pattern-file text. Malformed lines are skipped and reported as
    /// non-fatal errors; blank lines are ignored.
    pub fn parse_str(text: &str, dimension: usize) -> PipelineResult<Experiment> {
        Self::parse_lines(text, dimension, |line| Ok(line.to_string()))
    }

    /// Loads a pattern file.
    ///
    /// Fails only when the file cannot be read or when every non-blank line
    /// is malformed; otherwise malformed lines are collected in the result.
    pub fn load(path: &Path, dimension: usize) -> Result<PipelineResult<Experiment>, PatternError> {
        Self::load_mapped(path, dimension, |line| Ok(line.to_string()))
    }

    /// Loads a pattern file whose lines must go through `map` (e.g. label
    /// encoding) before parsing.
    pub fn load_mapped<F>(
        path: &Path,
        dimension: usize,
        map: F,
    ) -> Result<PipelineResult<Experiment>, PatternError>
    where
        F: FnMut(&str) -> Result<String, DatasetError>,
    {
        let text = fs::read_to_string(path).map_err(|e| PatternError::io(path, &e))?;
        let mut result = Self::parse_lines(&text, dimension, map);

        let non_blank = text.lines().filter(|l| !l.trim().is_empty()).count();
        if non_blank > 0 && result.data.patterns.is_empty() {
            return Err(PatternError::AllLinesMalformed {
                path: path.to_path_buf(),
                count: non_blank,
            });
        }
        for error in &result.errors {
            warn!(path = %path.display(), error = %error, "skipping malformed pattern line");
        }

        result.data.path = Some(path.to_path_buf());
        Ok(result)
    }

    fn parse_lines<F>(text: &str, dimension: usize, mut map: F) -> PipelineResult<Experiment>
    where
        F: FnMut(&str) -> Result<String, DatasetError>,
    {
        let mut result = PipelineResult::new(Experiment::new(dimension, Vec::new()));
        for line in text.lines() {
            if line.trim().is_empty() {
                continue;
            }
            let parsed = map(line)
                .map_err(PipelineError::from)
                .and_then(|mapped| Pattern::parse(&mapped, dimension).map_err(PipelineError::from));
            match parsed {
                Ok(pattern) => result.data.patterns.push(pattern),
                Err(error) => result.add_error(error),
            }
        }
        result
    }

    pub fn path(&self) -> Option<&Path> {
        self.path.as_deref()
    }

    pub fn threshold(&self) -> f64 {
        self.threshold
    }

    pub fn dimension(&self) -> usize {
        self.dimension
    }

    pub fn patterns(&self) -> &[Pattern] {
        &self.patterns
    }

    pub fn into_patterns(self) -> Vec<Pattern> {
        self.patterns
    }

    pub fn len(&self) -> usize {
        self.patterns.len()
    }

    pub fn is_empty(&self) -> bool {
        self.patterns.is_empty()
    }

    /// Removes patterns whose canonical string was already seen, keeping the
    /// first occurrence and the relative order. Returns the number removed.
    pub fn delete_equal_patterns(&mut self) -> usize {
        let before = self.patterns.len();
        let mut seen = FxHashSet::default();
        self.patterns
            .retain(|pattern| seen.insert(pattern.canonical_string()));
        let removed = before - self.patterns.len();
        info!({ metrics::DUPLICATES_REMOVED } = removed, "duplicated patterns deleted");
        removed
    }

    /// Recomputes every density against `dataset` and stable-sorts by it,
    /// descending. Ties keep their file order.
    ///
    /// Degenerate patterns are dropped up front and never scored. The
    /// recomputed density replaces the stored one. On error the experiment
    /// is left untouched.
    pub fn sort_patterns(&mut self, dataset: &dyn Dataset) -> Result<SortReport, DatasetError> {
        let mut excluded_degenerate = 0;
        let mut rescored = Vec::with_capacity(self.patterns.len());
        for pattern in &self.patterns {
            if pattern.is_degenerate() {
                warn!(pattern = %pattern, "excluding degenerate pattern from sorting");
                excluded_degenerate += 1;
                continue;
            }
            let density = dataset.tuples_density(pattern.tuples())?;
            rescored.push(pattern.clone().with_density(density));
        }

        rescored.sort_by(|a, b| b.density().total_cmp(&a.density()));
        self.patterns = rescored;

        Ok(SortReport {
            sorted: self.patterns.len(),
            excluded_degenerate,
        })
    }

    /// Highest Jaccard index between `pattern` and any pattern of this
    /// experiment; 0.0 when the experiment is empty.
    pub fn best_jaccard(&self, pattern: &Pattern) -> Result<f64, PatternError> {
        let mut best: f64 = 0.0;
        for other in &self.patterns {
            best = best.max(pattern.jaccard_index(other)?);
        }
        Ok(best)
    }

    /// One canonical pattern per line, each newline-terminated.
    pub fn to_text(&self) -> String {
        self.patterns
            .iter()
            .map(|pattern| format!("{}\n", pattern.canonical_string()))
            .collect()
    }

    /// Writes [`Experiment::to_text`] to `path`.
    pub fn write_to(&self, path: &Path) -> Result<(), PatternError> {
        fs::write(path, self.to_text()).map_err(|e| PatternError::io(path, &e))
    }
}
