//! Incremental and endpoint RSS computation.

use std::collections::hash_map::Entry;

use tensorbox_core::config::QualityConfig;
use tensorbox_core::constants::DEFAULT_MAX_PATTERNS;
use tensorbox_core::dataset::Dataset;
use tensorbox_core::errors::{DatasetError, EvaluationError};
use tensorbox_core::pattern::Pattern;
use tensorbox_core::tensor::DenseTensor;
use tensorbox_core::tracing::metrics;
use tensorbox_core::types::collections::FxHashMap;
use tracing::{debug, warn};

/// One point of an RSS evolution curve.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RssPoint {
    /// Model RSS after incorporating `patterns` patterns.
    pub rss: f64,
    /// Patterns incorporated so far (0 for the empty-model point).
    pub patterns: usize,
}

/// Knobs of [`rss_evolution`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EvolutionOptions {
    /// Stop after this many non-degenerate patterns.
    pub max_patterns: usize,
    /// Emit `(empty_model_rss, 0)` as the first point.
    pub include_empty_model: bool,
}

impl Default for EvolutionOptions {
    fn default() -> Self {
        Self {
            max_patterns: DEFAULT_MAX_PATTERNS,
            include_empty_model: false,
        }
    }
}

impl EvolutionOptions {
    pub fn from_config(config: &QualityConfig) -> Self {
        Self {
            max_patterns: config.effective_max_patterns(),
            include_empty_model: config.effective_include_empty_model(),
        }
    }
}

/// Endpoint score returned by [`calculate_model_rss`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ModelRss {
    pub rss: f64,
    /// Non-degenerate patterns that contributed to the prediction.
    pub patterns_used: usize,
}

/// Per-cell predictions keyed by row-major tensor offset, plus the running
/// total. Owned by a single evaluation call.
struct PredictionMap<'a> {
    matrix: &'a DenseTensor,
    lambda0: f64,
    total: f64,
    cells: FxHashMap<usize, f64>,
}

impl<'a> PredictionMap<'a> {
    fn new(dataset: &'a dyn Dataset) -> Self {
        Self {
            matrix: dataset.matrix(),
            lambda0: dataset.density(),
            total: dataset.empty_model_rss(),
            cells: FxHashMap::default(),
        }
    }

    /// Checks that `pattern` can be looked up in the tensor.
    fn admit(&self, pattern: &Pattern) -> Result<(), DatasetError> {
        if pattern.dimension() != self.matrix.rank() {
            return Err(DatasetError::UnsupportedDimension {
                requested: pattern.dimension(),
                tensor: self.matrix.rank(),
            });
        }
        pattern.check_bounds(self.matrix.shape())
    }

    /// Predicts `pattern.density()` on every covered cell and keeps the
    /// running RSS in step. A cell's first prediction replaces lambda 0 even
    /// when lower; later ones only raise it.
    fn apply(&mut self, pattern: &Pattern) -> Result<(), DatasetError> {
        let density = pattern.density();
        let matrix = self.matrix;
        let values = matrix.values();
        for cell in pattern.indices() {
            let offset = matrix.offset(&cell)?;
            let actual = values[offset];
            match self.cells.entry(offset) {
                Entry::Vacant(slot) => {
                    self.total -= square(actual - self.lambda0);
                    self.total += square(actual - density);
                    slot.insert(density);
                }
                Entry::Occupied(mut slot) => {
                    let previous = *slot.get();
                    if density > previous {
                        self.total -= square(actual - previous);
                        self.total += square(actual - density);
                        slot.insert(density);
                    }
                }
            }
        }
        Ok(())
    }
}

/// Builds the RSS curve obtained by adding `patterns` one at a time in their
/// given order.
///
/// Degenerate patterns are skipped and do not count toward
/// `options.max_patterns`. Cost is proportional to the cells touched, not to
/// the tensor size.
pub fn rss_evolution(
    dataset: &dyn Dataset,
    patterns: &[Pattern],
    options: EvolutionOptions,
) -> Result<Vec<RssPoint>, EvaluationError> {
    let mut map = PredictionMap::new(dataset);
    let mut curve = Vec::with_capacity(options.max_patterns.min(patterns.len()) + 1);
    if options.include_empty_model {
        curve.push(RssPoint {
            rss: map.total,
            patterns: 0,
        });
    }

    let mut used = 0;
    let mut skipped = 0;
    for pattern in patterns {
        if used == options.max_patterns {
            break;
        }
        if pattern.is_degenerate() {
            warn!(pattern = %pattern, "skipping degenerate pattern");
            skipped += 1;
            continue;
        }
        map.admit(pattern)?;
        map.apply(pattern)?;
        used += 1;
        curve.push(RssPoint {
            rss: map.total,
            patterns: used,
        });
    }

    debug!(
        { metrics::CELLS_TOUCHED } = map.cells.len(),
        { metrics::DEGENERATE_EXCLUDED } = skipped,
        points = curve.len(),
        "rss evolution computed"
    );
    Ok(curve)
}

/// Endpoint RSS of the model made of all `patterns`.
///
/// Overlaps resolve with the same max rule as [`rss_evolution`], so the
/// result equals the last point of an uncapped evolution.
pub fn calculate_model_rss(
    dataset: &dyn Dataset,
    patterns: &[Pattern],
) -> Result<ModelRss, EvaluationError> {
    let mut map = PredictionMap::new(dataset);
    let mut patterns_used = 0;
    for pattern in patterns.iter().filter(|p| !p.is_degenerate()) {
        map.admit(pattern)?;
        map.apply(pattern)?;
        patterns_used += 1;
    }
    Ok(ModelRss {
        rss: map.total,
        patterns_used,
    })
}

/// Squared error of `pattern`'s prediction over its own cells.
pub fn pattern_rss(matrix: &DenseTensor, pattern: &Pattern) -> Result<f64, DatasetError> {
    let mut rss = 0.0;
    for cell in pattern.indices() {
        rss += square(matrix.get(&cell)? - pattern.density());
    }
    Ok(rss)
}

fn square(x: f64) -> f64 {
    x * x
}
