//! A single hyper-rectangular pattern.

use std::collections::BTreeSet;
use std::fmt;
use std::hash::{Hash, Hasher};

use super::cells::Cells;
use super::similarity;
use crate::constants::DENSITY_DECIMALS;
use crate::errors::{DatasetError, PatternError};

/// One index set per dimension plus the density predicted for every cell of
/// their Cartesian product. Immutable after construction.
///
/// Two patterns are equal iff their canonical strings are.
#[derive(Debug, Clone)]
pub struct Pattern {
    tuples: Vec<BTreeSet<usize>>,
    density: f64,
}

impl PartialEq for Pattern {
    fn eq(&self, other: &Self) -> bool {
        self.canonical_string() == other.canonical_string()
    }
}

impl Eq for Pattern {}

impl Hash for Pattern {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.canonical_string().hash(state);
    }
}

impl Pattern {
    pub fn new(tuples: Vec<BTreeSet<usize>>, density: f64) -> Self {
        Self { tuples, density }
    }

    /// Parses one line of a pattern file.
    ///
    /// The line holds `dimension` fields of comma-separated non-negative
    /// integers followed by a floating-point density. Fields are separated by
    /// a single space or tab, so an empty field (two adjacent separators)
    /// denotes an empty index set.
    pub fn parse(line: &str, dimension: usize) -> Result<Self, PatternError> {
        let trimmed = line.trim();
        let fields: Vec<&str> = trimmed.split(|c: char| c == ' ' || c == '\t').collect();
        if trimmed.is_empty() || fields.len() != dimension + 1 {
            return Err(PatternError::malformed(
                line,
                format!(
                    "expected {} fields, found {}",
                    dimension + 1,
                    if trimmed.is_empty() { 0 } else { fields.len() }
                ),
            ));
        }

        let mut tuples = Vec::with_capacity(dimension);
        for field in &fields[..dimension] {
            tuples.push(parse_index_set(line, field)?);
        }

        let density_field = fields[dimension];
        let density: f64 = density_field.parse().map_err(|_| {
            PatternError::malformed(line, format!("density {density_field:?} is not a number"))
        })?;
        if !density.is_finite() {
            return Err(PatternError::malformed(line, "density is not finite"));
        }

        Ok(Self { tuples, density })
    }

    pub fn tuples(&self) -> &[BTreeSet<usize>] {
        &self.tuples
    }

    /// Number of dimensions.
    pub fn dimension(&self) -> usize {
        self.tuples.len()
    }

    pub fn density(&self) -> f64 {
        self.density
    }

    /// Same index sets with another density.
    pub fn with_density(self, density: f64) -> Self {
        Self {
            tuples: self.tuples,
            density,
        }
    }

    /// Product of the index-set sizes.
    pub fn cell_count(&self) -> usize {
        if self.tuples.is_empty() {
            return 0;
        }
        self.tuples.iter().map(BTreeSet::len).product()
    }

    /// A pattern with an empty index set covers no cell and must never be scored.
    pub fn is_degenerate(&self) -> bool {
        self.cell_count() == 0
    }

    /// Lazily enumerates the covered cells.
    pub fn indices(&self) -> Cells {
        Cells::new(&self.tuples)
    }

    /// Checks every index against the tensor shape.
    pub fn check_bounds(&self, shape: &[usize]) -> Result<(), DatasetError> {
        if shape.len() != self.tuples.len() {
            return Err(DatasetError::UnsupportedDimension {
                requested: self.tuples.len(),
                tensor: shape.len(),
            });
        }
        for (set, &size) in self.tuples.iter().zip(shape) {
            if let Some(&max) = set.last() {
                if max >= size {
                    return Err(DatasetError::IndexOutOfBounds {
                        index: self.tuples.iter().map(|s| s.last().copied().unwrap_or(0)).collect(),
                        shape: shape.to_vec(),
                    });
                }
            }
        }
        Ok(())
    }

    /// Index sets only, e.g. `0,1 4 2,3`.
    pub fn tuples_string(&self) -> String {
        self.tuples
            .iter()
            .map(|set| {
                set.iter()
                    .map(usize::to_string)
                    .collect::<Vec<_>>()
                    .join(",")
            })
            .collect::<Vec<_>>()
            .join(" ")
    }

    /// Deterministic serialization used as the deduplication key: sorted
    /// index sets in dimension order, then the density with 6 decimals.
    pub fn canonical_string(&self) -> String {
        format!(
            "{} {:.*}",
            self.tuples_string(),
            DENSITY_DECIMALS,
            self.density
        )
    }

    /// Hyper-rectangle Jaccard index against `other`.
    pub fn jaccard_index(&self, other: &Pattern) -> Result<f64, PatternError> {
        similarity::jaccard_index(self, other)
    }
}

impl fmt::Display for Pattern {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.canonical_string())
    }
}

fn parse_index_set(line: &str, field: &str) -> Result<BTreeSet<usize>, PatternError> {
    if field.is_empty() {
        return Ok(BTreeSet::new());
    }
    field
        .split(',')
        .map(|token| {
            token.parse::<usize>().map_err(|_| {
                PatternError::malformed(
                    line,
                    format!("index token {token:?} is not a non-negative integer"),
                )
            })
        })
        .collect()
}
