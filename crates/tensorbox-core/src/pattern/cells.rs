//! Lazy Cartesian product over a pattern's index sets.

use std::collections::BTreeSet;

use crate::types::collections::CellIndex;

/// Iterator over every cell covered by a list of per-dimension index sets.
///
/// Cells are produced in lexicographic order (last dimension varies fastest).
/// An empty set in any dimension, or zero dimensions, yields nothing.
#[derive(Debug, Clone)]
pub struct Cells {
    axes: Vec<Vec<usize>>,
    cursor: Option<Vec<usize>>,
}

impl Cells {
    pub fn new(tuples: &[BTreeSet<usize>]) -> Self {
        let axes: Vec<Vec<usize>> = tuples.iter().map(|s| s.iter().copied().collect()).collect();
        let exhausted = axes.is_empty() || axes.iter().any(Vec::is_empty);
        let cursor = if exhausted {
            None
        } else {
            Some(vec![0; axes.len()])
        };
        Self { axes, cursor }
    }

    fn advance(&mut self) {
        let Some(cursor) = self.cursor.as_mut() else {
            return;
        };
        for d in (0..cursor.len()).rev() {
            cursor[d] += 1;
            if cursor[d] < self.axes[d].len() {
                return;
            }
            cursor[d] = 0;
        }
        self.cursor = None;
    }
}

impl Iterator for Cells {
    type Item = CellIndex;

    fn next(&mut self) -> Option<Self::Item> {
        let cursor = self.cursor.as_ref()?;
        let cell: CellIndex = cursor
            .iter()
            .zip(&self.axes)
            .map(|(&position, axis)| axis[position])
            .collect();
        self.advance();
        Some(cell)
    }
}
