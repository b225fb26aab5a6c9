//! Hyper-rectangle Jaccard similarity.

use super::Pattern;
use crate::errors::PatternError;

/// Product over dimensions of `|A_d ∩ B_d| / |A_d ∪ B_d|`.
///
/// A dimension where both sets are empty contributes 0.0, so a degenerate
/// pattern is never similar to anything.
pub fn jaccard_index(a: &Pattern, b: &Pattern) -> Result<f64, PatternError> {
    if a.dimension() != b.dimension() {
        return Err(PatternError::DimensionMismatch {
            left: a.dimension(),
            right: b.dimension(),
        });
    }
    if a.dimension() == 0 {
        return Ok(0.0);
    }

    let mut index = 1.0;
    for (set_a, set_b) in a.tuples().iter().zip(b.tuples()) {
        let intersection = set_a.intersection(set_b).count();
        if intersection == 0 {
            return Ok(0.0);
        }
        let union = set_a.len() + set_b.len() - intersection;
        index *= intersection as f64 / union as f64;
    }
    Ok(index)
}
