//! Aggregation of RSS curves across repeated iterations.

/// Element-wise sum of two curves over `size` points. A curve shorter than
/// `size` is padded with its last value, or with 0 when it is empty.
pub fn sum_evolutions(a: &[f64], b: &[f64], size: usize) -> Vec<f64> {
    (0..size).map(|i| padded(a, i) + padded(b, i)).collect()
}

/// Common curve length for one algorithm across iterations.
///
/// Length-1 curves (empty model only) are ignored. The result is the minimum
/// remaining length minus the empty-model point, floored at 1.
pub fn common_evolution_size(sizes: &[usize]) -> usize {
    sizes
        .iter()
        .copied()
        .filter(|&size| size != 1)
        .min()
        .map(|min| min.saturating_sub(1))
        .unwrap_or(1)
        .max(1)
}

/// Element-wise mean of `curves` over `size` points, padding like
/// [`sum_evolutions`]. Empty when there are no curves.
pub fn mean_evolution(curves: &[Vec<f64>], size: usize) -> Vec<f64> {
    if curves.is_empty() {
        return Vec::new();
    }
    let total = curves
        .iter()
        .fold(vec![0.0; size], |acc, curve| sum_evolutions(&acc, curve, size));
    let count = curves.len() as f64;
    total.into_iter().map(|value| value / count).collect()
}

fn padded(curve: &[f64], index: usize) -> f64 {
    curve
        .get(index)
        .or_else(|| curve.last())
        .copied()
        .unwrap_or(0.0)
}
