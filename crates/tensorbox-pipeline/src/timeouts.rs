//! Timeout bookkeeping per algorithm and threshold.

use tensorbox_core::types::collections::{FxHashMap, FxHashSet};

/// Records the thresholds at which each algorithm timed out.
///
/// A timeout only blocks the exact threshold it happened at; higher
/// thresholds may still be attempted.
#[derive(Debug, Clone, Default)]
pub struct TimeoutBook {
    timed_out: FxHashMap<String, FxHashSet<u64>>,
}

impl TimeoutBook {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn mark(&mut self, algorithm: &str, threshold: f64) {
        self.timed_out
            .entry(algorithm.to_string())
            .or_default()
            .insert(key(threshold));
    }

    pub fn has_timed_out(&self, algorithm: &str, threshold: f64) -> bool {
        self.timed_out
            .get(algorithm)
            .is_some_and(|thresholds| thresholds.contains(&key(threshold)))
    }

    /// Forgets everything; called when a new configuration starts.
    pub fn reset(&mut self) {
        self.timed_out.clear();
    }
}

/// Thresholds are compared bitwise; `-0.0` is folded into `0.0`.
fn key(threshold: f64) -> u64 {
    if threshold == 0.0 {
        0.0f64.to_bits()
    } else {
        threshold.to_bits()
    }
}
