//! Structured field names used in tracing events across tensorbox.
//!
//! Keeping them in one place lets log queries rely on stable keys.

/// Dataset configuration currently executing.
pub const CONFIGURATION: &str = "configuration";

/// Algorithm currently executing.
pub const ALGORITHM: &str = "algorithm";

/// Threshold (u) of the current run.
pub const THRESHOLD: &str = "threshold";

/// Wall-clock duration of one algorithm run in seconds.
pub const RUN_TIME_SECS: &str = "run_time_secs";

/// Number of duplicated patterns removed by deduplication.
pub const DUPLICATES_REMOVED: &str = "duplicates_removed";

/// Number of degenerate patterns excluded before scoring.
pub const DEGENERATE_EXCLUDED: &str = "degenerate_excluded";

/// Number of cells touched by an RSS evaluation.
pub const CELLS_TOUCHED: &str = "cells_touched";

/// Number of trials in a stability study.
pub const TRIALS: &str = "trials";
