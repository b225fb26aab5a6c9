//! Shared constants for tensorbox.

/// tensorbox version string.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Default wall-clock timeout for one algorithm run, in seconds.
pub const DEFAULT_TIMEOUT_SECS: u64 = 3600;

/// Default cap on the number of patterns scored by the RSS evolution.
pub const DEFAULT_MAX_PATTERNS: usize = 20;

/// Default number of perturbed trials in a stability study.
pub const DEFAULT_STABILITY_TRIALS: usize = 30;

/// Default initial-pattern cap handed to the miner in perturbed trials.
pub const DEFAULT_INITIAL_PATTERNS: usize = 1000;

/// Default directory holding per-dataset configuration files.
pub const DEFAULT_CONFIGS_DIR: &str = "configs";

/// Default root of the per-configuration output tree.
pub const DEFAULT_OUTPUT_ROOT: &str = "iteration";

/// Default root of post-analysis artifacts.
pub const DEFAULT_POST_ANALYSIS_ROOT: &str = "post_analysis";

/// Decimal digits used for densities in canonical pattern strings.
pub const DENSITY_DECIMALS: usize = 6;

/// Extension that disables a configuration file.
pub const DISABLED_CONFIG_EXTENSION: &str = "off";

/// Project-level config file name.
pub const PROJECT_CONFIG_FILE: &str = "tensorbox.toml";

/// Folder name of the ground-truth trial in a stability study.
pub const GROUND_TRIAL_NAME: &str = "ground_patterns";

/// Per-ground-pattern stability artifact (`<pattern>: <mean>`).
pub const FULL_MEAN_JACCARDS_FILE: &str = "full_mean_jaccards.txt";

/// Bare stability score artifact (`<mean>`).
pub const MEAN_JACCARDS_FILE: &str = "mean_jaccards.txt";

/// Poll interval of the external process runner, in milliseconds.
pub const PROCESS_POLL_INTERVAL_MS: u64 = 50;
