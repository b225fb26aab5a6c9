//! Three-line run log written next to every pattern file.
//!
//! ```text
//! Total time: <float>s
//! Memory (kb): <int>
//! Nb of patterns: <int>
//! ```

use std::fs;
use std::path::Path;
use std::sync::LazyLock;

use regex::Regex;
use tensorbox_core::errors::PipelineError;

static SECONDS: LazyLock<Option<Regex>> = LazyLock::new(|| Regex::new(r"(\d*\.\d+)s").ok());
static MEMORY: LazyLock<Option<Regex>> = LazyLock::new(|| Regex::new(r"Memory \(kb\): (\d+)").ok());
static PATTERNS: LazyLock<Option<Regex>> =
    LazyLock::new(|| Regex::new(r"Nb of patterns: (\d+)").ok());

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RunLog {
    pub total_time_secs: f64,
    pub memory_kb: u64,
    pub patterns: usize,
}

impl RunLog {
    /// Builds the log of a finished run from the miner's own output.
    ///
    /// The total time is the last `<float>s` of the last non-blank line of
    /// `miner_output`, or `wall_time_secs` when there is none. Memory is the
    /// first `Memory (kb): <int>` line, 0 when absent.
    pub fn from_miner_output(miner_output: &str, wall_time_secs: f64, patterns: usize) -> Self {
        let total_time_secs = miner_output
            .lines()
            .rev()
            .find(|line| !line.trim().is_empty())
            .and_then(|line| last_capture(&SECONDS, line))
            .and_then(|value| value.parse().ok())
            .unwrap_or(wall_time_secs);
        let memory_kb = first_capture(&MEMORY, miner_output)
            .and_then(|value| value.parse().ok())
            .unwrap_or(0);
        Self {
            total_time_secs,
            memory_kb,
            patterns,
        }
    }

    /// Parses a log previously written by [`RunLog::write`].
    pub fn parse(text: &str) -> Option<Self> {
        let mut lines = text.lines();
        let total_time_secs = first_capture(&SECONDS, lines.next()?)?.parse().ok()?;
        let memory_kb = first_capture(&MEMORY, lines.next()?)?.parse().ok()?;
        let patterns = first_capture(&PATTERNS, lines.next()?)?.parse().ok()?;
        Some(Self {
            total_time_secs,
            memory_kb,
            patterns,
        })
    }

    pub fn load(path: &Path) -> Result<Option<Self>, PipelineError> {
        let text = fs::read_to_string(path).map_err(|e| PipelineError::io(path, &e))?;
        Ok(Self::parse(&text))
    }

    /// Renders the three lines, without a trailing newline.
    pub fn render(&self) -> String {
        format!(
            "Total time: {:?}s\nMemory (kb): {}\nNb of patterns: {}",
            self.total_time_secs, self.memory_kb, self.patterns
        )
    }

    pub fn write(&self, path: &Path) -> Result<(), PipelineError> {
        fs::write(path, self.render()).map_err(|e| PipelineError::io(path, &e))
    }
}

/// Non-blank lines of a pattern file.
pub fn count_patterns(path: &Path) -> Result<usize, PipelineError> {
    let text = fs::read_to_string(path).map_err(|e| PipelineError::io(path, &e))?;
    Ok(text.lines().filter(|line| !line.trim().is_empty()).count())
}

fn first_capture<'t>(regex: &LazyLock<Option<Regex>>, text: &'t str) -> Option<&'t str> {
    let regex = regex.as_ref()?;
    regex.captures(text)?.get(1).map(|m| m.as_str())
}

fn last_capture<'t>(regex: &LazyLock<Option<Regex>>, text: &'t str) -> Option<&'t str> {
    let regex = regex.as_ref()?;
    regex
        .captures_iter(text)
        .last()
        .and_then(|captures| captures.get(1))
        .map(|m| m.as_str())
}
