//! Blocking external process execution with a wall-clock timeout.

use std::process::{Command, ExitStatus};
use std::thread;
use std::time::{Duration, Instant};

use tensorbox_core::constants::PROCESS_POLL_INTERVAL_MS;
use tensorbox_core::errors::PipelineError;
use tracing::{debug, warn};

/// Result of [`run_with_timeout`].
#[derive(Debug, Clone, Copy)]
pub struct ProcessOutcome {
    /// Exit status; `None` when the process was killed on timeout.
    pub status: Option<ExitStatus>,
    pub elapsed: Duration,
}

impl ProcessOutcome {
    pub fn timed_out(&self) -> bool {
        self.status.is_none()
    }

    pub fn success(&self) -> bool {
        self.status.is_some_and(|status| status.success())
    }
}

/// Spawns `command` and polls it until it exits or `timeout` expires.
///
/// On timeout the child is killed and reaped before returning.
pub fn run_with_timeout(
    command: &mut Command,
    timeout: Duration,
) -> Result<ProcessOutcome, PipelineError> {
    let program = command.get_program().to_string_lossy().into_owned();
    let mut child = command.spawn().map_err(|e| PipelineError::Process {
        program: program.clone(),
        message: format!("spawn failed: {e}"),
    })?;

    let start = Instant::now();
    let poll = Duration::from_millis(PROCESS_POLL_INTERVAL_MS);
    loop {
        let waited = child.try_wait().map_err(|e| PipelineError::Process {
            program: program.clone(),
            message: format!("wait failed: {e}"),
        })?;
        if let Some(status) = waited {
            let elapsed = start.elapsed();
            debug!(%program, ?status, elapsed_secs = elapsed.as_secs_f64(), "process exited");
            return Ok(ProcessOutcome {
                status: Some(status),
                elapsed,
            });
        }

        let elapsed = start.elapsed();
        if elapsed >= timeout {
            // The child may exit between try_wait and kill.
            if let Err(e) = child.kill() {
                debug!(%program, error = %e, "kill after timeout failed");
            }
            if let Err(e) = child.wait() {
                warn!(%program, error = %e, "could not reap timed-out process");
            }
            warn!(%program, timeout_secs = timeout.as_secs_f64(), "process timed out");
            return Ok(ProcessOutcome {
                status: None,
                elapsed,
            });
        }
        thread::sleep(poll.min(timeout - elapsed));
    }
}

#[cfg(all(test, unix))]
mod tests {
    use super::*;

    #[test]
    fn fast_process_completes() {
        let outcome = run_with_timeout(&mut Command::new("true"), Duration::from_secs(10)).unwrap();
        assert!(outcome.success());
        assert!(!outcome.timed_out());
    }

    #[test]
    fn slow_process_is_killed() {
        let mut command = Command::new("sleep");
        command.arg("5");
        let outcome = run_with_timeout(&mut command, Duration::from_millis(200)).unwrap();
        assert!(outcome.timed_out());
        assert!(outcome.elapsed < Duration::from_secs(5));
    }

    #[test]
    fn missing_program_is_a_process_error() {
        let err = run_with_timeout(
            &mut Command::new("/nonexistent/tensorbox-miner"),
            Duration::from_secs(1),
        )
        .unwrap_err();
        assert!(matches!(err, PipelineError::Process { .. }));
    }
}
