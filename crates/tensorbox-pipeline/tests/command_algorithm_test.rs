//! External miners driven through `CommandAlgorithm`.

mod common;

use std::fs;
use std::path::Path;
use std::time::Duration;

use common::toy_dataset;
use tempfile::TempDir;
use tensorbox_core::dataset::Dataset;
use tensorbox_pipeline::{AlgorithmDescriptor, CommandAlgorithm, RunRequest};

fn request<'a>(dataset: &'a dyn Dataset, dir: &Path, timeout: Duration) -> RunRequest<'a> {
    RunRequest {
        dataset,
        threshold: 0.0,
        timeout,
        boolean_tensor: false,
        experiment_path: dir.join("miner.experiment"),
        log_path: dir.join("miner.log"),
        seed: None,
        initial_patterns: None,
    }
}

#[test]
fn test_placeholders_are_substituted_and_optional_ones_dropped() {
    let tmp = TempDir::new().unwrap();
    let dataset = toy_dataset(tmp.path());
    let miner = CommandAlgorithm::new(
        AlgorithmDescriptor::new("miner"),
        "miner",
        ["{dataset}", "-o", "{experiment}", "-u{threshold}", "--seed={seed}", "--max={initial_patterns}"],
    )
    .with_boolean_args(["--boolean"]);

    let mut run = request(dataset.as_ref(), tmp.path(), Duration::from_secs(1));
    let args = miner.render_args(&run);
    assert_eq!(
        args,
        vec![
            tmp.path().join("toy.tensor").display().to_string(),
            "-o".to_string(),
            tmp.path().join("miner.experiment").display().to_string(),
            "-u0.0".to_string(),
        ]
    );

    run.seed = Some(3);
    run.initial_patterns = Some(1000);
    run.boolean_tensor = true;
    let args = miner.render_args(&run);
    assert_eq!(args.first().map(String::as_str), Some("--boolean"));
    assert_eq!(args[args.len() - 2..].to_vec(), vec!["--seed=3".to_string(), "--max=1000".to_string()]);
}

#[cfg(unix)]
mod unix {
    use super::*;
    use tensorbox_core::errors::PipelineError;
    use tensorbox_pipeline::{Algorithm, RunLog, RunOutcome};

    fn shell(script: &str) -> CommandAlgorithm {
        CommandAlgorithm::new(
            AlgorithmDescriptor::new("sh"),
            "sh",
            ["-c", script, "sh", "{experiment}"],
        )
    }

    #[test]
    fn test_completed_run_writes_summary_log() {
        let tmp = TempDir::new().unwrap();
        let dataset = toy_dataset(tmp.path());
        let mut miner = shell(r#"printf '0 0 1.0\n1 1 0.5\n' > "$1"; echo 'Memory (kb): 64'; echo 'done in 0.25s'"#);
        let run = request(dataset.as_ref(), tmp.path(), Duration::from_secs(10));

        let outcome = miner.run(&run).unwrap();

        assert_eq!(
            outcome,
            RunOutcome::Completed {
                experiment_path: run.experiment_path.clone(),
                log_path: run.log_path.clone(),
            }
        );
        let log = RunLog::load(&run.log_path).unwrap().unwrap();
        assert_eq!(log.total_time_secs, 0.25);
        assert_eq!(log.memory_kb, 64);
        assert_eq!(log.patterns, 2);
        assert_eq!(
            fs::read_to_string(&run.log_path).unwrap(),
            "Total time: 0.25s\nMemory (kb): 64\nNb of patterns: 2"
        );
    }

    #[test]
    fn test_slow_miner_times_out() {
        let tmp = TempDir::new().unwrap();
        let dataset = toy_dataset(tmp.path());
        let mut miner = shell("sleep 5");
        let run = request(dataset.as_ref(), tmp.path(), Duration::from_millis(200));

        assert_eq!(miner.run(&run).unwrap(), RunOutcome::TimedOut);
    }

    #[test]
    fn test_non_zero_exit_is_a_process_error() {
        let tmp = TempDir::new().unwrap();
        let dataset = toy_dataset(tmp.path());
        let mut miner = shell("exit 3");
        let run = request(dataset.as_ref(), tmp.path(), Duration::from_secs(10));

        assert!(matches!(miner.run(&run), Err(PipelineError::Process { .. })));
    }
}
