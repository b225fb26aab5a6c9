//! Tests for loading, deduplicating and ranking experiments.

use std::collections::BTreeSet;

use tensorbox_core::dataset::{Dataset, LabelCodec, TensorDataset};
use tensorbox_core::errors::{PatternError, PipelineError};
use tensorbox_core::pattern::{Experiment, Pattern};
use tensorbox_core::tensor::DenseTensor;

fn tempdir() -> tempfile::TempDir {
    tempfile::TempDir::new().unwrap()
}

/// 3x3 matrix with a dense top-left block.
fn dataset() -> TensorDataset {
    let tensor = DenseTensor::from_vec(
        &[3, 3],
        vec![
            1.0, 1.0, 0.0, //
            1.0, 1.0, 0.0, //
            0.0, 0.0, 0.5,
        ],
    )
    .unwrap();
    TensorDataset::new("toy.tensor", tensor)
}

#[test]
fn test_malformed_lines_are_skipped() {
    let dir = tempdir();
    let path = dir.path().join("run.experiment");
    std::fs::write(&path, "0,1 0,1 1.0\n1,2 3\n\n2 2 0.5\n").unwrap();

    let result = Experiment::load(&path, 2).unwrap();
    assert_eq!(result.error_count(), 1);
    assert!(matches!(
        result.errors[0],
        PipelineError::Pattern(PatternError::Malformed { .. })
    ));
    let experiment = result.into_data();
    assert_eq!(experiment.len(), 2);
    assert_eq!(experiment.path(), Some(path.as_path()));
}

#[test]
fn test_all_lines_malformed_is_an_error() {
    let dir = tempdir();
    let path = dir.path().join("run.experiment");
    std::fs::write(&path, "garbage\nmore garbage\n").unwrap();

    let err = Experiment::load(&path, 2).unwrap_err();
    assert!(matches!(err, PatternError::AllLinesMalformed { count: 2, .. }));
}

#[test]
fn test_empty_file_is_an_empty_experiment() {
    let dir = tempdir();
    let path = dir.path().join("run.experiment");
    std::fs::write(&path, "").unwrap();
    assert!(Experiment::load(&path, 3).unwrap().into_data().is_empty());
}

#[test]
fn test_missing_file_is_io_error() {
    let dir = tempdir();
    let err = Experiment::load(&dir.path().join("absent"), 2).unwrap_err();
    assert!(matches!(err, PatternError::Io { .. }));
}

#[test]
fn test_delete_equal_patterns_keeps_first_occurrence() {
    let text = "1,0 2 0.5\n3 3 0.9\n0,1 2 0.5000001\n0,1 2 0.8\n";
    let mut experiment = Experiment::parse_str(text, 2).into_data();

    assert_eq!(experiment.delete_equal_patterns(), 1);
    let densities: Vec<f64> = experiment.patterns().iter().map(Pattern::density).collect();
    assert_eq!(densities, vec![0.5, 0.9, 0.8]);

    assert_eq!(experiment.delete_equal_patterns(), 0);
}

#[test]
fn test_sort_patterns_uses_recomputed_density() {
    // Stored densities are deliberately wrong.
    let text = "2 2 1.0\n0,1 0,1 0.0\n0,2 0,2 0.3\n";
    let mut experiment = Experiment::parse_str(text, 2).into_data();

    let report = experiment.sort_patterns(&dataset()).unwrap();
    assert_eq!(report.sorted, 3);
    assert_eq!(report.excluded_degenerate, 0);

    let densities: Vec<f64> = experiment.patterns().iter().map(Pattern::density).collect();
    assert_eq!(densities, vec![1.0, 0.5, 0.375]);
    assert_eq!(experiment.patterns()[0].tuples_string(), "0,1 0,1");
}

#[test]
fn test_sort_patterns_is_stable_and_idempotent() {
    // Both patterns have recomputed density 1.0.
    let text = "1 1 0.2\n0 0 0.9\n";
    let mut experiment = Experiment::parse_str(text, 2).into_data();
    experiment.sort_patterns(&dataset()).unwrap();
    assert_eq!(experiment.patterns()[0].tuples_string(), "1 1");

    let once: Vec<String> = experiment.patterns().iter().map(Pattern::canonical_string).collect();
    experiment.sort_patterns(&dataset()).unwrap();
    let twice: Vec<String> = experiment.patterns().iter().map(Pattern::canonical_string).collect();
    assert_eq!(once, twice);
}

#[test]
fn test_sort_patterns_excludes_degenerate() {
    let degenerate = Pattern::new(vec![BTreeSet::new(), [0].into()], 1.0);
    let dense = Pattern::new(vec![[0].into(), [0].into()], 0.1);
    let mut experiment = Experiment::new(2, vec![degenerate, dense]);

    let report = experiment.sort_patterns(&dataset()).unwrap();
    assert_eq!(report.excluded_degenerate, 1);
    assert_eq!(experiment.len(), 1);
    assert_eq!(experiment.patterns()[0].density(), 1.0);
}

#[test]
fn test_sort_patterns_out_of_bounds_leaves_experiment_untouched() {
    let mut experiment = Experiment::parse_str("0 0 0.1\n7 0 0.2\n", 2).into_data();
    assert!(experiment.sort_patterns(&dataset()).is_err());
    assert_eq!(experiment.patterns()[0].density(), 0.1);
    assert_eq!(experiment.len(), 2);
}

#[test]
fn test_write_then_load_preserves_order() {
    let dir = tempdir();
    let path = dir.path().join("sorted.experiment");
    let experiment = Experiment::parse_str("2 2 0.25\n0,1 0 1\n", 2).into_data();
    experiment.write_to(&path).unwrap();

    let text = std::fs::read_to_string(&path).unwrap();
    assert_eq!(text, "2 2 0.250000\n0,1 0 1.000000\n");
}

#[test]
fn test_load_mapped_encodes_labels() {
    let codec = LabelCodec::fit([["a", "x"], ["b", "y"], ["c", "x"]]);
    let tensor = DenseTensor::zeros(&[3, 2]);
    let dataset = TensorDataset::new("labelled", tensor).with_codec(codec).unwrap();

    let dir = tempdir();
    let path = dir.path().join("decoded.experiment");
    std::fs::write(&path, "a,c x 0.5\nzzz y 0.1\n").unwrap();

    let result = Experiment::load_mapped(&path, 2, |line| dataset.encode_pattern(line)).unwrap();
    assert_eq!(result.error_count(), 1);
    let experiment = result.into_data();
    assert_eq!(experiment.patterns()[0].tuples_string(), "0,2 0");
}

#[test]
fn test_best_jaccard() {
    let experiment = Experiment::parse_str("0,1 0 1.0\n5 5 1.0\n", 2).into_data();
    let probe = Pattern::parse("0,1 0 0.3", 2).unwrap();
    assert_eq!(experiment.best_jaccard(&probe).unwrap(), 1.0);

    let empty = Experiment::new(2, Vec::new());
    assert_eq!(empty.best_jaccard(&probe).unwrap(), 0.0);
}
