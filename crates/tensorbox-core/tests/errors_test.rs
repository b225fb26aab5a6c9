//! Tests for the tensorbox error taxonomy.

use std::collections::HashSet;

use tensorbox_core::errors::error_code::{self, TensorboxErrorCode};
use tensorbox_core::errors::*;

#[test]
fn test_every_error_has_a_code() {
    let pattern = PatternError::Malformed {
        line: "1,2 3".into(),
        reason: "expected 3 fields, found 2".into(),
    };
    assert_eq!(pattern.error_code(), error_code::MALFORMED_PATTERN);

    let dataset = DatasetError::UnsupportedDimension {
        requested: 5,
        tensor: 3,
    };
    assert_eq!(dataset.error_code(), error_code::UNSUPPORTED_DIMENSION);

    let evaluation = EvaluationError::NoTrials;
    assert_eq!(evaluation.error_code(), error_code::NO_TRIALS);

    let config = ConfigError::FileNotFound {
        path: "/tmp".into(),
    };
    assert_eq!(config.error_code(), error_code::CONFIG_ERROR);

    let pipeline = PipelineError::UnsupportedConfiguration {
        name: "weather".into(),
    };
    assert_eq!(pipeline.error_code(), error_code::UNSUPPORTED_CONFIGURATION);
}

#[test]
fn test_from_conversions_keep_inner_code() {
    let pipeline: PipelineError = PatternError::DimensionMismatch { left: 2, right: 3 }.into();
    assert!(matches!(pipeline, PipelineError::Pattern(_)));
    assert_eq!(pipeline.error_code(), error_code::DIMENSION_MISMATCH);

    let evaluation: EvaluationError = DatasetError::Build("boom".into()).into();
    let pipeline: PipelineError = evaluation.into();
    assert_eq!(pipeline.error_code(), error_code::DATASET_BUILD_FAILED);
}

#[test]
fn test_fatal_classification() {
    assert!(PipelineError::UnsupportedConfiguration { name: "x".into() }.is_fatal());
    assert!(PipelineError::DatasetBuild("missing raw data".into()).is_fatal());
    assert!(!PipelineError::AlgorithmTimeout {
        algorithm: "nclusterbox".into(),
        threshold: 0.0,
    }
    .is_fatal());
    assert!(!PipelineError::Pattern(PatternError::Malformed {
        line: String::new(),
        reason: String::new(),
    })
    .is_fatal());
}

#[test]
fn test_report_string_format() {
    let err = PipelineError::AlgorithmTimeout {
        algorithm: "getf".into(),
        threshold: 0.5,
    };
    assert_eq!(
        err.report_string(),
        "[ALGORITHM_TIMEOUT] Algorithm getf timed out at threshold 0.5"
    );
}

#[test]
fn test_error_codes_are_distinct() {
    let codes = [
        error_code::MALFORMED_PATTERN,
        error_code::DIMENSION_MISMATCH,
        error_code::EMPTY_EXPERIMENT,
        error_code::IO_ERROR,
        error_code::UNSUPPORTED_DIMENSION,
        error_code::DATASET_ERROR,
        error_code::DATASET_BUILD_FAILED,
        error_code::UNKNOWN_LABEL,
        error_code::NO_TRIALS,
        error_code::CONFIG_ERROR,
        error_code::UNSUPPORTED_CONFIGURATION,
        error_code::ALGORITHM_TIMEOUT,
        error_code::PROCESS_ERROR,
        error_code::PIPELINE_ERROR,
    ];
    let unique: HashSet<_> = codes.iter().collect();
    assert_eq!(unique.len(), codes.len());
}

#[test]
fn test_pipeline_result_collects_non_fatal_errors() {
    let mut result: PipelineResult<Vec<u32>> = PipelineResult::new(vec![1, 2]);
    assert!(result.is_clean());
    result.add_error(PatternError::Malformed {
        line: "x".into(),
        reason: "bad".into(),
    });
    assert_eq!(result.error_count(), 1);
    assert_eq!(result.into_data(), vec![1, 2]);
}
