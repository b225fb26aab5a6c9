//! Tests for the RSS evolution engine.

use std::collections::BTreeSet;

use tensorbox_analysis::quality::{calculate_model_rss, rss_evolution, EvolutionOptions, RssPoint};
use tensorbox_core::dataset::{Dataset, TensorDataset};
use tensorbox_core::errors::{DatasetError, EvaluationError};
use tensorbox_core::pattern::Pattern;
use tensorbox_core::tensor::DenseTensor;

fn square(x: f64) -> f64 {
    x * x
}

fn parse(line: &str, dimension: usize) -> Pattern {
    Pattern::parse(line, dimension).unwrap()
}

/// 3x3x3 zeros except (0,0,0) = 1.0.
fn cube() -> TensorDataset {
    let tensor = DenseTensor::from_entries(&[3, 3, 3], [([0usize, 0, 0], 1.0)]).unwrap();
    TensorDataset::new("cube", tensor)
}

/// 2x2 matrix `[[0.2, 0.9], [0.4, 0.1]]`.
fn matrix() -> TensorDataset {
    let tensor = DenseTensor::from_vec(&[2, 2], vec![0.2, 0.9, 0.4, 0.1]).unwrap();
    TensorDataset::new("matrix", tensor)
}

/// Full RSS of an explicit prediction grid, for cross-checking.
fn brute_force_rss(dataset: &dyn Dataset, prediction: &[f64]) -> f64 {
    dataset
        .matrix()
        .values()
        .iter()
        .zip(prediction)
        .map(|(actual, predicted)| square(actual - predicted))
        .sum()
}

#[test]
fn test_single_cell_recovery_is_analytic() {
    let dataset = cube();
    let lambda0 = dataset.density();
    assert!((lambda0 - 1.0 / 27.0).abs() < 1e-12);

    let pattern = parse("0 0 0 1.0", 3);
    let model = calculate_model_rss(&dataset, &[pattern.clone()]).unwrap();
    let expected = dataset.empty_model_rss() - square(1.0 - lambda0) + square(1.0 - 1.0);
    assert!((model.rss - expected).abs() < 1e-12);

    let curve = rss_evolution(&dataset, &[pattern], EvolutionOptions::default()).unwrap();
    assert_eq!(curve.len(), 1);
    assert!((curve[0].rss - expected).abs() < 1e-12);
    assert_eq!(curve[0].patterns, 1);
}

#[test]
fn test_overlap_uses_maximum_prediction() {
    let dataset = matrix();
    let lambda0 = dataset.density();
    // Shared cell (0,1) is covered by both.
    let low = parse("0 0,1 0.3", 2);
    let high = parse("0,1 1 0.7", 2);

    for order in [vec![low.clone(), high.clone()], vec![high.clone(), low.clone()]] {
        let model = calculate_model_rss(&dataset, &order).unwrap();
        let expected = brute_force_rss(&dataset, &[0.3, 0.7, lambda0, 0.7]);
        assert!((model.rss - expected).abs() < 1e-12, "order {order:?}");
    }
}

#[test]
fn test_first_prediction_replaces_lambda0_even_when_lower() {
    let dataset = matrix();
    let lambda0 = dataset.density();
    assert!((lambda0 - 0.4).abs() < 1e-12);

    let below = parse("1 1 0.05", 2);
    let expected = brute_force_rss(&dataset, &[lambda0, lambda0, lambda0, 0.05]);
    let model = calculate_model_rss(&dataset, &[below.clone()]).unwrap();
    assert!((model.rss - expected).abs() < 1e-12);

    let curve = rss_evolution(&dataset, &[below], EvolutionOptions::default()).unwrap();
    assert!((curve[0].rss - expected).abs() < 1e-12);
}

#[test]
fn test_curve_points_match_brute_force() {
    let dataset = matrix();
    let lambda0 = dataset.density();
    let patterns = vec![parse("0 0,1 0.3", 2), parse("0,1 1 0.7", 2), parse("1 0 0.4", 2)];

    let curve = rss_evolution(&dataset, &patterns, EvolutionOptions::default()).unwrap();
    let grids = [
        [0.3, 0.3, lambda0, lambda0],
        [0.3, 0.7, lambda0, 0.7],
        [0.3, 0.7, 0.4, 0.7],
    ];
    assert_eq!(curve.len(), 3);
    for (point, grid) in curve.iter().zip(grids) {
        assert!((point.rss - brute_force_rss(&dataset, &grid)).abs() < 1e-12);
    }
    assert_eq!(
        curve.iter().map(|p| p.patterns).collect::<Vec<_>>(),
        vec![1, 2, 3]
    );
}

#[test]
fn test_endpoint_equals_last_point_of_uncapped_curve() {
    let dataset = cube();
    let patterns = vec![
        parse("0,1 0 0,2 0.5", 3),
        parse("0 0,1,2 0 0.9", 3),
        parse("2 2 2 0.1", 3),
    ];
    let curve = rss_evolution(
        &dataset,
        &patterns,
        EvolutionOptions {
            max_patterns: 10,
            include_empty_model: false,
        },
    )
    .unwrap();
    let model = calculate_model_rss(&dataset, &patterns).unwrap();
    let last = curve.last().unwrap();
    assert!((last.rss - model.rss).abs() < 1e-12);
    assert_eq!(last.patterns, model.patterns_used);
}

#[test]
fn test_empty_list_with_empty_model_point() {
    let dataset = cube();
    let options = EvolutionOptions {
        max_patterns: 20,
        include_empty_model: true,
    };
    let curve = rss_evolution(&dataset, &[], options).unwrap();
    assert_eq!(
        curve,
        vec![RssPoint {
            rss: dataset.empty_model_rss(),
            patterns: 0
        }]
    );

    let bare = rss_evolution(&dataset, &[], EvolutionOptions::default()).unwrap();
    assert!(bare.is_empty());
}

#[test]
fn test_degenerate_patterns_are_skipped() {
    let dataset = cube();
    let degenerate = Pattern::new(vec![BTreeSet::new(), [0].into(), [0].into()], 1.0);
    assert!(degenerate.is_degenerate());
    let good = parse("0 0 0 1.0", 3);

    let curve = rss_evolution(
        &dataset,
        &[degenerate.clone(), good.clone()],
        EvolutionOptions::default(),
    )
    .unwrap();
    assert_eq!(curve.len(), 1);
    assert_eq!(curve[0].patterns, 1);
    assert!(curve[0].rss.is_finite());

    let model = calculate_model_rss(&dataset, &[degenerate]).unwrap();
    assert_eq!(model.patterns_used, 0);
    assert_eq!(model.rss, dataset.empty_model_rss());
}

#[test]
fn test_cap_limits_points() {
    let dataset = cube();
    let patterns: Vec<Pattern> = (0..3)
        .flat_map(|i| (0..3).map(move |j| parse(&format!("{i} {j} 0 0.5"), 3)))
        .collect();
    let options = EvolutionOptions {
        max_patterns: 4,
        include_empty_model: true,
    };
    let curve = rss_evolution(&dataset, &patterns, options).unwrap();
    assert_eq!(curve.len(), 5);
    assert_eq!(curve.last().unwrap().patterns, 4);
}

#[test]
fn test_out_of_bounds_pattern_is_an_error() {
    let dataset = matrix();
    let err = calculate_model_rss(&dataset, &[parse("0 5 0.5", 2)]).unwrap_err();
    assert!(matches!(
        err,
        EvaluationError::Dataset(DatasetError::IndexOutOfBounds { .. })
    ));
}
