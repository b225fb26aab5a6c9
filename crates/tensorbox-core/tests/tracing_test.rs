//! Tests for the tensorbox tracing setup.

use std::sync::Mutex;

use tensorbox_core::pattern::Experiment;
use tensorbox_core::tracing::init_tracing;

/// Serializes tests that touch `TENSORBOX_LOG`.
static TRACING_MUTEX: Mutex<()> = Mutex::new(());

#[test]
fn test_debug_filter_is_accepted() {
    let _lock = TRACING_MUTEX.lock().unwrap();
    std::env::set_var("TENSORBOX_LOG", "debug");
    init_tracing();
    std::env::remove_var("TENSORBOX_LOG");
}

#[test]
fn test_init_tracing_idempotent() {
    let _lock = TRACING_MUTEX.lock().unwrap();
    init_tracing();
    init_tracing();
    init_tracing();
}

#[test]
fn test_invalid_filter_falls_back_to_default() {
    let _lock = TRACING_MUTEX.lock().unwrap();
    std::env::set_var("TENSORBOX_LOG", "[[not a filter");
    init_tracing();
    std::env::remove_var("TENSORBOX_LOG");
}

#[test]
fn test_dedup_reports_removed_count_under_subscriber() {
    let _lock = TRACING_MUTEX.lock().unwrap();
    std::env::set_var("TENSORBOX_LOG", "debug");
    init_tracing();
    std::env::remove_var("TENSORBOX_LOG");

    let mut experiment = Experiment::parse_str("0 0 0.5\n0 0 0.5\n1 1 0.2\n", 2).into_data();
    assert_eq!(experiment.delete_equal_patterns(), 1);
    assert_eq!(experiment.to_text(), "0 0 0.500000\n1 1 0.200000\n");
}
