use mutant_results::metrics::Metrics;
use mutant_results::{Deferred, DetectionStatus, MutantExecutionResult, Mutator, ResultParts};
use std::sync::Arc;

fn result_with(status: DetectionStatus) -> MutantExecutionResult {
    MutantExecutionResult::new(ResultParts {
        process_command_line: String::new(),
        process_output: String::new(),
        detection_status: status,
        mutant_diff: Arc::new(Deferred::ready(String::new())),
        mutant_hash: "h".into(),
        mutator: Mutator::Boundary,
        original_file_path: "src/app.py".into(),
        original_starting_line: 1,
        original_ending_line: 1,
        original_start_file_position: 0,
        original_end_file_position: 1,
        original_code: Arc::new(Deferred::ready(String::new())),
        mutated_code: Arc::new(Deferred::ready(String::new())),
        tests: vec![],
    })
    .unwrap()
}

#[test]
fn counts_each_status() {
    let results: Vec<_> = DetectionStatus::ALL.into_iter().map(result_with).collect();
    let metrics = Metrics::from_results(&results);
    for status in DetectionStatus::ALL {
        assert_eq!(metrics.count(status), 1, "{status}");
    }
}

#[test]
fn skipped_and_ignored_do_not_count_toward_total() {
    let mut metrics = Metrics::default();
    metrics.record(DetectionStatus::Skipped);
    metrics.record(DetectionStatus::Ignored);
    metrics.record(DetectionStatus::Killed);
    assert_eq!(metrics.total(), 1);
    assert_eq!(metrics.score(), 1.0);
}

#[test]
fn scores() {
    let mut metrics = Metrics::default();
    for status in [
        DetectionStatus::Killed,
        DetectionStatus::Killed,
        DetectionStatus::TimedOut,
        DetectionStatus::Escaped,
        DetectionStatus::NotCovered,
    ] {
        metrics.record(status);
    }

    assert_eq!(metrics.total(), 5);
    assert_eq!(metrics.detected(), 3);
    assert_eq!(metrics.covered(), 4);
    assert!((metrics.score() - 0.6).abs() < 1e-9);
    assert!((metrics.covered_score() - 0.75).abs() < 1e-9);
    assert!((metrics.code_coverage() - 0.8).abs() < 1e-9);
}

#[test]
fn empty_run_scores() {
    let metrics = Metrics::default();
    assert_eq!(metrics.score(), 1.0);
    assert_eq!(metrics.covered_score(), 1.0);
    assert_eq!(metrics.code_coverage(), 0.0);
}

#[test]
fn only_uncovered_mutants() {
    let mut metrics = Metrics::default();
    metrics.record(DetectionStatus::NotCovered);
    assert_eq!(metrics.score(), 0.0);
    assert_eq!(metrics.covered_score(), 1.0);
    assert_eq!(metrics.code_coverage(), 0.0);
}
