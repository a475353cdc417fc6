use mutant_results::mutants::Mutation;
use mutant_results::{
    ArtifactError, Deferred, DetectionStatus, InvalidArgument, Mutant, MutantExecutionResult,
    Mutator, PositionError, ResultParts, TestLocation,
};
use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};

const SOURCE: &str = "def is_positive(n):\n    return n > 0\n";

fn make_mutant(tests: Vec<TestLocation>) -> Mutant {
    let start = SOURCE.find('>').unwrap();
    let mutation =
        Mutation::locate("src/app.py", Mutator::Boundary, SOURCE, start, start + 1, ">=").unwrap();
    Mutant::new(mutation, Arc::from(SOURCE), tests)
}

fn make_parts(status: DetectionStatus, mutator: Mutator) -> ResultParts {
    ResultParts {
        process_command_line: "pytest tests/test_app.py".into(),
        process_output: "1 failed".into(),
        detection_status: status,
        mutant_diff: Arc::new(Deferred::ready("diff".to_string())),
        mutant_hash: "abc123".into(),
        mutator,
        original_file_path: "src/app.py".into(),
        original_starting_line: 2,
        original_ending_line: 2,
        original_start_file_position: 31,
        original_end_file_position: 32,
        original_code: Arc::new(Deferred::ready("original".to_string())),
        mutated_code: Arc::new(Deferred::ready("mutated".to_string())),
        tests: vec![TestLocation::new("tests/test_app.py", 4)],
    }
}

// --- Construction ---

#[test]
fn every_status_constructs() {
    for status in DetectionStatus::ALL {
        let result = MutantExecutionResult::new(make_parts(status, Mutator::Boundary)).unwrap();
        assert_eq!(result.detection_status(), status);
    }
}

#[test]
fn every_registered_mutator_constructs() {
    for mutator in Mutator::ALL {
        let result =
            MutantExecutionResult::new(make_parts(DetectionStatus::Killed, mutator)).unwrap();
        assert_eq!(result.mutator(), mutator);
        assert_eq!(result.mutator_name(), mutator.as_str());
    }
}

#[test]
fn raw_names_are_validated_before_construction() {
    assert_eq!(
        "survived".parse::<DetectionStatus>().unwrap_err(),
        InvalidArgument::UnknownStatus("survived".into())
    );
    assert_eq!(
        "FooBar".parse::<Mutator>().unwrap_err(),
        InvalidArgument::UnknownMutator("FooBar".into())
    );
}

#[test]
fn inverted_lines_are_rejected() {
    let mut parts = make_parts(DetectionStatus::Killed, Mutator::Boundary);
    parts.original_starting_line = 5;
    parts.original_ending_line = 4;
    let err = MutantExecutionResult::new(parts).unwrap_err();
    assert_eq!(err, InvalidArgument::InvertedLines { start: 5, end: 4 });
}

#[test]
fn inverted_positions_are_rejected() {
    let mut parts = make_parts(DetectionStatus::Killed, Mutator::Boundary);
    parts.original_start_file_position = 40;
    parts.original_end_file_position = 39;
    let err = MutantExecutionResult::new(parts).unwrap_err();
    assert_eq!(err, InvalidArgument::InvertedPositions { start: 40, end: 39 });
}

#[test]
fn empty_span_is_allowed() {
    let mut parts = make_parts(DetectionStatus::Killed, Mutator::Boundary);
    parts.original_end_file_position = parts.original_start_file_position;
    assert!(MutantExecutionResult::new(parts).is_ok());
}

#[test]
fn accessors_round_trip_constructor_values() {
    let result =
        MutantExecutionResult::new(make_parts(DetectionStatus::Escaped, Mutator::Arithmetic))
            .unwrap();

    assert_eq!(result.process_command_line(), "pytest tests/test_app.py");
    assert_eq!(result.process_output(), "1 failed");
    assert_eq!(result.detection_status(), DetectionStatus::Escaped);
    assert_eq!(result.mutant_diff().unwrap(), "diff");
    assert_eq!(result.mutant_hash(), "abc123");
    assert_eq!(result.mutator_name(), "arith");
    assert_eq!(result.original_file_path().as_str(), "src/app.py");
    assert_eq!(result.original_starting_line(), 2);
    assert_eq!(result.original_ending_line(), 2);
    assert_eq!(result.original_start_file_position(), 31);
    assert_eq!(result.original_end_file_position(), 32);
    assert_eq!(result.original_code().unwrap(), "original");
    assert_eq!(result.mutated_code().unwrap(), "mutated");
    assert_eq!(result.tests(), &[TestLocation::new("tests/test_app.py", 4)]);
}

// --- Deferred accessors ---

#[test]
fn diff_is_computed_once_across_reads() {
    let calls = Arc::new(AtomicUsize::new(0));
    let counter = Arc::clone(&calls);
    let mut parts = make_parts(DetectionStatus::Escaped, Mutator::Boundary);
    parts.mutant_diff = Arc::new(Deferred::new(move || {
        counter.fetch_add(1, Ordering::SeqCst);
        Ok("--- Original\n+++ New\n".to_string())
    }));

    let result = MutantExecutionResult::new(parts).unwrap();
    assert_eq!(calls.load(Ordering::SeqCst), 0);
    assert_eq!(result.mutant_diff().unwrap(), result.mutant_diff().unwrap());
    assert_eq!(calls.load(Ordering::SeqCst), 1);
}

#[test]
fn failing_artifact_does_not_affect_other_fields() {
    let mut parts = make_parts(DetectionStatus::Escaped, Mutator::Boundary);
    parts.mutated_code = Arc::new(Deferred::new(|| Err(ArtifactError::Failed("bad ast".into()))));

    let result = MutantExecutionResult::new(parts).unwrap();
    assert_eq!(
        result.mutated_code().unwrap_err(),
        ArtifactError::Failed("bad ast".into())
    );
    assert_eq!(result.original_code().unwrap(), "original");
    assert_eq!(result.mutant_diff().unwrap(), "diff");
}

#[test]
fn results_can_be_read_from_several_threads() {
    let result = MutantExecutionResult::create_from_process(
        &make_mutant(vec![]),
        "pytest",
        "",
        DetectionStatus::Escaped,
    )
    .unwrap();

    std::thread::scope(|s| {
        for _ in 0..4 {
            s.spawn(|| {
                assert!(result.mutant_diff().unwrap().contains("+    return n >= 0"));
            });
        }
    });
}

// --- Columns ---

#[test]
fn columns_are_computed_from_original_source() {
    let result = MutantExecutionResult::create_from_non_covered_mutant(&make_mutant(vec![])).unwrap();
    // "    return n > 0": '>' is the 14th byte of line 2
    assert_eq!(result.original_starting_column(SOURCE).unwrap(), 14);
    assert_eq!(result.original_ending_column(SOURCE).unwrap(), 15);
}

#[test]
fn column_against_shorter_source_fails() {
    let result = MutantExecutionResult::create_from_non_covered_mutant(&make_mutant(vec![])).unwrap();
    let err = result.original_starting_column("x").unwrap_err();
    assert!(matches!(err, PositionError::OutOfBounds { len: 1, .. }));
}

// --- Factories ---

fn assert_copied_from_mutant(result: &MutantExecutionResult, mutant: &Mutant) {
    let mutation = mutant.mutation();
    assert_eq!(result.process_command_line(), "");
    assert_eq!(result.process_output(), "");
    assert_eq!(result.mutant_hash(), mutation.hash());
    assert_eq!(result.mutator(), mutation.mutator);
    assert_eq!(result.original_file_path(), mutation.original_file_path.as_path());
    assert_eq!(result.original_starting_line(), mutation.original_starting_line);
    assert_eq!(result.original_ending_line(), mutation.original_ending_line);
    assert_eq!(
        result.original_start_file_position(),
        mutation.original_start_file_position
    );
    assert_eq!(
        result.original_end_file_position(),
        mutation.original_end_file_position
    );
    assert_eq!(result.tests(), mutant.tests());
    assert_eq!(result.mutant_diff().unwrap(), mutant.diff().get().unwrap());
    assert_eq!(
        result.original_code().unwrap(),
        mutant.pretty_printed_original_code().get().unwrap()
    );
    assert_eq!(result.mutated_code().unwrap(), mutant.mutated_code().get().unwrap());
}

#[test]
fn non_covered_factory() {
    let mutant = make_mutant(vec![]);
    let result = MutantExecutionResult::create_from_non_covered_mutant(&mutant).unwrap();
    assert_eq!(result.detection_status(), DetectionStatus::NotCovered);
    assert_copied_from_mutant(&result, &mutant);
}

#[test]
fn time_skipped_factory() {
    let mutant = make_mutant(vec![TestLocation::new("tests/test_app.py", 3)]);
    let result = MutantExecutionResult::create_from_time_skipped_mutant(&mutant).unwrap();
    assert_eq!(result.detection_status(), DetectionStatus::Skipped);
    assert_copied_from_mutant(&result, &mutant);
}

#[test]
fn ignored_factory() {
    let mutant = make_mutant(vec![TestLocation::new("tests/test_app.py", 3)]);
    let result = MutantExecutionResult::create_from_ignored_mutant(&mutant).unwrap();
    assert_eq!(result.detection_status(), DetectionStatus::Ignored);
    assert_copied_from_mutant(&result, &mutant);
}

#[test]
fn factory_shares_artifacts_with_mutant() {
    let mutant = make_mutant(vec![]);
    let result = MutantExecutionResult::create_from_ignored_mutant(&mutant).unwrap();

    result.mutant_diff().unwrap();
    assert!(mutant.diff().is_evaluated());
}

#[test]
fn factory_rejects_inverted_mutation_range() {
    let mut mutation = make_mutant(vec![]).mutation().clone();
    mutation.original_starting_line = 3;
    mutation.original_ending_line = 2;
    let mutant = Mutant::new(mutation, Arc::from(SOURCE), vec![]);

    assert!(MutantExecutionResult::create_from_non_covered_mutant(&mutant).is_err());
}

#[test]
fn process_path_keeps_command_and_output() {
    let mutant = make_mutant(vec![TestLocation::new("tests/test_app.py", 3).with_method("test_zero")]);
    let result = MutantExecutionResult::create_from_process(
        &mutant,
        "pytest tests/test_app.py",
        "FAILED test_zero",
        DetectionStatus::Killed,
    )
    .unwrap();

    assert_eq!(result.process_command_line(), "pytest tests/test_app.py");
    assert_eq!(result.process_output(), "FAILED test_zero");
    assert_eq!(result.detection_status(), DetectionStatus::Killed);
    assert_eq!(result.tests()[0].method.as_deref(), Some("test_zero"));
}

#[test]
fn process_path_rejects_never_executed_statuses() {
    let mutant = make_mutant(vec![]);
    for status in [
        DetectionStatus::NotCovered,
        DetectionStatus::Skipped,
        DetectionStatus::Ignored,
    ] {
        let err = MutantExecutionResult::create_from_process(&mutant, "pytest", "", status)
            .unwrap_err();
        assert!(matches!(err, InvalidArgument::StatusNotAllowed { status: s, .. } if s == status));
    }
}

#[test]
fn tests_keep_insertion_order() {
    let tests = vec![
        TestLocation::new("tests/b.py", 9),
        TestLocation::new("tests/a.py", 1),
        TestLocation::new("tests/b.py", 2),
    ];
    let result =
        MutantExecutionResult::create_from_time_skipped_mutant(&make_mutant(tests.clone())).unwrap();
    assert_eq!(result.tests(), tests.as_slice());
}
