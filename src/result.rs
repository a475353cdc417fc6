use std::sync::Arc;

use camino::{Utf8Path, Utf8PathBuf};
use tracing::debug;

use crate::deferred::Deferred;
use crate::error::{ArtifactError, InvalidArgument, PositionError};
use crate::mutants::Mutant;
use crate::operators::Mutator;
use crate::position;
use crate::status::DetectionStatus;
use crate::test_location::TestLocation;

/// Every attribute a result is built from.
#[derive(Debug, Clone)]
pub struct ResultParts {
    pub process_command_line: String,
    pub process_output: String,
    pub detection_status: DetectionStatus,
    pub mutant_diff: Arc<Deferred<String>>,
    pub mutant_hash: String,
    pub mutator: Mutator,
    pub original_file_path: Utf8PathBuf,
    pub original_starting_line: usize,
    pub original_ending_line: usize,
    pub original_start_file_position: usize,
    pub original_end_file_position: usize,
    pub original_code: Arc<Deferred<String>>,
    pub mutated_code: Arc<Deferred<String>>,
    pub tests: Vec<TestLocation>,
}

/// The recorded outcome of one mutant. Immutable once built.
#[derive(Debug, Clone)]
pub struct MutantExecutionResult {
    process_command_line: String,
    process_output: String,
    detection_status: DetectionStatus,
    mutant_diff: Arc<Deferred<String>>,
    mutant_hash: String,
    mutator: Mutator,
    original_file_path: Utf8PathBuf,
    original_starting_line: usize,
    original_ending_line: usize,
    original_start_file_position: usize,
    original_end_file_position: usize,
    original_code: Arc<Deferred<String>>,
    mutated_code: Arc<Deferred<String>>,
    tests: Vec<TestLocation>,
}

impl MutantExecutionResult {
    pub fn new(parts: ResultParts) -> Result<Self, InvalidArgument> {
        if parts.original_starting_line > parts.original_ending_line {
            return Err(InvalidArgument::InvertedLines {
                start: parts.original_starting_line,
                end: parts.original_ending_line,
            });
        }
        if parts.original_start_file_position > parts.original_end_file_position {
            return Err(InvalidArgument::InvertedPositions {
                start: parts.original_start_file_position,
                end: parts.original_end_file_position,
            });
        }

        Ok(MutantExecutionResult {
            process_command_line: parts.process_command_line,
            process_output: parts.process_output,
            detection_status: parts.detection_status,
            mutant_diff: parts.mutant_diff,
            mutant_hash: parts.mutant_hash,
            mutator: parts.mutator,
            original_file_path: parts.original_file_path,
            original_starting_line: parts.original_starting_line,
            original_ending_line: parts.original_ending_line,
            original_start_file_position: parts.original_start_file_position,
            original_end_file_position: parts.original_end_file_position,
            original_code: parts.original_code,
            mutated_code: parts.mutated_code,
            tests: parts.tests,
        })
    }

    /// Result of a mutant that went through the test process.
    pub fn create_from_process(
        mutant: &Mutant,
        process_command_line: impl Into<String>,
        process_output: impl Into<String>,
        detection_status: DetectionStatus,
    ) -> Result<Self, InvalidArgument> {
        if !detection_status.is_executed() {
            return Err(InvalidArgument::StatusNotAllowed {
                status: detection_status,
                path: "an executed test process",
            });
        }
        Self::new(parts_from_mutant(
            mutant,
            process_command_line.into(),
            process_output.into(),
            detection_status,
        ))
    }

    pub fn create_from_non_covered_mutant(mutant: &Mutant) -> Result<Self, InvalidArgument> {
        Self::create_from_mutant(mutant, DetectionStatus::NotCovered)
    }

    pub fn create_from_time_skipped_mutant(mutant: &Mutant) -> Result<Self, InvalidArgument> {
        Self::create_from_mutant(mutant, DetectionStatus::Skipped)
    }

    pub fn create_from_ignored_mutant(mutant: &Mutant) -> Result<Self, InvalidArgument> {
        Self::create_from_mutant(mutant, DetectionStatus::Ignored)
    }

    fn create_from_mutant(
        mutant: &Mutant,
        detection_status: DetectionStatus,
    ) -> Result<Self, InvalidArgument> {
        debug!(
            file = %mutant.original_file_path(),
            mutator = %mutant.mutation().mutator,
            status = %detection_status,
            "mutant not executed"
        );
        Self::new(parts_from_mutant(
            mutant,
            String::new(),
            String::new(),
            detection_status,
        ))
    }

    pub fn process_command_line(&self) -> &str {
        &self.process_command_line
    }

    pub fn process_output(&self) -> &str {
        &self.process_output
    }

    pub fn detection_status(&self) -> DetectionStatus {
        self.detection_status
    }

    /// Forces the diff on first call.
    pub fn mutant_diff(&self) -> Result<&str, ArtifactError> {
        self.mutant_diff.get().map(String::as_str)
    }

    pub fn mutant_hash(&self) -> &str {
        &self.mutant_hash
    }

    pub fn mutator(&self) -> Mutator {
        self.mutator
    }

    pub fn mutator_name(&self) -> &'static str {
        self.mutator.as_str()
    }

    pub fn original_file_path(&self) -> &Utf8Path {
        &self.original_file_path
    }

    pub fn original_starting_line(&self) -> usize {
        self.original_starting_line
    }

    pub fn original_ending_line(&self) -> usize {
        self.original_ending_line
    }

    pub fn original_start_file_position(&self) -> usize {
        self.original_start_file_position
    }

    pub fn original_end_file_position(&self) -> usize {
        self.original_end_file_position
    }

    /// `original_code` must be the full, unmutated content of the original file.
    pub fn original_starting_column(&self, original_code: &str) -> Result<usize, PositionError> {
        position::to_column(original_code, self.original_start_file_position)
    }

    pub fn original_ending_column(&self, original_code: &str) -> Result<usize, PositionError> {
        position::to_column(original_code, self.original_end_file_position)
    }

    pub fn original_code(&self) -> Result<&str, ArtifactError> {
        self.original_code.get().map(String::as_str)
    }

    pub fn mutated_code(&self) -> Result<&str, ArtifactError> {
        self.mutated_code.get().map(String::as_str)
    }

    /// Covering tests in the order they were reported.
    pub fn tests(&self) -> &[TestLocation] {
        &self.tests
    }
}

fn parts_from_mutant(
    mutant: &Mutant,
    process_command_line: String,
    process_output: String,
    detection_status: DetectionStatus,
) -> ResultParts {
    let mutation = mutant.mutation();
    ResultParts {
        process_command_line,
        process_output,
        detection_status,
        mutant_diff: Arc::clone(mutant.diff()),
        mutant_hash: mutation.hash(),
        mutator: mutation.mutator,
        original_file_path: mutation.original_file_path.clone(),
        original_starting_line: mutation.original_starting_line,
        original_ending_line: mutation.original_ending_line,
        original_start_file_position: mutation.original_start_file_position,
        original_end_file_position: mutation.original_end_file_position,
        original_code: Arc::clone(mutant.pretty_printed_original_code()),
        mutated_code: Arc::clone(mutant.mutated_code()),
        tests: mutant.tests().to_vec(),
    }
}
