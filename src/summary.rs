use camino::Utf8Path;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::SummaryError;
use crate::metrics::Metrics;
use crate::result::MutantExecutionResult;
use crate::status::DetectionStatus;
use crate::test_location::TestLocation;

/// Scores plus the escaped mutants a reporter shows in detail.
#[derive(Debug, Serialize, Deserialize)]
pub struct RunSummary {
    pub score: f64,
    pub covered_score: f64,
    pub metrics: Metrics,
    pub escaped_mutants: Vec<EscapedMutant>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct EscapedMutant {
    pub ref_id: String,
    pub hash: String,
    pub file: String,
    pub line: usize,
    /// `None` when the original source was not available.
    pub column: Option<usize>,
    pub end_column: Option<usize>,
    pub mutator: String,
    pub diff: String,
    pub first_test: Option<TestLocation>,
}

impl EscapedMutant {
    /// Forces the result's diff.
    pub fn from_result(
        ref_id: impl Into<String>,
        result: &MutantExecutionResult,
        original_source: Option<&str>,
    ) -> Result<Self, SummaryError> {
        let (column, end_column) = match original_source {
            Some(code) => (
                Some(result.original_starting_column(code)?),
                Some(result.original_ending_column(code)?),
            ),
            None => (None, None),
        };

        Ok(EscapedMutant {
            ref_id: ref_id.into(),
            hash: result.mutant_hash().to_string(),
            file: result.original_file_path().to_string(),
            line: result.original_starting_line(),
            column,
            end_column,
            mutator: result.mutator_name().to_string(),
            diff: result.mutant_diff()?.to_string(),
            first_test: result.tests().first().cloned(),
        })
    }
}

impl RunSummary {
    /// Only escaped mutants get their diff computed.
    pub fn from_results<F>(results: &[MutantExecutionResult], mut source_for: F) -> Result<Self, SummaryError>
    where
        F: FnMut(&Utf8Path) -> Option<String>,
    {
        let metrics = Metrics::from_results(results);
        let mut escaped_mutants = Vec::with_capacity(metrics.escaped);

        for result in results
            .iter()
            .filter(|r| r.detection_status() == DetectionStatus::Escaped)
        {
            let source = source_for(result.original_file_path());
            let ref_id = format!("m{}", escaped_mutants.len() + 1);
            escaped_mutants.push(EscapedMutant::from_result(ref_id, result, source.as_deref())?);
        }

        debug!(
            total = metrics.total(),
            escaped = escaped_mutants.len(),
            "built run summary"
        );
        Ok(RunSummary {
            score: metrics.score(),
            covered_score: metrics.covered_score(),
            metrics,
            escaped_mutants,
        })
    }

    /// Look up an escaped mutant by ref, accepting `@m1` or `m1`.
    pub fn find_escaped(&self, mutant_ref: &str) -> Option<&EscapedMutant> {
        let ref_id = mutant_ref.trim_start_matches('@');
        self.escaped_mutants.iter().find(|m| m.ref_id == ref_id)
    }
}
