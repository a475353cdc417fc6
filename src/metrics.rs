use serde::{Deserialize, Serialize};

use crate::result::MutantExecutionResult;
use crate::status::DetectionStatus;

/// Per-status counts over a set of results.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Metrics {
    pub killed: usize,
    pub escaped: usize,
    pub errored: usize,
    pub timed_out: usize,
    pub skipped: usize,
    pub not_covered: usize,
    pub ignored: usize,
}

impl Metrics {
    pub fn from_results<'a>(results: impl IntoIterator<Item = &'a MutantExecutionResult>) -> Self {
        let mut metrics = Metrics::default();
        for result in results {
            metrics.record(result.detection_status());
        }
        metrics
    }

    pub fn record(&mut self, status: DetectionStatus) {
        *self.slot(status) += 1;
    }

    pub fn count(&self, status: DetectionStatus) -> usize {
        match status {
            DetectionStatus::Killed => self.killed,
            DetectionStatus::Escaped => self.escaped,
            DetectionStatus::Error => self.errored,
            DetectionStatus::TimedOut => self.timed_out,
            DetectionStatus::Skipped => self.skipped,
            DetectionStatus::NotCovered => self.not_covered,
            DetectionStatus::Ignored => self.ignored,
        }
    }

    fn slot(&mut self, status: DetectionStatus) -> &mut usize {
        match status {
            DetectionStatus::Killed => &mut self.killed,
            DetectionStatus::Escaped => &mut self.escaped,
            DetectionStatus::Error => &mut self.errored,
            DetectionStatus::TimedOut => &mut self.timed_out,
            DetectionStatus::Skipped => &mut self.skipped,
            DetectionStatus::NotCovered => &mut self.not_covered,
            DetectionStatus::Ignored => &mut self.ignored,
        }
    }

    /// Mutants that count toward scores. Skipped and ignored ones do not.
    pub fn total(&self) -> usize {
        self.killed + self.escaped + self.errored + self.timed_out + self.not_covered
    }

    pub fn detected(&self) -> usize {
        self.killed + self.errored + self.timed_out
    }

    pub fn covered(&self) -> usize {
        self.total() - self.not_covered
    }

    /// Mutation score indicator: detected / total. 1.0 when there is nothing to score.
    pub fn score(&self) -> f64 {
        ratio(self.detected(), self.total(), 1.0)
    }

    /// Score over covered mutants only.
    pub fn covered_score(&self) -> f64 {
        ratio(self.detected(), self.covered(), 1.0)
    }

    pub fn code_coverage(&self) -> f64 {
        ratio(self.covered(), self.total(), 0.0)
    }
}

fn ratio(part: usize, whole: usize, empty: f64) -> f64 {
    if whole == 0 {
        empty
    } else {
        part as f64 / whole as f64
    }
}
