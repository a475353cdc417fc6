use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::InvalidArgument;

/// Outcome classification of a single mutant. Set once, never transitions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DetectionStatus {
    /// A covering test failed.
    Killed,
    /// Every covering test passed against the mutant.
    Escaped,
    /// The test process crashed or errored.
    Error,
    TimedOut,
    /// Time budget ran out before the mutant was executed.
    Skipped,
    /// No test exercises the mutated code.
    NotCovered,
    /// Excluded by configuration before execution.
    Ignored,
}

impl DetectionStatus {
    pub const ALL: [DetectionStatus; 7] = [
        DetectionStatus::Killed,
        DetectionStatus::Escaped,
        DetectionStatus::Error,
        DetectionStatus::TimedOut,
        DetectionStatus::Skipped,
        DetectionStatus::NotCovered,
        DetectionStatus::Ignored,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            DetectionStatus::Killed => "killed",
            DetectionStatus::Escaped => "escaped",
            DetectionStatus::Error => "error",
            DetectionStatus::TimedOut => "timed_out",
            DetectionStatus::Skipped => "skipped",
            DetectionStatus::NotCovered => "not_covered",
            DetectionStatus::Ignored => "ignored",
        }
    }

    /// True when the status came from actually running a test process.
    pub fn is_executed(self) -> bool {
        matches!(
            self,
            DetectionStatus::Killed
                | DetectionStatus::Escaped
                | DetectionStatus::Error
                | DetectionStatus::TimedOut
        )
    }

    /// Executed and noticed by the test suite.
    pub fn is_detected(self) -> bool {
        matches!(
            self,
            DetectionStatus::Killed | DetectionStatus::Error | DetectionStatus::TimedOut
        )
    }

    /// Every status is final once a result is built.
    pub fn is_terminal(self) -> bool {
        true
    }
}

impl fmt::Display for DetectionStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for DetectionStatus {
    type Err = InvalidArgument;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        DetectionStatus::ALL
            .into_iter()
            .find(|status| status.as_str() == s)
            .ok_or_else(|| InvalidArgument::UnknownStatus(s.to_string()))
    }
}
