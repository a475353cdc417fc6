use camino::Utf8PathBuf;
use serde::{Deserialize, Serialize};

/// A test that executed the mutated code.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TestLocation {
    pub file_path: Utf8PathBuf,
    pub line: usize,
    /// Test function name, when the test framework reports one.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub method: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub execution_time_ms: Option<u64>,
}

impl TestLocation {
    pub fn new(file_path: impl Into<Utf8PathBuf>, line: usize) -> Self {
        TestLocation {
            file_path: file_path.into(),
            line,
            method: None,
            execution_time_ms: None,
        }
    }

    pub fn with_method(mut self, method: impl Into<String>) -> Self {
        self.method = Some(method.into());
        self
    }

    pub fn with_execution_time_ms(mut self, ms: u64) -> Self {
        self.execution_time_ms = Some(ms);
        self
    }
}
