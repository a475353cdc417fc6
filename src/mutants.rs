use std::sync::Arc;

use camino::{Utf8Path, Utf8PathBuf};
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};

use crate::deferred::Deferred;
use crate::error::{ArtifactError, PositionError};
use crate::operators::Mutator;
use crate::position;
use crate::test_location::TestLocation;

/// One source change: where it applies and what replaces the original span.
///
/// Byte positions index the original file content; `original_end_file_position`
/// is exclusive.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Mutation {
    pub original_file_path: Utf8PathBuf,
    pub mutator: Mutator,
    pub original_starting_line: usize,
    pub original_ending_line: usize,
    pub original_start_file_position: usize,
    pub original_end_file_position: usize,
    pub original: String,
    pub replacement: String,
}

impl Mutation {
    /// Build a mutation for the byte span `start..end` of `source`, deriving lines.
    pub fn locate(
        original_file_path: impl Into<Utf8PathBuf>,
        mutator: Mutator,
        source: &str,
        start: usize,
        end: usize,
        replacement: impl Into<String>,
    ) -> Result<Mutation, PositionError> {
        if start > end {
            return Err(PositionError::InvertedSpan { start, end });
        }
        let original_starting_line = position::to_line(source, start)?;
        // End is exclusive; the last replaced byte decides the ending line.
        let original_ending_line = position::to_line(source, end).and_then(|line| {
            if end > start {
                position::to_line(source, end - 1)
            } else {
                Ok(line)
            }
        })?;
        let original = match source.get(start..end) {
            Some(original) => original.to_string(),
            None => {
                let position = if source.is_char_boundary(start) { end } else { start };
                return Err(PositionError::NotOnCharBoundary { position });
            }
        };

        Ok(Mutation {
            original_file_path: original_file_path.into(),
            mutator,
            original_starting_line,
            original_ending_line,
            original_start_file_position: start,
            original_end_file_position: end,
            original,
            replacement: replacement.into(),
        })
    }

    /// Stable content hash identifying this mutation across runs.
    pub fn hash(&self) -> String {
        let mut hasher = Sha256::new();
        hasher.update(self.original_file_path.as_str().as_bytes());
        hasher.update([0u8]);
        hasher.update(self.mutator.as_str().as_bytes());
        hasher.update([0u8]);
        hasher.update((self.original_start_file_position as u64).to_le_bytes());
        hasher.update((self.original_end_file_position as u64).to_le_bytes());
        hasher.update(self.replacement.as_bytes());
        hex::encode(hasher.finalize())
    }
}

/// A mutation together with its lazily derived code artifacts and covering tests.
///
/// Artifacts are shared so a result built from this mutant reuses any value
/// already computed here.
#[derive(Debug, Clone)]
pub struct Mutant {
    mutation: Mutation,
    diff: Arc<Deferred<String>>,
    original_code: Arc<Deferred<String>>,
    mutated_code: Arc<Deferred<String>>,
    tests: Vec<TestLocation>,
}

impl Mutant {
    pub fn new(mutation: Mutation, original_source: Arc<str>, tests: Vec<TestLocation>) -> Self {
        let original_code = {
            let source = Arc::clone(&original_source);
            Arc::new(Deferred::new(move || Ok(pretty_print(&source))))
        };

        let mutated_code = {
            let source = Arc::clone(&original_source);
            let mutation = mutation.clone();
            Arc::new(Deferred::new(move || {
                let mutated = apply_mutation(&source, &mutation)?;
                Ok(pretty_print(&mutated))
            }))
        };

        let diff = {
            let original = Arc::clone(&original_code);
            let mutated = Arc::clone(&mutated_code);
            Arc::new(Deferred::new(move || {
                Ok(generate_diff(original.get()?, mutated.get()?))
            }))
        };

        Mutant {
            mutation,
            diff,
            original_code,
            mutated_code,
            tests,
        }
    }

    /// Build a mutant from artifacts computed elsewhere.
    pub fn with_artifacts(
        mutation: Mutation,
        diff: Arc<Deferred<String>>,
        original_code: Arc<Deferred<String>>,
        mutated_code: Arc<Deferred<String>>,
        tests: Vec<TestLocation>,
    ) -> Self {
        Mutant {
            mutation,
            diff,
            original_code,
            mutated_code,
            tests,
        }
    }

    pub fn mutation(&self) -> &Mutation {
        &self.mutation
    }

    pub fn original_file_path(&self) -> &Utf8Path {
        &self.mutation.original_file_path
    }

    pub fn diff(&self) -> &Arc<Deferred<String>> {
        &self.diff
    }

    pub fn pretty_printed_original_code(&self) -> &Arc<Deferred<String>> {
        &self.original_code
    }

    pub fn mutated_code(&self) -> &Arc<Deferred<String>> {
        &self.mutated_code
    }

    pub fn tests(&self) -> &[TestLocation] {
        &self.tests
    }

    pub fn is_covered(&self) -> bool {
        !self.tests.is_empty()
    }
}

pub fn apply_mutation(source: &str, mutation: &Mutation) -> Result<String, ArtifactError> {
    let start = mutation.original_start_file_position;
    let end = mutation.original_end_file_position;
    if start > end || end > source.len() {
        return Err(ArtifactError::SpanOutOfBounds {
            start,
            end,
            len: source.len(),
        });
    }
    let (Some(before), Some(after)) = (source.get(..start), source.get(end..)) else {
        return Err(ArtifactError::SpanNotOnCharBoundary { start, end });
    };

    let mut result = String::with_capacity(source.len() + mutation.replacement.len());
    result.push_str(before);
    result.push_str(&mutation.replacement);
    result.push_str(after);
    Ok(result)
}

/// Normalize line endings, strip trailing whitespace, end with a single newline.
pub fn pretty_print(source: &str) -> String {
    let mut output = String::with_capacity(source.len());
    for line in source.lines() {
        output.push_str(line.trim_end());
        output.push('\n');
    }
    while output.ends_with("\n\n") {
        output.pop();
    }
    output
}

pub fn generate_diff(original: &str, mutated: &str) -> String {
    use similar::TextDiff;
    let diff = TextDiff::from_lines(original, mutated);
    diff.unified_diff()
        .context_radius(3)
        .header("Original", "New")
        .to_string()
}
