use crate::status::DetectionStatus;

/// Rejected construction of a result or one of its typed fields.
#[derive(Debug, Clone, thiserror::Error, PartialEq, Eq)]
pub enum InvalidArgument {
    #[error("unknown detection status: {0:?}")]
    UnknownStatus(String),
    #[error("unknown mutator: {0:?}")]
    UnknownMutator(String),
    #[error("status {status} cannot come from {path}")]
    StatusNotAllowed {
        status: DetectionStatus,
        path: &'static str,
    },
    #[error("starting line {start} is after ending line {end}")]
    InvertedLines { start: usize, end: usize },
    #[error("start file position {start} is after end file position {end}")]
    InvertedPositions { start: usize, end: usize },
}

#[derive(Debug, Clone, thiserror::Error, PartialEq, Eq)]
pub enum PositionError {
    #[error("invalid position information: {position} is past the end of {len} bytes of source")]
    OutOfBounds { position: usize, len: usize },
    #[error("span start {start} is after span end {end}")]
    InvertedSpan { start: usize, end: usize },
    #[error("position {position} is inside a multi-byte character")]
    NotOnCharBoundary { position: usize },
}

/// Failure of a deferred diff / pretty-print / mutation computation.
#[derive(Debug, Clone, thiserror::Error, PartialEq, Eq)]
pub enum ArtifactError {
    #[error("mutation span {start}..{end} is outside {len} bytes of source")]
    SpanOutOfBounds { start: usize, end: usize, len: usize },
    #[error("mutation span {start}..{end} does not fall on character boundaries")]
    SpanNotOnCharBoundary { start: usize, end: usize },
    #[error("{0}")]
    Failed(String),
}

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("failed to read config {path}: {source}")]
    Read {
        path: String,
        #[source]
        source: std::io::Error,
    },
    #[error("invalid config JSON: {0}")]
    Json(#[from] serde_json::Error),
    #[error("unknown mutator or profile in config: {0:?}")]
    UnknownEntry(String),
}

#[derive(Debug, Clone, thiserror::Error, PartialEq, Eq)]
pub enum SummaryError {
    #[error(transparent)]
    Artifact(#[from] ArtifactError),
    #[error(transparent)]
    Position(#[from] PositionError),
}
