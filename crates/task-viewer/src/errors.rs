//! Error types for the task viewer.

use thiserror::Error;

/// Failures that stop a report from being produced.
///
/// Missing documents, unknown task ids and bad command lines are not errors:
/// they degrade to empty data or a printed notice at the component boundary.
#[derive(Error, Debug)]
pub enum ViewerError {
    #[error("Failed to parse '{path}': {reason}")]
    MalformedDocument { path: String, reason: String },

    #[error("Failed to read file '{path}': {reason}")]
    FileReadError { path: String, reason: String },

    #[error("Unexpected document shape in '{path}': expected {expected}")]
    UnexpectedShape { path: String, expected: String },

    #[error("Failed to write report: {0}")]
    Render(#[from] std::io::Error),
}

/// Result type alias for viewer operations
pub type ViewerResult<T> = Result<T, ViewerError>;
