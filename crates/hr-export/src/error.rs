//! Error types for hr-export.

use thiserror::Error;

use hr_core::HrError;
use hr_graph::GraphError;

/// Errors that can occur while converting routes into tracks.
#[derive(Debug, Error)]
pub enum ExportError {
    #[error("graph error: {0}")]
    Graph(#[from] GraphError),

    #[error("signal tolerance must be finite and >= 0, got {0}")]
    Tolerance(f32),
}

/// Alias for `Result<T, ExportError>`.
pub type ExportResult<T> = Result<T, ExportError>;

impl From<ExportError> for HrError {
    fn from(e: ExportError) -> Self {
        match e {
            ExportError::Graph(g) => g.into(),
            other                 => HrError::Config(other.to_string()),
        }
    }
}
