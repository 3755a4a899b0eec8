use hr_core::HrError;
use hr_graph::GraphError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ScanError {
    #[error("scan configuration error: {0}")]
    Config(String),

    #[error("graph error: {0}")]
    Graph(#[from] GraphError),
}

pub type ScanResult<T> = Result<T, ScanError>;

impl From<ScanError> for HrError {
    fn from(e: ScanError) -> Self {
        match e {
            ScanError::Config(msg) => HrError::Config(msg),
            ScanError::Graph(g)    => g.into(),
        }
    }
}
