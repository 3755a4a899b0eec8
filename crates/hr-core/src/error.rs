//! Workspace error type.
//!
//! Sub-crates define their own error enums (`GraphError`, `ScanError`,
//! `ExportError`) and convert into `HrError` via `From` impls where a caller
//! wants one error type across the whole pipeline.

use thiserror::Error;

use crate::{ConnectionId, NodeId};

/// The top-level error type for `hr-core` and a common base for sub-crates.
#[derive(Debug, Error)]
pub enum HrError {
    #[error("node {0} not found")]
    NodeNotFound(NodeId),

    #[error("connection {0} not found")]
    ConnectionNotFound(ConnectionId),

    #[error("configuration error: {0}")]
    Config(String),
}

/// Shorthand result type for all `hr-*` crates.
pub type HrResult<T> = Result<T, HrError>;
