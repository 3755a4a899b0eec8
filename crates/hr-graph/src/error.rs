//! Graph-construction error type.

use thiserror::Error;

use hr_core::{ConnectionId, HrError, NodeId};

/// Errors produced by `hr-graph`.
///
/// All of them surface while the graph is being built or queried by id; a
/// built [`RoadGraph`](crate::RoadGraph) never holds a dangling reference.
#[derive(Debug, Error)]
pub enum GraphError {
    #[error("node {0} not found in graph")]
    NodeNotFound(NodeId),

    #[error("connection {0} not found in graph")]
    ConnectionNotFound(ConnectionId),

    #[error("source node id {0} registered twice")]
    DuplicateSourceId(i64),

    #[error("geometry of {connection} has {points} point(s), need at least 2")]
    InvalidGeometry { connection: ConnectionId, points: usize },
}

pub type GraphResult<T> = Result<T, GraphError>;

impl From<GraphError> for HrError {
    fn from(e: GraphError) -> Self {
        match e {
            GraphError::NodeNotFound(n)       => HrError::NodeNotFound(n),
            GraphError::ConnectionNotFound(c) => HrError::ConnectionNotFound(c),
            other                             => HrError::Config(other.to_string()),
        }
    }
}
