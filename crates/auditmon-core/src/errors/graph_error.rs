use crate::models::{EdgeId, NodeId};

/// Graph store errors. Lookups that may legitimately miss return `Option`
/// instead; these cover handles that do not exist and store-level faults.
#[derive(Debug, thiserror::Error)]
pub enum GraphError {
    #[error("node not found: {0}")]
    NodeNotFound(NodeId),

    #[error("edge not found: {0}")]
    EdgeNotFound(EdgeId),

    #[error("concurrency error: {0}")]
    Concurrency(String),

    #[error("snapshot io failed for {path}: {source}")]
    SnapshotIo {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid snapshot: {0}")]
    InvalidSnapshot(String),

    #[error("snapshot format error: {0}")]
    SnapshotFormat(#[from] serde_json::Error),
}

pub type GraphResult<T> = Result<T, GraphError>;
