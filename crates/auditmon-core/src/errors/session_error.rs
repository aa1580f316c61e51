use crate::models::NodeId;

/// Session recording and replay errors.
#[derive(Debug, thiserror::Error)]
pub enum SessionError {
    #[error("invalid session name {name:?}: {reason}")]
    InvalidSessionName { name: String, reason: &'static str },

    #[error("session {session} is inconsistent at {node}: {reason}")]
    Inconsistent {
        session: String,
        node: NodeId,
        reason: String,
    },

    #[error("graph error: {0}")]
    Graph(#[from] super::GraphError),
}
