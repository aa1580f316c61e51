use super::{GraphError, InterestError, JournalError, SessionError};

/// Top-level error type for auditmon.
/// All subsystem errors convert into this via `From` impls.
#[derive(Debug, thiserror::Error)]
pub enum AuditmonError {
    #[error("graph error: {0}")]
    Graph(#[from] GraphError),

    #[error("session error: {0}")]
    Session(#[from] SessionError),

    #[error("journal error: {0}")]
    Journal(#[from] JournalError),

    #[error("interest model error: {0}")]
    Interest(#[from] InterestError),

    #[error("config error: {0}")]
    Config(#[from] toml::de::Error),

    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

/// Convenience type alias.
pub type AuditmonResult<T> = Result<T, AuditmonError>;
