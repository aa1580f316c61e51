/// Journal errors. Writers swallow these after logging; readers surface them.
#[derive(Debug, thiserror::Error)]
pub enum JournalError {
    #[error("journal io failed for {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("malformed journal line {line}: {reason}")]
    Malformed { line: usize, reason: String },
}
