use std::fs::{self, OpenOptions};
use std::io::Write;
use std::path::{Path, PathBuf};

use auditmon_core::errors::JournalError;

use super::JournalRecord;

/// Synchronous open-append-close writer. Events arrive at human speed, so
/// nothing is buffered between writes.
#[derive(Debug, Clone)]
pub struct EventJournal {
    path: PathBuf,
}

impl EventJournal {
    /// Point a journal at `path`, creating its parent directory.
    pub fn create(path: impl Into<PathBuf>) -> Result<Self, JournalError> {
        let path = path.into();
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent).map_err(|source| JournalError::Io {
                path: parent.display().to_string(),
                source,
            })?;
        }
        Ok(Self { path })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Append one record as a line.
    pub fn append(&self, record: &JournalRecord) -> Result<(), JournalError> {
        let io_err = |source: std::io::Error| JournalError::Io {
            path: self.path.display().to_string(),
            source,
        };
        let mut file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.path)
            .map_err(io_err)?;
        writeln!(file, "{}", record.to_line()).map_err(io_err)?;
        Ok(())
    }
}
