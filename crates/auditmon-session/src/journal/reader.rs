use std::path::Path;

use auditmon_core::errors::JournalError;

use super::JournalRecord;

/// Read every record in a journal file. Blank lines are skipped; the first
/// malformed line aborts the read.
pub fn read_journal(path: &Path) -> Result<Vec<JournalRecord>, JournalError> {
    let content = std::fs::read_to_string(path).map_err(|source| JournalError::Io {
        path: path.display().to_string(),
        source,
    })?;
    content
        .lines()
        .enumerate()
        .filter(|(_, line)| !line.trim().is_empty())
        .map(|(idx, line)| JournalRecord::parse_line(line, idx + 1))
        .collect()
}
