//! Aggregate time statistics derived from a timeline.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::ids::Timestamp;

/// Totals computed by walking a session's Start/Stop pairs.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuditStatistics {
    /// Sum of Start → next Stop gaps, in milliseconds.
    pub total_audit_time_ms: i64,
    /// Sum of Stop → next Start gaps, in milliseconds.
    pub total_break_time_ms: i64,
    pub started_at: Option<DateTime<Utc>>,
    pub finished_at: Option<DateTime<Utc>>,
    pub resume_count: u32,
    pub observation_count: u32,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TimesheetKind {
    Work,
    Break,
}

/// One contiguous work or break period. `end` is `None` for a period that
/// is still open (a session that was never stopped).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TimesheetInterval {
    pub kind: TimesheetKind,
    /// 1-based ordinal shared by a work period and the break that follows it.
    pub ordinal: u32,
    pub start: Timestamp,
    pub end: Option<Timestamp>,
}

impl TimesheetInterval {
    pub fn duration_ms(&self) -> Option<i64> {
        self.end.map(|end| end - self.start)
    }
}
