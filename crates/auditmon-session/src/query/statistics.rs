use chrono::{DateTime, Utc};

use auditmon_core::errors::SessionError;
use auditmon_core::models::{AuditStatistics, EventKind, Timeline, Timestamp};
use auditmon_core::IGraphStore;

fn to_datetime(timestamp: Timestamp) -> Option<DateTime<Utc>> {
    DateTime::<Utc>::from_timestamp_millis(timestamp)
}

/// Totals over a timeline's Start/Stop pairs.
///
/// Audit time sums Start → next Stop gaps; break time sums Stop → next Start
/// gaps. `resume_count` is the number of Starts after the first.
pub fn audit_statistics(timeline: &Timeline) -> AuditStatistics {
    let mut stats = AuditStatistics::default();
    let mut starts: u32 = 0;
    let mut last_marker: Option<(Timestamp, bool)> = None;

    for event in timeline {
        match &event.kind {
            EventKind::Start => {
                match last_marker {
                    Some((stopped_at, false)) => {
                        stats.total_break_time_ms += event.timestamp - stopped_at;
                    }
                    Some((_, true)) => {}
                    None => stats.started_at = to_datetime(event.timestamp),
                }
                starts += 1;
                last_marker = Some((event.timestamp, true));
            }
            EventKind::Stop { .. } => {
                if let Some((started_at, true)) = last_marker {
                    stats.total_audit_time_ms += event.timestamp - started_at;
                }
                stats.finished_at = to_datetime(event.timestamp);
                last_marker = Some((event.timestamp, false));
            }
            EventKind::Observation { .. } => stats.observation_count += 1,
        }
    }
    stats.resume_count = starts.saturating_sub(1);
    stats
}

/// Replay `session` and compute its statistics.
pub fn audit_statistics_for<G: IGraphStore + ?Sized>(
    store: &G,
    session: &str,
) -> Result<AuditStatistics, SessionError> {
    Ok(audit_statistics(&crate::replay(store, session)?))
}
