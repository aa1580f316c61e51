use auditmon_core::models::{EventKind, Timeline, TimesheetInterval, TimesheetKind};

/// Alternating work and break periods.
///
/// Each Start opens a work period (closing any open break); each Stop
/// closes the work period and opens a break with the same ordinal. The
/// trailing open period is reported with `end = None`, except a break after
/// the final Stop, which is not reported.
pub fn timesheet(timeline: &Timeline) -> Vec<TimesheetInterval> {
    let mut intervals: Vec<TimesheetInterval> = Vec::new();
    let mut open: Option<TimesheetInterval> = None;
    let mut ordinal: u32 = 0;

    for event in timeline {
        match event.kind {
            EventKind::Start => {
                if let Some(mut interval) = open.take() {
                    interval.end = Some(event.timestamp);
                    intervals.push(interval);
                }
                ordinal += 1;
                open = Some(TimesheetInterval {
                    kind: TimesheetKind::Work,
                    ordinal,
                    start: event.timestamp,
                    end: None,
                });
            }
            EventKind::Stop { .. } => {
                let Some(mut work) = open.take() else {
                    continue;
                };
                work.end = Some(event.timestamp);
                let ordinal = work.ordinal;
                intervals.push(work);
                open = Some(TimesheetInterval {
                    kind: TimesheetKind::Break,
                    ordinal,
                    start: event.timestamp,
                    end: None,
                });
            }
            EventKind::Observation { .. } => {}
        }
    }

    if let Some(interval) = open {
        if interval.kind == TimesheetKind::Work {
            intervals.push(interval);
        }
    }
    intervals
}

#[cfg(test)]
mod tests {
    use super::*;
    use auditmon_core::models::{NodeId, Timestamp, TimelineEvent};

    fn event(timestamp: Timestamp, kind: EventKind) -> TimelineEvent {
        TimelineEvent {
            timestamp,
            node: NodeId(0),
            visitation_index: 0,
            kind,
        }
    }

    fn stop(timestamp: Timestamp) -> TimelineEvent {
        event(timestamp, EventKind::Stop { reason: "x".into() })
    }

    #[test]
    fn work_break_work() {
        let timeline = Timeline::new(
            "s",
            vec![
                event(0, EventKind::Start),
                stop(100),
                event(250, EventKind::Start),
                stop(300),
            ],
        );
        let sheet = timesheet(&timeline);
        let summary: Vec<_> = sheet
            .iter()
            .map(|i| (i.kind, i.ordinal, i.start, i.end))
            .collect();
        assert_eq!(
            summary,
            vec![
                (TimesheetKind::Work, 1, 0, Some(100)),
                (TimesheetKind::Break, 1, 100, Some(250)),
                (TimesheetKind::Work, 2, 250, Some(300)),
            ]
        );
        assert_eq!(sheet[1].duration_ms(), Some(150));
    }

    #[test]
    fn open_work_period_has_no_end() {
        let timeline = Timeline::new("s", vec![event(10, EventKind::Start)]);
        let sheet = timesheet(&timeline);
        assert_eq!(sheet.len(), 1);
        assert_eq!(sheet[0].end, None);
        assert_eq!(sheet[0].duration_ms(), None);
    }
}
