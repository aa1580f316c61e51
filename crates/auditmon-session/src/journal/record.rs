use auditmon_core::errors::JournalError;
use auditmon_core::models::{NodeId, Timestamp};

const START: &str = "start";
const STOP: &str = "stop";
const OBSERVATION: &str = "observation";

/// One journal line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum JournalRecord {
    Start {
        session: String,
        timestamp: Timestamp,
    },
    Stop {
        session: String,
        timestamp: Timestamp,
        reason: String,
    },
    Observation {
        session: String,
        timestamp: Timestamp,
        origin: String,
        members: Vec<NodeId>,
    },
}

/// Line breaks would split a record; fold them into spaces.
fn single_line(text: &str) -> String {
    text.replace(['\n', '\r'], " ")
}

fn malformed(line: usize, reason: impl Into<String>) -> JournalError {
    JournalError::Malformed {
        line,
        reason: reason.into(),
    }
}

impl JournalRecord {
    pub fn session(&self) -> &str {
        match self {
            JournalRecord::Start { session, .. }
            | JournalRecord::Stop { session, .. }
            | JournalRecord::Observation { session, .. } => session,
        }
    }

    pub fn timestamp(&self) -> Timestamp {
        match self {
            JournalRecord::Start { timestamp, .. }
            | JournalRecord::Stop { timestamp, .. }
            | JournalRecord::Observation { timestamp, .. } => *timestamp,
        }
    }

    /// Render without the trailing newline.
    pub fn to_line(&self) -> String {
        match self {
            JournalRecord::Start { session, timestamp } => {
                format!("{session},{START},{timestamp}")
            }
            JournalRecord::Stop {
                session,
                timestamp,
                reason,
            } => format!("{session},{STOP},{timestamp},{}", single_line(reason)),
            JournalRecord::Observation {
                session,
                timestamp,
                origin,
                members,
            } => {
                let ids: Vec<String> = members.iter().map(|m| m.raw().to_string()).collect();
                format!(
                    "{session},{OBSERVATION},{timestamp},{},<{}>",
                    single_line(origin),
                    ids.join(",")
                )
            }
        }
    }

    /// Parse one line. `line_number` is only used for error reporting.
    ///
    /// Session names never contain commas, so the first three fields split
    /// cleanly. A stop reason is the rest of the line; an observation origin
    /// runs up to the final `,<` that opens the member list.
    pub fn parse_line(line: &str, line_number: usize) -> Result<Self, JournalError> {
        let line = line.trim_end_matches(['\n', '\r']);
        let mut fields = line.splitn(4, ',');
        let session = fields
            .next()
            .filter(|s| !s.is_empty())
            .ok_or_else(|| malformed(line_number, "missing session"))?
            .to_string();
        let kind = fields
            .next()
            .ok_or_else(|| malformed(line_number, "missing event kind"))?;
        let timestamp = fields
            .next()
            .ok_or_else(|| malformed(line_number, "missing timestamp"))?;
        let timestamp: Timestamp = timestamp
            .parse()
            .map_err(|e| malformed(line_number, format!("bad timestamp {timestamp:?}: {e}")))?;
        let rest = fields.next();

        match kind {
            START => match rest {
                None => Ok(JournalRecord::Start { session, timestamp }),
                Some(_) => Err(malformed(line_number, "unexpected fields after start")),
            },
            STOP => {
                let reason = rest.ok_or_else(|| malformed(line_number, "missing stop reason"))?;
                Ok(JournalRecord::Stop {
                    session,
                    timestamp,
                    reason: reason.to_string(),
                })
            }
            OBSERVATION => {
                let rest = rest.ok_or_else(|| malformed(line_number, "missing origin"))?;
                let split = rest
                    .rfind(",<")
                    .ok_or_else(|| malformed(line_number, "missing member list"))?;
                let origin = &rest[..split];
                let list = rest[split + 2..]
                    .strip_suffix('>')
                    .ok_or_else(|| malformed(line_number, "unterminated member list"))?;
                if list.is_empty() {
                    return Err(malformed(line_number, "observation without members"));
                }
                let members = list
                    .split(',')
                    .map(|id| {
                        id.parse::<u64>()
                            .map(NodeId)
                            .map_err(|e| malformed(line_number, format!("bad member {id:?}: {e}")))
                    })
                    .collect::<Result<Vec<_>, _>>()?;
                Ok(JournalRecord::Observation {
                    session,
                    timestamp,
                    origin: origin.to_string(),
                    members,
                })
            }
            other => Err(malformed(line_number, format!("unknown event kind {other:?}"))),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn renders_each_kind() {
        let start = JournalRecord::Start {
            session: "s1".into(),
            timestamp: 100,
        };
        let stop = JournalRecord::Stop {
            session: "s1".into(),
            timestamp: 200,
            reason: "lunch".into(),
        };
        let obs = JournalRecord::Observation {
            session: "s1".into(),
            timestamp: 150,
            origin: "editor:Main.java".into(),
            members: vec![NodeId(4), NodeId(9)],
        };
        assert_eq!(start.to_line(), "s1,start,100");
        assert_eq!(stop.to_line(), "s1,stop,200,lunch");
        assert_eq!(obs.to_line(), "s1,observation,150,editor:Main.java,<4,9>");
    }

    #[test]
    fn reason_and_origin_may_contain_commas() {
        let stop = JournalRecord::parse_line("s,stop,5,tired, hungry", 1).unwrap();
        assert_eq!(stop.session(), "s");
        assert!(matches!(stop, JournalRecord::Stop { ref reason, .. } if reason == "tired, hungry"));

        let obs = JournalRecord::parse_line("s,observation,7,graph,view 2,<1,2,3>", 2).unwrap();
        match obs {
            JournalRecord::Observation { origin, members, .. } => {
                assert_eq!(origin, "graph,view 2");
                assert_eq!(members, vec![NodeId(1), NodeId(2), NodeId(3)]);
            }
            other => panic!("unexpected record {other:?}"),
        }
    }

    #[test]
    fn newlines_in_reason_are_folded() {
        let stop = JournalRecord::Stop {
            session: "s".into(),
            timestamp: 1,
            reason: "a\nb".into(),
        };
        assert_eq!(stop.to_line(), "s,stop,1,a b");
    }

    #[test]
    fn malformed_lines_report_line_number() {
        for (line, text) in [
            (3, "s,start"),
            (4, "s,start,abc"),
            (5, "s,pause,10"),
            (6, "s,observation,10,manual"),
            (7, "s,observation,10,manual,<>"),
            (8, "s,observation,10,manual,<1,x>"),
            (9, "s,stop,10"),
            (10, ",start,10"),
        ] {
            match JournalRecord::parse_line(text, line) {
                Err(JournalError::Malformed { line: reported, .. }) => assert_eq!(reported, line),
                other => panic!("{text:?} parsed as {other:?}"),
            }
        }
    }
}
