//! Session replay: rebuild a session's timeline from graph content alone.
//!
//! The walk starts at the global START node and follows the session's path
//! edges in edge-number order (1, 2, 3, ...). Edge numbers are assigned in
//! call order, so the walk is already chronological; the final timestamp
//! sort only guards against clock skew in the recorded data.

use std::collections::{BTreeSet, HashMap};

use auditmon_core::constants::{OBSERVATION, START, STOP};
use auditmon_core::errors::SessionError;
use auditmon_core::models::{
    Direction, EventKind, NodeId, NodeSessionRecord, Timeline, TimelineEvent,
};
use auditmon_core::IGraphStore;

use crate::recorder::matching::observation_members;

/// Per-walk cache of node records and visit counts.
struct Walk<'a, G: ?Sized> {
    store: &'a G,
    session: &'a str,
    records: HashMap<NodeId, NodeSessionRecord>,
    visits: HashMap<NodeId, usize>,
}

impl<'a, G: IGraphStore + ?Sized> Walk<'a, G> {
    fn inconsistent(&self, node: NodeId, reason: String) -> SessionError {
        SessionError::Inconsistent {
            session: self.session.to_string(),
            node,
            reason,
        }
    }

    fn record(&mut self, node: NodeId) -> Result<NodeSessionRecord, SessionError> {
        if let Some(record) = self.records.get(&node) {
            return Ok(record.clone());
        }
        let record = self
            .store
            .node_session(node, self.session)?
            .ok_or_else(|| self.inconsistent(node, "node has no record for session".into()))?;
        self.records.insert(node, record.clone());
        Ok(record)
    }

    /// Place `node` into the timeline, classifying it by its tags.
    fn visit(&mut self, node: NodeId) -> Result<TimelineEvent, SessionError> {
        let index = self.visits.get(&node).copied().unwrap_or(0);
        let tags = self.store.node_tags(node)?;
        let session = self.session;
        let record = self.record(node)?;

        let timestamp = record.timestamps.get(index).copied().ok_or_else(|| {
            self.inconsistent(node, format!("no timestamp for visit {index}"))
        })?;

        let kind = if tags.contains(START) {
            EventKind::Start
        } else if tags.contains(STOP) {
            let reason = record.reasons.get(index).cloned().ok_or_else(|| {
                self.inconsistent(node, format!("no stop reason for visit {index}"))
            })?;
            EventKind::Stop { reason }
        } else {
            let origin = record.origins.get(index).cloned().ok_or_else(|| {
                self.inconsistent(node, format!("no origin for visit {index}"))
            })?;
            let members: BTreeSet<NodeId> = observation_members(self.store, node)?;
            EventKind::Observation { origin, members }
        };

        self.visits.insert(node, index + 1);
        tracing::trace!(session, %node, index, timestamp, "replayed event");
        Ok(TimelineEvent {
            timestamp,
            node,
            visitation_index: index,
            kind,
        })
    }
}

/// Rebuild `session`'s timeline.
///
/// Returns an empty timeline when the session never started. A session that
/// was never stopped ends at its last recorded event.
pub fn replay<G: IGraphStore + ?Sized>(store: &G, session: &str) -> Result<Timeline, SessionError> {
    let Some(&start) = store.nodes_tagged_with_all(&[OBSERVATION, START])?.first() else {
        return Ok(Timeline::empty(session));
    };
    let has_start = store
        .node_session(start, session)?
        .is_some_and(|r| !r.timestamps.is_empty());
    if !has_start {
        return Ok(Timeline::empty(session));
    }

    let mut walk = Walk {
        store,
        session,
        records: HashMap::new(),
        visits: HashMap::new(),
    };
    let mut events = vec![walk.visit(start)?];

    let mut expected: u64 = 1;
    let mut current = start;
    loop {
        let mut next = None;
        for edge in store.edges_directed(current, Direction::Outgoing, &[OBSERVATION, session])? {
            let numbered = store
                .edge_session(edge, session)?
                .is_some_and(|r| r.contains(expected));
            if numbered {
                next = Some(store.edge_endpoints(edge)?.1);
                break;
            }
        }
        let Some(node) = next else {
            break;
        };
        events.push(walk.visit(node)?);
        current = node;
        expected += 1;
    }

    tracing::debug!(session, events = events.len(), "replayed session");
    Ok(Timeline::new(session, events))
}
