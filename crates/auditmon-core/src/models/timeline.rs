//! Replayed session timeline: one classified event per recorded call.

use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

use super::ids::{NodeId, Timestamp};

/// A single visit to a START, STOP, or observation node.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TimelineEvent {
    pub timestamp: Timestamp,
    /// The marker or observation node visited.
    pub node: NodeId,
    /// How many times this node was visited earlier in the session's path.
    pub visitation_index: usize,
    pub kind: EventKind,
}

/// Variant-specific payload.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum EventKind {
    Start,
    Stop {
        reason: String,
    },
    Observation {
        origin: String,
        members: BTreeSet<NodeId>,
    },
}

/// Payload-free discriminant of [`EventKind`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EventType {
    Start,
    Stop,
    Observation,
}

impl TimelineEvent {
    pub fn event_type(&self) -> EventType {
        match self.kind {
            EventKind::Start => EventType::Start,
            EventKind::Stop { .. } => EventType::Stop,
            EventKind::Observation { .. } => EventType::Observation,
        }
    }

    pub fn is_observation(&self) -> bool {
        matches!(self.kind, EventKind::Observation { .. })
    }

    /// Observed artifacts; empty for Start/Stop.
    pub fn members(&self) -> Option<&BTreeSet<NodeId>> {
        match &self.kind {
            EventKind::Observation { members, .. } => Some(members),
            _ => None,
        }
    }

    pub fn origin(&self) -> Option<&str> {
        match &self.kind {
            EventKind::Observation { origin, .. } => Some(origin),
            _ => None,
        }
    }

    pub fn reason(&self) -> Option<&str> {
        match &self.kind {
            EventKind::Stop { reason } => Some(reason),
            _ => None,
        }
    }
}

/// A session's events in ascending timestamp order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Timeline {
    pub session: String,
    pub events: Vec<TimelineEvent>,
}

impl Timeline {
    /// Build a timeline, sorting by timestamp. The sort is stable, so events
    /// sharing a timestamp keep their path order.
    pub fn new(session: impl Into<String>, mut events: Vec<TimelineEvent>) -> Self {
        events.sort_by_key(|e| e.timestamp);
        Self {
            session: session.into(),
            events,
        }
    }

    pub fn empty(session: impl Into<String>) -> Self {
        Self {
            session: session.into(),
            events: Vec::new(),
        }
    }

    pub fn len(&self) -> usize {
        self.events.len()
    }

    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, TimelineEvent> {
        self.events.iter()
    }

    /// Observation events only, in order.
    pub fn observations(&self) -> impl Iterator<Item = &TimelineEvent> {
        self.events.iter().filter(|e| e.is_observation())
    }

    pub fn first_timestamp(&self) -> Option<Timestamp> {
        self.events.first().map(|e| e.timestamp)
    }

    pub fn last_timestamp(&self) -> Option<Timestamp> {
        self.events.last().map(|e| e.timestamp)
    }
}

impl<'a> IntoIterator for &'a Timeline {
    type Item = &'a TimelineEvent;
    type IntoIter = std::slice::Iter<'a, TimelineEvent>;

    fn into_iter(self) -> Self::IntoIter {
        self.events.iter()
    }
}
