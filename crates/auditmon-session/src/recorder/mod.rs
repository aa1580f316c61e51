//! Session recorder: the start/stop/observe state machine.
//!
//! A recorder is the only writer of session content in the graph. It keeps a
//! small cursor (the last node and edge on the session's path) that can be
//! rebuilt from the graph at any time with [`restore`].
//!
//! Public operations never fail. Normal "nothing to do" outcomes (store not
//! ready, not monitoring, empty or filtered selection) are silent no-ops;
//! graph faults are logged and swallowed; journal faults are logged and the
//! graph mutation goes ahead regardless.

mod cursor;
mod filter;
pub mod matching;
mod selection;

use std::collections::BTreeSet;

use auditmon_core::config::RecorderConfig;
use auditmon_core::constants::{
    CLASS, DECLARES, LIBRARY, METHOD, NAME, OBSERVATION, PACKAGE, PROJECT, RESERVED_TAGS, RESUME,
    START, STOP,
};
use auditmon_core::errors::{GraphResult, SessionError};
use auditmon_core::models::{AttrValue, EdgeId, NodeId, NodeSessionEntry, Timestamp};
use auditmon_core::IGraphStore;

use crate::journal::{EventJournal, JournalRecord};

pub use cursor::{restore, SessionCursor};
pub use filter::ObservationFilter;
pub use selection::Selection;

/// Externally visible recorder state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RecorderState {
    /// The graph store is not ready; every operation is a no-op.
    Uninitialized,
    Idle,
    Monitoring,
}

const STRUCTURAL_TAGS: &[&str] = &[DECLARES, PROJECT, PACKAGE, CLASS, METHOD, LIBRARY];

/// Session names become tags on shared nodes and a journal field, so they
/// must not collide with the graph's own tags or the journal separator.
fn validate_session_name(name: &str) -> Result<(), SessionError> {
    let reason = if name.is_empty() {
        Some("must not be empty")
    } else if name.contains([',', '\n', '\r']) {
        Some("must not contain commas or line breaks")
    } else if RESERVED_TAGS.contains(&name) || STRUCTURAL_TAGS.contains(&name) || name == NAME {
        Some("collides with a graph tag")
    } else {
        None
    };
    match reason {
        Some(reason) => Err(SessionError::InvalidSessionName {
            name: name.to_string(),
            reason,
        }),
        None => Ok(()),
    }
}

/// Records one named session into a shared graph store.
///
/// Not internally synchronized: all calls for one session must come from a
/// single thread of control.
pub struct SessionRecorder<G: IGraphStore> {
    session: String,
    store: G,
    cursor: SessionCursor,
    monitoring: bool,
    filter: Option<ObservationFilter>,
    journal: Option<EventJournal>,
    default_origin: String,
    default_stop_reason: String,
}

impl<G: IGraphStore> SessionRecorder<G> {
    /// Recorder with default configuration and no journal.
    pub fn new(session: impl Into<String>, store: G) -> Result<Self, SessionError> {
        Self::with_config(session, store, &RecorderConfig::default())
    }

    /// Recorder using `config`. The cursor is restored from the store when
    /// it is ready.
    pub fn with_config(
        session: impl Into<String>,
        store: G,
        config: &RecorderConfig,
    ) -> Result<Self, SessionError> {
        let session = session.into();
        validate_session_name(&session)?;

        let journal = match &config.journal_path {
            Some(path) => match EventJournal::create(path) {
                Ok(journal) => Some(journal),
                Err(e) => {
                    tracing::warn!(error = %e, session = %session, "journal unavailable; recording to graph only");
                    None
                }
            },
            None => None,
        };

        let mut recorder = Self {
            session,
            store,
            cursor: SessionCursor::default(),
            monitoring: false,
            filter: None,
            journal,
            default_origin: config.default_origin.clone(),
            default_stop_reason: config.default_stop_reason.clone(),
        };
        if recorder.store.is_ready() {
            recorder.cursor = restore(&recorder.store, &recorder.session)?;
        }
        Ok(recorder)
    }

    pub fn session(&self) -> &str {
        &self.session
    }

    pub fn store(&self) -> &G {
        &self.store
    }

    pub fn cursor(&self) -> SessionCursor {
        self.cursor
    }

    pub fn is_monitoring(&self) -> bool {
        self.monitoring
    }

    pub fn is_journaling(&self) -> bool {
        self.journal.is_some()
    }

    pub fn filter(&self) -> Option<&ObservationFilter> {
        self.filter.as_ref()
    }

    pub fn state(&self) -> RecorderState {
        if !self.store.is_ready() {
            RecorderState::Uninitialized
        } else if self.monitoring {
            RecorderState::Monitoring
        } else {
            RecorderState::Idle
        }
    }

    pub fn set_filter(&mut self, filter: ObservationFilter) {
        self.filter = Some(filter);
    }

    pub fn clear_filter(&mut self) {
        self.filter = None;
    }

    /// The store is being rebuilt: stop monitoring and forget the cursor.
    ///
    /// The next [`start`](Self::start) restores the cursor from the store
    /// if [`reattach`](Self::reattach) has not been called by then.
    pub fn invalidate(&mut self) {
        self.monitoring = false;
        self.cursor = SessionCursor::default();
        tracing::info!(session = %self.session, "recorder invalidated");
    }

    /// Rebuild the cursor from the store, after a reload or an external
    /// change to session content.
    pub fn reattach(&mut self) -> Result<SessionCursor, SessionError> {
        self.cursor = restore(&self.store, &self.session)?;
        Ok(self.cursor)
    }

    // ── start ───────────────────────────────────────────────────────────

    /// Begin or resume monitoring.
    pub fn start(&mut self, timestamp: Timestamp) -> RecorderState {
        if !self.store.is_ready() {
            tracing::debug!(session = %self.session, "start ignored: store not ready");
            return RecorderState::Uninitialized;
        }
        if self.cursor.is_empty() {
            // Construction before readiness, or an invalidate without reattach.
            match restore(&self.store, &self.session) {
                Ok(cursor) => self.cursor = cursor,
                Err(e) => {
                    tracing::error!(error = %e, session = %self.session, "failed to restore cursor");
                }
            }
        }
        self.monitoring = true;
        self.journal(JournalRecord::Start {
            session: self.session.clone(),
            timestamp,
        });
        if let Err(e) = self.record_start(timestamp) {
            tracing::error!(error = %e, session = %self.session, "failed to record start");
        }
        self.state()
    }

    pub fn start_now(&mut self) -> RecorderState {
        self.start(now())
    }

    fn record_start(&mut self, timestamp: Timestamp) -> GraphResult<()> {
        let start = match self.cursor.last_node {
            Some(last) if self.store.node_has_tag(last, STOP)? => {
                let start = self.marker(START)?;
                let edge = self.path_edge(last, start, &[OBSERVATION, RESUME])?;
                self.stamp_edge(edge)?;
                self.cursor.last_edge = Some(edge);
                start
            }
            Some(last) => {
                // The open path was never stopped; keep extending it.
                tracing::debug!(session = %self.session, %last, "start without prior stop; path continues");
                return Ok(());
            }
            None => self.marker(START)?,
        };
        self.store
            .append_node_session(start, &self.session, NodeSessionEntry::Timestamp(timestamp))?;
        self.store.add_node_tag(start, &self.session)?;
        self.cursor.last_node = Some(start);
        tracing::debug!(session = %self.session, timestamp, "recorded start");
        Ok(())
    }

    // ── stop ────────────────────────────────────────────────────────────

    /// Stop monitoring, recording `reason`.
    pub fn stop(&mut self, timestamp: Timestamp, reason: &str) -> RecorderState {
        if !self.store.is_ready() {
            tracing::debug!(session = %self.session, "stop ignored: store not ready");
            return RecorderState::Uninitialized;
        }
        if !self.monitoring {
            tracing::debug!(session = %self.session, "stop ignored: not monitoring");
            return self.state();
        }
        self.monitoring = false;
        let Some(last) = self.cursor.last_node else {
            tracing::debug!(session = %self.session, "stop before any event; nothing recorded");
            return self.state();
        };
        self.journal(JournalRecord::Stop {
            session: self.session.clone(),
            timestamp,
            reason: reason.to_string(),
        });
        if let Err(e) = self.record_stop(last, timestamp, reason) {
            tracing::error!(error = %e, session = %self.session, "failed to record stop");
        }
        self.state()
    }

    /// Stop now with `reason`, or the configured default reason.
    pub fn stop_now(&mut self, reason: Option<&str>) -> RecorderState {
        let reason = reason
            .map(str::to_string)
            .unwrap_or_else(|| self.default_stop_reason.clone());
        self.stop(now(), &reason)
    }

    fn record_stop(&mut self, last: NodeId, timestamp: Timestamp, reason: &str) -> GraphResult<()> {
        let stop = self.marker(STOP)?;
        let edge = self.path_edge(last, stop, &[OBSERVATION])?;
        self.store.add_node_tag(stop, &self.session)?;
        self.store
            .append_node_session(stop, &self.session, NodeSessionEntry::Timestamp(timestamp))?;
        self.store.append_node_session(
            stop,
            &self.session,
            NodeSessionEntry::Reason(reason.to_string()),
        )?;
        self.stamp_edge(edge)?;
        self.cursor = SessionCursor {
            last_node: Some(stop),
            last_edge: Some(edge),
        };
        tracing::debug!(session = %self.session, timestamp, reason, "recorded stop");
        Ok(())
    }

    // ── observe ─────────────────────────────────────────────────────────

    /// Record attention on the selected artifacts.
    pub fn observe(&mut self, selection: &Selection, timestamp: Timestamp, origin: &str) -> RecorderState {
        if !self.store.is_ready() {
            tracing::debug!(session = %self.session, "observation ignored: store not ready");
            return RecorderState::Uninitialized;
        }
        if !self.monitoring {
            tracing::trace!(session = %self.session, "observation ignored: not monitoring");
            return self.state();
        }
        let artifacts = match self.admit(selection) {
            Ok(Some(artifacts)) => artifacts,
            Ok(None) => return self.state(),
            Err(e) => {
                tracing::error!(error = %e, session = %self.session, "failed to inspect selection");
                return self.state();
            }
        };
        self.journal(JournalRecord::Observation {
            session: self.session.clone(),
            timestamp,
            origin: origin.to_string(),
            members: artifacts.iter().copied().collect(),
        });
        if let Err(e) = self.record_observation(&artifacts, timestamp, origin) {
            tracing::error!(error = %e, session = %self.session, "failed to record observation");
        }
        self.state()
    }

    /// Observe now, with `origin` or the configured default origin.
    pub fn observe_now(&mut self, selection: &Selection, origin: Option<&str>) -> RecorderState {
        let origin = origin
            .map(str::to_string)
            .unwrap_or_else(|| self.default_origin.clone());
        self.observe(selection, now(), &origin)
    }

    /// The artifact set to record, or `None` when the selection is dropped.
    fn admit(&self, selection: &Selection) -> GraphResult<Option<BTreeSet<NodeId>>> {
        let artifacts = selection.restrict(&self.store)?;
        if artifacts.is_empty() {
            tracing::trace!(session = %self.session, "observation ignored: empty selection");
            return Ok(None);
        }
        if let Some(filter) = &self.filter {
            if !filter.contains_all(&artifacts) {
                tracing::debug!(session = %self.session, "observation ignored: outside filter");
                return Ok(None);
            }
        }
        for &artifact in &artifacts {
            if self.store.node_has_tag(artifact, OBSERVATION)? {
                tracing::debug!(session = %self.session, %artifact, "observation ignored: selects a marker node");
                return Ok(None);
            }
        }
        let Some(last) = self.cursor.last_node else {
            tracing::warn!(session = %self.session, "observation ignored: monitoring without a path");
            return Ok(None);
        };
        if matching::observation_members(&self.store, last)? == artifacts {
            tracing::trace!(session = %self.session, "observation ignored: repeats previous");
            return Ok(None);
        }
        Ok(Some(artifacts))
    }

    fn record_observation(
        &mut self,
        artifacts: &BTreeSet<NodeId>,
        timestamp: Timestamp,
        origin: &str,
    ) -> GraphResult<()> {
        let Some(last) = self.cursor.last_node else {
            return Ok(());
        };
        let node = match matching::find_observation_node(&self.store, artifacts)? {
            Some(node) => node,
            None => matching::create_observation_node(&self.store, artifacts)?,
        };
        self.store
            .append_node_session(node, &self.session, NodeSessionEntry::Timestamp(timestamp))?;
        self.store.append_node_session(
            node,
            &self.session,
            NodeSessionEntry::Origin(origin.to_string()),
        )?;
        self.store.add_node_tag(node, &self.session)?;

        let edge = self.path_edge(last, node, &[OBSERVATION])?;
        self.stamp_edge(edge)?;
        self.cursor = SessionCursor {
            last_node: Some(node),
            last_edge: Some(edge),
        };
        tracing::debug!(
            session = %self.session,
            %node,
            members = artifacts.len(),
            timestamp,
            origin,
            "recorded observation"
        );
        Ok(())
    }

    // ── helpers ─────────────────────────────────────────────────────────

    /// The global START or STOP node, created on first use.
    fn marker(&self, role: &str) -> GraphResult<NodeId> {
        if let Some(&node) = self.store.nodes_tagged_with_all(&[OBSERVATION, role])?.first() {
            return Ok(node);
        }
        let node = self.store.create_node(&[OBSERVATION, role])?;
        self.store
            .set_node_attr(node, NAME, AttrValue::Scalar(role.to_string()))?;
        tracing::info!(%node, role, "created marker node");
        Ok(node)
    }

    /// The path edge `from → to`, reused if any session already made one.
    fn path_edge(&self, from: NodeId, to: NodeId, tags: &[&str]) -> GraphResult<EdgeId> {
        if let Some(&edge) = self.store.edges_between(from, to, &[OBSERVATION])?.first() {
            return Ok(edge);
        }
        let edge = self.store.create_edge(from, to, tags)?;
        self.store
            .set_edge_attr(edge, NAME, AttrValue::Scalar(OBSERVATION.to_string()))?;
        Ok(edge)
    }

    /// Tag `edge` with the session and give it the next edge number.
    fn stamp_edge(&self, edge: EdgeId) -> GraphResult<()> {
        let previous = match self.cursor.last_edge {
            Some(last) => self
                .store
                .edge_session(last, &self.session)?
                .and_then(|r| r.last_number()),
            None => None,
        };
        let number = previous.map_or(1, |n| n + 1);
        self.store.append_edge_number(edge, &self.session, number)?;
        self.store.add_edge_tag(edge, &self.session)?;
        Ok(())
    }

    fn journal(&self, record: JournalRecord) {
        if let Some(journal) = &self.journal {
            if let Err(e) = journal.append(&record) {
                tracing::warn!(error = %e, session = %self.session, "journal write failed");
            }
        }
    }
}

fn now() -> Timestamp {
    chrono::Utc::now().timestamp_millis()
}
