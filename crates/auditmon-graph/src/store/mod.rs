//! Graph store: Arc<RwLock<IndexedGraph>> shared between session recorders.

pub mod indexed_graph;
pub mod snapshot;

use std::collections::BTreeSet;
use std::path::Path;
use std::sync::{Arc, RwLock, RwLockReadGuard, RwLockWriteGuard};

use auditmon_core::errors::{GraphError, GraphResult};
use auditmon_core::models::{
    AttrValue, Direction, EdgeId, EdgeSessionRecord, NodeId, NodeSessionEntry, NodeSessionRecord,
    TagSet,
};
use auditmon_core::IGraphStore;

use self::indexed_graph::{EdgeData, IndexedGraph, NodeData};
use self::snapshot::GraphSnapshot;

/// Thread-safe handle to an in-memory program graph.
///
/// Cloning shares the same graph, so every recorder, replay, and model
/// built from clones sees the same content.
pub struct ProgramGraph {
    inner: Arc<RwLock<IndexedGraph>>,
}

impl ProgramGraph {
    /// Create a new empty, ready graph.
    pub fn new() -> Self {
        Self::from_graph(IndexedGraph::new())
    }

    /// Create from an existing indexed graph.
    pub fn from_graph(graph: IndexedGraph) -> Self {
        Self {
            inner: Arc::new(RwLock::new(graph)),
        }
    }

    /// Mark the graph as being rebuilt (`false`) or usable (`true`).
    pub fn set_ready(&self, ready: bool) -> GraphResult<()> {
        self.write()?.ready = ready;
        tracing::debug!(ready, "program graph readiness changed");
        Ok(())
    }

    /// Add a structural program node with a display name.
    pub fn add_named_node(&self, name: &str, tags: &[&str]) -> GraphResult<NodeId> {
        let node = self.create_node(tags)?;
        self.set_node_attr(node, auditmon_core::constants::NAME, AttrValue::Scalar(name.to_string()))?;
        Ok(node)
    }

    pub fn node_count(&self) -> GraphResult<usize> {
        Ok(self.read()?.node_count())
    }

    pub fn edge_count(&self) -> GraphResult<usize> {
        Ok(self.read()?.edge_count())
    }

    /// Capture the full graph content.
    pub fn snapshot(&self) -> GraphResult<GraphSnapshot> {
        let graph = self.read()?;
        Ok(GraphSnapshot::capture(&graph))
    }

    /// Rebuild a graph from a snapshot. Handles are preserved.
    pub fn from_snapshot(snapshot: GraphSnapshot) -> GraphResult<Self> {
        Ok(Self::from_graph(snapshot.restore()?))
    }

    /// Write the graph as JSON to `path`.
    pub fn save_json(&self, path: &Path) -> GraphResult<()> {
        let snapshot = self.snapshot()?;
        let json = serde_json::to_vec(&snapshot)?;
        std::fs::write(path, json).map_err(|source| GraphError::SnapshotIo {
            path: path.display().to_string(),
            source,
        })?;
        tracing::info!(
            path = %path.display(),
            nodes = snapshot.nodes.len(),
            edges = snapshot.edges.len(),
            "saved program graph snapshot"
        );
        Ok(())
    }

    /// Load a graph previously written by [`ProgramGraph::save_json`].
    pub fn load_json(path: &Path) -> GraphResult<Self> {
        let bytes = std::fs::read(path).map_err(|source| GraphError::SnapshotIo {
            path: path.display().to_string(),
            source,
        })?;
        let snapshot: GraphSnapshot = serde_json::from_slice(&bytes)?;
        Self::from_snapshot(snapshot)
    }

    /// Read lock helper.
    fn read(&self) -> GraphResult<RwLockReadGuard<'_, IndexedGraph>> {
        self.inner
            .read()
            .map_err(|e| GraphError::Concurrency(e.to_string()))
    }

    /// Write lock helper.
    fn write(&self) -> GraphResult<RwLockWriteGuard<'_, IndexedGraph>> {
        self.inner
            .write()
            .map_err(|e| GraphError::Concurrency(e.to_string()))
    }
}

impl Default for ProgramGraph {
    fn default() -> Self {
        Self::new()
    }
}

impl Clone for ProgramGraph {
    fn clone(&self) -> Self {
        Self {
            inner: Arc::clone(&self.inner),
        }
    }
}

fn tag_set(tags: &[&str]) -> TagSet {
    tags.iter().map(|t| t.to_string()).collect()
}

impl IGraphStore for ProgramGraph {
    fn is_ready(&self) -> bool {
        self.read().map(|g| g.ready).unwrap_or(false)
    }

    fn create_node(&self, tags: &[&str]) -> GraphResult<NodeId> {
        Ok(self.write()?.add_node(NodeData {
            tags: tag_set(tags),
            ..NodeData::default()
        }))
    }

    fn create_edge(&self, from: NodeId, to: NodeId, tags: &[&str]) -> GraphResult<EdgeId> {
        self.write()?.add_edge(
            from,
            to,
            EdgeData {
                tags: tag_set(tags),
                ..EdgeData::default()
            },
        )
    }

    fn contains_node(&self, node: NodeId) -> GraphResult<bool> {
        Ok(self.read()?.node(node).is_ok())
    }

    fn edge_endpoints(&self, edge: EdgeId) -> GraphResult<(NodeId, NodeId)> {
        self.read()?.endpoints(edge)
    }

    fn node_tags(&self, node: NodeId) -> GraphResult<TagSet> {
        Ok(self.read()?.node(node)?.tags.clone())
    }

    fn edge_tags(&self, edge: EdgeId) -> GraphResult<TagSet> {
        Ok(self.read()?.edge(edge)?.tags.clone())
    }

    fn add_node_tag(&self, node: NodeId, tag: &str) -> GraphResult<bool> {
        self.write()?.tag_node(node, tag)
    }

    fn add_edge_tag(&self, edge: EdgeId, tag: &str) -> GraphResult<bool> {
        self.write()?.tag_edge(edge, tag)
    }

    fn node_attr(&self, node: NodeId, key: &str) -> GraphResult<Option<AttrValue>> {
        Ok(self.read()?.node(node)?.attrs.get(key).cloned())
    }

    fn set_node_attr(&self, node: NodeId, key: &str, value: AttrValue) -> GraphResult<()> {
        self.write()?.node_mut(node)?.attrs.insert(key.to_string(), value);
        Ok(())
    }

    fn edge_attr(&self, edge: EdgeId, key: &str) -> GraphResult<Option<AttrValue>> {
        Ok(self.read()?.edge(edge)?.attrs.get(key).cloned())
    }

    fn set_edge_attr(&self, edge: EdgeId, key: &str, value: AttrValue) -> GraphResult<()> {
        self.write()?.edge_mut(edge)?.attrs.insert(key.to_string(), value);
        Ok(())
    }

    fn nodes_tagged_with_all(&self, tags: &[&str]) -> GraphResult<Vec<NodeId>> {
        Ok(self.read()?.nodes_with_all(tags))
    }

    fn edges_tagged_with_all(&self, tags: &[&str]) -> GraphResult<Vec<EdgeId>> {
        Ok(self.read()?.edges_with_all(tags))
    }

    fn edges_between(&self, from: NodeId, to: NodeId, tags: &[&str]) -> GraphResult<Vec<EdgeId>> {
        let graph = self.read()?;
        graph.node(to)?;
        let mut result = Vec::new();
        for edge in graph.incident(from, Direction::Outgoing, tags)? {
            if graph.endpoints(edge)?.1 == to {
                result.push(edge);
            }
        }
        Ok(result)
    }

    fn edges_directed(
        &self,
        node: NodeId,
        direction: Direction,
        tags: &[&str],
    ) -> GraphResult<Vec<EdgeId>> {
        self.read()?.incident(node, direction, tags)
    }

    fn successors(&self, nodes: &[NodeId], edge_tags: &[&str]) -> GraphResult<BTreeSet<NodeId>> {
        self.read()?.step(nodes, Direction::Outgoing, edge_tags)
    }

    fn predecessors(&self, nodes: &[NodeId], edge_tags: &[&str]) -> GraphResult<BTreeSet<NodeId>> {
        self.read()?.step(nodes, Direction::Incoming, edge_tags)
    }

    fn node_session(&self, node: NodeId, session: &str) -> GraphResult<Option<NodeSessionRecord>> {
        Ok(self.read()?.node(node)?.sessions.get(session).cloned())
    }

    fn append_node_session(
        &self,
        node: NodeId,
        session: &str,
        entry: NodeSessionEntry,
    ) -> GraphResult<()> {
        let mut graph = self.write()?;
        let record = graph
            .node_mut(node)?
            .sessions
            .entry(session.to_string())
            .or_default();
        match entry {
            NodeSessionEntry::Timestamp(ts) => record.timestamps.push(ts),
            NodeSessionEntry::Reason(reason) => record.reasons.push(reason),
            NodeSessionEntry::Origin(origin) => record.origins.push(origin),
        }
        Ok(())
    }

    fn node_session_names(&self, node: NodeId) -> GraphResult<Vec<String>> {
        Ok(self.read()?.node(node)?.sessions.keys().cloned().collect())
    }

    fn edge_session(&self, edge: EdgeId, session: &str) -> GraphResult<Option<EdgeSessionRecord>> {
        Ok(self.read()?.edge(edge)?.sessions.get(session).cloned())
    }

    fn append_edge_number(&self, edge: EdgeId, session: &str, number: u64) -> GraphResult<()> {
        self.write()?
            .edge_mut(edge)?
            .sessions
            .entry(session.to_string())
            .or_default()
            .edge_numbers
            .push(number);
        Ok(())
    }
}
