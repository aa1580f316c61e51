//! `IGraphStore`: the program graph capability auditmon consumes.
//!
//! The program graph itself (structural nodes and `declares` edges) is owned
//! by someone else. auditmon only needs to create marker/observation nodes and
//! path/member edges, tag them, append per-session records, and run a handful
//! of tag-filtered traversal queries. All handles are opaque ids into the
//! store's lookup table, so a stale handle is an error value, never a
//! dangling reference.
//!
//! Every query returns handles in ascending order so callers are
//! deterministic regardless of the backing implementation.

use std::collections::BTreeSet;
use std::sync::Arc;

use crate::errors::GraphResult;
use crate::models::{
    AttrValue, Direction, EdgeId, EdgeSessionRecord, NodeId, NodeSessionEntry, NodeSessionRecord,
    TagSet,
};

/// Read/write access to the shared program graph.
///
/// Implementations are shared between recorders (one per session), so all
/// methods take `&self`; the store is responsible for its own memory safety.
/// It is not responsible for ordering writes from different recorders.
pub trait IGraphStore: Send + Sync {
    /// `false` while the backing graph is being (re)built. Recorders do
    /// nothing while the store is not ready.
    fn is_ready(&self) -> bool;

    fn create_node(&self, tags: &[&str]) -> GraphResult<NodeId>;
    fn create_edge(&self, from: NodeId, to: NodeId, tags: &[&str]) -> GraphResult<EdgeId>;

    fn contains_node(&self, node: NodeId) -> GraphResult<bool>;
    fn edge_endpoints(&self, edge: EdgeId) -> GraphResult<(NodeId, NodeId)>;

    fn node_tags(&self, node: NodeId) -> GraphResult<TagSet>;
    fn edge_tags(&self, edge: EdgeId) -> GraphResult<TagSet>;
    /// Returns `true` if the tag was newly added.
    fn add_node_tag(&self, node: NodeId, tag: &str) -> GraphResult<bool>;
    /// Returns `true` if the tag was newly added.
    fn add_edge_tag(&self, edge: EdgeId, tag: &str) -> GraphResult<bool>;

    fn node_attr(&self, node: NodeId, key: &str) -> GraphResult<Option<AttrValue>>;
    fn set_node_attr(&self, node: NodeId, key: &str, value: AttrValue) -> GraphResult<()>;
    fn edge_attr(&self, edge: EdgeId, key: &str) -> GraphResult<Option<AttrValue>>;
    fn set_edge_attr(&self, edge: EdgeId, key: &str, value: AttrValue) -> GraphResult<()>;

    /// Nodes carrying every tag in `tags`.
    fn nodes_tagged_with_all(&self, tags: &[&str]) -> GraphResult<Vec<NodeId>>;
    /// Edges carrying every tag in `tags`.
    fn edges_tagged_with_all(&self, tags: &[&str]) -> GraphResult<Vec<EdgeId>>;
    /// Edges `from → to` carrying every tag in `tags`.
    fn edges_between(&self, from: NodeId, to: NodeId, tags: &[&str]) -> GraphResult<Vec<EdgeId>>;
    /// Edges leaving (`Outgoing`) or entering (`Incoming`) `node`, carrying every tag in `tags`.
    fn edges_directed(
        &self,
        node: NodeId,
        direction: Direction,
        tags: &[&str],
    ) -> GraphResult<Vec<EdgeId>>;
    /// Nodes one step forward from any of `nodes` along edges carrying every tag in `edge_tags`.
    fn successors(&self, nodes: &[NodeId], edge_tags: &[&str]) -> GraphResult<BTreeSet<NodeId>>;
    /// Nodes one step backward from any of `nodes` along edges carrying every tag in `edge_tags`.
    fn predecessors(&self, nodes: &[NodeId], edge_tags: &[&str]) -> GraphResult<BTreeSet<NodeId>>;

    /// The record `session` keeps on `node`, if any.
    fn node_session(&self, node: NodeId, session: &str) -> GraphResult<Option<NodeSessionRecord>>;
    /// Append to `session`'s record on `node`, creating the record if needed.
    fn append_node_session(
        &self,
        node: NodeId,
        session: &str,
        entry: NodeSessionEntry,
    ) -> GraphResult<()>;
    /// Names of every session holding a record on `node`, sorted.
    fn node_session_names(&self, node: NodeId) -> GraphResult<Vec<String>>;

    /// The edge numbers `session` stamped on `edge`, if any.
    fn edge_session(&self, edge: EdgeId, session: &str) -> GraphResult<Option<EdgeSessionRecord>>;
    /// Append an edge number to `session`'s record on `edge`.
    fn append_edge_number(&self, edge: EdgeId, session: &str, number: u64) -> GraphResult<()>;

    /// Convenience: does `node` carry `tag`?
    fn node_has_tag(&self, node: NodeId, tag: &str) -> GraphResult<bool> {
        Ok(self.node_tags(node)?.contains(tag))
    }

    /// Convenience: the node's scalar `name` attribute.
    fn node_name(&self, node: NodeId) -> GraphResult<Option<String>> {
        Ok(self
            .node_attr(node, crate::constants::NAME)?
            .and_then(|v| v.as_scalar().map(str::to_string)))
    }
}

// ─── Arc blanket impl ───────────────────────────────────────────────

impl<T: IGraphStore + ?Sized> IGraphStore for Arc<T> {
    fn is_ready(&self) -> bool {
        (**self).is_ready()
    }
    fn create_node(&self, tags: &[&str]) -> GraphResult<NodeId> {
        (**self).create_node(tags)
    }
    fn create_edge(&self, from: NodeId, to: NodeId, tags: &[&str]) -> GraphResult<EdgeId> {
        (**self).create_edge(from, to, tags)
    }
    fn contains_node(&self, node: NodeId) -> GraphResult<bool> {
        (**self).contains_node(node)
    }
    fn edge_endpoints(&self, edge: EdgeId) -> GraphResult<(NodeId, NodeId)> {
        (**self).edge_endpoints(edge)
    }
    fn node_tags(&self, node: NodeId) -> GraphResult<TagSet> {
        (**self).node_tags(node)
    }
    fn edge_tags(&self, edge: EdgeId) -> GraphResult<TagSet> {
        (**self).edge_tags(edge)
    }
    fn add_node_tag(&self, node: NodeId, tag: &str) -> GraphResult<bool> {
        (**self).add_node_tag(node, tag)
    }
    fn add_edge_tag(&self, edge: EdgeId, tag: &str) -> GraphResult<bool> {
        (**self).add_edge_tag(edge, tag)
    }
    fn node_attr(&self, node: NodeId, key: &str) -> GraphResult<Option<AttrValue>> {
        (**self).node_attr(node, key)
    }
    fn set_node_attr(&self, node: NodeId, key: &str, value: AttrValue) -> GraphResult<()> {
        (**self).set_node_attr(node, key, value)
    }
    fn edge_attr(&self, edge: EdgeId, key: &str) -> GraphResult<Option<AttrValue>> {
        (**self).edge_attr(edge, key)
    }
    fn set_edge_attr(&self, edge: EdgeId, key: &str, value: AttrValue) -> GraphResult<()> {
        (**self).set_edge_attr(edge, key, value)
    }
    fn nodes_tagged_with_all(&self, tags: &[&str]) -> GraphResult<Vec<NodeId>> {
        (**self).nodes_tagged_with_all(tags)
    }
    fn edges_tagged_with_all(&self, tags: &[&str]) -> GraphResult<Vec<EdgeId>> {
        (**self).edges_tagged_with_all(tags)
    }
    fn edges_between(&self, from: NodeId, to: NodeId, tags: &[&str]) -> GraphResult<Vec<EdgeId>> {
        (**self).edges_between(from, to, tags)
    }
    fn edges_directed(
        &self,
        node: NodeId,
        direction: Direction,
        tags: &[&str],
    ) -> GraphResult<Vec<EdgeId>> {
        (**self).edges_directed(node, direction, tags)
    }
    fn successors(&self, nodes: &[NodeId], edge_tags: &[&str]) -> GraphResult<BTreeSet<NodeId>> {
        (**self).successors(nodes, edge_tags)
    }
    fn predecessors(&self, nodes: &[NodeId], edge_tags: &[&str]) -> GraphResult<BTreeSet<NodeId>> {
        (**self).predecessors(nodes, edge_tags)
    }
    fn node_session(&self, node: NodeId, session: &str) -> GraphResult<Option<NodeSessionRecord>> {
        (**self).node_session(node, session)
    }
    fn append_node_session(
        &self,
        node: NodeId,
        session: &str,
        entry: NodeSessionEntry,
    ) -> GraphResult<()> {
        (**self).append_node_session(node, session, entry)
    }
    fn node_session_names(&self, node: NodeId) -> GraphResult<Vec<String>> {
        (**self).node_session_names(node)
    }
    fn edge_session(&self, edge: EdgeId, session: &str) -> GraphResult<Option<EdgeSessionRecord>> {
        (**self).edge_session(edge, session)
    }
    fn append_edge_number(&self, edge: EdgeId, session: &str, number: u64) -> GraphResult<()> {
        (**self).append_edge_number(edge, session, number)
    }
}
