use std::collections::BTreeSet;

use auditmon_core::errors::GraphResult;
use auditmon_core::models::{EdgeId, NodeId};
use auditmon_core::IGraphStore;

/// Whatever the user selected: nodes, edges, or both.
///
/// Only nodes are ever recorded. Edges are carried so callers can pass a
/// raw selection straight through.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Selection {
    pub nodes: BTreeSet<NodeId>,
    pub edges: BTreeSet<EdgeId>,
}

impl Selection {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn of_nodes(nodes: impl IntoIterator<Item = NodeId>) -> Self {
        Self {
            nodes: nodes.into_iter().collect(),
            edges: BTreeSet::new(),
        }
    }

    pub fn with_node(mut self, node: NodeId) -> Self {
        self.nodes.insert(node);
        self
    }

    pub fn with_edge(mut self, edge: EdgeId) -> Self {
        self.edges.insert(edge);
        self
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty() && self.edges.is_empty()
    }

    /// Nodes that exist in `store`. Edges and unknown handles are dropped.
    pub fn restrict<G: IGraphStore + ?Sized>(&self, store: &G) -> GraphResult<BTreeSet<NodeId>> {
        let mut kept = BTreeSet::new();
        for &node in &self.nodes {
            if store.contains_node(node)? {
                kept.insert(node);
            } else {
                tracing::debug!(%node, "selection names an unknown node; dropped");
            }
        }
        Ok(kept)
    }
}

impl FromIterator<NodeId> for Selection {
    fn from_iter<I: IntoIterator<Item = NodeId>>(iter: I) -> Self {
        Self::of_nodes(iter)
    }
}

impl From<NodeId> for Selection {
    fn from(node: NodeId) -> Self {
        Self::of_nodes([node])
    }
}
