//! Serializable graph snapshot.
//!
//! Nodes and edges are written in handle order and rebuilt in the same
//! order, so every `NodeId`/`EdgeId` held by a caller stays valid across a
//! save/load round trip.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use auditmon_core::errors::{GraphError, GraphResult};
use auditmon_core::models::{
    AttrValue, EdgeId, EdgeSessionRecord, NodeId, NodeSessionRecord, TagSet,
};

use super::indexed_graph::{edge_id, node_id, EdgeData, IndexedGraph, NodeData};

const SNAPSHOT_VERSION: u32 = 1;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NodeSnapshot {
    pub id: NodeId,
    pub tags: TagSet,
    #[serde(default)]
    pub attrs: BTreeMap<String, AttrValue>,
    #[serde(default)]
    pub sessions: BTreeMap<String, NodeSessionRecord>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EdgeSnapshot {
    pub id: EdgeId,
    pub from: NodeId,
    pub to: NodeId,
    pub tags: TagSet,
    #[serde(default)]
    pub attrs: BTreeMap<String, AttrValue>,
    #[serde(default)]
    pub sessions: BTreeMap<String, EdgeSessionRecord>,
}

/// Full content of a program graph.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GraphSnapshot {
    pub version: u32,
    pub nodes: Vec<NodeSnapshot>,
    pub edges: Vec<EdgeSnapshot>,
}

impl GraphSnapshot {
    pub(crate) fn capture(graph: &IndexedGraph) -> Self {
        let mut nodes: Vec<NodeSnapshot> = graph
            .graph
            .node_indices()
            .filter_map(|idx| {
                graph.graph.node_weight(idx).map(|data| NodeSnapshot {
                    id: node_id(idx),
                    tags: data.tags.clone(),
                    attrs: data.attrs.clone(),
                    sessions: data.sessions.clone(),
                })
            })
            .collect();
        nodes.sort_by_key(|n| n.id);

        let mut edges: Vec<EdgeSnapshot> = graph
            .graph
            .edge_indices()
            .filter_map(|idx| {
                let (from, to) = graph.graph.edge_endpoints(idx)?;
                graph.graph.edge_weight(idx).map(|data| EdgeSnapshot {
                    id: edge_id(idx),
                    from: node_id(from),
                    to: node_id(to),
                    tags: data.tags.clone(),
                    attrs: data.attrs.clone(),
                    sessions: data.sessions.clone(),
                })
            })
            .collect();
        edges.sort_by_key(|e| e.id);

        Self {
            version: SNAPSHOT_VERSION,
            nodes,
            edges,
        }
    }

    /// Rebuild an indexed graph. Handles must be dense, starting at zero.
    pub(crate) fn restore(self) -> GraphResult<IndexedGraph> {
        if self.version != SNAPSHOT_VERSION {
            return Err(GraphError::InvalidSnapshot(format!(
                "unsupported version {}",
                self.version
            )));
        }

        let mut graph = IndexedGraph::new();
        for (expected, node) in self.nodes.into_iter().enumerate() {
            if node.id.raw() != expected as u64 {
                return Err(GraphError::InvalidSnapshot(format!(
                    "expected node n{expected}, found {}",
                    node.id
                )));
            }
            graph.add_node(NodeData {
                tags: node.tags,
                attrs: node.attrs,
                sessions: node.sessions,
            });
        }
        for (expected, edge) in self.edges.into_iter().enumerate() {
            if edge.id.raw() != expected as u64 {
                return Err(GraphError::InvalidSnapshot(format!(
                    "expected edge e{expected}, found {}",
                    edge.id
                )));
            }
            graph
                .add_edge(
                    edge.from,
                    edge.to,
                    EdgeData {
                        tags: edge.tags,
                        attrs: edge.attrs,
                        sessions: edge.sessions,
                    },
                )
                .map_err(|e| GraphError::InvalidSnapshot(format!("edge {}: {e}", edge.id)))?;
        }

        tracing::debug!(
            nodes = graph.node_count(),
            edges = graph.edge_count(),
            "restored program graph from snapshot"
        );
        Ok(graph)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn restore_rejects_sparse_node_ids() {
        let snapshot = GraphSnapshot {
            version: SNAPSHOT_VERSION,
            nodes: vec![NodeSnapshot {
                id: NodeId(3),
                tags: TagSet::new(),
                attrs: BTreeMap::new(),
                sessions: BTreeMap::new(),
            }],
            edges: Vec::new(),
        };
        assert!(matches!(
            snapshot.restore(),
            Err(GraphError::InvalidSnapshot(_))
        ));
    }

    #[test]
    fn restore_rejects_unknown_version() {
        let snapshot = GraphSnapshot {
            version: 99,
            nodes: Vec::new(),
            edges: Vec::new(),
        };
        assert!(snapshot.restore().is_err());
    }

    #[test]
    fn capture_then_restore_keeps_handles() {
        let mut graph = IndexedGraph::new();
        let a = graph.add_node(NodeData::default());
        let b = graph.add_node(NodeData {
            tags: ["class".to_string()].into_iter().collect(),
            ..NodeData::default()
        });
        let e = graph.add_edge(a, b, EdgeData::default()).unwrap();

        let restored = GraphSnapshot::capture(&graph).restore().unwrap();
        assert_eq!(restored.endpoints(e).unwrap(), (a, b));
        assert_eq!(restored.nodes_with_all(&["class"]), vec![b]);
    }
}
