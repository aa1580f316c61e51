//! StableGraph plus tag index tables.

use std::collections::{BTreeMap, BTreeSet, HashMap};

use petgraph::stable_graph::{EdgeIndex, NodeIndex, StableGraph};
use petgraph::visit::EdgeRef;

use auditmon_core::errors::{GraphError, GraphResult};
use auditmon_core::models::{
    AttrValue, Direction, EdgeId, EdgeSessionRecord, NodeId, NodeSessionRecord, TagSet,
};

/// Node weight.
#[derive(Debug, Clone, Default)]
pub struct NodeData {
    pub tags: TagSet,
    pub attrs: BTreeMap<String, AttrValue>,
    pub sessions: BTreeMap<String, NodeSessionRecord>,
}

/// Edge weight.
#[derive(Debug, Clone, Default)]
pub struct EdgeData {
    pub tags: TagSet,
    pub attrs: BTreeMap<String, AttrValue>,
    pub sessions: BTreeMap<String, EdgeSessionRecord>,
}

/// The graph with tag → handle lookup tables.
///
/// Nothing is ever removed, so `StableGraph` indices double as the public
/// handles and stay valid for the lifetime of the graph.
#[derive(Debug, Clone)]
pub struct IndexedGraph {
    pub graph: StableGraph<NodeData, EdgeData>,
    node_tag_index: HashMap<String, BTreeSet<NodeId>>,
    edge_tag_index: HashMap<String, BTreeSet<EdgeId>>,
    pub(crate) ready: bool,
}

/// Handles past the `u32` index range never name an element; they must not
/// truncate onto a live one.
pub(crate) fn node_index(id: NodeId) -> GraphResult<NodeIndex> {
    u32::try_from(id.0)
        .map(NodeIndex::from)
        .map_err(|_| GraphError::NodeNotFound(id))
}

pub(crate) fn edge_index(id: EdgeId) -> GraphResult<EdgeIndex> {
    u32::try_from(id.0)
        .map(EdgeIndex::from)
        .map_err(|_| GraphError::EdgeNotFound(id))
}

pub(crate) fn node_id(idx: NodeIndex) -> NodeId {
    NodeId(idx.index() as u64)
}

pub(crate) fn edge_id(idx: EdgeIndex) -> EdgeId {
    EdgeId(idx.index() as u64)
}

impl IndexedGraph {
    pub fn new() -> Self {
        Self {
            graph: StableGraph::new(),
            node_tag_index: HashMap::new(),
            edge_tag_index: HashMap::new(),
            ready: true,
        }
    }

    pub fn node_count(&self) -> usize {
        self.graph.node_count()
    }

    pub fn edge_count(&self) -> usize {
        self.graph.edge_count()
    }

    pub fn add_node(&mut self, data: NodeData) -> NodeId {
        let tags: Vec<String> = data.tags.iter().cloned().collect();
        let id = node_id(self.graph.add_node(data));
        for tag in tags {
            self.node_tag_index.entry(tag).or_default().insert(id);
        }
        id
    }

    pub fn add_edge(&mut self, from: NodeId, to: NodeId, data: EdgeData) -> GraphResult<EdgeId> {
        self.node(from)?;
        self.node(to)?;
        let (a, b) = (node_index(from)?, node_index(to)?);
        let tags: Vec<String> = data.tags.iter().cloned().collect();
        let id = edge_id(self.graph.add_edge(a, b, data));
        for tag in tags {
            self.edge_tag_index.entry(tag).or_default().insert(id);
        }
        Ok(id)
    }

    pub fn node(&self, id: NodeId) -> GraphResult<&NodeData> {
        self.graph
            .node_weight(node_index(id)?)
            .ok_or(GraphError::NodeNotFound(id))
    }

    pub fn node_mut(&mut self, id: NodeId) -> GraphResult<&mut NodeData> {
        self.graph
            .node_weight_mut(node_index(id)?)
            .ok_or(GraphError::NodeNotFound(id))
    }

    pub fn edge(&self, id: EdgeId) -> GraphResult<&EdgeData> {
        self.graph
            .edge_weight(edge_index(id)?)
            .ok_or(GraphError::EdgeNotFound(id))
    }

    pub fn edge_mut(&mut self, id: EdgeId) -> GraphResult<&mut EdgeData> {
        self.graph
            .edge_weight_mut(edge_index(id)?)
            .ok_or(GraphError::EdgeNotFound(id))
    }

    pub fn endpoints(&self, id: EdgeId) -> GraphResult<(NodeId, NodeId)> {
        self.graph
            .edge_endpoints(edge_index(id)?)
            .map(|(a, b)| (node_id(a), node_id(b)))
            .ok_or(GraphError::EdgeNotFound(id))
    }

    pub fn tag_node(&mut self, id: NodeId, tag: &str) -> GraphResult<bool> {
        let added = self.node_mut(id)?.tags.insert(tag.to_string());
        if added {
            self.node_tag_index
                .entry(tag.to_string())
                .or_default()
                .insert(id);
        }
        Ok(added)
    }

    pub fn tag_edge(&mut self, id: EdgeId, tag: &str) -> GraphResult<bool> {
        let added = self.edge_mut(id)?.tags.insert(tag.to_string());
        if added {
            self.edge_tag_index
                .entry(tag.to_string())
                .or_default()
                .insert(id);
        }
        Ok(added)
    }

    /// Nodes carrying all `tags`; every node when `tags` is empty.
    pub fn nodes_with_all(&self, tags: &[&str]) -> Vec<NodeId> {
        match tags.split_first() {
            None => {
                let mut all: Vec<NodeId> = self.graph.node_indices().map(node_id).collect();
                all.sort();
                all
            }
            Some((first, rest)) => match self.node_tag_index.get(*first) {
                None => Vec::new(),
                Some(candidates) => candidates
                    .iter()
                    .filter(|id| {
                        rest.iter().all(|t| {
                            self.node_tag_index
                                .get(*t)
                                .is_some_and(|set| set.contains(id))
                        })
                    })
                    .copied()
                    .collect(),
            },
        }
    }

    /// Edges carrying all `tags`; every edge when `tags` is empty.
    pub fn edges_with_all(&self, tags: &[&str]) -> Vec<EdgeId> {
        match tags.split_first() {
            None => {
                let mut all: Vec<EdgeId> = self.graph.edge_indices().map(edge_id).collect();
                all.sort();
                all
            }
            Some((first, rest)) => match self.edge_tag_index.get(*first) {
                None => Vec::new(),
                Some(candidates) => candidates
                    .iter()
                    .filter(|id| {
                        rest.iter().all(|t| {
                            self.edge_tag_index
                                .get(*t)
                                .is_some_and(|set| set.contains(id))
                        })
                    })
                    .copied()
                    .collect(),
            },
        }
    }

    /// Edges incident to `node` in `direction` carrying all `tags`, sorted.
    pub fn incident(
        &self,
        node: NodeId,
        direction: Direction,
        tags: &[&str],
    ) -> GraphResult<Vec<EdgeId>> {
        self.node(node)?;
        let dir = match direction {
            Direction::Outgoing => petgraph::Direction::Outgoing,
            Direction::Incoming => petgraph::Direction::Incoming,
        };
        let mut edges: Vec<EdgeId> = self
            .graph
            .edges_directed(node_index(node)?, dir)
            .filter(|e| tags.iter().all(|t| e.weight().tags.contains(*t)))
            .map(|e| edge_id(e.id()))
            .collect();
        edges.sort();
        Ok(edges)
    }

    /// One step along tagged edges from any of `nodes`.
    pub fn step(
        &self,
        nodes: &[NodeId],
        direction: Direction,
        tags: &[&str],
    ) -> GraphResult<BTreeSet<NodeId>> {
        let mut result = BTreeSet::new();
        for &node in nodes {
            for edge in self.incident(node, direction, tags)? {
                let (from, to) = self.endpoints(edge)?;
                result.insert(match direction {
                    Direction::Outgoing => to,
                    Direction::Incoming => from,
                });
            }
        }
        Ok(result)
    }
}

impl Default for IndexedGraph {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tagged(tags: &[&str]) -> NodeData {
        NodeData {
            tags: tags.iter().map(|t| t.to_string()).collect(),
            ..NodeData::default()
        }
    }

    #[test]
    fn tag_index_intersects() {
        let mut g = IndexedGraph::new();
        let a = g.add_node(tagged(&["x", "y"]));
        let _b = g.add_node(tagged(&["x"]));
        let c = g.add_node(tagged(&["y"]));
        g.tag_node(c, "x").unwrap();

        assert_eq!(g.nodes_with_all(&["x", "y"]), vec![a, c]);
        assert!(g.nodes_with_all(&["missing"]).is_empty());
        assert_eq!(g.nodes_with_all(&[]).len(), 3);
    }

    #[test]
    fn add_edge_rejects_unknown_endpoint() {
        let mut g = IndexedGraph::new();
        let a = g.add_node(NodeData::default());
        let err = g.add_edge(a, NodeId(42), EdgeData::default()).unwrap_err();
        assert!(matches!(err, GraphError::NodeNotFound(NodeId(42))));
    }

    #[test]
    fn handles_are_dense_and_stable() {
        let mut g = IndexedGraph::new();
        let ids: Vec<NodeId> = (0..4).map(|_| g.add_node(NodeData::default())).collect();
        assert_eq!(ids, vec![NodeId(0), NodeId(1), NodeId(2), NodeId(3)]);
    }

    #[test]
    fn handles_beyond_index_range_do_not_alias() {
        let mut g = IndexedGraph::new();
        let a = g.add_node(NodeData::default());
        let b = g.add_node(NodeData::default());
        let e = g.add_edge(a, b, EdgeData::default()).unwrap();

        let alias = NodeId(a.0 + (1 << 32));
        assert!(matches!(g.node(alias), Err(GraphError::NodeNotFound(id)) if id == alias));
        assert!(g.incident(alias, Direction::Outgoing, &[]).is_err());
        assert!(g.add_edge(alias, b, EdgeData::default()).is_err());

        let edge_alias = EdgeId(e.0 + (1 << 32));
        assert!(matches!(g.endpoints(edge_alias), Err(GraphError::EdgeNotFound(id)) if id == edge_alias));
        assert!(g.edge(edge_alias).is_err());
    }
}
