use auditmon_core::constants::OBSERVATION;
use auditmon_core::errors::GraphResult;
use auditmon_core::models::{EdgeId, NodeId};
use auditmon_core::IGraphStore;

/// Where a session's path currently ends.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SessionCursor {
    pub last_node: Option<NodeId>,
    pub last_edge: Option<EdgeId>,
}

impl SessionCursor {
    pub fn is_empty(&self) -> bool {
        self.last_node.is_none() && self.last_edge.is_none()
    }
}

/// Rebuild a session's cursor from graph content alone.
///
/// `last_node` is the session-tagged marker or observation node with the
/// greatest latest timestamp, `last_edge` the session-tagged path edge with
/// the greatest latest edge number. Ties keep the lower handle.
pub fn restore<G: IGraphStore + ?Sized>(store: &G, session: &str) -> GraphResult<SessionCursor> {
    let mut last_node: Option<(NodeId, i64)> = None;
    for node in store.nodes_tagged_with_all(&[OBSERVATION, session])? {
        let Some(latest) = store
            .node_session(node, session)?
            .and_then(|r| r.last_timestamp())
        else {
            continue;
        };
        if last_node.map_or(true, |(_, best)| latest > best) {
            last_node = Some((node, latest));
        }
    }

    let mut last_edge: Option<(EdgeId, u64)> = None;
    for edge in store.edges_tagged_with_all(&[OBSERVATION, session])? {
        let Some(latest) = store
            .edge_session(edge, session)?
            .and_then(|r| r.last_number())
        else {
            continue;
        };
        if last_edge.map_or(true, |(_, best)| latest > best) {
            last_edge = Some((edge, latest));
        }
    }

    let cursor = SessionCursor {
        last_node: last_node.map(|(n, _)| n),
        last_edge: last_edge.map(|(e, _)| e),
    };
    tracing::debug!(
        session,
        last_node = ?cursor.last_node,
        last_edge = ?cursor.last_edge,
        "restored session cursor"
    );
    Ok(cursor)
}
