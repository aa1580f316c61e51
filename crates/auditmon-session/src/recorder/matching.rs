//! Observation node lookup by exact artifact set.

use std::collections::BTreeSet;

use auditmon_core::constants::{NAME, OBSERVATION, OBSERVATION_MEMBER};
use auditmon_core::errors::GraphResult;
use auditmon_core::models::{AttrValue, Direction, NodeId};
use auditmon_core::IGraphStore;

/// Artifacts an observation node represents.
pub fn observation_members<G: IGraphStore + ?Sized>(
    store: &G,
    observation: NodeId,
) -> GraphResult<BTreeSet<NodeId>> {
    store.predecessors(&[observation], &[OBSERVATION_MEMBER])
}

/// The observation node whose member set is exactly `artifacts`.
///
/// Candidates are the nodes reachable over member edges from `artifacts`.
/// A candidate matches when its member edge count equals `|artifacts|` and
/// its members are `artifacts`. Should several match, the last in handle
/// order wins.
pub fn find_observation_node<G: IGraphStore + ?Sized>(
    store: &G,
    artifacts: &BTreeSet<NodeId>,
) -> GraphResult<Option<NodeId>> {
    let selected: Vec<NodeId> = artifacts.iter().copied().collect();
    let mut found = None;
    for candidate in store.successors(&selected, &[OBSERVATION_MEMBER])? {
        let member_edges = store
            .edges_directed(candidate, Direction::Incoming, &[OBSERVATION_MEMBER])?
            .len();
        if member_edges != artifacts.len() {
            continue;
        }
        if observation_members(store, candidate)? == *artifacts {
            found = Some(candidate);
        }
    }
    Ok(found)
}

/// Create an observation node with one member edge per artifact.
pub fn create_observation_node<G: IGraphStore + ?Sized>(
    store: &G,
    artifacts: &BTreeSet<NodeId>,
) -> GraphResult<NodeId> {
    let node = store.create_node(&[OBSERVATION])?;
    store.set_node_attr(node, NAME, AttrValue::Scalar(OBSERVATION.to_string()))?;
    for &artifact in artifacts {
        store.create_edge(artifact, node, &[OBSERVATION_MEMBER])?;
    }
    tracing::debug!(%node, members = artifacts.len(), "created observation node");
    Ok(node)
}
