use auditmon_core::constants::{OBSERVATION, START};
use auditmon_core::errors::GraphResult;
use auditmon_core::IGraphStore;

/// Every session that has started at least once, sorted by name.
pub fn list_sessions<G: IGraphStore + ?Sized>(store: &G) -> GraphResult<Vec<String>> {
    match store.nodes_tagged_with_all(&[OBSERVATION, START])?.first() {
        Some(&start) => store.node_session_names(start),
        None => Ok(Vec::new()),
    }
}
