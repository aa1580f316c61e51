use std::collections::BTreeSet;
use std::fmt;
use std::sync::Arc;

use auditmon_core::models::NodeId;

/// Restricts which artifacts a recorder will observe.
///
/// An observation is kept only if every one of its artifacts is accepted.
#[derive(Clone)]
pub enum ObservationFilter {
    /// A fixed context of artifacts.
    Context(BTreeSet<NodeId>),
    /// An arbitrary predicate.
    Predicate(Arc<dyn Fn(NodeId) -> bool + Send + Sync>),
}

impl ObservationFilter {
    pub fn context(artifacts: impl IntoIterator<Item = NodeId>) -> Self {
        ObservationFilter::Context(artifacts.into_iter().collect())
    }

    pub fn predicate(f: impl Fn(NodeId) -> bool + Send + Sync + 'static) -> Self {
        ObservationFilter::Predicate(Arc::new(f))
    }

    pub fn accepts(&self, artifact: NodeId) -> bool {
        match self {
            ObservationFilter::Context(set) => set.contains(&artifact),
            ObservationFilter::Predicate(f) => f(artifact),
        }
    }

    /// All-or-nothing containment.
    pub fn contains_all(&self, artifacts: &BTreeSet<NodeId>) -> bool {
        artifacts.iter().all(|&a| self.accepts(a))
    }
}

impl fmt::Debug for ObservationFilter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ObservationFilter::Context(set) => f.debug_tuple("Context").field(set).finish(),
            ObservationFilter::Predicate(_) => f.write_str("Predicate(..)"),
        }
    }
}

impl From<BTreeSet<NodeId>> for ObservationFilter {
    fn from(set: BTreeSet<NodeId>) -> Self {
        ObservationFilter::Context(set)
    }
}
