use std::collections::HashMap;
use std::sync::Arc;

use crate::models::{Granularity, NodeId};

/// Maps a program artifact to its granule at a granularity level.
///
/// `None` means the artifact has no granule at that level and is ignored.
pub trait IGranuleMapper {
    fn granule_of(&self, artifact: NodeId, granularity: Granularity) -> Option<NodeId>;
}

impl<T: IGranuleMapper + ?Sized> IGranuleMapper for Arc<T> {
    fn granule_of(&self, artifact: NodeId, granularity: Granularity) -> Option<NodeId> {
        (**self).granule_of(artifact, granularity)
    }
}

impl<T: IGranuleMapper + ?Sized> IGranuleMapper for &T {
    fn granule_of(&self, artifact: NodeId, granularity: Granularity) -> Option<NodeId> {
        (**self).granule_of(artifact, granularity)
    }
}

/// A fixed table, ignoring the granularity. Artifacts missing from the
/// table have no granule.
impl IGranuleMapper for HashMap<NodeId, NodeId> {
    fn granule_of(&self, artifact: NodeId, _granularity: Granularity) -> Option<NodeId> {
        self.get(&artifact).copied()
    }
}
