//! Granule resolution along reverse `declares` edges.

use std::collections::HashSet;

use auditmon_core::constants::{CLASS, DECLARES, PACKAGE, PROJECT};
use auditmon_core::errors::GraphResult;
use auditmon_core::models::{Granularity, NodeId};
use auditmon_core::{IGranuleMapper, IGraphStore};

/// Maps artifacts to their enclosing class, source file, package, or project.
#[derive(Debug, Clone)]
pub struct StructuralGranules<G> {
    store: G,
}

impl<G: IGraphStore> StructuralGranules<G> {
    pub fn new(store: G) -> Self {
        Self { store }
    }

    pub fn store(&self) -> &G {
        &self.store
    }

    /// The declaring parent of `node`, lowest handle first when there are several.
    pub fn parent_of(&self, node: NodeId) -> GraphResult<Option<NodeId>> {
        Ok(self
            .store
            .predecessors(&[node], &[DECLARES])?
            .into_iter()
            .next())
    }

    /// Declaring ancestors of `node`, nearest first, excluding `node` itself.
    pub fn ancestors(&self, node: NodeId) -> GraphResult<Vec<NodeId>> {
        let mut seen = HashSet::from([node]);
        let mut chain = Vec::new();
        let mut current = node;
        while let Some(parent) = self.parent_of(current)? {
            if !seen.insert(parent) {
                tracing::warn!(%node, %parent, "cycle in declares hierarchy");
                break;
            }
            chain.push(parent);
            current = parent;
        }
        Ok(chain)
    }

    /// `node` itself if it carries `tag`, else the nearest ancestor that does.
    fn nearest_tagged(&self, node: NodeId, tag: &str) -> GraphResult<Option<NodeId>> {
        if self.store.node_has_tag(node, tag)? {
            return Ok(Some(node));
        }
        for ancestor in self.ancestors(node)? {
            if self.store.node_has_tag(ancestor, tag)? {
                return Ok(Some(ancestor));
            }
        }
        Ok(None)
    }

    /// The outermost class enclosing `node`, counting `node` itself.
    fn outermost_class(&self, node: NodeId) -> GraphResult<Option<NodeId>> {
        let mut outermost = if self.store.node_has_tag(node, CLASS)? {
            Some(node)
        } else {
            None
        };
        for ancestor in self.ancestors(node)? {
            if self.store.node_has_tag(ancestor, CLASS)? {
                outermost = Some(ancestor);
            }
        }
        Ok(outermost)
    }

    /// Fallible form of [`IGranuleMapper::granule_of`].
    pub fn try_granule_of(
        &self,
        artifact: NodeId,
        granularity: Granularity,
    ) -> GraphResult<Option<NodeId>> {
        if !self.store.contains_node(artifact)? {
            return Ok(None);
        }
        match granularity {
            Granularity::ProgramArtifact => Ok(Some(artifact)),
            Granularity::ParentClass => self.nearest_tagged(artifact, CLASS),
            Granularity::SourceFile => self.outermost_class(artifact),
            Granularity::Package => self.nearest_tagged(artifact, PACKAGE),
            Granularity::Project => self.nearest_tagged(artifact, PROJECT),
        }
    }

    /// Display name of `artifact`'s granule at `granularity`.
    pub fn display_name(
        &self,
        artifact: NodeId,
        granularity: Granularity,
    ) -> GraphResult<Option<String>> {
        super::naming::granule_display_name(self, artifact, granularity)
    }
}

impl<G: IGraphStore> IGranuleMapper for StructuralGranules<G> {
    fn granule_of(&self, artifact: NodeId, granularity: Granularity) -> Option<NodeId> {
        match self.try_granule_of(artifact, granularity) {
            Ok(granule) => granule,
            Err(e) => {
                tracing::warn!(error = %e, %artifact, %granularity, "granule lookup failed");
                None
            }
        }
    }
}
