//! Human-readable granule names.

use auditmon_core::constants::{CLASS, LIBRARY, METHOD, PACKAGE, SOURCE_FILE};
use auditmon_core::errors::GraphResult;
use auditmon_core::models::{Granularity, NodeId};
use auditmon_core::IGraphStore;

use super::StructuralGranules;

/// Shown for a package whose name is empty.
pub const DEFAULT_PACKAGE_LABEL: &str = "(default package)";

fn name_of<G: IGraphStore>(store: &G, node: NodeId) -> GraphResult<String> {
    Ok(store.node_name(node)?.unwrap_or_default())
}

/// Fully qualified class name.
///
/// Nested classes are joined with `$`, classes declared inside a method
/// with `#` after the method name, and the package prefix is dotted in
/// unless the package is the default (unnamed) one.
pub fn qualified_class_name<G: IGraphStore>(
    granules: &StructuralGranules<G>,
    class: NodeId,
) -> GraphResult<String> {
    let store = granules.store();
    let mut result = name_of(store, class)?;
    for ancestor in granules.ancestors(class)? {
        let tags = store.node_tags(ancestor)?;
        if tags.contains(CLASS) {
            result = format!("{}${result}", name_of(store, ancestor)?);
        } else if tags.contains(PACKAGE) {
            let package = name_of(store, ancestor)?;
            if !package.is_empty() {
                result = format!("{package}.{result}");
            }
            break;
        } else if tags.contains(LIBRARY) {
            break;
        } else if tags.contains(METHOD) {
            result = format!("{}#{result}", name_of(store, ancestor)?);
        }
    }
    Ok(result)
}

/// Display name of `artifact`'s granule at `granularity`, or `None` when the
/// artifact has no granule at that level.
pub fn granule_display_name<G: IGraphStore>(
    granules: &StructuralGranules<G>,
    artifact: NodeId,
    granularity: Granularity,
) -> GraphResult<Option<String>> {
    let Some(granule) = granules.try_granule_of(artifact, granularity)? else {
        return Ok(None);
    };
    let store = granules.store();
    let name = match granularity {
        Granularity::ProgramArtifact | Granularity::Project => name_of(store, granule)?,
        Granularity::ParentClass => qualified_class_name(granules, granule)?,
        Granularity::SourceFile => match store.node_attr(granule, SOURCE_FILE)? {
            Some(value) => value.as_scalar().map(str::to_string).unwrap_or_default(),
            None => name_of(store, granule)?,
        },
        Granularity::Package => {
            let package = name_of(store, granule)?;
            if package.is_empty() {
                DEFAULT_PACKAGE_LABEL.to_string()
            } else {
                package
            }
        }
    };
    Ok(Some(name))
}
