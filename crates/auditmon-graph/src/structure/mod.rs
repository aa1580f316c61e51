//! Structural hierarchy: `declares` edges from project to package to class to member.

mod granules;
mod naming;

pub use granules::StructuralGranules;
pub use naming::{granule_display_name, qualified_class_name, DEFAULT_PACKAGE_LABEL};
