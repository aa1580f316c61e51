//! # auditmon-graph
//!
//! The program graph auditmon records into: a lookup-table backed
//! [`ProgramGraph`] implementing `IGraphStore` over petgraph's `StableGraph`,
//! JSON snapshots for restart recovery, and granule resolution along the
//! structural `declares` hierarchy.

pub mod store;
pub mod structure;

pub use store::ProgramGraph;
pub use structure::StructuralGranules;
