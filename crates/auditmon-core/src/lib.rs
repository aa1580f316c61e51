//! # auditmon-core
//!
//! Foundation crate for auditmon: attention tracking over a program graph.
//! Defines handles, the session data model, the graph store capability,
//! errors, config, and tracing bootstrap. Every other crate depends on this.

pub mod config;
pub mod constants;
pub mod errors;
pub mod models;
pub mod observability;
pub mod traits;

pub use config::AuditmonConfig;
pub use errors::{AuditmonError, AuditmonResult};
pub use models::{EdgeId, NodeId, Timestamp};
pub use traits::{IGranuleMapper, IGraphStore};
