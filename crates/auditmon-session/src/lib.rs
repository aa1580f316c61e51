//! # auditmon-session
//!
//! Records audit sessions into a shared program graph and reads them back.
//!
//! - [`SessionRecorder`]: the start/stop/observe state machine, the only
//!   writer of session content in the graph.
//! - [`journal`]: the optional append-only text mirror of accepted events.
//! - [`replay`]: rebuilds a session's ordered [`Timeline`] purely from graph content.
//! - [`query`]: statistics, ranges, time allocations, repeats, timesheets.
//!
//! [`Timeline`]: auditmon_core::models::Timeline

pub mod journal;
pub mod query;
pub mod recorder;
pub mod replay;

pub use journal::{EventJournal, JournalRecord};
pub use recorder::{ObservationFilter, RecorderState, Selection, SessionCursor, SessionRecorder};
pub use replay::replay;
