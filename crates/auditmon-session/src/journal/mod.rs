//! Append-only journal of accepted recorder events.
//!
//! One UTF-8 line per event:
//!
//! ```text
//! <session>,start,<epoch-ms>
//! <session>,stop,<epoch-ms>,<reason>
//! <session>,observation,<epoch-ms>,<origin>,<id1,id2,...>
//! ```
//!
//! The journal is secondary durability. Writers log and discard failures;
//! the graph stays the source of truth.

mod reader;
mod record;
mod writer;

pub use reader::read_journal;
pub use record::JournalRecord;
pub use writer::EventJournal;
