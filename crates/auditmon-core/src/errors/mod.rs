mod auditmon_error;
mod graph_error;
mod interest_error;
mod journal_error;
mod session_error;

pub use auditmon_error::{AuditmonError, AuditmonResult};
pub use graph_error::{GraphError, GraphResult};
pub use interest_error::InterestError;
pub use journal_error::JournalError;
pub use session_error::SessionError;
