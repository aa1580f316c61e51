//! Read-side queries over replayed timelines.

pub mod allocation;
pub mod range;
pub mod repeats;
pub mod sessions;
pub mod statistics;
pub mod timesheet;

pub use allocation::{split_time_per_artifact, time_allocations};
pub use range::{events_in_context, events_in_range, observed_granules, observed_in_range};
pub use repeats::{repeat_observations, RepeatCount};
pub use sessions::list_sessions;
pub use statistics::{audit_statistics, audit_statistics_for};
pub use timesheet::timesheet;
