mod attributes;
mod granularity;
mod ids;
mod statistics;
mod timeline;

pub use attributes::{AttrValue, EdgeSessionRecord, NodeSessionEntry, NodeSessionRecord, TagSet};
pub use granularity::{Granularity, TimeUnit};
pub use ids::{Direction, EdgeId, NodeId, Timestamp};
pub use statistics::{AuditStatistics, TimesheetInterval, TimesheetKind};
pub use timeline::{EventKind, EventType, Timeline, TimelineEvent};
