//! Timeline slicing by time and by artifact context.

use std::collections::BTreeSet;

use auditmon_core::models::{Granularity, NodeId, Timeline, TimelineEvent, Timestamp};
use auditmon_core::IGranuleMapper;

/// Events (Start and Stop included) with `begin <= timestamp <= end`.
pub fn events_in_range(timeline: &Timeline, begin: Timestamp, end: Timestamp) -> Vec<&TimelineEvent> {
    timeline
        .iter()
        .filter(|e| e.timestamp >= begin && e.timestamp <= end)
        .collect()
}

/// Artifacts observed with `begin <= timestamp <= end`.
pub fn observed_in_range(timeline: &Timeline, begin: Timestamp, end: Timestamp) -> BTreeSet<NodeId> {
    events_in_range(timeline, begin, end)
        .into_iter()
        .filter_map(|e| e.members())
        .flatten()
        .copied()
        .collect()
}

/// Observations touching at least one artifact of `context`.
pub fn events_in_context<'a>(
    timeline: &'a Timeline,
    context: &BTreeSet<NodeId>,
) -> Vec<&'a TimelineEvent> {
    timeline
        .observations()
        .filter(|e| e.members().is_some_and(|m| !m.is_disjoint(context)))
        .collect()
}

/// Every granule observed in the session. Artifacts without a granule at
/// `granularity` are skipped.
pub fn observed_granules<M: IGranuleMapper + ?Sized>(
    timeline: &Timeline,
    mapper: &M,
    granularity: Granularity,
) -> BTreeSet<NodeId> {
    timeline
        .observations()
        .filter_map(|e| e.members())
        .flatten()
        .filter_map(|&artifact| mapper.granule_of(artifact, granularity))
        .collect()
}
