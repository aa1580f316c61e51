//! Time spent per granule, from gaps between consecutive observations.
//!
//! The gap between two observations is credited to the earlier one: that is
//! what the analyst was looking at meanwhile. Start and Stop break the chain,
//! so time across a break is never credited.

use std::collections::{BTreeMap, BTreeSet};

use auditmon_core::models::{Granularity, NodeId, Timeline, TimelineEvent};
use auditmon_core::IGranuleMapper;

/// Consecutive observation pairs, with Start/Stop resetting the chain.
fn observation_gaps(timeline: &Timeline) -> impl Iterator<Item = (&TimelineEvent, i64)> {
    let mut previous: Option<&TimelineEvent> = None;
    timeline.iter().filter_map(move |event| {
        if !event.is_observation() {
            previous = None;
            return None;
        }
        let gap = previous.map(|p| (p, event.timestamp - p.timestamp));
        previous = Some(event);
        gap
    })
}

/// Milliseconds attributed to each granule. Every distinct granule of the
/// earlier observation receives the full gap.
pub fn time_allocations<M: IGranuleMapper + ?Sized>(
    timeline: &Timeline,
    mapper: &M,
    granularity: Granularity,
) -> BTreeMap<NodeId, i64> {
    let mut allocations = BTreeMap::new();
    for (earlier, gap) in observation_gaps(timeline) {
        let granules: BTreeSet<NodeId> = earlier
            .members()
            .into_iter()
            .flatten()
            .filter_map(|&a| mapper.granule_of(a, granularity))
            .collect();
        for granule in granules {
            *allocations.entry(granule).or_insert(0) += gap;
        }
    }
    allocations
}

/// Milliseconds per artifact, each gap split evenly across the earlier
/// observation's artifacts. Integer division remainders are dropped.
pub fn split_time_per_artifact(timeline: &Timeline) -> BTreeMap<NodeId, i64> {
    let mut allocations = BTreeMap::new();
    for (earlier, gap) in observation_gaps(timeline) {
        let Some(members) = earlier.members().filter(|m| !m.is_empty()) else {
            continue;
        };
        let share = gap / members.len() as i64;
        for &artifact in members {
            *allocations.entry(artifact).or_insert(0) += share;
        }
    }
    allocations
}
