use std::collections::{BTreeMap, BTreeSet, HashSet};

use serde::{Deserialize, Serialize};

use auditmon_core::models::{Granularity, NodeId, Timeline, TimeUnit, Timestamp};
use auditmon_core::IGranuleMapper;

/// Observations in one time bucket.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RepeatCount {
    pub total: u32,
    /// Observations whose granule set had not been seen earlier in the session.
    pub unique: u32,
}

impl RepeatCount {
    pub fn repeats(&self) -> u32 {
        self.total - self.unique
    }
}

/// Per-bucket counts of repeated observations.
///
/// An observation is reduced to the set of its artifacts' granules; one
/// whose set was already seen anywhere earlier in the session is a repeat.
/// Observations with no granule at `granularity` are skipped. Buckets are
/// keyed by their UTC start.
pub fn repeat_observations<M: IGranuleMapper + ?Sized>(
    timeline: &Timeline,
    mapper: &M,
    granularity: Granularity,
    unit: TimeUnit,
) -> BTreeMap<Timestamp, RepeatCount> {
    let mut seen: HashSet<BTreeSet<NodeId>> = HashSet::new();
    let mut buckets: BTreeMap<Timestamp, RepeatCount> = BTreeMap::new();

    for event in timeline.observations() {
        let granules: BTreeSet<NodeId> = event
            .members()
            .into_iter()
            .flatten()
            .filter_map(|&a| mapper.granule_of(a, granularity))
            .collect();
        if granules.is_empty() {
            continue;
        }
        let count = buckets.entry(unit.truncate(event.timestamp)).or_default();
        count.total += 1;
        if seen.insert(granules) {
            count.unique += 1;
        }
    }
    buckets
}
