use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use auditmon_core::models::NodeId;

/// One tracked granule.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct InterestEntry {
    pub score: f64,
    /// Position at which the granule was (last) inserted into the table.
    pub inserted: u64,
}

/// Granule → interest score, remembering insertion order for tie-breaks.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct InterestTable {
    entries: BTreeMap<NodeId, InterestEntry>,
    next_insert: u64,
}

impl InterestTable {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn score(&self, granule: NodeId) -> Option<f64> {
        self.entries.get(&granule).map(|e| e.score)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn contains(&self, granule: NodeId) -> bool {
        self.entries.contains_key(&granule)
    }

    /// Entries in ascending granule order.
    pub fn iter(&self) -> impl Iterator<Item = (NodeId, f64)> + '_ {
        self.entries.iter().map(|(&g, e)| (g, e.score))
    }

    /// Highest score first; equal scores keep insertion order.
    pub fn ranked(&self) -> Vec<(NodeId, f64)> {
        let mut ranked: Vec<(NodeId, InterestEntry)> =
            self.entries.iter().map(|(&g, &e)| (g, e)).collect();
        ranked.sort_by(|(_, a), (_, b)| {
            b.score
                .total_cmp(&a.score)
                .then_with(|| a.inserted.cmp(&b.inserted))
        });
        ranked.into_iter().map(|(g, e)| (g, e.score)).collect()
    }

    pub fn into_map(self) -> BTreeMap<NodeId, f64> {
        self.entries
            .into_iter()
            .map(|(g, e)| (g, e.score))
            .collect()
    }

    /// Apply one hit on `granule`: raise it, decay the rest, drop entries
    /// that fell strictly below `threshold`.
    pub(crate) fn hit(&mut self, granule: NodeId, increase: f64, decay: f64, threshold: f64) {
        for (&other, entry) in self.entries.iter_mut() {
            if other != granule {
                entry.score -= decay;
            }
        }
        match self.entries.get_mut(&granule) {
            Some(entry) => entry.score += increase,
            None => {
                self.entries.insert(
                    granule,
                    InterestEntry {
                        score: increase,
                        inserted: self.next_insert,
                    },
                );
                self.next_insert += 1;
            }
        }
        self.entries.retain(|_, e| e.score >= threshold);
    }
}
