//! Element attributes and typed per-session records.

use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

use super::ids::Timestamp;

pub type TagSet = BTreeSet<String>;

/// A keyed attribute value: a scalar or an ordered sequence of strings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AttrValue {
    Scalar(String),
    Sequence(Vec<String>),
}

impl AttrValue {
    pub fn as_scalar(&self) -> Option<&str> {
        match self {
            AttrValue::Scalar(s) => Some(s),
            AttrValue::Sequence(_) => None,
        }
    }
}

/// What one session recorded on one marker or observation node.
///
/// Every sequence is append-only. The index into `timestamps` is the
/// visitation index: entry N belongs to the Nth visit of the node in
/// this session. `reasons` is only filled on the STOP node, `origins`
/// only on observation nodes.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct NodeSessionRecord {
    pub timestamps: Vec<Timestamp>,
    pub reasons: Vec<String>,
    pub origins: Vec<String>,
}

impl NodeSessionRecord {
    pub fn last_timestamp(&self) -> Option<Timestamp> {
        self.timestamps.last().copied()
    }

    pub fn first_timestamp(&self) -> Option<Timestamp> {
        self.timestamps.first().copied()
    }
}

/// One append to a node's session record.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NodeSessionEntry {
    Timestamp(Timestamp),
    Reason(String),
    Origin(String),
}

/// Edge numbers a session stamped on a path edge, strictly increasing.
/// An edge retraversed later in the same session holds several numbers.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct EdgeSessionRecord {
    pub edge_numbers: Vec<u64>,
}

impl EdgeSessionRecord {
    pub fn last_number(&self) -> Option<u64> {
        self.edge_numbers.last().copied()
    }

    pub fn contains(&self, number: u64) -> bool {
        // Strictly increasing, so binary search is valid.
        self.edge_numbers.binary_search(&number).is_ok()
    }
}
