//! Session recorder configuration.

use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use crate::constants::{DEFAULT_ORIGIN, DEFAULT_STOP_REASON};

/// Configuration for session recorders.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct RecorderConfig {
    /// Append-only journal file. `None` disables journaling.
    pub journal_path: Option<PathBuf>,
    /// Origin recorded by the `*_now` helpers when none is given.
    pub default_origin: String,
    /// Reason recorded by `stop_now` when none is given.
    pub default_stop_reason: String,
}

impl Default for RecorderConfig {
    fn default() -> Self {
        Self {
            journal_path: None,
            default_origin: DEFAULT_ORIGIN.to_string(),
            default_stop_reason: DEFAULT_STOP_REASON.to_string(),
        }
    }
}
