//! Roll-up levels and time buckets.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Level to which observed artifacts are aggregated, ordered finest to coarsest.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Granularity {
    ProgramArtifact,
    ParentClass,
    SourceFile,
    Package,
    Project,
}

impl Granularity {
    pub const ALL: [Granularity; 5] = [
        Granularity::ProgramArtifact,
        Granularity::ParentClass,
        Granularity::SourceFile,
        Granularity::Package,
        Granularity::Project,
    ];

    pub fn label(self) -> &'static str {
        match self {
            Granularity::ProgramArtifact => "Program Artifact",
            Granularity::ParentClass => "Class",
            Granularity::SourceFile => "Source File",
            Granularity::Package => "Package",
            Granularity::Project => "Project",
        }
    }
}

impl fmt::Display for Granularity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Bucket width for time-series style queries.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TimeUnit {
    Seconds,
    Minutes,
    Hours,
    Days,
}

impl TimeUnit {
    pub fn millis(self) -> i64 {
        match self {
            TimeUnit::Seconds => 1_000,
            TimeUnit::Minutes => 60_000,
            TimeUnit::Hours => 3_600_000,
            TimeUnit::Days => 86_400_000,
        }
    }

    /// Truncate an epoch-ms timestamp to the start of its bucket (UTC).
    pub fn truncate(self, timestamp: i64) -> i64 {
        timestamp - timestamp.rem_euclid(self.millis())
    }

    /// Convert a millisecond duration to this unit.
    pub fn convert(self, millis: i64) -> f64 {
        millis as f64 / self.millis() as f64
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn granularity_orders_finest_to_coarsest() {
        assert!(Granularity::ProgramArtifact < Granularity::ParentClass);
        assert!(Granularity::ParentClass < Granularity::SourceFile);
        assert!(Granularity::SourceFile < Granularity::Package);
        assert!(Granularity::Package < Granularity::Project);
    }

    #[test]
    fn truncate_handles_pre_epoch_values() {
        assert_eq!(TimeUnit::Seconds.truncate(1_999), 1_000);
        assert_eq!(TimeUnit::Seconds.truncate(-1), -1_000);
        assert_eq!(TimeUnit::Minutes.truncate(125_000), 120_000);
    }

    #[test]
    fn convert_to_minutes() {
        assert!((TimeUnit::Minutes.convert(90_000) - 1.5).abs() < f64::EPSILON);
    }
}
