use tracing::{debug, instrument, warn};

use auditmon_core::config::InterestConfig;
use auditmon_core::errors::InterestError;
use auditmon_core::models::{Granularity, Timeline};
use auditmon_core::{IGranuleMapper, IGraphStore};

use crate::table::InterestTable;

/// Decay rate, per-hit increase and drop threshold.
pub type InterestParams = InterestConfig;

/// Scores granules by how often, and how recently, their artifacts were observed.
///
/// Every artifact named by an observation is one hit, processed in ascending
/// handle order within the observation: the hit granule gains
/// `interest_increase`, every other tracked granule loses `decay_rate`, and
/// entries strictly below `interest_threshold` are dropped. Start and Stop
/// events do not affect scores.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct InterestModel {
    params: InterestParams,
}

impl Default for InterestModel {
    fn default() -> Self {
        Self {
            params: InterestParams::default(),
        }
    }
}

impl InterestModel {
    pub fn new(params: InterestParams) -> Result<Self, InterestError> {
        params.validate()?;
        Ok(Self { params })
    }

    pub fn params(&self) -> &InterestParams {
        &self.params
    }

    /// Replace the parameters. On error the current ones stay in place.
    pub fn set_params(&mut self, params: InterestParams) -> Result<(), InterestError> {
        if let Err(e) = params.validate() {
            warn!(error = %e, "rejected interest parameters");
            return Err(e);
        }
        self.params = params;
        Ok(())
    }

    pub fn compute<M: IGranuleMapper + ?Sized>(
        &self,
        timeline: &Timeline,
        mapper: &M,
        granularity: Granularity,
    ) -> InterestTable {
        let InterestParams {
            decay_rate,
            interest_increase,
            interest_threshold,
        } = self.params;
        let mut table = InterestTable::new();
        let mut hits = 0usize;

        for event in timeline.observations() {
            for &artifact in event.members().into_iter().flatten() {
                let Some(granule) = mapper.granule_of(artifact, granularity) else {
                    continue;
                };
                table.hit(granule, interest_increase, decay_rate, interest_threshold);
                hits += 1;
            }
        }

        debug!(
            session = %timeline.session,
            %granularity,
            hits,
            tracked = table.len(),
            "computed interest"
        );
        table
    }

    /// Replay `session` from `store` and score it.
    #[instrument(skip(self, store, mapper))]
    pub fn compute_for_session<G, M>(
        &self,
        store: &G,
        session: &str,
        mapper: &M,
        granularity: Granularity,
    ) -> Result<InterestTable, InterestError>
    where
        G: IGraphStore + ?Sized,
        M: IGranuleMapper + ?Sized,
    {
        let timeline = auditmon_session::replay(store, session)?;
        Ok(self.compute(&timeline, mapper, granularity))
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use auditmon_core::models::{EventKind, NodeId, TimelineEvent, Timestamp};

    use super::*;

    fn obs(timestamp: Timestamp, members: &[u64]) -> TimelineEvent {
        TimelineEvent {
            timestamp,
            node: NodeId(100 + timestamp as u64),
            visitation_index: 0,
            kind: EventKind::Observation {
                origin: "manual".into(),
                members: members.iter().map(|&m| NodeId(m)).collect(),
            },
        }
    }

    fn identity(ids: &[u64]) -> HashMap<NodeId, NodeId> {
        ids.iter().map(|&n| (NodeId(n), NodeId(n))).collect()
    }

    fn close(a: Option<f64>, b: f64) -> bool {
        a.is_some_and(|a| (a - b).abs() < 1e-9)
    }

    #[test]
    fn decay_applies_per_artifact_not_per_event() {
        let timeline = Timeline::new("s", vec![obs(1, &[1, 2])]);
        let table = InterestModel::default().compute(
            &timeline,
            &identity(&[1, 2]),
            Granularity::ProgramArtifact,
        );
        // 1 is hit first, then decays once when 2 is hit.
        assert!(close(table.score(NodeId(1)), 0.9));
        assert!(close(table.score(NodeId(2)), 1.0));
    }

    #[test]
    fn unmapped_artifacts_do_not_decay_others() {
        let timeline = Timeline::new("s", vec![obs(1, &[1]), obs(2, &[7]), obs(3, &[7])]);
        let table = InterestModel::default().compute(
            &timeline,
            &identity(&[1]),
            Granularity::Package,
        );
        assert_eq!(table.len(), 1);
        assert!(close(table.score(NodeId(1)), 1.0));
    }

    #[test]
    fn markers_are_ignored() {
        let start = TimelineEvent {
            timestamp: 0,
            node: NodeId(0),
            visitation_index: 0,
            kind: EventKind::Start,
        };
        let stop = TimelineEvent {
            timestamp: 5,
            node: NodeId(50),
            visitation_index: 0,
            kind: EventKind::Stop {
                reason: "stop".into(),
            },
        };
        let timeline = Timeline::new("s", vec![start, obs(1, &[1]), stop, obs(9, &[1])]);
        let table = InterestModel::default().compute(
            &timeline,
            &identity(&[1]),
            Granularity::ProgramArtifact,
        );
        assert!(close(table.score(NodeId(1)), 2.0));
    }

    #[test]
    fn rejected_params_keep_previous() {
        let mut model = InterestModel::new(InterestParams::new(0.5, 2.0, -3.0)).unwrap();
        let err = model
            .set_params(InterestParams::new(0.5, -1.0, -3.0))
            .unwrap_err();
        assert!(matches!(
            err,
            InterestError::InvalidParameter {
                name: "interest_increase",
                ..
            }
        ));
        assert_eq!(*model.params(), InterestParams::new(0.5, 2.0, -3.0));
        assert!(InterestModel::new(InterestParams::new(0.1, 1.0, 1.0)).is_err());
    }
}
