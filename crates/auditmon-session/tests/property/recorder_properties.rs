//! Property tests for the recorder: numbering, replay fidelity, suppression.

use std::collections::BTreeSet;

use proptest::prelude::*;

use auditmon_core::constants::OBSERVATION;
use auditmon_core::models::NodeId;
use auditmon_core::IGraphStore;
use auditmon_graph::ProgramGraph;
use auditmon_session::{replay, Selection, SessionRecorder};
use test_fixtures::flat_program;

const ARTIFACTS: usize = 4;

#[derive(Debug, Clone)]
enum Op {
    Start,
    Stop,
    Observe(BTreeSet<usize>),
}

fn op_strategy() -> impl Strategy<Value = Op> {
    prop_oneof![
        1 => Just(Op::Start),
        1 => Just(Op::Stop),
        4 => prop::collection::btree_set(0..ARTIFACTS, 0..=2).prop_map(Op::Observe),
    ]
}

/// Run `ops` one millisecond apart and return how many calls a
/// straightforward model of the recorder says should be accepted.
fn run(session: &str, store: &ProgramGraph, arts: &[NodeId], ops: &[Op]) -> usize {
    let mut rec = SessionRecorder::new(session, store.clone()).unwrap();
    let mut monitoring = false;
    let mut last_members: Option<BTreeSet<NodeId>> = None;
    let mut accepted = 0;

    for (ts, op) in ops.iter().enumerate() {
        let ts = ts as i64;
        match op {
            Op::Start => {
                rec.start(ts);
                if !monitoring {
                    monitoring = true;
                    last_members = None;
                    accepted += 1;
                }
            }
            Op::Stop => {
                rec.stop(ts, "stop");
                if monitoring {
                    monitoring = false;
                    last_members = None;
                    accepted += 1;
                }
            }
            Op::Observe(picks) => {
                let members: BTreeSet<NodeId> = picks.iter().map(|&i| arts[i]).collect();
                rec.observe(&Selection::of_nodes(members.iter().copied()), ts, "prop");
                if monitoring && !members.is_empty() && last_members.as_ref() != Some(&members) {
                    last_members = Some(members);
                    accepted += 1;
                }
            }
        }
    }
    accepted
}

fn edge_numbers(store: &ProgramGraph, session: &str) -> Vec<u64> {
    let mut numbers: Vec<u64> = store
        .edges_tagged_with_all(&[OBSERVATION])
        .unwrap()
        .into_iter()
        .filter_map(|e| store.edge_session(e, session).unwrap())
        .flat_map(|r| r.edge_numbers)
        .collect();
    numbers.sort_unstable();
    numbers
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(64))]

    #[test]
    fn edge_numbers_are_dense(ops in prop::collection::vec(op_strategy(), 0..40)) {
        let (store, arts) = flat_program(ARTIFACTS);
        let accepted = run("s", &store, &arts, &ops);
        let expected: Vec<u64> = (1..accepted as u64).collect();
        prop_assert_eq!(edge_numbers(&store, "s"), expected);
    }

    #[test]
    fn replay_has_one_event_per_accepted_call(ops in prop::collection::vec(op_strategy(), 0..40)) {
        let (store, arts) = flat_program(ARTIFACTS);
        let accepted = run("s", &store, &arts, &ops);
        let timeline = replay(&store, "s").unwrap();
        prop_assert_eq!(timeline.len(), accepted);
        let stamps: Vec<i64> = timeline.iter().map(|e| e.timestamp).collect();
        prop_assert!(stamps.windows(2).all(|w| w[0] < w[1]));
    }

    #[test]
    fn sessions_do_not_disturb_each_other(
        a in prop::collection::vec(op_strategy(), 0..25),
        b in prop::collection::vec(op_strategy(), 0..25),
    ) {
        let (store, arts) = flat_program(ARTIFACTS);
        let accepted_a = run("a", &store, &arts, &a);
        let before = replay(&store, "a").unwrap();
        run("b", &store, &arts, &b);
        let after = replay(&store, "a").unwrap();
        prop_assert_eq!(before.len(), accepted_a);
        prop_assert_eq!(before, after);
    }

    #[test]
    fn repeated_observation_changes_nothing(picks in prop::collection::btree_set(0..ARTIFACTS, 1..=3)) {
        let (store, arts) = flat_program(ARTIFACTS);
        let mut rec = SessionRecorder::new("s", store.clone()).unwrap();
        let selection = Selection::of_nodes(picks.iter().map(|&i| arts[i]));
        rec.start(0);
        rec.observe(&selection, 1, "prop");
        let cursor = rec.cursor();
        let nodes = store.node_count().unwrap();
        let edges = store.edge_count().unwrap();

        rec.observe(&selection, 2, "prop");
        prop_assert_eq!(rec.cursor(), cursor);
        prop_assert_eq!(store.node_count().unwrap(), nodes);
        prop_assert_eq!(store.edge_count().unwrap(), edges);
    }
}
