//! Interest scores computed from recorded sessions.

use proptest::prelude::*;

use auditmon_core::errors::{InterestError, SessionError};
use auditmon_core::models::{Granularity, NodeId, NodeSessionEntry};
use auditmon_core::IGraphStore;
use auditmon_graph::StructuralGranules;
use auditmon_interest::{InterestModel, InterestParams};
use auditmon_session::{Selection, SessionRecorder};
use test_fixtures::{flat_program, SampleProgram};

fn assert_close(actual: Option<f64>, expected: f64) {
    let actual = actual.expect("granule is tracked");
    assert!(
        (actual - expected).abs() < 1e-9,
        "expected {expected}, got {actual}"
    );
}

#[test]
fn a_b_a_c_scenario() {
    let (store, arts) = flat_program(3);
    let (a, b, c) = (arts[0], arts[1], arts[2]);
    let mut rec = SessionRecorder::new("s", store.clone()).unwrap();
    rec.start(0);
    for (ts, artifact) in [(1, a), (2, b), (3, a), (4, c)] {
        rec.observe(&Selection::from(artifact), ts, "editor");
    }
    rec.stop(5, "done");

    let model = InterestModel::new(InterestParams::new(0.1, 1.0, -10.0)).unwrap();
    let granules = StructuralGranules::new(store.clone());
    let table = model
        .compute_for_session(&store, "s", &granules, Granularity::ProgramArtifact)
        .unwrap();

    assert_eq!(table.len(), 3);
    assert_close(table.score(a), 1.8);
    assert_close(table.score(b), 0.8);
    assert_close(table.score(c), 1.0);
    let order: Vec<NodeId> = table.ranked().into_iter().map(|(g, _)| g).collect();
    assert_eq!(order, vec![a, c, b]);
}

#[test]
fn methods_roll_up_to_classes() {
    let p = SampleProgram::build();
    let mut rec = SessionRecorder::new("s", p.graph.clone()).unwrap();
    rec.start(0);
    rec.observe(&Selection::of_nodes([p.run, p.stop]), 1, "graph");
    rec.observe(&Selection::from(p.poll), 2, "editor");
    rec.observe(&Selection::from(p.main), 3, "editor");

    let granules = StructuralGranules::new(p.graph.clone());
    let model = InterestModel::default();

    let classes = model
        .compute_for_session(&p.graph, "s", &granules, Granularity::ParentClass)
        .unwrap();
    // Outer: +1 (run) +1 (stop) -0.1 (Inner) -0.1 (Main)
    assert_close(classes.score(p.outer), 1.8);
    assert_close(classes.score(p.inner), 0.9);
    assert_close(classes.score(p.main_class), 1.0);

    let packages = model
        .compute_for_session(&p.graph, "s", &granules, Granularity::Package)
        .unwrap();
    assert_close(packages.score(p.package), 2.9);
    assert_close(packages.score(p.default_package), 1.0);

    let projects = model
        .compute_for_session(&p.graph, "s", &granules, Granularity::Project)
        .unwrap();
    assert_eq!(projects.into_map().into_iter().collect::<Vec<_>>(), vec![(p.project, 4.0)]);
}

#[test]
fn threshold_drops_neglected_granules() {
    let (store, arts) = flat_program(3);
    let mut rec = SessionRecorder::new("s", store.clone()).unwrap();
    rec.start(0);
    for (ts, i) in [(1, 0), (2, 1), (3, 2), (4, 1), (5, 2)] {
        rec.observe(&Selection::from(arts[i]), ts, "m");
    }

    let granules = StructuralGranules::new(store.clone());
    let model = InterestModel::new(InterestParams::new(1.0, 1.5, -2.0)).unwrap();
    let table = model
        .compute_for_session(&store, "s", &granules, Granularity::ProgramArtifact)
        .unwrap();
    // arts[0] decays 1.5 → -2.5 over four foreign hits and is dropped.
    assert_eq!(table.len(), 2);
    assert!(table.score(arts[0]).is_none());
    assert_close(table.score(arts[1]), 1.0);
    assert_close(table.score(arts[2]), 2.0);
}

#[test]
fn inconsistent_session_surfaces_as_timeline_error() {
    let (store, arts) = flat_program(1);
    let mut rec = SessionRecorder::new("s", store.clone()).unwrap();
    rec.start(0);
    rec.observe(&Selection::from(arts[0]), 1, "m");
    // A second visit numbered on the path edge with no timestamp behind it.
    let edge = rec.cursor().last_edge.unwrap();
    let obs = rec.cursor().last_node.unwrap();
    let start = store.edge_endpoints(edge).unwrap().0;
    let back = store.create_edge(obs, start, &["observation", "s"]).unwrap();
    store.append_edge_number(back, "s", 2).unwrap();
    store
        .append_node_session(start, "s", NodeSessionEntry::Timestamp(2))
        .unwrap();
    store.append_edge_number(edge, "s", 3).unwrap();

    let granules = StructuralGranules::new(store.clone());
    let err = InterestModel::default()
        .compute_for_session(&store, "s", &granules, Granularity::ProgramArtifact)
        .unwrap_err();
    assert!(matches!(
        err,
        InterestError::Timeline(SessionError::Inconsistent { .. })
    ));
}

proptest! {
    #[test]
    fn zero_decay_counts_hits(n in 1usize..30, increase in 0.1f64..5.0) {
        let (store, arts) = flat_program(2);
        let mut rec = SessionRecorder::new("s", store.clone()).unwrap();
        rec.start(0);
        for i in 0..n {
            // Interleave a second artifact so repeats are not suppressed.
            rec.observe(&Selection::from(arts[0]), (2 * i + 1) as i64, "m");
            rec.observe(&Selection::from(arts[1]), (2 * i + 2) as i64, "m");
        }
        let model = InterestModel::new(InterestParams::new(0.0, increase, -10.0)).unwrap();
        let granules = StructuralGranules::new(store.clone());
        let table = model
            .compute_for_session(&store, "s", &granules, Granularity::ProgramArtifact)
            .unwrap();
        let expected = n as f64 * increase;
        prop_assert!((table.score(arts[0]).unwrap() - expected).abs() < 1e-6);
        prop_assert!((table.score(arts[1]).unwrap() - expected).abs() < 1e-6);
    }
}
