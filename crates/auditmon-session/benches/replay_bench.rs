//! Recorder and replay benchmarks over a flat program graph.

use criterion::{criterion_group, criterion_main, BatchSize, Criterion};

use auditmon_graph::ProgramGraph;
use auditmon_session::query::{audit_statistics, split_time_per_artifact};
use auditmon_session::{replay, Selection, SessionRecorder};
use test_fixtures::flat_program;

const ARTIFACTS: usize = 200;
const OBSERVATIONS: usize = 1_000;

/// One session cycling through single-artifact and paired observations,
/// with a break every 100 observations.
fn recorded() -> ProgramGraph {
    let (store, arts) = flat_program(ARTIFACTS);
    let mut rec = SessionRecorder::new("bench", store.clone()).unwrap();
    let mut ts = 0;
    rec.start(ts);
    for i in 0..OBSERVATIONS {
        ts += 10;
        if i > 0 && i % 100 == 0 {
            rec.stop(ts, "break");
            ts += 10;
            rec.start(ts);
            ts += 10;
        }
        let selection = if i % 3 == 0 {
            Selection::of_nodes([arts[i % ARTIFACTS], arts[(i * 7) % ARTIFACTS]])
        } else {
            Selection::from(arts[(i * 13) % ARTIFACTS])
        };
        rec.observe(&selection, ts, "bench");
    }
    rec.stop(ts + 10, "done");
    store
}

fn bench_observe(c: &mut Criterion) {
    c.bench_function("observe_1000", |b| {
        b.iter_batched(
            || flat_program(ARTIFACTS),
            |(store, arts)| {
                let mut rec = SessionRecorder::new("bench", store).unwrap();
                rec.start(0);
                for (i, ts) in (1..=OBSERVATIONS as i64).enumerate() {
                    rec.observe(&Selection::from(arts[(i * 13) % ARTIFACTS]), ts, "bench");
                }
            },
            BatchSize::SmallInput,
        );
    });
}

fn bench_replay(c: &mut Criterion) {
    let store = recorded();
    c.bench_function("replay_1000", |b| {
        b.iter(|| replay(&store, "bench").unwrap());
    });
}

fn bench_queries(c: &mut Criterion) {
    let timeline = replay(&recorded(), "bench").unwrap();
    c.bench_function("statistics_1000", |b| {
        b.iter(|| audit_statistics(&timeline));
    });
    c.bench_function("split_time_1000", |b| {
        b.iter(|| split_time_per_artifact(&timeline));
    });
}

criterion_group!(benches, bench_observe, bench_replay, bench_queries);
criterion_main!(benches);
