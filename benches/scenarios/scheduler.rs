//! Benchmarks for scheduler passes.

use std::hint::black_box;

use clicktrack::{
    engine::{ClickEvent, Scheduler},
    ConfigPatch, MetronomeConfig,
};
use criterion::Criterion;

/// Seconds per UI tick at 60 Hz
const TICK: f64 = 1.0 / 60.0;

pub fn bench_scheduler(c: &mut Criterion) {
    let mut group = c.benchmark_group("scenarios/scheduler");
    let mut events: Vec<ClickEvent> = Vec::with_capacity(1024);

    // Typical: 4/4 eighths
    let config = MetronomeConfig::default();
    let mut scheduler = Scheduler::new(0.0);
    let mut now = 0.0;
    group.bench_function("default_pass", |b| {
        b.iter(|| {
            events.clear();
            now += TICK;
            black_box(scheduler.pass(black_box(&config), now, &mut events));
        })
    });

    // Dense: 300 bpm sixty-fourths with swing and a 12-beat polyrhythm
    let mut config = MetronomeConfig::default();
    config.apply(&ConfigPatch {
        bpm: Some(300),
        subdivision: Some("1/64".into()),
        swing: Some(60),
        poly_enabled: Some(true),
        poly_beats: Some(12),
        poly_subdivision: Some("1/32T".into()),
        ..Default::default()
    });
    let mut scheduler = Scheduler::new(0.0);
    let mut now = 0.0;
    group.bench_function("dense_pass", |b| {
        b.iter(|| {
            events.clear();
            now += TICK;
            black_box(scheduler.pass(black_box(&config), now, &mut events));
        })
    });

    group.finish();
}
