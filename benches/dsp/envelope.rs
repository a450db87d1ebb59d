//! Benchmarks for the click envelope.

use std::hint::black_box;

use clicktrack::dsp::envelope::Envelope;
use clicktrack::graph::node::RenderCtx;
use criterion::{BenchmarkId, Criterion};

use crate::BLOCK_SIZES;

pub fn bench_envelope(c: &mut Criterion) {
    let mut group = c.benchmark_group("dsp/envelope");
    let ctx = RenderCtx::from_freq(48_000.0, 1_100.0, 0.9);

    for &size in BLOCK_SIZES {
        let mut buffer = vec![0.0f32; size];

        // Fresh trigger: attack into the start of the decay
        let mut env = Envelope::click();
        group.bench_with_input(BenchmarkId::new("trigger", size), &size, |b, _| {
            b.iter(|| {
                env.note_on(black_box(&ctx));
                env.render(black_box(&mut buffer));
            })
        });

        // Exponential decay (one multiply per sample)
        let mut env = Envelope::with_times(0.001, 1_000.0, 0.0);
        env.note_on(&ctx);
        for _ in 0..100 {
            env.next_sample();
        }
        group.bench_with_input(BenchmarkId::new("decay", size), &size, |b, _| {
            b.iter(|| {
                env.render(black_box(&mut buffer));
            })
        });

        // Idle (voice finished)
        let mut env = Envelope::click();
        group.bench_with_input(BenchmarkId::new("idle", size), &size, |b, _| {
            b.iter(|| {
                env.render(black_box(&mut buffer));
            })
        });
    }

    group.finish();
}
