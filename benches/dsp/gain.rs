//! Benchmarks for the smoothed master gain.

use std::hint::black_box;

use clicktrack::dsp::gain::MasterGain;
use criterion::{BenchmarkId, Criterion};

use crate::BLOCK_SIZES;

pub fn bench_gain(c: &mut Criterion) {
    let mut group = c.benchmark_group("dsp/gain");

    for &size in BLOCK_SIZES {
        let mut buffer = vec![0.5f32; size];

        // Alternating targets keep the smoother moving
        let mut gain = MasterGain::new(48_000.0, 0.7);
        let mut loud = false;
        group.bench_with_input(BenchmarkId::new("gliding", size), &size, |b, _| {
            b.iter(|| {
                loud = !loud;
                gain.set_level(if loud { 1.0 } else { 0.2 });
                gain.process(black_box(&mut buffer));
            })
        });
    }

    group.finish();
}
