//! Benchmarks for the click synth under load.

use std::hint::black_box;

use clicktrack::{
    engine::ClickEvent,
    synth::{click::MAX_VOICES, ClickMessage, ClickSynth},
};
use criterion::{BenchmarkId, Criterion};
use rtrb::RingBuffer;

use crate::BLOCK_SIZES;

const SAMPLE_RATE: f32 = 48_000.0;

pub fn bench_clicks(c: &mut Criterion) {
    let mut group = c.benchmark_group("scenarios/clicks");

    for &size in BLOCK_SIZES {
        let mut buffer = vec![0.0f32; size];

        // === STEADY STREAM ===
        // one new click per block, as a dense subdivision would produce
        let (mut tx, rx) = RingBuffer::new(1024);
        let mut synth = ClickSynth::new(SAMPLE_RATE, rx, 0.7);
        let mut accented = false;
        group.bench_with_input(BenchmarkId::new("stream", size), &size, |b, _| {
            b.iter(|| {
                accented = !accented;
                let time = synth.frames_rendered() as f64 / SAMPLE_RATE as f64;
                let click = ClickEvent::main(time, accented);
                let _ = tx.push(ClickMessage::trigger(&click, SAMPLE_RATE));
                synth.render_block(black_box(&mut buffer));
            })
        });

        // === FULL POOL ===
        // every voice sounding, new clicks steal the oldest
        let (mut tx, rx) = RingBuffer::new(1024);
        let mut synth = ClickSynth::new(SAMPLE_RATE, rx, 1.0);
        group.bench_with_input(BenchmarkId::new("full_pool", size), &size, |b, _| {
            b.iter(|| {
                let time = synth.frames_rendered() as f64 / SAMPLE_RATE as f64;
                for i in 0..MAX_VOICES {
                    let click = ClickEvent::poly(time, i % 2 == 0, 0.8);
                    let _ = tx.push(ClickMessage::trigger(&click, SAMPLE_RATE));
                }
                synth.render_block(black_box(&mut buffer));
            })
        });
    }

    group.finish();
}
