//! Tempo, meter, subdivision and swing turned into seconds.

use super::{Subdivision, TimeSignature};

/*
Timing Model
============

Everything the scheduler needs to know about "how far apart are the clicks"
comes from four numbers: tempo, meter, subdivision and swing. The functions
here are pure so they can be re-evaluated on every scheduler pass; a tempo
change made between two passes is picked up by the very next step.

Vocabulary
----------

  beat          One count of the meter. Its length depends on the meter's
                denominator: a quarter in 4/4, an eighth in 7/8.

  step          The smallest scheduled unit. A beat is split into
                `steps_per_beat` steps by the subdivision.

  measure       `beats_per_measure` beats. The polyrhythm stream always fits
                exactly one of its cycles into one main measure.


Normalizing the Beat Unit
-------------------------

BPM counts quarter notes. A beat whose unit is not a quarter is scaled:

    beat_duration = (60 / bpm) * (4 / beat_unit)

    120 bpm, x/4  ->  0.5 s per beat
    120 bpm, x/8  ->  0.25 s per beat
    120 bpm, x/2  ->  1.0 s per beat


Swing
-----

Swing lengthens every even-indexed step and shortens the following one by
the same amount, so pairs of steps still add up to two nominal steps:

    s = min(amount / 100, 0.75)
    factors = [1 + s/2, 1 - s/2]      (indexed by step_index % 2)

       no swing   |----|----|----|----|
       50% swing  |-----|---|-----|---|

Swing only makes sense when a beat splits into an even number of steps.
Triplet grids (3, 6, 12 steps) ignore it entirely.
*/

pub const MIN_BPM: u16 = 20;
pub const MAX_BPM: u16 = 300;
pub const MAX_SWING: u8 = 75;

/// Seconds per beat. `bpm` is clamped to the supported range first.
pub fn beat_duration(bpm: u16, meter: TimeSignature) -> f64 {
    let bpm = bpm.clamp(MIN_BPM, MAX_BPM) as f64;
    (60.0 / bpm) * meter.quarters_per_beat()
}

/// Beat length in milliseconds, as shown next to the tempo readout
pub fn tempo_ms(bpm: u16, meter: TimeSignature) -> f64 {
    beat_duration(bpm, meter) * 1000.0
}

/// Duration multipliers for alternating steps, or `None` when swing does not apply
pub fn swing_factors(swing_percent: u8, steps_per_beat: usize) -> Option<[f64; 2]> {
    if swing_percent == 0 || steps_per_beat % 2 != 0 {
        return None;
    }
    let s = (swing_percent as f64 / 100.0).min(MAX_SWING as f64 / 100.0);
    Some([1.0 + s / 2.0, 1.0 - s / 2.0])
}

/// Step timing for one scheduler pass
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TimingSnapshot {
    pub beat_duration: f64,
    pub beats_per_measure: usize,
    pub steps_per_beat: usize,
    pub base_step_duration: f64,
    pub measure_duration: f64,
    swing: Option<[f64; 2]>,
}

impl TimingSnapshot {
    pub fn new(bpm: u16, meter: TimeSignature, subdivision: Subdivision, swing_percent: u8) -> Self {
        let beat_duration = beat_duration(bpm, meter);
        let beats_per_measure = meter.beats_per_measure();
        let steps_per_beat = subdivision.steps_per_beat().max(1);

        Self {
            beat_duration,
            beats_per_measure,
            steps_per_beat,
            base_step_duration: beat_duration / steps_per_beat as f64,
            measure_duration: beat_duration * beats_per_measure as f64,
            swing: swing_factors(swing_percent, steps_per_beat),
        }
    }

    /// Steps in one measure, never zero
    pub fn total_steps(&self) -> usize {
        (self.beats_per_measure * self.steps_per_beat).max(1)
    }

    pub fn swing_factor(&self, step_index: usize) -> f64 {
        match self.swing {
            Some(factors) => factors[step_index % 2],
            None => 1.0,
        }
    }

    /// Time from step `step_index` to the one after it
    pub fn step_duration(&self, step_index: usize) -> f64 {
        self.base_step_duration * self.swing_factor(step_index)
    }

    /// Step length of a polyrhythm grid laid over one main measure
    pub fn poly_step_duration(&self, poly_beats: usize, poly_subdivision: Subdivision) -> f64 {
        let poly_total = (poly_beats * poly_subdivision.steps_per_beat()).max(1);
        self.measure_duration / poly_total as f64
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const EPS: f64 = 1e-12;

    #[test]
    fn beat_duration_normalizes_beat_unit() {
        assert!((beat_duration(120, TimeSignature::FOUR_FOUR) - 0.5).abs() < EPS);
        assert!((beat_duration(120, TimeSignature::SIX_EIGHT) - 0.25).abs() < EPS);
        assert!((beat_duration(60, TimeSignature::new(2, 2)) - 2.0).abs() < EPS);
    }

    #[test]
    fn tempo_ms_consistent_and_decreasing() {
        let meter = TimeSignature::FOUR_FOUR;
        let mut previous = f64::INFINITY;
        for bpm in MIN_BPM..=MAX_BPM {
            let beat = beat_duration(bpm, meter);
            let ms = tempo_ms(bpm, meter);
            assert!((beat - (60.0 / bpm as f64)).abs() < EPS);
            assert!((ms - beat * 1000.0).abs() < 1e-9);
            assert!(beat < previous, "beat duration must shrink as bpm grows ({bpm})");
            previous = beat;
        }
    }

    #[test]
    fn swing_ignored_for_odd_grids() {
        for swing in [0, 10, 50, 75, 100] {
            for sub in [Subdivision::Quarter, Subdivision::EighthTriplet] {
                let timing = TimingSnapshot::new(100, TimeSignature::FOUR_FOUR, sub, swing);
                for step in 0..8 {
                    assert_eq!(timing.step_duration(step), timing.base_step_duration);
                }
            }
        }
    }

    #[test]
    fn swing_factors_sum_to_two() {
        for swing in 1..=MAX_SWING {
            let [long, short] = swing_factors(swing, 2).unwrap();
            assert!((long + short - 2.0).abs() < EPS);
            assert!(long > short);
        }
    }

    #[test]
    fn swing_preserves_beat_length() {
        let timing = TimingSnapshot::new(90, TimeSignature::FOUR_FOUR, Subdivision::Sixteenth, 60);
        let total: f64 = (0..8).map(|step| timing.step_duration(step)).sum();
        assert!((total - 2.0 * timing.beat_duration).abs() < 1e-9);
    }

    #[test]
    fn swing_capped_at_max() {
        assert_eq!(swing_factors(100, 2), swing_factors(MAX_SWING, 2));
    }

    #[test]
    fn poly_grid_fits_one_measure() {
        let timing = TimingSnapshot::new(120, TimeSignature::FOUR_FOUR, Subdivision::Eighth, 0);
        let step = timing.poly_step_duration(3, Subdivision::Quarter);
        assert!((step * 3.0 - timing.measure_duration).abs() < EPS);
        assert!((timing.measure_duration - 2.0).abs() < EPS);
    }

    #[test]
    fn total_steps_never_zero() {
        let timing = TimingSnapshot::new(120, TimeSignature::new(1, 4), Subdivision::Quarter, 0);
        assert_eq!(timing.total_steps(), 1);
    }
}
